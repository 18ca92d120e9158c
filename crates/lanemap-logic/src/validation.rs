//! Structural checks for generated maps.
//!
//! Pure functions over paths, segments and rooms that return validation
//! errors instead of panicking. The harness runs [`validate_layout`] over
//! every generated map.

use crate::config::{CrossBounds, MapConfig, MapGenConfig};
use crate::geometry::{Axis, Direction, Point, RoomRect, Segment};
use crate::lanes::LaneKind;
use crate::pipeline::MapLayout;

/// Slack for float comparisons on coordinates.
const TOLERANCE: f32 = 1e-3;

/// A validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

impl ValidationError {
    fn error(category: &'static str, message: String) -> Self {
        Self {
            category,
            severity: Severity::Error,
            message,
        }
    }
}

// ── A. Paths ────────────────────────────────────────────────────────────

/// Check that `path` starts near `start` and ends near `end`.
pub fn check_path_endpoints(
    path: &[Point],
    start: Point,
    end: Point,
    tolerance: f32,
) -> Vec<ValidationError> {
    let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
        return vec![ValidationError::error("path", "Path is empty".to_string())];
    };
    let mut errors = Vec::new();
    if first.distance(start) > tolerance {
        errors.push(ValidationError::error(
            "path",
            format!("Path starts at {first:?}, expected {start:?}"),
        ));
    }
    if last.distance(end) > tolerance {
        errors.push(ValidationError::error(
            "path",
            format!("Path ends at {last:?}, expected {end:?}"),
        ));
    }
    errors
}

/// Check that consecutive points differ along exactly one axis.
pub fn check_path_axis_aligned(path: &[Point]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, pair) in path.windows(2).enumerate() {
        if Direction::between(pair[0], pair[1]).is_none() {
            errors.push(ValidationError::error(
                "path",
                format!(
                    "Step {} is not a single-axis move: {:?} → {:?}",
                    i, pair[0], pair[1]
                ),
            ));
        }
    }
    errors
}

/// Check that every point between the endpoints stays inside `bounds`
/// along `axis`.
pub fn check_path_bounds(path: &[Point], axis: Axis, bounds: CrossBounds) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if path.len() < 3 {
        return errors;
    }
    for (i, p) in path.iter().enumerate().take(path.len() - 1).skip(1) {
        let v = p.along(axis);
        if v < bounds.min - TOLERANCE || v > bounds.max + TOLERANCE {
            errors.push(ValidationError::error(
                "path",
                format!(
                    "Point {} at {:?} leaves [{:.1}, {:.1}] on {:?}",
                    i, p, bounds.min, bounds.max, axis
                ),
            ));
        }
    }
    errors
}

/// Check that no step immediately undoes the previous one. Turns at the
/// indices in `joints` are allowed.
pub fn check_no_reversals(path: &[Point], joints: &[usize]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, w) in path.windows(3).enumerate() {
        let at = i + 1;
        if joints.contains(&at) {
            continue;
        }
        let (Some(a), Some(b)) = (Direction::between(w[0], w[1]), Direction::between(w[1], w[2]))
        else {
            continue; // caught by the alignment check
        };
        if b == a.opposite() {
            errors.push(ValidationError::error(
                "path",
                format!("Reversal at point {at} {:?}: {a:?} then {b:?}", w[1]),
            ));
        }
    }
    errors
}

// ── B. Segments ─────────────────────────────────────────────────────────

/// Check that `segments` chain from the first to the last point of `path`.
pub fn check_segments_cover_path(path: &[Point], segments: &[Segment]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let distinct = path.windows(2).any(|w| w[0] != w[1]);
    if !distinct {
        if !segments.is_empty() {
            errors.push(ValidationError::error(
                "segments",
                format!("{} segments for a path without movement", segments.len()),
            ));
        }
        return errors;
    }

    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return vec![ValidationError::error(
            "segments",
            "No segments for a moving path".to_string(),
        )];
    };
    if segments.len() > path.len() - 1 {
        errors.push(ValidationError::error(
            "segments",
            format!(
                "{} segments for {} points",
                segments.len(),
                path.len()
            ),
        ));
    }
    if first.start != path[0] {
        errors.push(ValidationError::error(
            "segments",
            format!("First segment starts at {:?}, path at {:?}", first.start, path[0]),
        ));
    }
    if Some(&last.end) != path.last() {
        errors.push(ValidationError::error(
            "segments",
            format!("Last segment ends at {:?}, path at {:?}", last.end, path.last()),
        ));
    }
    for (i, pair) in segments.windows(2).enumerate() {
        if pair[0].end != pair[1].start {
            errors.push(ValidationError::error(
                "segments",
                format!(
                    "Segments {} and {} do not share a boundary: {:?} vs {:?}",
                    i,
                    i + 1,
                    pair[0].end,
                    pair[1].start
                ),
            ));
        }
    }
    errors
}

// ── C. Rooms ────────────────────────────────────────────────────────────

/// Check that no room has zero or negative dimensions.
pub fn check_room_dimensions(rooms: &[RoomRect]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, r) in rooms.iter().enumerate() {
        if !(r.width > 0.0 && r.height > 0.0) {
            errors.push(ValidationError::error(
                "room_geometry",
                format!(
                    "{:?} #{} has non-positive dimensions: {}×{}",
                    r.kind, i, r.width, r.height
                ),
            ));
        }
    }
    errors
}

/// Rooms hanging off the canvas are legal but clipped when drawn.
pub fn check_rooms_within_canvas(rooms: &[RoomRect], map: &MapConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, r) in rooms.iter().enumerate() {
        let rect = r.rect();
        if rect.x < -TOLERANCE
            || rect.y < -TOLERANCE
            || rect.right() > map.width + TOLERANCE
            || rect.bottom() > map.height + TOLERANCE
        {
            errors.push(ValidationError {
                category: "room_geometry",
                severity: Severity::Warning,
                message: format!(
                    "{:?} #{} extends outside canvas: ({:.1},{:.1})→({:.1},{:.1}) vs {}×{}",
                    r.kind,
                    i,
                    rect.x,
                    rect.y,
                    rect.right(),
                    rect.bottom(),
                    map.width,
                    map.height
                ),
            });
        }
    }
    errors
}

// ── Master ──────────────────────────────────────────────────────────────

/// Run every check on every lane of `layout`. Messages are prefixed with
/// the lane they concern.
pub fn validate_layout(layout: &MapLayout, config: &MapGenConfig) -> Vec<ValidationError> {
    let map = &layout.config;
    let mut all = Vec::new();
    for lane in &layout.lanes {
        // middle lane endpoints are jittered sideways off the spawns
        let endpoint_slack = match lane.kind {
            LaneKind::Middle => config.middle_jitter_ratio * map.width + TOLERANCE,
            LaneKind::Left | LaneKind::Right => TOLERANCE,
        };

        let mut lane_errors = Vec::new();
        lane_errors.extend(check_path_endpoints(
            &lane.path,
            layout.bottom_spawn,
            layout.top_spawn,
            endpoint_slack,
        ));
        lane_errors.extend(check_path_axis_aligned(&lane.path));
        lane_errors.extend(check_path_bounds(
            &lane.path,
            Axis::Horizontal,
            CrossBounds::new(0.0, map.width),
        ));
        lane_errors.extend(check_path_bounds(
            &lane.path,
            Axis::Vertical,
            CrossBounds::new(0.0, map.height),
        ));
        lane_errors.extend(check_no_reversals(&lane.path, &lane.joints));
        lane_errors.extend(check_segments_cover_path(&lane.path, &lane.segments));
        lane_errors.extend(check_room_dimensions(&lane.rooms));
        lane_errors.extend(check_rooms_within_canvas(&lane.rooms, map));

        for mut e in lane_errors {
            e.message = format!("{:?} lane: {}", lane.kind, e.message);
            all.push(e);
        }
    }
    all
}

/// Number of [`Severity::Error`] entries.
pub fn count_errors(errors: &[ValidationError]) -> usize {
    errors
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, RoomKind};
    use crate::pipeline::generate_map;
    use crate::rng::RngSource;
    use crate::segments::decompose;

    fn make_room(x: f32, y: f32, w: f32, h: f32) -> RoomRect {
        RoomRect::from_rect(Rect::new(x, y, w, h), RoomKind::Room)
    }

    fn pts(raw: &[(f32, f32)]) -> Vec<Point> {
        raw.iter().map(|&p| p.into()).collect()
    }

    #[test]
    fn test_endpoints() {
        let path = pts(&[(0.0, 0.0), (0.0, 10.0)]);
        assert!(check_path_endpoints(&path, path[0], path[1], TOLERANCE).is_empty());
        let errors = check_path_endpoints(&path, path[1], path[1], TOLERANCE);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("starts"));
        assert_eq!(check_path_endpoints(&[], path[0], path[1], 1.0).len(), 1);
    }

    #[test]
    fn test_diagonal_and_repeated_steps_flagged() {
        let path = pts(&[(0.0, 0.0), (0.0, 10.0), (5.0, 15.0), (5.0, 15.0)]);
        let errors = check_path_axis_aligned(&path);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.severity == Severity::Error));
    }

    #[test]
    fn test_bounds_skip_endpoints() {
        let path = pts(&[(-50.0, 0.0), (10.0, 0.0), (10.0, 10.0), (200.0, 10.0)]);
        let bounds = CrossBounds::new(0.0, 100.0);
        assert!(check_path_bounds(&path, Axis::Horizontal, bounds).is_empty());

        let bad = pts(&[(0.0, 0.0), (150.0, 0.0), (150.0, 10.0)]);
        assert_eq!(check_path_bounds(&bad, Axis::Horizontal, bounds).len(), 1);
    }

    #[test]
    fn test_reversal_detected_unless_joint() {
        let path = pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, 0.0)]);
        assert_eq!(check_no_reversals(&path, &[]).len(), 1);
        assert!(check_no_reversals(&path, &[1]).is_empty());
        let turn = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        assert!(check_no_reversals(&turn, &[]).is_empty());
    }

    #[test]
    fn test_segments_cover_path() {
        let path = pts(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0)]);
        let segs = decompose(&path);
        assert!(check_segments_cover_path(&path, &segs).is_empty());
        assert_eq!(check_segments_cover_path(&path, &segs[..1]).len(), 1);
        assert_eq!(check_segments_cover_path(&path, &[]).len(), 1);
        assert!(check_segments_cover_path(&path[..1], &[]).is_empty());
    }

    #[test]
    fn test_zero_dimension_room() {
        let rooms = vec![make_room(0.0, 0.0, 10.0, 10.0), make_room(0.0, 0.0, 0.0, 10.0)];
        let errors = check_room_dimensions(&rooms);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].category, "room_geometry");
    }

    #[test]
    fn test_room_off_canvas_is_warning() {
        let map = MapConfig::square(100.0);
        let rooms = vec![make_room(90.0, 10.0, 20.0, 20.0), make_room(10.0, 10.0, 20.0, 20.0)];
        let errors = check_rooms_within_canvas(&rooms, &map);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].severity, Severity::Warning);
        assert_eq!(count_errors(&errors), 0);
    }

    #[test]
    fn test_generated_maps_have_no_errors() {
        let cfg = MapGenConfig::default();
        for seed in 0..20 {
            for map in [MapConfig::square(1000.0), MapConfig::new(1600.0, 900.0)] {
                let layout = generate_map(&map, &cfg, &mut RngSource::seeded(seed)).unwrap();
                let errors = validate_layout(&layout, &cfg);
                let hard: Vec<_> = errors
                    .iter()
                    .filter(|e| e.severity == Severity::Error)
                    .collect();
                assert!(hard.is_empty(), "seed {seed}: {hard:?}");
            }
        }
    }

    #[test]
    fn test_messages_name_the_lane() {
        let cfg = MapGenConfig::default();
        let mut layout =
            generate_map(&MapConfig::default(), &cfg, &mut RngSource::seeded(3)).unwrap();
        layout.lanes[1].rooms.push(make_room(0.0, 0.0, -1.0, 5.0));
        let errors = validate_layout(&layout, &cfg);
        assert!(errors.iter().any(|e| e.message.starts_with("Left lane:")));
    }
}
