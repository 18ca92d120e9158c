//! Room and corridor placement along lane segments.
//!
//! One rectangle per non-degenerate segment:
//! - axis-aligned segments are rooms or corridors (coin flip), sized
//!   `segment length × stretch` along the segment and a room/corridor
//!   width across it, then nudged sideways by up to a sixth of that width
//! - diagonal segments are always corridors covering the segment's
//!   bounding box, padded by a corridor width

use crate::config::{MapConfig, RoomConfig};
use crate::geometry::{Axis, Rect, RoomKind, RoomRect, Segment};
use crate::rng::RandomSource;

/// Place one rectangle per segment with positive length.
///
/// `config` is expected to be validated (see [`crate::config::MapGenConfig`]);
/// with a valid config every returned rectangle has positive width and height.
pub fn generate<R: RandomSource + ?Sized>(
    segments: &[Segment],
    map: &MapConfig,
    config: &RoomConfig,
    rng: &mut R,
) -> Vec<RoomRect> {
    let mut rooms = Vec::with_capacity(segments.len());
    for segment in segments {
        let length = segment.length();
        if !(length > 0.0) {
            continue;
        }
        let room = match segment.orientation.axis() {
            Some(axis) => place_along(segment, axis, length, map, config, rng),
            None => place_diagonal(segment, map, config, rng),
        };
        rooms.push(room);
    }
    rooms
}

fn place_along<R: RandomSource + ?Sized>(
    segment: &Segment,
    axis: Axis,
    length: f32,
    map: &MapConfig,
    config: &RoomConfig,
    rng: &mut R,
) -> RoomRect {
    let kind = if rng.chance(config.room_chance) {
        RoomKind::Room
    } else {
        RoomKind::Corridor
    };
    let cross_size = cross_size(kind, map, config, rng);
    let along_size = length * rng.range(config.stretch_min, config.stretch_max);

    let max_offset = cross_size / config.offset_divisor;
    let offset = rng.range(-max_offset, max_offset);
    let across = axis.perpendicular();
    let mid = segment.midpoint();
    let center = mid.with_along(across, mid.along(across) + offset);

    let (width, height) = match axis {
        Axis::Horizontal => (along_size, cross_size),
        Axis::Vertical => (cross_size, along_size),
    };
    RoomRect::from_rect(Rect::centered(center, width, height), kind)
}

fn place_diagonal<R: RandomSource + ?Sized>(
    segment: &Segment,
    map: &MapConfig,
    config: &RoomConfig,
    rng: &mut R,
) -> RoomRect {
    let pad = cross_size(RoomKind::Corridor, map, config, rng);
    let width = (segment.end.x - segment.start.x).abs() + pad;
    let height = (segment.end.y - segment.start.y).abs() + pad;
    RoomRect::from_rect(
        Rect::centered(segment.midpoint(), width, height),
        RoomKind::Corridor,
    )
}

/// Width across the segment for a rectangle of `kind`.
fn cross_size<R: RandomSource + ?Sized>(
    kind: RoomKind,
    map: &MapConfig,
    config: &RoomConfig,
    rng: &mut R,
) -> f32 {
    let (lo, hi) = match kind {
        RoomKind::Room => (config.room_min_ratio, config.room_max_ratio),
        RoomKind::Corridor => (config.corridor_min_ratio, config.corridor_max_ratio),
    };
    rng.range(lo, hi) * map.width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Orientation, Point};
    use crate::rng::{RngSource, ScriptedSource};

    fn seg(a: (f32, f32), b: (f32, f32)) -> Segment {
        let (start, end) = (Point::from(a), Point::from(b));
        Segment {
            start,
            end,
            orientation: Orientation::of(start, end),
        }
    }

    #[test]
    fn test_vertical_room_centered() {
        let map = MapConfig::square(1000.0);
        // room, smallest room width, no stretch, zero offset
        let mut rng = ScriptedSource::new(vec![0.0, 0.0, 0.0, 0.5]);
        let rooms = generate(
            &[seg((100.0, 0.0), (100.0, 200.0))],
            &map,
            &RoomConfig::default(),
            &mut rng,
        );
        assert_eq!(rooms.len(), 1);
        let r = rooms[0];
        assert_eq!(r.kind, RoomKind::Room);
        assert!((r.width - 100.0).abs() < 1e-3);
        assert!((r.height - 200.0).abs() < 1e-3);
        assert!((r.x - 50.0).abs() < 1e-3);
        assert!(r.y.abs() < 1e-3);
    }

    #[test]
    fn test_horizontal_corridor_offset_across_only() {
        let map = MapConfig::square(1000.0);
        // corridor, widest corridor (~60), max stretch, max offset
        let mut rng = ScriptedSource::new(vec![0.9, 0.999, 0.999, 0.999]);
        let rooms = generate(
            &[seg((0.0, 500.0), (100.0, 500.0))],
            &map,
            &RoomConfig::default(),
            &mut rng,
        );
        let r = rooms[0];
        assert_eq!(r.kind, RoomKind::Corridor);
        assert!(r.height > 59.0 && r.height <= 60.0);
        assert!(r.width > 119.0 && r.width <= 120.0);
        // along-axis centre untouched, across-axis shifted by at most h/6
        assert!((r.center().x - 50.0).abs() < 1e-3);
        let shift = r.center().y - 500.0;
        assert!(shift > 0.0 && shift <= r.height / 6.0 + 1e-3);
    }

    #[test]
    fn test_diagonal_is_padded_corridor() {
        let map = MapConfig::square(1000.0);
        let mut rng = ScriptedSource::constant(0.0);
        let rooms = generate(
            &[seg((0.0, 0.0), (30.0, 40.0))],
            &map,
            &RoomConfig::default(),
            &mut rng,
        );
        let r = rooms[0];
        assert_eq!(r.kind, RoomKind::Corridor);
        assert!((r.width - 60.0).abs() < 1e-3);
        assert!((r.height - 70.0).abs() < 1e-3);
        assert!((r.center().x - 15.0).abs() < 1e-3);
        assert!((r.center().y - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_segment_skipped() {
        let map = MapConfig::square(1000.0);
        let mut rng = ScriptedSource::constant(0.3);
        let rooms = generate(
            &[seg((5.0, 5.0), (5.0, 5.0)), seg((5.0, 5.0), (5.0, 50.0))],
            &map,
            &RoomConfig::default(),
            &mut rng,
        );
        assert_eq!(rooms.len(), 1);
    }

    #[test]
    fn test_sizes_stay_in_configured_ranges() {
        let map = MapConfig::square(800.0);
        let cfg = RoomConfig::default();
        let segs = vec![
            seg((0.0, 0.0), (0.0, 120.0)),
            seg((0.0, 120.0), (90.0, 120.0)),
            seg((90.0, 120.0), (90.0, 400.0)),
        ];
        let mut rng = RngSource::seeded(11);
        for _ in 0..200 {
            for (room, s) in generate(&segs, &map, &cfg, &mut rng).iter().zip(&segs) {
                assert!(room.width > 0.0 && room.height > 0.0);
                let axis = s.orientation.axis().unwrap();
                let along = room.extent_on(axis);
                let across = room.extent_on(axis.perpendicular());
                assert!(along >= s.length() * cfg.stretch_min - 1e-3);
                assert!(along <= s.length() * cfg.stretch_max + 1e-3);
                let (lo, hi) = match room.kind {
                    RoomKind::Room => (cfg.room_min_ratio, cfg.room_max_ratio),
                    RoomKind::Corridor => (cfg.corridor_min_ratio, cfg.corridor_max_ratio),
                };
                assert!(across >= lo * map.width - 1e-3 && across <= hi * map.width + 1e-3);
            }
        }
    }
}
