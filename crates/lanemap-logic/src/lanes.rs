//! Lane construction: spawn points, C-lane waypoints and walk windows.
//!
//! Layout (fractions of the canvas):
//!
//! ```text
//!            top spawn (1/2, 1/6)
//!   upper-left (1/6, 1/4)     upper-right (5/6, 1/4)
//!   lower-left (1/6, 3/4)     lower-right (5/6, 3/4)
//!            bottom spawn (1/2, 5/6)
//! ```
//!
//! The middle lane walks straight up between jittered spawn points. Each
//! side lane is three legs: bottom spawn → lower corner, lower corner →
//! upper corner, upper corner → top spawn. Every walk window is derived
//! from this fixed geometry only, never from another lane's output.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, CrossBounds, LaneTuning, MapConfig, MapGenConfig};
use crate::geometry::{Axis, Path, Point};
use crate::rng::RandomSource;
use crate::walker::PathWalker;

pub const SPAWN_TOP_RATIO: f32 = 1.0 / 6.0;
pub const SPAWN_BOTTOM_RATIO: f32 = 5.0 / 6.0;
pub const CORNER_LEFT_RATIO: f32 = 1.0 / 6.0;
pub const CORNER_RIGHT_RATIO: f32 = 5.0 / 6.0;
pub const CORNER_UPPER_RATIO: f32 = 0.25;
pub const CORNER_LOWER_RATIO: f32 = 0.75;

/// Which of the three lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneKind {
    Middle,
    Left,
    Right,
}

impl LaneKind {
    /// Build order.
    pub const ALL: [LaneKind; 3] = [LaneKind::Middle, LaneKind::Left, LaneKind::Right];
}

/// Fixed anchor points of a map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoints {
    pub bottom_spawn: Point,
    pub top_spawn: Point,
    pub lower_left: Point,
    pub upper_left: Point,
    pub lower_right: Point,
    pub upper_right: Point,
}

impl Waypoints {
    pub fn for_map(map: &MapConfig) -> Self {
        let (w, h) = (map.width, map.height);
        Self {
            bottom_spawn: Point::new(w / 2.0, SPAWN_BOTTOM_RATIO * h),
            top_spawn: Point::new(w / 2.0, SPAWN_TOP_RATIO * h),
            lower_left: Point::new(CORNER_LEFT_RATIO * w, CORNER_LOWER_RATIO * h),
            upper_left: Point::new(CORNER_LEFT_RATIO * w, CORNER_UPPER_RATIO * h),
            lower_right: Point::new(CORNER_RIGHT_RATIO * w, CORNER_LOWER_RATIO * h),
            upper_right: Point::new(CORNER_RIGHT_RATIO * w, CORNER_UPPER_RATIO * h),
        }
    }

    /// Corner waypoints of a side lane, lower first.
    pub fn corners(&self, side: LaneKind) -> Option<(Point, Point)> {
        match side {
            LaneKind::Middle => None,
            LaneKind::Left => Some((self.lower_left, self.upper_left)),
            LaneKind::Right => Some((self.lower_right, self.upper_right)),
        }
    }
}

/// Centerlines of all three lanes. Side lanes keep their legs separate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lanes {
    pub middle: Path,
    pub left: [Path; 3],
    pub right: [Path; 3],
}

impl Lanes {
    pub fn legs(&self, kind: LaneKind) -> &[Path] {
        match kind {
            LaneKind::Middle => std::slice::from_ref(&self.middle),
            LaneKind::Left => &self.left,
            LaneKind::Right => &self.right,
        }
    }

    /// The lane's legs joined into one path; shared joints appear once.
    pub fn lane_path(&self, kind: LaneKind) -> Path {
        self.join(kind).0
    }

    /// Indices into [`Lanes::lane_path`] where one leg hands over to the next.
    pub fn joints(&self, kind: LaneKind) -> Vec<usize> {
        self.join(kind).1
    }

    fn join(&self, kind: LaneKind) -> (Path, Vec<usize>) {
        let mut joined: Path = Vec::new();
        let mut joints = Vec::new();
        for leg in self.legs(kind) {
            if !joined.is_empty() && !leg.is_empty() {
                joints.push(joined.len() - 1);
            }
            let skip = match (joined.last(), leg.first()) {
                (Some(a), Some(b)) if a == b => 1,
                _ => 0,
            };
            joined.extend(leg.iter().skip(skip).copied());
        }
        (joined, joints)
    }
}

/// Cross-axis window of the middle lane: centred between its endpoints and
/// widened by half their horizontal separation.
pub fn middle_window(map: &MapConfig, tuning: &LaneTuning, start: Point, end: Point) -> CrossBounds {
    let center = (start.x + end.x) / 2.0;
    let half = tuning.cross_margin_ratio * map.width + (start.x - end.x).abs() * 0.5;
    CrossBounds::new(center - half, center + half).clamped_to(0.0, map.width)
}

/// y-window of a horizontal leg: the span of its endpoints plus a margin.
pub fn horizontal_leg_window(map: &MapConfig, tuning: &LaneTuning, a: Point, b: Point) -> CrossBounds {
    let margin = tuning.cross_margin_ratio * map.height;
    CrossBounds::new(a.y.min(b.y) - margin, a.y.max(b.y) + margin).clamped_to(0.0, map.height)
}

/// x-window of a vertical corner-to-corner leg.
pub fn vertical_leg_window(map: &MapConfig, tuning: &LaneTuning, corner_x: f32) -> CrossBounds {
    let margin = tuning.cross_margin_ratio * map.width;
    CrossBounds::new(corner_x - margin, corner_x + margin).clamped_to(0.0, map.width)
}

/// Build the middle lane and both side lanes, in that order.
pub fn build_lanes<R: RandomSource + ?Sized>(
    map: &MapConfig,
    config: &MapGenConfig,
    rng: &mut R,
) -> Result<Lanes, ConfigError> {
    map.validate()?;
    let points = Waypoints::for_map(map);

    let jitter = config.middle_jitter_ratio * map.width;
    let middle_start = Point::new(
        points.bottom_spawn.x + rng.range(-jitter, jitter),
        points.bottom_spawn.y,
    );
    let middle_end = Point::new(
        points.top_spawn.x + rng.range(-jitter, jitter),
        points.top_spawn.y,
    );
    let window = middle_window(map, &config.middle, middle_start, middle_end);
    let middle = walk_leg(
        map,
        config,
        &config.middle,
        Axis::Vertical,
        window,
        middle_start,
        middle_end,
        rng,
    )?;

    let left = build_side_lane(map, config, &points, LaneKind::Left, rng)?;
    let right = build_side_lane(map, config, &points, LaneKind::Right, rng)?;

    Ok(Lanes {
        middle,
        left,
        right,
    })
}

fn build_side_lane<R: RandomSource + ?Sized>(
    map: &MapConfig,
    config: &MapGenConfig,
    points: &Waypoints,
    side: LaneKind,
    rng: &mut R,
) -> Result<[Path; 3], ConfigError> {
    let Some((lower, upper)) = points.corners(side) else {
        return Ok(Default::default());
    };
    let horizontal = &config.side_horizontal;
    let vertical = &config.side_vertical;

    let entry = walk_leg(
        map,
        config,
        horizontal,
        Axis::Horizontal,
        horizontal_leg_window(map, horizontal, points.bottom_spawn, lower),
        points.bottom_spawn,
        lower,
        rng,
    )?;
    let flank = walk_leg(
        map,
        config,
        vertical,
        Axis::Vertical,
        vertical_leg_window(map, vertical, lower.x),
        lower,
        upper,
        rng,
    )?;
    let exit = walk_leg(
        map,
        config,
        horizontal,
        Axis::Horizontal,
        horizontal_leg_window(map, horizontal, upper, points.top_spawn),
        upper,
        points.top_spawn,
        rng,
    )?;
    Ok([entry, flank, exit])
}

#[allow(clippy::too_many_arguments)]
fn walk_leg<R: RandomSource + ?Sized>(
    map: &MapConfig,
    config: &MapGenConfig,
    tuning: &LaneTuning,
    axis: Axis,
    bounds: CrossBounds,
    from: Point,
    to: Point,
    rng: &mut R,
) -> Result<Path, ConfigError> {
    let walker = PathWalker::new(tuning.walk_config(map, axis, bounds, config.max_steps))?;
    Ok(walker.walk(from, to, rng))
}
