//! Biased, bounded random walk between two points.
//!
//! Algorithm, per step:
//! 1. Stop once the walk is within one step of the target (or out of budget)
//! 2. Candidates = directions that shrink the remaining distance on each axis,
//!    minus the reverse of the previous step, minus side steps the boundary
//!    would swallow
//! 3. With one candidate left, sometimes add a random side step for variety
//! 4. Roll main-axis vs side-axis group (normalised biases, +0.3 toward the
//!    axis with more distance left), then pick uniformly inside the group
//! 5. After `max_side_moves` side steps in a row, force a main-axis step
//!    (optionally a cap redrawn from `1..=max_side_moves` per run)
//! 6. Move, clamp the cross-axis coordinate into the window, record the point
//!
//! The walk always finishes on the exact end point. If the last walked point
//! is off on both axes, one elbow point is inserted first so the path stays
//! axis-aligned.

use crate::config::{ConfigError, WalkConfig};
use crate::geometry::{Axis, Direction, Path, Point};
use crate::rng::RandomSource;

/// Added to the weight of whichever axis has more distance left.
pub const REMAINING_DISTANCE_BOOST: f32 = 0.3;

/// Probability of injecting a side step when only one candidate remains.
pub const SIDE_STEP_CHANCE: f32 = 0.5;

/// A validated walk configuration, ready to generate paths.
#[derive(Debug, Clone)]
pub struct PathWalker {
    config: WalkConfig,
}

impl PathWalker {
    pub fn new(config: WalkConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Walk from `start` to `end`. Never fails; the result starts at `start`,
    /// ends exactly at `end` and holds at most `max_steps + 1` points.
    pub fn walk<R: RandomSource + ?Sized>(&self, start: Point, end: Point, rng: &mut R) -> Path {
        let mut path = vec![start];
        if start == end {
            return path;
        }

        let main = self.config.primary_axis;
        // Two slots are kept for the elbow and the end point.
        let move_budget = self.config.max_steps.saturating_sub(2);

        let mut current = start;
        let mut last: Option<Direction> = None;
        let mut side_run = 0u32;
        let mut side_cap = self.side_cap(rng);
        let mut moves = 0usize;

        while current.distance(end) >= self.config.step_size {
            if moves >= move_budget {
                log::debug!(
                    "walk {:?} -> {:?} hit the {}-step cap at {:?}",
                    start,
                    end,
                    self.config.max_steps,
                    current
                );
                break;
            }

            let mut candidates = self.candidates(current, end, last);
            if candidates.len() < 2
                && self.config.allow_random_side_steps
                && rng.chance(SIDE_STEP_CHANCE)
            {
                if let Some(extra) = self.random_side_step(current, end, last, &candidates, rng) {
                    candidates.push(extra);
                }
            }
            if candidates.is_empty() {
                log::debug!("walk {:?} -> {:?} boxed in at {:?}", start, end, current);
                break;
            }

            let dir = self.choose(current, end, &candidates, side_run >= side_cap, rng);
            current = self.advance(current, end, dir);
            if dir.axis() == main {
                if side_run > 0 {
                    side_cap = self.side_cap(rng);
                }
                side_run = 0;
            } else {
                side_run += 1;
            }
            path.push(current);
            last = Some(dir);
            moves += 1;
        }

        align_to_end(&mut path, end, main);
        path
    }

    /// Directions that move `current` closer to `end`, one per unfinished axis.
    fn candidates(&self, current: Point, end: Point, last: Option<Direction>) -> Vec<Direction> {
        let mut out = Vec::with_capacity(3);
        for axis in [self.config.primary_axis, self.config.cross_axis()] {
            let Some(dir) = Direction::toward(axis, current.along(axis), end.along(axis)) else {
                continue;
            };
            if last == Some(dir.opposite()) {
                continue;
            }
            if axis != self.config.primary_axis && self.is_blocked(current, end, dir) {
                continue;
            }
            out.push(dir);
        }
        out
    }

    /// A side-axis direction not already offered. Only while there is still
    /// main-axis distance to cover, so the walk never wanders once aligned.
    fn random_side_step<R: RandomSource + ?Sized>(
        &self,
        current: Point,
        end: Point,
        last: Option<Direction>,
        candidates: &[Direction],
        rng: &mut R,
    ) -> Option<Direction> {
        let main = self.config.primary_axis;
        if current.along(main) == end.along(main) {
            return None;
        }
        let options: Vec<Direction> = self
            .config
            .cross_axis()
            .directions()
            .into_iter()
            .filter(|d| !candidates.contains(d))
            .filter(|d| last != Some(d.opposite()))
            .filter(|d| !self.is_blocked(current, end, *d))
            .collect();
        if options.is_empty() {
            return None;
        }
        Some(options[rng.index(options.len())])
    }

    fn choose<R: RandomSource + ?Sized>(
        &self,
        current: Point,
        end: Point,
        candidates: &[Direction],
        side_capped: bool,
        rng: &mut R,
    ) -> Direction {
        let main = self.config.primary_axis;
        let (main_dirs, side_dirs): (Vec<Direction>, Vec<Direction>) =
            candidates.iter().copied().partition(|d| d.axis() == main);

        if side_capped && !main_dirs.is_empty() {
            return main_dirs[rng.index(main_dirs.len())];
        }

        let p_main = self.main_probability(current, end);
        let group = if rng.chance(p_main) {
            &main_dirs
        } else {
            &side_dirs
        };
        let pool = if group.is_empty() {
            candidates
        } else {
            group.as_slice()
        };
        pool[rng.index(pool.len())]
    }

    /// Side steps allowed in the current run.
    fn side_cap<R: RandomSource + ?Sized>(&self, rng: &mut R) -> u32 {
        let max = self.config.max_side_moves;
        if self.config.randomize_max_side_moves && max > 1 {
            1 + rng.index(max as usize) as u32
        } else {
            max
        }
    }

    /// Probability of choosing the main-axis group at `current`.
    pub fn main_probability(&self, current: Point, end: Point) -> f32 {
        let main = self.config.primary_axis;
        let cross = self.config.cross_axis();
        let total = self.config.main_bias + self.config.side_bias;
        let (mut w_main, mut w_side) = if total > 0.0 {
            (self.config.main_bias / total, self.config.side_bias / total)
        } else {
            (0.5, 0.5)
        };

        let left_main = (end.along(main) - current.along(main)).abs();
        let left_cross = (end.along(cross) - current.along(cross)).abs();
        if left_main > left_cross {
            w_main += REMAINING_DISTANCE_BOOST;
        } else if left_cross > left_main {
            w_side += REMAINING_DISTANCE_BOOST;
        }
        w_main / (w_main + w_side)
    }

    /// Position after one step in `dir`. Steps toward the target stop on it
    /// instead of overshooting; cross-axis moves are clamped into the window.
    fn advance(&self, from: Point, end: Point, dir: Direction) -> Point {
        let axis = dir.axis();
        let pos = from.along(axis);
        let target = end.along(axis);
        let remaining = target - pos;

        let heading_in = remaining != 0.0 && remaining.signum() == dir.sign();
        let mut next = if heading_in && remaining.abs() <= self.config.step_size {
            target
        } else {
            pos + dir.sign() * self.config.step_size
        };
        if axis == self.config.cross_axis() {
            next = self.config.bounds.clamp(next);
        }
        from.with_along(axis, next)
    }

    /// True when the boundary clamp would leave no progress in `dir`.
    fn is_blocked(&self, current: Point, end: Point, dir: Direction) -> bool {
        let axis = dir.axis();
        let moved = self.advance(current, end, dir).along(axis) - current.along(axis);
        moved * dir.sign() <= 0.0
    }
}

/// One-shot walk: validate `config`, then walk.
pub fn walk<R: RandomSource + ?Sized>(
    start: Point,
    end: Point,
    config: &WalkConfig,
    rng: &mut R,
) -> Result<Path, ConfigError> {
    Ok(PathWalker::new(*config)?.walk(start, end, rng))
}

/// Finish `path` exactly on `end`, going along `main` first if both
/// coordinates still differ.
fn align_to_end(path: &mut Path, end: Point, main: Axis) {
    let Some(&last) = path.last() else {
        path.push(end);
        return;
    };
    if last == end {
        return;
    }
    if last.x != end.x && last.y != end.y {
        path.push(last.with_along(main, end.along(main)));
    }
    path.push(end);
}
