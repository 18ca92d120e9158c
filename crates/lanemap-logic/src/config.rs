//! Generation configuration and its validation.
//!
//! Every recognised option lives in an explicit struct with a `Default`, so
//! a JSON file only needs to name the values it overrides:
//!
//! ```
//! use lanemap_logic::config::MapGenConfig;
//!
//! let config: MapGenConfig = serde_json::from_str(r#"{ "gaps": { "threshold": 12.0 } }"#).unwrap();
//! assert_eq!(config.gaps.threshold, 12.0);
//! assert!(config.validate().is_ok());
//! ```
//!
//! Configs are validated once, when a [`crate::walker::PathWalker`] is built
//! or when [`crate::pipeline::generate_map`] starts. Nothing downstream
//! re-checks them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Axis;

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("canvas must have positive finite size, got {width}×{height}")]
    InvalidCanvas { width: f32, height: f32 },
    #[error("step size must be positive and finite, got {0}")]
    InvalidStepSize(f32),
    #[error("biases must be non-negative and finite, got main={main} side={side}")]
    InvalidBias { main: f32, side: f32 },
    #[error("cross-axis bounds are inverted: min={min} > max={max}")]
    InvertedBounds { min: f32, max: f32 },
    #[error("cross-axis bounds must be finite")]
    NonFiniteBounds,
    #[error("max_steps must be at least 2, got {0}")]
    TooFewSteps(usize),
    #[error("{name} must be in [{lo}, {hi}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
        lo: f32,
        hi: f32,
    },
    #[error("{name} range is inverted: {min} > {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
}

// ── Canvas ──────────────────────────────────────────────────────────────

/// Immutable canvas dimensions, passed into every component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub width: f32,
    pub height: f32,
}

impl MapConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn square(size: f32) -> Self {
        Self::new(size, size)
    }

    /// Shorter side of the canvas.
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Extent of the canvas along `axis`.
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidCanvas {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::square(1000.0)
    }
}

// ── Single walk ─────────────────────────────────────────────────────────

/// Inclusive window for the cross-axis coordinate of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossBounds {
    pub min: f32,
    pub max: f32,
}

impl CrossBounds {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Unbounded in practice: the full finite `f32` range.
    pub fn unbounded() -> Self {
        Self::new(f32::MIN, f32::MAX)
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn clamp(&self, v: f32) -> f32 {
        v.clamp(self.min, self.max)
    }

    /// Shrink this window to fit inside `[lo, hi]`, keeping it non-inverted.
    pub fn clamped_to(&self, lo: f32, hi: f32) -> Self {
        let min = self.min.clamp(lo, hi);
        let max = self.max.clamp(lo, hi);
        Self::new(min.min(max), max.max(min))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::NonFiniteBounds);
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Parameters of one [`crate::walker::PathWalker`] run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Distance covered by one step.
    pub step_size: f32,
    /// Consecutive side-axis steps allowed before a main-axis step is forced.
    pub max_side_moves: u32,
    /// Redraw the side-run cap uniformly from `1..=max_side_moves` at the
    /// start of the walk and whenever a side run ends.
    pub randomize_max_side_moves: bool,
    /// Window for the cross-axis coordinate.
    pub bounds: CrossBounds,
    /// Relative weight of the main-axis group. Normalised with `side_bias`.
    pub main_bias: f32,
    /// Relative weight of the side-axis group.
    pub side_bias: f32,
    /// Occasionally add a side step when only one candidate is left.
    pub allow_random_side_steps: bool,
    /// Main travel axis; the cross axis is its perpendicular.
    pub primary_axis: Axis,
    /// Upper bound on points in the returned path, minus one.
    pub max_steps: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            step_size: 100.0,
            max_side_moves: 2,
            randomize_max_side_moves: false,
            bounds: CrossBounds::unbounded(),
            main_bias: 0.5,
            side_bias: 0.5,
            allow_random_side_steps: true,
            primary_axis: Axis::Vertical,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl WalkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(ConfigError::InvalidStepSize(self.step_size));
        }
        let bias_ok = |b: f32| b.is_finite() && b >= 0.0;
        if !bias_ok(self.main_bias) || !bias_ok(self.side_bias) {
            return Err(ConfigError::InvalidBias {
                main: self.main_bias,
                side: self.side_bias,
            });
        }
        self.bounds.validate()?;
        if self.max_steps < 2 {
            return Err(ConfigError::TooFewSteps(self.max_steps));
        }
        Ok(())
    }

    pub fn cross_axis(&self) -> Axis {
        self.primary_axis.perpendicular()
    }
}

/// Runaway guard for a single walk.
pub const DEFAULT_MAX_STEPS: usize = 1000;

// ── Per-lane tuning ─────────────────────────────────────────────────────

/// Hand-tuned walk parameters for one class of lane leg. Sizes are
/// fractions of the canvas so the same tuning works at any resolution.
///
/// No field-level serde defaults: an override must spell out the whole leg,
/// since the three legs have different defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneTuning {
    /// Step size as a fraction of the canvas' shorter side.
    pub step_ratio: f32,
    pub max_side_moves: u32,
    pub main_bias: f32,
    pub side_bias: f32,
    pub allow_random_side_steps: bool,
    /// Cross-axis window padding as a fraction of the canvas extent on
    /// that axis.
    pub cross_margin_ratio: f32,
}

impl Default for LaneTuning {
    fn default() -> Self {
        Self::middle()
    }
}

impl LaneTuning {
    /// Straight-up middle lane: weaves freely inside a narrow window.
    pub fn middle() -> Self {
        Self {
            step_ratio: 0.08,
            max_side_moves: 2,
            main_bias: 0.3,
            side_bias: 0.7,
            allow_random_side_steps: true,
            cross_margin_ratio: 0.06,
        }
    }

    /// Spawn ↔ corner legs of the C lanes: mostly straight.
    pub fn side_horizontal() -> Self {
        Self {
            step_ratio: 0.06,
            max_side_moves: 1,
            main_bias: 0.7,
            side_bias: 0.3,
            allow_random_side_steps: true,
            cross_margin_ratio: 0.04,
        }
    }

    /// Corner ↔ corner leg of the C lanes.
    pub fn side_vertical() -> Self {
        Self {
            step_ratio: 0.07,
            max_side_moves: 2,
            main_bias: 0.4,
            side_bias: 0.6,
            allow_random_side_steps: true,
            cross_margin_ratio: 0.04,
        }
    }

    /// Concrete walk parameters for a leg on `map`.
    pub fn walk_config(
        &self,
        map: &MapConfig,
        primary_axis: Axis,
        bounds: CrossBounds,
        max_steps: usize,
    ) -> WalkConfig {
        WalkConfig {
            step_size: self.step_ratio * map.min_side(),
            max_side_moves: self.max_side_moves,
            randomize_max_side_moves: false,
            bounds,
            main_bias: self.main_bias,
            side_bias: self.side_bias,
            allow_random_side_steps: self.allow_random_side_steps,
            primary_axis,
            max_steps,
        }
    }

    fn errors(&self, out: &mut Vec<ConfigError>) {
        if !(self.step_ratio.is_finite() && self.step_ratio > 0.0) {
            out.push(ConfigError::InvalidStepSize(self.step_ratio));
        }
        let bias_ok = |b: f32| b.is_finite() && b >= 0.0;
        if !bias_ok(self.main_bias) || !bias_ok(self.side_bias) {
            out.push(ConfigError::InvalidBias {
                main: self.main_bias,
                side: self.side_bias,
            });
        }
        check_ratio(out, "cross_margin_ratio", self.cross_margin_ratio, 0.0, 1.0);
    }
}

// ── Rooms & gaps ────────────────────────────────────────────────────────

/// Room/corridor sizing. Size ratios are fractions of the canvas width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Probability that an axis-aligned segment becomes a room.
    pub room_chance: f32,
    pub room_min_ratio: f32,
    pub room_max_ratio: f32,
    pub corridor_min_ratio: f32,
    pub corridor_max_ratio: f32,
    /// Along-axis stretch so neighbours overlap instead of leaving seams.
    pub stretch_min: f32,
    pub stretch_max: f32,
    /// Cross-axis jitter is at most `cross_size / offset_divisor`.
    pub offset_divisor: f32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            room_chance: 0.5,
            room_min_ratio: 0.10,
            room_max_ratio: 0.15,
            corridor_min_ratio: 0.03,
            corridor_max_ratio: 0.06,
            stretch_min: 1.0,
            stretch_max: 1.2,
            offset_divisor: 6.0,
        }
    }
}

impl RoomConfig {
    fn errors(&self, out: &mut Vec<ConfigError>) {
        check_ratio(out, "room_chance", self.room_chance, 0.0, 1.0);
        check_span(out, "room size", self.room_min_ratio, self.room_max_ratio, 1.0);
        check_span(
            out,
            "corridor size",
            self.corridor_min_ratio,
            self.corridor_max_ratio,
            1.0,
        );
        check_span(out, "stretch", self.stretch_min, self.stretch_max, 10.0);
        if !(self.offset_divisor.is_finite() && self.offset_divisor > 0.0) {
            out.push(ConfigError::OutOfRange {
                name: "offset_divisor",
                value: self.offset_divisor,
                lo: f32::MIN_POSITIVE,
                hi: f32::MAX,
            });
        }
    }
}

/// Gap closing options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapConfig {
    /// Gaps narrower than this (in map units) are closed.
    pub threshold: f32,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self { threshold: 20.0 }
    }
}

// ── Whole map ───────────────────────────────────────────────────────────

/// Everything tunable about a map run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapGenConfig {
    pub middle: LaneTuning,
    pub side_horizontal: LaneTuning,
    pub side_vertical: LaneTuning,
    /// Horizontal jitter of the middle lane's endpoints, fraction of width.
    pub middle_jitter_ratio: f32,
    pub rooms: RoomConfig,
    pub gaps: GapConfig,
    pub max_steps: usize,
}

impl Default for MapGenConfig {
    fn default() -> Self {
        Self {
            middle: LaneTuning::middle(),
            side_horizontal: LaneTuning::side_horizontal(),
            side_vertical: LaneTuning::side_vertical(),
            middle_jitter_ratio: 0.05,
            rooms: RoomConfig::default(),
            gaps: GapConfig::default(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl MapGenConfig {
    /// All problems with this config, in declaration order.
    pub fn errors(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        self.middle.errors(&mut errors);
        self.side_horizontal.errors(&mut errors);
        self.side_vertical.errors(&mut errors);
        check_ratio(
            &mut errors,
            "middle_jitter_ratio",
            self.middle_jitter_ratio,
            0.0,
            0.25,
        );
        self.rooms.errors(&mut errors);
        if !(self.gaps.threshold.is_finite() && self.gaps.threshold >= 0.0) {
            errors.push(ConfigError::OutOfRange {
                name: "gaps.threshold",
                value: self.gaps.threshold,
                lo: 0.0,
                hi: f32::MAX,
            });
        }
        if self.max_steps < 2 {
            errors.push(ConfigError::TooFewSteps(self.max_steps));
        }
        errors
    }

    /// First problem with this config, if any.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.errors().into_iter().next() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn check_ratio(out: &mut Vec<ConfigError>, name: &'static str, value: f32, lo: f32, hi: f32) {
    if !(value.is_finite() && value >= lo && value <= hi) {
        out.push(ConfigError::OutOfRange { name, value, lo, hi });
    }
}

fn check_span(out: &mut Vec<ConfigError>, name: &'static str, min: f32, max: f32, hi: f32) {
    let before = out.len();
    check_ratio(out, name, min, f32::MIN_POSITIVE, hi);
    check_ratio(out, name, max, f32::MIN_POSITIVE, hi);
    if out.len() == before && min > max {
        out.push(ConfigError::InvertedRange { name, min, max });
    }
}
