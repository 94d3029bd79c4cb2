//! Dugout - baseball rules trainer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (match state, batting resolver, fielding physics)
//! - `tuning`: Data-driven game balance
//! - `rules`: Rule explanations keyed by outcome identifier
//! - `error`: Input rejections and tuning errors

pub mod error;
pub mod rules;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{Rejected, TuningError};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Innings in a shortened game
    pub const INNING_LIMIT: u32 = 3;

    /// Probability a pitch lands in the strike zone
    pub const STRIKE_ZONE_CHANCE: f64 = 0.7;

    /// Pitch flight times (ms)
    pub const FASTBALL_FLIGHT_MS: u64 = 800;
    pub const BREAKING_FLIGHT_MS: u64 = 1100;
    pub const CHANGEUP_FLIGHT_MS: u64 = 1400;
    /// Fraction of flight after which the ball becomes hittable
    pub const HITTABLE_FRACTION: f64 = 0.4;
    /// Extra time after flight before an untouched pitch is called
    pub const ARRIVAL_GRACE_MS: u64 = 400;
    /// Delay between a fly-ball catch and the tag-up run
    pub const TAG_UP_DELAY_MS: u64 = 500;

    /// Where every batted ball starts. Field coordinates are percent of a
    /// 100x100 view, y growing away from the plate.
    pub const HOME_PLATE: (f32, f32) = (50.0, 5.0);
    pub const GLOVE_START: (f32, f32) = (50.0, 70.0);
    pub const GLOVE_MIN: (f32, f32) = (5.0, 30.0);
    pub const GLOVE_MAX: (f32, f32) = (95.0, 90.0);
    pub const CATCH_RADIUS: f32 = 10.0;
    /// Distance at which a ball counts as landed
    pub const ARRIVAL_EPSILON: f32 = 2.0;

    /// Ball speeds (field units per frame)
    pub const FLY_SPEED: f32 = 0.6;
    pub const GROUND_SPEED: f32 = 0.8;
    pub const LINE_SPEED: f32 = 1.2;
}

/// Clamp a point into the axis-aligned box `[min, max]`
#[inline]
pub fn clamp_point(p: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    p.clamp(min, max)
}
