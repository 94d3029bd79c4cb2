//! Error types
//!
//! Player inputs are never fatal. Entry points report why an input was
//! dropped through [`Rejected`] and hosts simply log it.

use thiserror::Error;

/// Why an input event was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    /// The game already ended
    #[error("game is over")]
    GameOver,

    /// A pitch is already on its way
    #[error("a pitch is already in flight")]
    PitchInFlight,

    /// Swing with nothing to swing at
    #[error("no live pitch")]
    NoLivePitch,

    /// Pitch is live but not yet hittable
    #[error("swing window is closed")]
    SwingWindowClosed,

    /// Fielding input while play is stopped
    #[error("play is stopped")]
    NotPlaying,

    /// A batted ball is still live
    #[error("a ball is already in play")]
    BallInFlight,

    /// The last catch still has a runner tagging up
    #[error("a play is still being resolved")]
    PlayPending,
}

/// Tuning could not be loaded
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    /// A probability outside [0, 1]
    #[error("probability '{name}' out of range: {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    /// Threshold table not strictly increasing or not closed at 1.0
    #[error("outcome table '{name}' is malformed: {reason}")]
    MalformedTable { name: &'static str, reason: String },

    /// Any other value that breaks the simulation
    #[error("invalid value for '{name}': {reason}")]
    Invalid { name: &'static str, reason: String },
}
