//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through host-supplied timestamps
//! - Injected, seeded random source only
//! - No rendering or platform dependencies

pub mod at_bat;
pub mod batting;
pub mod fielding;
pub mod outcome;
pub mod roll;
pub mod schedule;
pub mod state;

pub use at_bat::{BattingSession, BattingSnapshot};
pub use batting::{Pitch, PitchKind, SwingTiming};
pub use fielding::{BallFate, BallKind, BattedBall, FieldingSession, FieldingSnapshot};
pub use outcome::{Outcome, PlayEvent};
pub use roll::{RngState, Roll, ScriptedRolls};
pub use schedule::{Scheduler, TimerId};
pub use state::{Base, Bases, Half, MatchState, Score};
