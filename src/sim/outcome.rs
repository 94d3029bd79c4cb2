//! Outcome identifiers and result events
//!
//! Identifiers are shared with [`crate::rules`]; every variant must have a
//! rule entry.

use serde::{Deserialize, Serialize};

/// Every result either game can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    // Batting
    Single,
    Double,
    Triple,
    #[serde(rename = "homerun")]
    HomeRun,
    #[serde(rename = "grandslam")]
    GrandSlam,
    Strike,
    Ball,
    Walk,
    Strikeout,
    Foul,
    #[serde(rename = "threebuntout")]
    ThreeBuntOut,
    Sacrifice,
    #[serde(rename = "groundout")]
    GroundOut,
    #[serde(rename = "flyout")]
    FlyOut,
    #[serde(rename = "doubleplay")]
    DoublePlay,

    // Fielding
    FlyoutCatch,
    LinedriveCatch,
    #[serde(rename = "groundball")]
    GroundBall,
    #[serde(rename = "double_play")]
    FieldedDoublePlay,
    #[serde(rename = "tagup")]
    TagUp,
    Error,
    HitAllowed,
    ExtraBaseHit,
}

impl Outcome {
    /// All identifiers, batting first
    pub const ALL: [Outcome; 23] = [
        Outcome::Single,
        Outcome::Double,
        Outcome::Triple,
        Outcome::HomeRun,
        Outcome::GrandSlam,
        Outcome::Strike,
        Outcome::Ball,
        Outcome::Walk,
        Outcome::Strikeout,
        Outcome::Foul,
        Outcome::ThreeBuntOut,
        Outcome::Sacrifice,
        Outcome::GroundOut,
        Outcome::FlyOut,
        Outcome::DoublePlay,
        Outcome::FlyoutCatch,
        Outcome::LinedriveCatch,
        Outcome::GroundBall,
        Outcome::FieldedDoublePlay,
        Outcome::TagUp,
        Outcome::Error,
        Outcome::HitAllowed,
        Outcome::ExtraBaseHit,
    ];

    /// Stable identifier used as the rule-lookup key
    pub fn id(&self) -> &'static str {
        match self {
            Outcome::Single => "single",
            Outcome::Double => "double",
            Outcome::Triple => "triple",
            Outcome::HomeRun => "homerun",
            Outcome::GrandSlam => "grandslam",
            Outcome::Strike => "strike",
            Outcome::Ball => "ball",
            Outcome::Walk => "walk",
            Outcome::Strikeout => "strikeout",
            Outcome::Foul => "foul",
            Outcome::ThreeBuntOut => "threebuntout",
            Outcome::Sacrifice => "sacrifice",
            Outcome::GroundOut => "groundout",
            Outcome::FlyOut => "flyout",
            Outcome::DoublePlay => "doubleplay",
            Outcome::FlyoutCatch => "flyout_catch",
            Outcome::LinedriveCatch => "linedrive_catch",
            Outcome::GroundBall => "groundball",
            Outcome::FieldedDoublePlay => "double_play",
            Outcome::TagUp => "tagup",
            Outcome::Error => "error",
            Outcome::HitAllowed => "hit_allowed",
            Outcome::ExtraBaseHit => "extra_base_hit",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|o| o.id() == id)
    }

    /// Whether this result ends the plate appearance
    pub fn ends_plate_appearance(&self) -> bool {
        !matches!(self, Outcome::Strike | Outcome::Ball | Outcome::Foul)
    }

    /// Raw results a swing or bunt can produce before it is applied
    pub fn is_swing_result(&self) -> bool {
        matches!(
            self,
            Outcome::Single
                | Outcome::Double
                | Outcome::Triple
                | Outcome::HomeRun
                | Outcome::Strike
                | Outcome::Foul
                | Outcome::Sacrifice
                | Outcome::GroundOut
                | Outcome::FlyOut
                | Outcome::ThreeBuntOut
        )
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// A resolved play, handed to the rendering side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayEvent {
    pub outcome: Outcome,
    /// Short scoreboard text
    pub message: String,
    /// Runs that crossed the plate on this play
    pub runs: u32,
}

impl PlayEvent {
    pub fn new(outcome: Outcome, message: impl Into<String>, runs: u32) -> Self {
        Self {
            outcome,
            message: message.into(),
            runs,
        }
    }
}
