//! Batting resolver
//!
//! Pure functions from (pitch, swing, rolls) to an [`Outcome`], and the
//! application of each outcome to [`MatchState`].

use serde::{Deserialize, Serialize};

use super::outcome::{Outcome, PlayEvent};
use super::roll::Roll;
use super::state::{Base, MatchState};
use crate::tuning::BattingTuning;

/// Pitch types, drawn uniformly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PitchKind {
    Fastball,
    Curve,
    Slider,
    Changeup,
}

impl PitchKind {
    pub const ALL: [PitchKind; 4] = [
        PitchKind::Fastball,
        PitchKind::Curve,
        PitchKind::Slider,
        PitchKind::Changeup,
    ];

    /// Time from release to the plate
    pub fn flight_ms(&self, tuning: &BattingTuning) -> u64 {
        match self {
            PitchKind::Fastball => tuning.fastball_ms,
            PitchKind::Curve => tuning.curve_ms,
            PitchKind::Slider => tuning.slider_ms,
            PitchKind::Changeup => tuning.changeup_ms,
        }
    }
}

/// A thrown pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pitch {
    pub kind: PitchKind,
    pub in_zone: bool,
}

impl Pitch {
    /// Kind and location are independent draws
    pub fn generate(rolls: &mut impl Roll, tuning: &BattingTuning) -> Self {
        let kind = PitchKind::ALL[rolls.pick(PitchKind::ALL.len())];
        let in_zone = rolls.roll() < tuning.strike_zone_chance;
        Self { kind, in_zone }
    }
}

/// How well a swing was timed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwingTiming {
    Perfect,
    Early,
    Late,
}

impl SwingTiming {
    /// Nested draw: perfect, else early-or-late on a second roll.
    /// With the default tuning this is 30% / 42% / 28%.
    pub fn draw(rolls: &mut impl Roll, tuning: &BattingTuning) -> Self {
        if rolls.roll() < tuning.perfect_chance {
            SwingTiming::Perfect
        } else if rolls.roll() < tuning.early_chance {
            SwingTiming::Early
        } else {
            SwingTiming::Late
        }
    }
}

/// Pick the raw outcome of a swing at `pitch` given the current strike count
pub fn swing_outcome(
    pitch: Pitch,
    bunt: bool,
    strikes: u32,
    rolls: &mut impl Roll,
    tuning: &BattingTuning,
) -> Outcome {
    let timing = SwingTiming::draw(rolls, tuning);

    if !pitch.in_zone && rolls.roll() < tuning.chase_miss_chance {
        if bunt && rolls.roll() < tuning.chase_bunt_foul_chance {
            return Outcome::Foul;
        }
        return Outcome::Strike;
    }

    let sample = rolls.roll();
    if bunt {
        if strikes == 2 && sample < tuning.three_bunt_chance {
            return Outcome::ThreeBuntOut;
        }
        return tuning.bunt_table.pick(sample);
    }

    match timing {
        SwingTiming::Perfect => tuning.perfect_table.pick(sample),
        SwingTiming::Early | SwingTiming::Late => tuning.mistimed_table.pick(sample),
    }
}

/// Apply a swing outcome to the match. Returns the play as reported; this can
/// differ from `outcome` (a third strike, a grand slam, a failed sacrifice, a
/// double-play groundout).
pub fn apply_outcome(
    state: &mut MatchState,
    outcome: Outcome,
    rolls: &mut impl Roll,
    tuning: &BattingTuning,
) -> PlayEvent {
    match outcome {
        Outcome::HomeRun | Outcome::GrandSlam => {
            let grand_slam = state.runners.is_loaded();
            let runs = state.home_run();
            if grand_slam {
                PlayEvent::new(Outcome::GrandSlam, "Grand slam! Four runs!", runs)
            } else {
                PlayEvent::new(Outcome::HomeRun, "Home run!", runs)
            }
        }
        Outcome::Triple => {
            let runs = state.advance_runners(3, true);
            state.place_batter(Base::Third);
            PlayEvent::new(Outcome::Triple, "Triple!", runs)
        }
        Outcome::Double => {
            let runs = state.advance_runners(2, true);
            state.place_batter(Base::Second);
            PlayEvent::new(Outcome::Double, "Double!", runs)
        }
        Outcome::Single => {
            let runs = state.advance_runners(1, true);
            state.place_batter(Base::First);
            PlayEvent::new(Outcome::Single, "Base hit!", runs)
        }
        Outcome::Sacrifice => {
            if state.outs < 2 && !state.runners.is_empty() {
                let runs = state.advance_runners(1, true);
                state.add_out();
                PlayEvent::new(Outcome::Sacrifice, "Sacrifice bunt, runners move up", runs)
            } else {
                state.add_out();
                PlayEvent::new(Outcome::GroundOut, "Grounded out", 0)
            }
        }
        Outcome::ThreeBuntOut => {
            state.add_out();
            PlayEvent::new(Outcome::ThreeBuntOut, "Foul bunt on two strikes, batter is out", 0)
        }
        Outcome::FlyOut => {
            state.add_out();
            PlayEvent::new(Outcome::FlyOut, "Flied out", 0)
        }
        Outcome::GroundOut => {
            if state.outs < 2 && state.runners.first && rolls.roll() < tuning.double_play_chance {
                state.double_play();
                PlayEvent::new(Outcome::DoublePlay, "Grounded into a double play", 0)
            } else {
                state.add_out();
                PlayEvent::new(Outcome::GroundOut, "Grounded out", 0)
            }
        }
        Outcome::Foul => {
            if state.add_foul() {
                PlayEvent::new(Outcome::Foul, "Foul ball, strike added", 0)
            } else {
                PlayEvent::new(Outcome::Foul, "Foul ball, still two strikes", 0)
            }
        }
        Outcome::Strike | Outcome::Strikeout => record_strike(state, "Swing and a miss"),
        Outcome::Ball | Outcome::Walk => record_ball(state),
        other => {
            log::warn!("Outcome {other} has no batting effect");
            PlayEvent::new(other, "", 0)
        }
    }
}

/// Add a strike; the third one is a strikeout
pub fn record_strike(state: &mut MatchState, message: &str) -> PlayEvent {
    if state.add_strike() {
        PlayEvent::new(Outcome::Strikeout, "Strike three, batter is out", 0)
    } else {
        PlayEvent::new(Outcome::Strike, message, 0)
    }
}

/// Add a ball; the fourth one is a walk
pub fn record_ball(state: &mut MatchState) -> PlayEvent {
    match state.add_ball() {
        Some(runs) => PlayEvent::new(Outcome::Walk, "Ball four, take your base", runs),
        None => PlayEvent::new(Outcome::Ball, "Ball", 0),
    }
}

/// An untouched pitch: a called strike in the zone, a ball outside it
pub fn take_pitch(state: &mut MatchState, pitch: Pitch) -> PlayEvent {
    if pitch.in_zone {
        record_strike(state, "Called strike")
    } else {
        record_ball(state)
    }
}
