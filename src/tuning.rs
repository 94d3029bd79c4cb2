//! Data-driven game balance
//!
//! Every probability, threshold table, timing and physics constant the two
//! simulations use. Defaults reproduce the shipped game; a JSON document can
//! override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;
use crate::sim::Outcome;

/// One band of a cumulative threshold table: a sample below `below` (and at
/// or above the previous band) selects `outcome`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub outcome: Outcome,
    pub below: f64,
}

/// Cumulative threshold table mapping a uniform sample to an outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutcomeTable {
    pub bands: Vec<Band>,
}

impl OutcomeTable {
    pub fn new(bands: &[(Outcome, f64)]) -> Self {
        Self {
            bands: bands
                .iter()
                .map(|&(outcome, below)| Band { outcome, below })
                .collect(),
        }
    }

    /// Select the outcome for a sample in [0, 1)
    pub fn pick(&self, sample: f64) -> Outcome {
        self.bands
            .iter()
            .find(|b| sample < b.below)
            .or(self.bands.last())
            .map(|b| b.outcome)
            .unwrap_or(Outcome::Strike)
    }

    fn validate(&self, name: &'static str) -> Result<(), TuningError> {
        let malformed = |reason: String| TuningError::MalformedTable { name, reason };
        let Some(last) = self.bands.last() else {
            return Err(malformed("no bands".into()));
        };
        let mut prev = 0.0;
        for band in &self.bands {
            if !band.outcome.is_swing_result() {
                return Err(malformed(format!("{} is not a swing result", band.outcome)));
            }
            if band.below <= prev {
                return Err(malformed(format!(
                    "threshold {} for {} does not increase",
                    band.below, band.outcome
                )));
            }
            prev = band.below;
        }
        if (last.below - 1.0).abs() > 1e-9 {
            return Err(malformed(format!("last threshold is {}, expected 1.0", last.below)));
        }
        Ok(())
    }
}

/// Batting balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattingTuning {
    /// Chance a pitch is in the zone
    pub strike_zone_chance: f64,
    /// First timing draw: below this the swing is perfect
    pub perfect_chance: f64,
    /// Second timing draw after a non-perfect first draw: below this it is early, else late
    pub early_chance: f64,
    /// Chance a swing at a ball simply misses
    pub chase_miss_chance: f64,
    /// Bunt at a ball that misses: below this it is a foul, else a strike
    pub chase_bunt_foul_chance: f64,
    /// Bunt with two strikes: below this it is a three-bunt strikeout
    pub three_bunt_chance: f64,
    /// Groundout with a runner on first and fewer than two outs
    pub double_play_chance: f64,
    pub perfect_table: OutcomeTable,
    pub mistimed_table: OutcomeTable,
    pub bunt_table: OutcomeTable,
    /// Pitch flight times (ms)
    pub fastball_ms: u64,
    pub curve_ms: u64,
    pub slider_ms: u64,
    pub changeup_ms: u64,
    /// Fraction of flight after which a swing is accepted
    pub hittable_fraction: f64,
    /// Time after flight before an untouched pitch is called
    pub arrival_grace_ms: u64,
}

impl Default for BattingTuning {
    fn default() -> Self {
        use Outcome::*;
        Self {
            strike_zone_chance: STRIKE_ZONE_CHANCE,
            perfect_chance: 0.3,
            early_chance: 0.6,
            chase_miss_chance: 0.7,
            chase_bunt_foul_chance: 0.6,
            three_bunt_chance: 0.4,
            double_play_chance: 0.4,
            perfect_table: OutcomeTable::new(&[
                (HomeRun, 0.1),
                (Triple, 0.2),
                (Double, 0.4),
                (Single, 0.7),
                (FlyOut, 0.85),
                (GroundOut, 1.0),
            ]),
            mistimed_table: OutcomeTable::new(&[
                (Double, 0.1),
                (Single, 0.25),
                (Foul, 0.45),
                (FlyOut, 0.65),
                (GroundOut, 0.85),
                (Strike, 1.0),
            ]),
            bunt_table: OutcomeTable::new(&[(Sacrifice, 0.5), (GroundOut, 0.7), (Foul, 1.0)]),
            fastball_ms: FASTBALL_FLIGHT_MS,
            curve_ms: BREAKING_FLIGHT_MS,
            slider_ms: BREAKING_FLIGHT_MS,
            changeup_ms: CHANGEUP_FLIGHT_MS,
            hittable_fraction: HITTABLE_FRACTION,
            arrival_grace_ms: ARRIVAL_GRACE_MS,
        }
    }
}

/// Fielding balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldingTuning {
    /// Fly catch with a runner on third and fewer than two outs
    pub tag_up_chance: f64,
    pub tag_up_delay_ms: u64,
    /// Ground-ball catch with a runner on first and fewer than two outs
    pub double_play_chance: f64,
    /// Missed ground ball scored as an error rather than a hit
    pub error_chance: f64,
    pub fly_speed: f32,
    pub ground_speed: f32,
    pub line_speed: f32,
    pub catch_radius: f32,
    pub arrival_epsilon: f32,
    pub home_plate: (f32, f32),
    pub glove_start: (f32, f32),
    pub glove_min: (f32, f32),
    pub glove_max: (f32, f32),
    /// Target x is drawn from [x.0, x.0 + x.1)
    pub target_x: (f32, f32),
    pub fly_target_y: (f32, f32),
    pub low_target_y: (f32, f32),
}

impl Default for FieldingTuning {
    fn default() -> Self {
        Self {
            tag_up_chance: 0.3,
            tag_up_delay_ms: TAG_UP_DELAY_MS,
            double_play_chance: 0.5,
            error_chance: 0.3,
            fly_speed: FLY_SPEED,
            ground_speed: GROUND_SPEED,
            line_speed: LINE_SPEED,
            catch_radius: CATCH_RADIUS,
            arrival_epsilon: ARRIVAL_EPSILON,
            home_plate: HOME_PLATE,
            glove_start: GLOVE_START,
            glove_min: GLOVE_MIN,
            glove_max: GLOVE_MAX,
            target_x: (20.0, 60.0),
            fly_target_y: (50.0, 30.0),
            low_target_y: (70.0, 20.0),
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub inning_limit: u32,
    pub batting: BattingTuning,
    pub fielding: FieldingTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            inning_limit: INNING_LIMIT,
            batting: BattingTuning::default(),
            fielding: FieldingTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.inning_limit == 0 {
            return Err(TuningError::Invalid {
                name: "inning_limit",
                reason: "must be at least 1".into(),
            });
        }

        let b = &self.batting;
        let f = &self.fielding;
        for (name, value) in [
            ("strike_zone_chance", b.strike_zone_chance),
            ("perfect_chance", b.perfect_chance),
            ("early_chance", b.early_chance),
            ("chase_miss_chance", b.chase_miss_chance),
            ("chase_bunt_foul_chance", b.chase_bunt_foul_chance),
            ("three_bunt_chance", b.three_bunt_chance),
            ("batting.double_play_chance", b.double_play_chance),
            ("hittable_fraction", b.hittable_fraction),
            ("tag_up_chance", f.tag_up_chance),
            ("fielding.double_play_chance", f.double_play_chance),
            ("error_chance", f.error_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::ProbabilityOutOfRange { name, value });
            }
        }

        b.perfect_table.validate("perfect_table")?;
        b.mistimed_table.validate("mistimed_table")?;
        b.bunt_table.validate("bunt_table")?;

        for (name, speed) in [
            ("fly_speed", f.fly_speed),
            ("ground_speed", f.ground_speed),
            ("line_speed", f.line_speed),
            ("catch_radius", f.catch_radius),
            ("arrival_epsilon", f.arrival_epsilon),
        ] {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(TuningError::Invalid {
                    name,
                    reason: format!("must be positive, got {speed}"),
                });
            }
        }
        if f.glove_min.0 > f.glove_max.0 || f.glove_min.1 > f.glove_max.1 {
            return Err(TuningError::Invalid {
                name: "glove_min",
                reason: "glove bounds are inverted".into(),
            });
        }
        Ok(())
    }
}
