//! Match state and its mutation primitives
//!
//! Only the methods here change score, outs, runners, count or inning. Every
//! primitive is a no-op once the game is over.

use serde::{Deserialize, Serialize};

use crate::consts::INNING_LIMIT;

/// Which half of the inning is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Half {
    /// Visitors bat
    Top,
    /// Home team bats
    Bottom,
}

/// Runs per team
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

/// A single base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Base {
    First,
    Second,
    Third,
}

/// Base occupancy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bases {
    pub first: bool,
    pub second: bool,
    pub third: bool,
}

impl Bases {
    pub const EMPTY: Bases = Bases {
        first: false,
        second: false,
        third: false,
    };
    pub const LOADED: Bases = Bases {
        first: true,
        second: true,
        third: true,
    };

    pub fn count(&self) -> u32 {
        self.first as u32 + self.second as u32 + self.third as u32
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn is_loaded(&self) -> bool {
        self.first && self.second && self.third
    }

    fn set(&mut self, base: Base, occupied: bool) {
        match base {
            Base::First => self.first = occupied,
            Base::Second => self.second = occupied,
            Base::Third => self.third = occupied,
        }
    }

    /// One cascade step: third is vacated, everyone else moves up one.
    /// Returns whether the runner on third came home.
    fn shift(&mut self, scoring: bool) -> bool {
        let mut scored = false;
        if self.third && scoring {
            self.third = false;
            scored = true;
        }
        if self.second && !self.third {
            self.third = true;
            self.second = false;
        }
        if self.first && !self.second {
            self.second = true;
            self.first = false;
        }
        scored
    }
}

/// Complete match state for one game session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub inning: u32,
    pub half: Half,
    /// 0..=2 while play is live; 3 only on the final state
    pub outs: u32,
    pub balls: u32,
    pub strikes: u32,
    pub score: Score,
    pub runners: Bases,
    pub game_over: bool,
    /// Innings after which the game ends
    #[serde(default = "default_inning_limit")]
    pub inning_limit: u32,
}

fn default_inning_limit() -> u32 {
    INNING_LIMIT
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(INNING_LIMIT)
    }
}

impl MatchState {
    pub fn new(inning_limit: u32) -> Self {
        Self {
            inning: 1,
            half: Half::Top,
            outs: 0,
            balls: 0,
            strikes: 0,
            score: Score::default(),
            runners: Bases::EMPTY,
            game_over: false,
            inning_limit: inning_limit.max(1),
        }
    }

    /// Credit runs to the team at bat
    pub fn score_runs(&mut self, runs: u32) {
        if self.game_over || runs == 0 {
            return;
        }
        match self.half {
            Half::Top => self.score.away += runs,
            Half::Bottom => self.score.home += runs,
        }
    }

    /// Clear balls and strikes
    pub fn reset_count(&mut self) {
        if self.game_over {
            return;
        }
        self.balls = 0;
        self.strikes = 0;
    }

    pub fn add_out(&mut self) {
        self.add_outs(1);
    }

    /// Record `n` outs as one play. Reaching three retires the side:
    /// runners and count clear, the half flips, and the game ends when a
    /// bottom half past the inning limit would start.
    pub fn add_outs(&mut self, n: u32) {
        if self.game_over || n == 0 {
            return;
        }
        let outs = self.outs + n;
        self.reset_count();
        if outs < 3 {
            self.outs = outs;
            return;
        }

        match self.half {
            Half::Top => {
                self.half = Half::Bottom;
                self.outs = 0;
                self.runners = Bases::EMPTY;
                log::info!("Middle of inning {}: {:?}", self.inning, self.score);
            }
            Half::Bottom if self.inning >= self.inning_limit => {
                self.outs = 3;
                self.game_over = true;
                log::info!(
                    "Game over after {} innings: home {} - away {}",
                    self.inning,
                    self.score.home,
                    self.score.away
                );
            }
            Half::Bottom => {
                self.half = Half::Top;
                self.inning += 1;
                self.outs = 0;
                self.runners = Bases::EMPTY;
                log::info!("Inning {} begins", self.inning);
            }
        }
    }

    /// Move every runner up `bases` bases, one base per step. A runner
    /// leaving third scores when `scoring` is set; otherwise they hold and
    /// trailing runners stop behind them. Returns runs scored.
    pub fn advance_runners(&mut self, bases: u32, scoring: bool) -> u32 {
        if self.game_over {
            return 0;
        }
        let mut runs = 0;
        for _ in 0..bases {
            if self.runners.shift(scoring) {
                runs += 1;
            }
        }
        self.score_runs(runs);
        runs
    }

    /// Ball four. Only forced runners move; with the bases loaded exactly
    /// one run scores and the bases stay loaded. Returns runs scored.
    pub fn walk(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }
        let mut runs = 0;
        if self.runners.is_loaded() {
            runs = 1;
            self.score_runs(1);
        } else {
            if self.runners.first && self.runners.second {
                self.runners.third = true;
            }
            if self.runners.first {
                self.runners.second = true;
            }
            self.runners.first = true;
        }
        self.reset_count();
        runs
    }

    /// Batter reaches first and every runner moves up one, forced or not.
    /// Returns runs scored.
    pub fn batter_to_first_with_cascade(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }
        let runs = self.advance_runners(1, true);
        self.runners.first = true;
        runs
    }

    /// Batter reaches `base` after a hit; ends the plate appearance
    pub fn place_batter(&mut self, base: Base) {
        if self.game_over {
            return;
        }
        self.runners.set(base, true);
        self.reset_count();
    }

    pub fn remove_runner(&mut self, base: Base) {
        if self.game_over {
            return;
        }
        self.runners.set(base, false);
    }

    /// Batter and every runner score. Returns runs scored.
    pub fn home_run(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }
        let runs = 1 + self.runners.count();
        self.score_runs(runs);
        self.runners = Bases::EMPTY;
        self.reset_count();
        runs
    }

    /// Runner on first is erased along with the batter
    pub fn double_play(&mut self) {
        if self.game_over {
            return;
        }
        self.runners.first = false;
        self.add_outs(2);
    }

    /// Add a strike. Returns true when it was strike three and the batter
    /// is out.
    pub fn add_strike(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        if self.strikes + 1 >= 3 {
            self.add_out();
            true
        } else {
            self.strikes += 1;
            false
        }
    }

    /// A foul is a strike only below two strikes. Returns whether the count
    /// changed.
    pub fn add_foul(&mut self) -> bool {
        if self.game_over || self.strikes >= 2 {
            return false;
        }
        self.strikes += 1;
        true
    }

    /// Add a ball. Returns the runs forced in when it was ball four.
    pub fn add_ball(&mut self) -> Option<u32> {
        if self.game_over {
            return None;
        }
        if self.balls + 1 >= 4 {
            Some(self.walk())
        } else {
            self.balls += 1;
            None
        }
    }

    /// Uncaught ball in the air: runners on second and third score, the
    /// runner on first ends on second, and the batter ends on third only
    /// for a line drive. Returns runs scored.
    pub fn extra_base_miss(&mut self, batter_to_third: bool) -> u32 {
        if self.game_over {
            return 0;
        }
        let runners = self.runners;
        let runs = runners.third as u32 + runners.second as u32;
        self.score_runs(runs);
        self.runners = Bases {
            first: false,
            second: runners.first,
            third: batter_to_third,
        };
        runs
    }

    /// Runner on third scores after a caught fly. Returns false if there
    /// was nobody to score.
    pub fn tag_up(&mut self) -> bool {
        if self.game_over || !self.runners.third {
            return false;
        }
        self.runners.third = false;
        self.score_runs(1);
        true
    }
}
