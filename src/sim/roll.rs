//! Injectable random source
//!
//! Every random decision in the simulation is a uniform sample in [0, 1)
//! compared against a threshold. Sessions run on a seeded [`Pcg32`]; tests
//! replay exact rolls with [`ScriptedRolls`].

use std::collections::VecDeque;

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Source of uniform samples
pub trait Roll {
    /// Uniform sample in [0, 1)
    fn roll(&mut self) -> f64;

    /// Uniform index in [0, n)
    fn pick(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        ((self.roll() * n as f64) as usize).min(n - 1)
    }

    /// Uniform value in [lo, lo + span)
    fn span(&mut self, lo: f32, span: f32) -> f32 {
        lo + self.roll() as f32 * span
    }
}

impl<R: RngCore> Roll for R {
    fn roll(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Fixed sequence of samples; panics when exhausted so a test notices an
/// unexpected extra draw
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    rolls: VecDeque<f64>,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    pub fn push(&mut self, roll: f64) {
        self.rolls.push_back(roll);
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Roll for ScriptedRolls {
    fn roll(&mut self) -> f64 {
        match self.rolls.pop_front() {
            Some(r) => r,
            None => panic!("scripted rolls exhausted"),
        }
    }
}

/// RNG seed wrapper for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}
