//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the direction predictors that can be replayed over a
//! recorded branch trace: a bimodal two-bit saturating counter table, a
//! two-level local-history predictor, and a perceptron predictor. The Tomasulo
//! core drops control flow at dispatch, so these run independently of it.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait and shared two-bit counter logic.
pub mod branch_predictor;

/// Perceptron-based neural branch predictor.
pub mod perceptron;

/// Two-level adaptive predictor with per-address history.
pub mod two_level;

/// Bimodal two-bit saturating counter predictor.
pub mod two_bit;

use std::fmt;

use self::{perceptron::PerceptronPredictor, two_bit::TwoBitPredictor, two_level::TwoLevelPredictor};
use crate::config::{BranchConfig, BranchPredictorKind};
use crate::trace::BranchRecord;

/// Enum wrapper for static dispatch of Branch Predictors.
#[derive(Debug, Clone)]
pub enum BranchPredictorWrapper {
    /// Bimodal two-bit counters.
    TwoBit(TwoBitPredictor),
    /// Two-level local history.
    TwoLevel(TwoLevelPredictor),
    /// Perceptron over global history.
    Perceptron(PerceptronPredictor),
}

impl BranchPredictorWrapper {
    /// Creates the predictor selected by `config.predictor`.
    pub fn new(config: &BranchConfig) -> Self {
        Self::with_kind(config.predictor, config)
    }

    /// Creates a predictor of `kind` using the geometry in `config`.
    pub fn with_kind(kind: BranchPredictorKind, config: &BranchConfig) -> Self {
        match kind {
            BranchPredictorKind::TwoBitSaturating => Self::TwoBit(TwoBitPredictor::new(&config.two_bit)),
            BranchPredictorKind::TwoLevel => Self::TwoLevel(TwoLevelPredictor::new(&config.two_level)),
            BranchPredictorKind::Perceptron => {
                Self::Perceptron(PerceptronPredictor::new(&config.perceptron))
            }
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline]
    fn predict(&self, pc: u32) -> bool {
        match self {
            Self::TwoBit(bp) => bp.predict(pc),
            Self::TwoLevel(bp) => bp.predict(pc),
            Self::Perceptron(bp) => bp.predict(pc),
        }
    }

    #[inline]
    fn update(&mut self, pc: u32, taken: bool, predicted: bool) {
        match self {
            Self::TwoBit(bp) => bp.update(pc, taken, predicted),
            Self::TwoLevel(bp) => bp.update(pc, taken, predicted),
            Self::Perceptron(bp) => bp.update(pc, taken, predicted),
        }
    }
}

/// Outcome of replaying a branch trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchStats {
    /// Branches predicted.
    pub lookups: u64,
    /// Branches whose prediction disagreed with the resolved direction.
    pub mispredictions: u64,
}

impl BranchStats {
    /// Mispredictions per thousand branches.
    pub fn mispredictions_per_kilo(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.mispredictions as f64 * 1000.0 / self.lookups as f64
        }
    }

    /// Fraction of branches predicted correctly, in percent.
    pub fn accuracy(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            (1.0 - self.mispredictions as f64 / self.lookups as f64) * 100.0
        }
    }
}

impl fmt::Display for BranchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "bp.lookups              {}", self.lookups)?;
        writeln!(f, "bp.mispredictions       {}", self.mispredictions)?;
        writeln!(f, "bp.accuracy             {:.2}%", self.accuracy())?;
        write!(f, "bp.mpki                 {:.3}", self.mispredictions_per_kilo())
    }
}

/// Replays `branches` through `predictor`, predicting then training on each.
pub fn simulate<P: BranchPredictor + ?Sized>(predictor: &mut P, branches: &[BranchRecord]) -> BranchStats {
    let mut stats = BranchStats::default();
    for b in branches {
        let predicted = predictor.predict(b.pc);
        stats.lookups += 1;
        if predicted != b.taken {
            stats.mispredictions += 1;
        }
        predictor.update(b.pc, b.taken, predicted);
    }
    tracing::debug!(
        lookups = stats.lookups,
        mispredictions = stats.mispredictions,
        "branch trace replayed"
    );
    stats
}
