//! Two-Bit Saturating Counter Predictor.
//!
//! A single table of two-bit counters indexed by the low address bits.

use super::BranchPredictor;
use super::branch_predictor::counter;
use crate::config::TwoBitConfig;

/// Bimodal predictor.
#[derive(Debug, Clone)]
pub struct TwoBitPredictor {
    table: Vec<u8>,
    mask: u32,
}

impl TwoBitPredictor {
    /// Creates a predictor with every counter weakly not-taken.
    pub fn new(config: &TwoBitConfig) -> Self {
        Self {
            table: vec![counter::WEAK_NOT_TAKEN; config.entries],
            mask: (config.entries - 1) as u32,
        }
    }

    #[inline]
    const fn index(&self, pc: u32) -> usize {
        (pc & self.mask) as usize
    }
}

impl BranchPredictor for TwoBitPredictor {
    fn predict(&self, pc: u32) -> bool {
        counter::predicts_taken(self.table[self.index(pc)])
    }

    fn update(&mut self, pc: u32, taken: bool, predicted: bool) {
        let idx = self.index(pc);
        self.table[idx] = counter::train(self.table[idx], taken, predicted);
    }
}
