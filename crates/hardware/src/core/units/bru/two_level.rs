//! Two-Level Adaptive Predictor.
//!
//! Per-address history: a branch history table (BHT) records the last few
//! outcomes of each branch, and that history pattern selects a two-bit counter
//! in one of several pattern history tables (PHTs). The PHT is chosen by the
//! lowest address bits; the BHT is indexed by the bits just above them.

use super::BranchPredictor;
use super::branch_predictor::counter;
use crate::config::TwoLevelConfig;

/// Local-history two-level predictor.
#[derive(Debug, Clone)]
pub struct TwoLevelPredictor {
    bht: Vec<u32>,
    pht: Vec<Vec<u8>>,
    bht_mask: u32,
    pht_mask: u32,
    pht_shift: u32,
    history_mask: u32,
}

impl TwoLevelPredictor {
    /// Creates a predictor with empty histories and weakly not-taken counters.
    pub fn new(config: &TwoLevelConfig) -> Self {
        let patterns = 1usize << config.history_bits;
        Self {
            bht: vec![0; config.bht_entries],
            pht: vec![vec![counter::WEAK_NOT_TAKEN; patterns]; config.pht_count],
            bht_mask: (config.bht_entries - 1) as u32,
            pht_mask: (config.pht_count - 1) as u32,
            pht_shift: config.pht_count.trailing_zeros(),
            history_mask: (patterns - 1) as u32,
        }
    }

    #[inline]
    const fn indices(&self, pc: u32) -> (usize, usize) {
        (
            ((pc >> self.pht_shift) & self.bht_mask) as usize,
            (pc & self.pht_mask) as usize,
        )
    }
}

impl BranchPredictor for TwoLevelPredictor {
    fn predict(&self, pc: u32) -> bool {
        let (b, p) = self.indices(pc);
        counter::predicts_taken(self.pht[p][self.bht[b] as usize])
    }

    fn update(&mut self, pc: u32, taken: bool, predicted: bool) {
        let (b, p) = self.indices(pc);
        let pattern = self.bht[b] as usize;
        self.pht[p][pattern] = counter::train(self.pht[p][pattern], taken, predicted);
        self.bht[b] = ((self.bht[b] << 1) | u32::from(taken)) & self.history_mask;
    }
}
