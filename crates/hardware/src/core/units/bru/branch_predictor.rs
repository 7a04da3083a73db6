//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every direction
//! predictor implements. Predictors see only the branch address and, at
//! update time, the resolved direction together with the direction they
//! predicted for it.

/// Trait for branch direction prediction algorithms.
pub trait BranchPredictor {
    /// Predicts whether the conditional branch at `pc` will be taken.
    fn predict(&self, pc: u32) -> bool;

    /// Trains the predictor with a resolved branch.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the branch instruction
    /// * `taken` - Resolved direction
    /// * `predicted` - Direction returned by [`BranchPredictor::predict`] for this branch
    fn update(&mut self, pc: u32, taken: bool, predicted: bool);
}

/// Two-bit saturating counter states.
pub(super) mod counter {
    /// Strongly not-taken.
    pub const STRONG_NOT_TAKEN: u8 = 0b00;
    /// Weakly not-taken; the reset state of every counter.
    pub const WEAK_NOT_TAKEN: u8 = 0b01;
    /// Strongly taken.
    pub const STRONG_TAKEN: u8 = 0b11;

    /// Direction a counter predicts.
    #[inline]
    pub const fn predicts_taken(c: u8) -> bool {
        c >= 0b10
    }

    /// Next counter value after a resolved branch.
    ///
    /// A correct prediction jumps to the strong state of that direction; a
    /// misprediction moves one step toward the outcome.
    #[inline]
    pub const fn train(c: u8, taken: bool, predicted: bool) -> u8 {
        match (taken, predicted) {
            (false, false) => STRONG_NOT_TAKEN,
            (true, true) => STRONG_TAKEN,
            (true, false) => {
                if c < STRONG_TAKEN {
                    c + 1
                } else {
                    c
                }
            }
            (false, true) => c.saturating_sub(1),
        }
    }
}
