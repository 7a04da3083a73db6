//! Perceptron Branch Predictor.
//!
//! Uses a single-layer perceptron to predict branch direction. Each table row
//! holds one signed weight per global history position; the output adds a
//! weight for every taken history bit and subtracts it for every not-taken
//! bit. There is no bias weight.

use super::BranchPredictor;
use crate::config::PerceptronConfig;

/// Perceptron Predictor structure.
#[derive(Debug, Clone)]
pub struct PerceptronPredictor {
    /// Global history, bit `i` pairs with weight `i`; the newest outcome is bit `history_length - 1`.
    ghr: u64,
    /// Table of weights (flattened, `history_length` per row).
    table: Vec<i16>,
    /// Length of the history vector.
    history_length: usize,
    /// Mask for indexing the table.
    table_mask: u32,
    /// Training threshold (theta).
    threshold: i32,
}

impl PerceptronPredictor {
    /// Creates a new Perceptron Predictor based on configuration.
    pub fn new(config: &PerceptronConfig) -> Self {
        Self {
            ghr: 0,
            table: vec![0; config.entries * config.history_length],
            history_length: config.history_length,
            table_mask: (config.entries - 1) as u32,
            threshold: config.threshold,
        }
    }

    #[inline]
    fn row(&self, pc: u32) -> usize {
        (pc & self.table_mask) as usize * self.history_length
    }

    #[inline]
    const fn history_bit(&self, i: usize) -> bool {
        (self.ghr >> i) & 1 != 0
    }

    /// Computes the perceptron output for the row selected by `pc`.
    fn output(&self, pc: u32) -> i32 {
        let base = self.row(pc);
        (0..self.history_length)
            .map(|i| {
                let w = i32::from(self.table[base + i]);
                if self.history_bit(i) { w } else { -w }
            })
            .sum()
    }
}

impl BranchPredictor for PerceptronPredictor {
    /// Predicts taken if the perceptron output is non-negative.
    fn predict(&self, pc: u32) -> bool {
        self.output(pc) >= 0
    }

    /// Trains the row if the branch was mispredicted or the output magnitude
    /// was within the threshold, then shifts the outcome into the history.
    fn update(&mut self, pc: u32, taken: bool, predicted: bool) {
        let y = self.output(pc);
        if predicted != taken || y.abs() <= self.threshold {
            let base = self.row(pc);
            for i in 0..self.history_length {
                let agrees = self.history_bit(i) == taken;
                let w = &mut self.table[base + i];
                *w = if agrees {
                    w.saturating_add(1)
                } else {
                    w.saturating_sub(1)
                };
            }
        }

        self.ghr = (self.ghr >> 1) | (u64::from(taken) << (self.history_length - 1));
    }
}
