//! Instruction and branch traces.
//!
//! The core consumes an ordered, replayable sequence of decoded instructions.
//! This module provides:
//! 1. **`TraceSource`:** The accessor interface the core fetches through (1-based index, known length).
//! 2. **`Trace`:** The in-memory implementation produced by the loader and the builder.
//! 3. **`BranchRecord`:** Resolved branch outcomes replayed through the branch predictors.

/// Fluent construction of synthetic traces.
pub mod builder;

pub use builder::TraceBuilder;

use serde::Deserialize;

use crate::isa::StaticInst;

/// Ordered source of decoded instructions.
///
/// Indices are 1-based: valid indices are `1..=len()`. The core reads each
/// index exactly once, in increasing order.
pub trait TraceSource {
    /// Total number of instructions in the trace, traps included.
    fn len(&self) -> usize;

    /// Returns true if the trace has no instructions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Instruction at the 1-based `index`.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `index` is 0 or greater than `len()`.
    fn get(&self, index: usize) -> &StaticInst;
}

/// In-memory instruction trace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace {
    insts: Vec<StaticInst>,
}

impl Trace {
    /// Wraps an already-decoded instruction sequence.
    pub const fn new(insts: Vec<StaticInst>) -> Self {
        Self { insts }
    }

    /// Iterates the instructions in program order.
    pub fn iter(&self) -> impl Iterator<Item = &StaticInst> {
        self.insts.iter()
    }
}

impl TraceSource for Trace {
    fn len(&self) -> usize {
        self.insts.len()
    }

    fn get(&self, index: usize) -> &StaticInst {
        assert!(
            (1..=self.insts.len()).contains(&index),
            "trace index {index} outside 1..={}",
            self.insts.len()
        );
        &self.insts[index - 1]
    }
}

impl FromIterator<StaticInst> for Trace {
    fn from_iter<I: IntoIterator<Item = StaticInst>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// One resolved conditional branch, as replayed through a branch predictor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct BranchRecord {
    /// Branch instruction address.
    pub pc: u32,
    /// Resolved direction.
    pub taken: bool,
}
