//! Fluent builder for synthetic instruction traces.
//!
//! Used by tests and demos to describe short programs by their register
//! dataflow only:
//!
//! ```
//! use tomsim_core::common::RegId;
//! use tomsim_core::trace::{TraceBuilder, TraceSource};
//!
//! let r = RegId::int;
//! let trace = TraceBuilder::new()
//!     .load(r(1), &[r(2)])
//!     .int(r(3), &[r(1), r(1)])
//!     .store(&[r(3), r(2)])
//!     .branch(&[r(3)])
//!     .build();
//! assert_eq!(trace.len(), 4);
//! ```

use super::Trace;
use crate::common::RegId;
use crate::isa::{OpClass, StaticInst};

/// Accumulates instructions in program order.
#[derive(Debug, Default)]
pub struct TraceBuilder {
    insts: Vec<StaticInst>,
}

impl TraceBuilder {
    /// Starts an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an arbitrary instruction.
    #[must_use]
    pub fn push(mut self, inst: StaticInst) -> Self {
        self.insts.push(inst);
        self
    }

    /// Integer compute writing `dst`.
    #[must_use]
    pub fn int(self, dst: RegId, src: &[RegId]) -> Self {
        self.push(StaticInst::new(OpClass::IntCompute).with_dst(&[dst]).with_src(src))
    }

    /// Integer compute with no destination (e.g. a compare feeding nothing).
    #[must_use]
    pub fn int_no_dst(self, src: &[RegId]) -> Self {
        self.push(StaticInst::new(OpClass::IntCompute).with_src(src))
    }

    /// Floating-point compute writing `dst`.
    #[must_use]
    pub fn fp(self, dst: RegId, src: &[RegId]) -> Self {
        self.push(StaticInst::new(OpClass::FpCompute).with_dst(&[dst]).with_src(src))
    }

    /// Load into `dst` addressed by `src`.
    #[must_use]
    pub fn load(self, dst: RegId, src: &[RegId]) -> Self {
        self.push(StaticInst::new(OpClass::Load).with_dst(&[dst]).with_src(src))
    }

    /// Store reading `src` (data and address registers).
    #[must_use]
    pub fn store(self, src: &[RegId]) -> Self {
        self.push(StaticInst::new(OpClass::Store).with_src(src))
    }

    /// Conditional branch reading `src`.
    #[must_use]
    pub fn branch(self, src: &[RegId]) -> Self {
        self.push(StaticInst::new(OpClass::CondBranch).with_src(src))
    }

    /// Unconditional jump.
    #[must_use]
    pub fn jump(self) -> Self {
        self.push(StaticInst::new(OpClass::UncondBranch))
    }

    /// Trap (skipped by fetch).
    #[must_use]
    pub fn trap(self) -> Self {
        self.push(StaticInst::new(OpClass::Trap))
    }

    /// Appends `n` independent integer instructions writing `r1`..
    #[must_use]
    pub fn independent_ints(mut self, n: usize) -> Self {
        for i in 0..n {
            self = self.int(RegId::int(1 + i % 31), &[]);
        }
        self
    }

    /// Finishes the trace.
    pub fn build(self) -> Trace {
        Trace::new(self.insts)
    }
}
