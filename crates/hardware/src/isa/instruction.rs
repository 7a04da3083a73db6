//! Decoded instruction as delivered by the trace.

use std::fmt;

use super::opclass::OpClass;
use crate::common::RegId;

/// Maximum source operands per instruction.
pub const MAX_SRC: usize = 3;

/// Maximum destination operands per instruction.
pub const MAX_DST: usize = 2;

/// Static (trace-time) description of one instruction.
///
/// Operand slots that do not access a register are `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticInst {
    /// Scheduling class.
    pub op: OpClass,
    /// Source registers.
    pub src: [Option<RegId>; MAX_SRC],
    /// Destination registers.
    pub dst: [Option<RegId>; MAX_DST],
    /// Program counter, if the trace recorded one.
    pub pc: Option<u32>,
    /// Disassembly, if the trace recorded one.
    pub mnemonic: Option<String>,
}

impl StaticInst {
    /// Creates an instruction with no operands.
    pub const fn new(op: OpClass) -> Self {
        Self {
            op,
            src: [None; MAX_SRC],
            dst: [None; MAX_DST],
            pc: None,
            mnemonic: None,
        }
    }

    /// Sets the source operands, filling unused slots with `None`.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_SRC`] registers are given.
    #[must_use]
    pub fn with_src(mut self, regs: &[RegId]) -> Self {
        assert!(regs.len() <= MAX_SRC, "too many source registers");
        self.src = [None; MAX_SRC];
        for (slot, reg) in self.src.iter_mut().zip(regs) {
            *slot = Some(*reg);
        }
        self
    }

    /// Sets the destination operands, filling unused slots with `None`.
    ///
    /// # Panics
    ///
    /// Panics if more than [`MAX_DST`] registers are given.
    #[must_use]
    pub fn with_dst(mut self, regs: &[RegId]) -> Self {
        assert!(regs.len() <= MAX_DST, "too many destination registers");
        self.dst = [None; MAX_DST];
        for (slot, reg) in self.dst.iter_mut().zip(regs) {
            *slot = Some(*reg);
        }
        self
    }

    /// Source registers actually read, in operand order with their slot index.
    pub fn sources(&self) -> impl Iterator<Item = (usize, RegId)> + '_ {
        self.src
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.map(|r| (i, r)))
    }

    /// Destination registers actually written.
    pub fn destinations(&self) -> impl Iterator<Item = RegId> + '_ {
        self.dst.iter().flatten().copied()
    }
}

impl fmt::Display for StaticInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(m) = &self.mnemonic {
            return f.write_str(m);
        }
        write!(f, "{}", self.op)?;
        let mut sep = " ";
        for d in self.destinations() {
            write!(f, "{sep}{d}")?;
            sep = ",";
        }
        if self.sources().next().is_some() {
            f.write_str(" <-")?;
            sep = " ";
            for (_, s) in self.sources() {
                write!(f, "{sep}{s}")?;
                sep = ",";
            }
        }
        Ok(())
    }
}
