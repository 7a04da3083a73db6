//! Opcode classification.
//!
//! The core never looks at individual opcodes: every decision it makes
//! (which reservation-station pool, which functional unit, whether the result
//! goes on the common data bus, whether the instruction is skipped or dropped)
//! is a function of the opcode class alone.

use std::fmt;

use serde::Deserialize;

/// Scheduling class of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum OpClass {
    /// Integer arithmetic/logic.
    #[serde(alias = "int")]
    IntCompute,
    /// Memory load (integer or floating-point destination).
    #[serde(alias = "load")]
    Load,
    /// Memory store.
    #[serde(alias = "store")]
    Store,
    /// Floating-point arithmetic.
    #[serde(alias = "fp")]
    FpCompute,
    /// Conditional branch.
    #[serde(alias = "branch")]
    CondBranch,
    /// Unconditional jump.
    #[serde(alias = "jump")]
    UncondBranch,
    /// Function call.
    #[serde(alias = "call")]
    Call,
    /// System call / trap; skipped by fetch.
    #[serde(alias = "trap")]
    Trap,
}

impl OpClass {
    /// Integer arithmetic/logic.
    #[inline]
    pub const fn is_integer_compute(self) -> bool {
        matches!(self, Self::IntCompute)
    }

    /// Floating-point arithmetic.
    #[inline]
    pub const fn is_floating_point_compute(self) -> bool {
        matches!(self, Self::FpCompute)
    }

    /// Memory load.
    #[inline]
    pub const fn is_load(self) -> bool {
        matches!(self, Self::Load)
    }

    /// Memory store.
    #[inline]
    pub const fn is_store(self) -> bool {
        matches!(self, Self::Store)
    }

    /// Conditional branch.
    #[inline]
    pub const fn is_conditional_branch(self) -> bool {
        matches!(self, Self::CondBranch)
    }

    /// Unconditional jump or call.
    #[inline]
    pub const fn is_unconditional_branch(self) -> bool {
        matches!(self, Self::UncondBranch | Self::Call)
    }

    /// Any control-flow instruction. These leave the fetch queue at dispatch
    /// without occupying a reservation station or functional unit.
    #[inline]
    pub const fn is_control(self) -> bool {
        self.is_conditional_branch() || self.is_unconditional_branch()
    }

    /// Trap instruction, skipped at fetch.
    #[inline]
    pub const fn is_trap(self) -> bool {
        matches!(self, Self::Trap)
    }

    /// Executes on the integer pool (integer compute, loads, and stores).
    #[inline]
    pub const fn uses_int_unit(self) -> bool {
        self.is_integer_compute() || self.is_load() || self.is_store()
    }

    /// Executes on the floating-point pool.
    #[inline]
    pub const fn uses_fp_unit(self) -> bool {
        self.is_floating_point_compute()
    }

    /// Writes its result to the common data bus. Stores do not.
    #[inline]
    pub const fn produces_bus_value(self) -> bool {
        self.is_integer_compute() || self.is_load() || self.is_floating_point_compute()
    }

    /// Short lowercase mnemonic used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::IntCompute => "int",
            Self::Load => "load",
            Self::Store => "store",
            Self::FpCompute => "fp",
            Self::CondBranch => "branch",
            Self::UncondBranch => "jump",
            Self::Call => "call",
            Self::Trap => "trap",
        }
    }
}

impl fmt::Display for OpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
