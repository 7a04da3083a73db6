//! Architectural register identifiers.
//!
//! The register space is flat: integer registers first, then floating-point
//! registers, then the miscellaneous registers (HI, LO, FCC and a few scratch
//! ids used by the trace producer). The map table is indexed directly by
//! [`RegId::index`].

use std::fmt;

/// Number of integer registers.
pub const NUM_INT_REGS: usize = 32;

/// Number of floating-point registers.
pub const NUM_FP_REGS: usize = 32;

/// Number of miscellaneous registers (HI, LO, FCC, TMP, MEM, CTRL).
pub const NUM_MISC_REGS: usize = 6;

/// Total architectural registers tracked by the map table.
pub const TOTAL_REGS: usize = NUM_INT_REGS + NUM_FP_REGS + NUM_MISC_REGS;

/// An architectural register id in `0..TOTAL_REGS`.
///
/// An operand slot that does not access a register is represented as
/// `None` in an `Option<RegId>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegId(u8);

impl RegId {
    /// Multiply/divide high result register.
    pub const HI: Self = Self((NUM_INT_REGS + NUM_FP_REGS) as u8);
    /// Multiply/divide low result register.
    pub const LO: Self = Self((NUM_INT_REGS + NUM_FP_REGS + 1) as u8);
    /// Floating-point condition code register.
    pub const FCC: Self = Self((NUM_INT_REGS + NUM_FP_REGS + 2) as u8);

    /// Builds a register id from a flat index, or `None` if it is out of range.
    pub fn new(index: usize) -> Option<Self> {
        (index < TOTAL_REGS).then_some(Self(index as u8))
    }

    /// Integer register `n`.
    ///
    /// # Panics
    ///
    /// Panics if `n >= NUM_INT_REGS`.
    pub const fn int(n: usize) -> Self {
        assert!(n < NUM_INT_REGS, "integer register out of range");
        Self(n as u8)
    }

    /// Floating-point register `n`.
    ///
    /// # Panics
    ///
    /// Panics if `n >= NUM_FP_REGS`.
    pub const fn fp(n: usize) -> Self {
        assert!(n < NUM_FP_REGS, "floating-point register out of range");
        Self((NUM_INT_REGS + n) as u8)
    }

    /// Flat index into the register space.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if this is a floating-point register.
    pub const fn is_fp(self) -> bool {
        let i = self.0 as usize;
        i >= NUM_INT_REGS && i < NUM_INT_REGS + NUM_FP_REGS
    }
}

impl fmt::Display for RegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let i = self.index();
        match i {
            _ if i < NUM_INT_REGS => write!(f, "r{i}"),
            _ if self.is_fp() => write!(f, "f{}", i - NUM_INT_REGS),
            _ => {
                let names = ["hi", "lo", "fcc", "tmp", "mem", "ctrl"];
                write!(f, "{}", names[i - NUM_INT_REGS - NUM_FP_REGS])
            }
        }
    }
}
