//! Instruction model consumed by the core.
//!
//! Traces arrive pre-decoded, so the ISA layer is reduced to what scheduling
//! needs: an opcode class with its classification predicates, and up to three
//! source and two destination register operands.

/// Decoded instruction record delivered by the trace.
pub mod instruction;

/// Opcode classes and classification predicates.
pub mod opclass;

pub use instruction::{MAX_DST, MAX_SRC, StaticInst};
pub use opclass::OpClass;
