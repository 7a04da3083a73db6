//! Common types shared across the simulator.
//!
//! This module provides the fundamental building blocks used by every other
//! component:
//! 1. **Error Handling:** Typed errors for configuration, traces, and runs.
//! 2. **Register Identifiers:** The flat architectural register space.

/// Error types for configuration, trace loading, and simulation.
pub mod error;

/// Architectural register identifiers.
pub mod reg;

pub use error::{ConfigError, SimError, TraceError};
pub use reg::{RegId, TOTAL_REGS};
