//! Error definitions for configuration, trace loading, and simulation.
//!
//! This module defines the recoverable failures of the simulator. It provides:
//! 1. **Configuration Errors:** Rejected pool capacities, latencies, and predictor geometry.
//! 2. **Trace Errors:** I/O, JSON syntax, and malformed instruction records.
//! 3. **Simulation Errors:** A top-level error covering the above plus the cycle guard.
//!
//! Bookkeeping violations inside the core (a slot reported free that is occupied,
//! a dependency tag naming a record that is no longer in flight) are not errors:
//! they indicate a simulator bug and abort via assertions.

use thiserror::Error;

/// Invalid simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A pool (fetch queue, reservation stations, functional units) has no slots.
    #[error("{pool} capacity must be at least 1")]
    ZeroCapacity {
        /// Name of the offending pool.
        pool: &'static str,
    },

    /// A functional unit class was configured with a zero-cycle latency.
    #[error("{unit} latency must be at least 1 cycle")]
    ZeroLatency {
        /// Name of the offending unit class.
        unit: &'static str,
    },

    /// A predictor table size is not a non-zero power of two.
    #[error("{table} size {size} is not a power of two")]
    TableSize {
        /// Name of the offending table.
        table: &'static str,
        /// Configured size.
        size: usize,
    },

    /// A predictor history length is outside the supported range.
    #[error("{table} history length {length} is outside 1..={max}")]
    HistoryLength {
        /// Name of the offending table.
        table: &'static str,
        /// Configured length.
        length: usize,
        /// Largest supported length.
        max: usize,
    },

    /// The configuration document could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration document is not valid JSON for [`Config`](crate::config::Config).
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure while loading or validating an instruction trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be read.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    /// The trace document is not valid JSON.
    #[error("failed to parse trace: {0}")]
    Parse(#[from] serde_json::Error),

    /// The trace contains no instructions.
    #[error("trace contains no instructions")]
    Empty,

    /// An instruction names a register outside the architectural register space.
    #[error("instruction {index}: register {reg} out of range (max {max})")]
    RegisterOutOfRange {
        /// 1-based trace index of the instruction.
        index: usize,
        /// The offending register id.
        reg: u16,
        /// Highest valid register id.
        max: usize,
    },

    /// An instruction lists more operands than the record can hold.
    #[error("instruction {index}: {count} {kind} registers exceeds the limit of {limit}")]
    TooManyOperands {
        /// 1-based trace index of the instruction.
        index: usize,
        /// `"source"` or `"destination"`.
        kind: &'static str,
        /// Number of registers listed.
        count: usize,
        /// Maximum the record supports.
        limit: usize,
    },

    /// A store lists destination registers; stores never produce a register value.
    #[error("instruction {index}: store cannot write destination registers")]
    StoreDestination {
        /// 1-based trace index of the instruction.
        index: usize,
    },
}

/// Top-level simulator error.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration rejected before the run started.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Trace could not be loaded.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// The run exceeded `general.max_cycles` without draining the pipeline.
    #[error("simulation did not finish within {limit} cycles")]
    CycleLimit {
        /// The configured bound.
        limit: u64,
    },
}
