//! Configuration system for the Tomasulo simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** The reference core geometry (queue, reservation stations, units, latencies).
//! 2. **Structures:** Hierarchical config for general, core, and branch predictor settings.
//! 3. **Validation:** Rejection of geometries the core cannot run with.
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or via `Config::default()`.
//! Every field is optional in the JSON document; missing fields take their defaults.

use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values reproduce the reference Tomasulo configuration when not
/// explicitly overridden.
mod defaults {
    /// Instruction fetch queue depth.
    pub const FETCH_QUEUE_SIZE: usize = 10;

    /// Integer reservation stations (integer compute, loads, and stores).
    pub const INT_RESERVATION: usize = 4;

    /// Floating-point reservation stations.
    pub const FP_RESERVATION: usize = 2;

    /// Integer functional units.
    pub const INT_UNITS: usize = 2;

    /// Floating-point functional units.
    pub const FP_UNITS: usize = 1;

    /// Integer functional unit latency in cycles.
    pub const INT_LATENCY: u64 = 4;

    /// Floating-point functional unit latency in cycles.
    pub const FP_LATENCY: u64 = 9;

    /// Two-bit saturating predictor table size (4096 counters).
    pub const TWO_BIT_ENTRIES: usize = 4096;

    /// Two-level predictor branch history table size.
    pub const BHT_ENTRIES: usize = 512;

    /// Two-level predictor history bits per BHT entry.
    pub const BHT_HISTORY_BITS: usize = 6;

    /// Number of pattern history tables, selected by the low PC bits.
    pub const PHT_COUNT: usize = 8;

    /// Perceptron table rows.
    pub const PERCEPTRON_ENTRIES: usize = 256;

    /// Perceptron global history length.
    pub const PERCEPTRON_HISTORY: usize = 32;

    /// Perceptron training threshold.
    pub const PERCEPTRON_THRESHOLD: i32 = 100;
}

/// Branch prediction algorithm types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictorKind {
    /// Table of 2-bit saturating counters indexed by PC.
    #[default]
    #[serde(alias = "two-bit")]
    TwoBitSaturating,
    /// Per-address history two-level adaptive predictor.
    #[serde(alias = "two-level")]
    TwoLevel,
    /// Perceptron predictor over a global history register.
    #[serde(alias = "perceptron")]
    Perceptron,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use tomsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.tomasulo.int_reservation, 4);
/// assert_eq!(config.tomasulo.fp_latency, 9);
/// ```
///
/// Partial JSON documents are accepted:
///
/// ```
/// use tomsim_core::config::{BranchPredictorKind, Config};
///
/// let json = r#"{
///     "tomasulo": { "int_units": 3, "int_latency": 2 },
///     "branch": { "predictor": "Perceptron" }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.tomasulo.int_units, 3);
/// assert_eq!(config.tomasulo.fp_units, 1);
/// assert_eq!(config.branch.predictor, BranchPredictorKind::Perceptron);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General simulation settings.
    pub general: GeneralConfig,
    /// Out-of-order core geometry and latencies.
    pub tomasulo: TomasuloConfig,
    /// Branch predictor selection and table geometry.
    pub branch: BranchConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks that every section describes a runnable machine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tomasulo.validate()?;
        self.branch.validate()
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Emit per-stage `trace`-level events for every instruction.
    pub trace_pipeline: bool,

    /// Abort the run with an error if the pipeline has not drained after
    /// this many cycles. `None` runs until the trace completes.
    pub max_cycles: Option<u64>,
}

/// Geometry and latencies of the out-of-order core.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TomasuloConfig {
    /// Instruction fetch queue depth.
    pub fetch_queue_size: usize,
    /// Integer reservation station count.
    pub int_reservation: usize,
    /// Floating-point reservation station count.
    pub fp_reservation: usize,
    /// Integer functional unit count.
    pub int_units: usize,
    /// Floating-point functional unit count.
    pub fp_units: usize,
    /// Cycles an integer-class instruction spends executing.
    pub int_latency: u64,
    /// Cycles a floating-point instruction spends executing.
    pub fp_latency: u64,
}

impl Default for TomasuloConfig {
    fn default() -> Self {
        Self {
            fetch_queue_size: defaults::FETCH_QUEUE_SIZE,
            int_reservation: defaults::INT_RESERVATION,
            fp_reservation: defaults::FP_RESERVATION,
            int_units: defaults::INT_UNITS,
            fp_units: defaults::FP_UNITS,
            int_latency: defaults::INT_LATENCY,
            fp_latency: defaults::FP_LATENCY,
        }
    }
}

impl TomasuloConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let pools = [
            ("fetch queue", self.fetch_queue_size),
            ("integer reservation station", self.int_reservation),
            ("floating-point reservation station", self.fp_reservation),
            ("integer functional unit", self.int_units),
            ("floating-point functional unit", self.fp_units),
        ];
        if let Some((pool, _)) = pools.iter().find(|(_, n)| *n == 0) {
            return Err(ConfigError::ZeroCapacity { pool: *pool });
        }
        if self.int_latency == 0 {
            return Err(ConfigError::ZeroLatency { unit: "integer" });
        }
        if self.fp_latency == 0 {
            return Err(ConfigError::ZeroLatency {
                unit: "floating-point",
            });
        }
        Ok(())
    }
}

/// Branch predictor configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BranchConfig {
    /// Predictor used by `tomsim bpred` when none is given on the command line.
    pub predictor: BranchPredictorKind,
    /// Two-bit saturating counter table geometry.
    pub two_bit: TwoBitConfig,
    /// Two-level adaptive predictor geometry.
    pub two_level: TwoLevelConfig,
    /// Perceptron predictor geometry.
    pub perceptron: PerceptronConfig,
}

impl BranchConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_pow2("two-bit counter table", self.two_bit.entries)?;
        check_pow2("branch history table", self.two_level.bht_entries)?;
        check_pow2("pattern history table set", self.two_level.pht_count)?;
        // History bits index the PHT, so they are bounded by the counter width.
        if !(1..=16).contains(&self.two_level.history_bits) {
            return Err(ConfigError::HistoryLength {
                table: "branch history table",
                length: self.two_level.history_bits,
                max: 16,
            });
        }
        check_pow2("perceptron table", self.perceptron.entries)?;
        if !(1..=64).contains(&self.perceptron.history_length) {
            return Err(ConfigError::HistoryLength {
                table: "perceptron",
                length: self.perceptron.history_length,
                max: 64,
            });
        }
        Ok(())
    }
}

fn check_pow2(table: &'static str, size: usize) -> Result<(), ConfigError> {
    if size.is_power_of_two() {
        Ok(())
    } else {
        Err(ConfigError::TableSize { table, size })
    }
}

/// Two-bit saturating counter predictor geometry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TwoBitConfig {
    /// Number of counters (power of two).
    pub entries: usize,
}

impl Default for TwoBitConfig {
    fn default() -> Self {
        Self {
            entries: defaults::TWO_BIT_ENTRIES,
        }
    }
}

/// Two-level adaptive predictor geometry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TwoLevelConfig {
    /// Branch history table entries (power of two).
    pub bht_entries: usize,
    /// History bits kept per BHT entry.
    pub history_bits: usize,
    /// Number of pattern history tables (power of two).
    pub pht_count: usize,
}

impl Default for TwoLevelConfig {
    fn default() -> Self {
        Self {
            bht_entries: defaults::BHT_ENTRIES,
            history_bits: defaults::BHT_HISTORY_BITS,
            pht_count: defaults::PHT_COUNT,
        }
    }
}

/// Perceptron predictor geometry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PerceptronConfig {
    /// Number of weight rows (power of two).
    pub entries: usize,
    /// Global history length (weights per row).
    pub history_length: usize,
    /// Train while the output magnitude is at or below this value.
    pub threshold: i32,
}

impl Default for PerceptronConfig {
    fn default() -> Self {
        Self {
            entries: defaults::PERCEPTRON_ENTRIES,
            history_length: defaults::PERCEPTRON_HISTORY,
            threshold: defaults::PERCEPTRON_THRESHOLD,
        }
    }
}
