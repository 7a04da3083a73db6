//! Simulator: validated configuration plus the per-run driver.
//!
//! A [`Simulator`] can replay any number of traces; each call to
//! [`Simulator::run`] builds a fresh [`TomasuloEngine`], runs it to completion,
//! and packages the result as a [`RunReport`].

use crate::common::SimError;
use crate::config::Config;
use crate::core::TomasuloEngine;
use crate::stats::{InstTiming, SimStats, print_timings};
use crate::trace::TraceSource;

/// Top-level simulator.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: Config,
}

impl Simulator {
    /// Creates a simulator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the configuration is rejected.
    pub fn new(config: Config) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration every run uses.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Replays `trace` until the core drains.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CycleLimit`] if `general.max_cycles` is set and exceeded.
    pub fn run<T: TraceSource + ?Sized>(&self, trace: &T) -> Result<RunReport, SimError> {
        let mut engine = TomasuloEngine::new(trace, &self.config)?;
        let total_cycles = engine.run()?;
        let core = engine.into_core();
        Ok(RunReport {
            total_cycles,
            timings: core.records.iter().map(InstTiming::from).collect(),
            stats: core.stats,
        })
    }
}

/// Result of one completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Value of the cycle counter when the termination test first held.
    pub total_cycles: u64,
    /// Counters collected during the run.
    pub stats: SimStats,
    /// Cycle stamps of every fetched instruction, in program order.
    pub timings: Vec<InstTiming>,
}

impl RunReport {
    /// Timing row of the instruction with 1-based sequence index `seq`.
    pub fn timing(&self, seq: usize) -> Option<&InstTiming> {
        self.timings.iter().find(|t| t.tag.0 == seq)
    }

    /// Prints the per-instruction timing table to stdout.
    pub fn print_timings(&self) {
        print_timings(&self.timings);
    }
}
