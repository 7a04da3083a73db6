//! Cycle-driven Tomasulo engine.
//!
//! The engine owns a [`CoreState`] and borrows the trace it replays. Each call
//! to [`TomasuloEngine::step`] simulates one cycle:
//! 1. **Stages:** retire, complete, issue, dispatch, fetch (reverse pipeline order).
//! 2. **Clock:** the cycle counter advances.
//! 3. **Termination:** the run ends once the trace is consumed and the fetch
//!    queue, every reservation station, and every functional unit are empty.
//!
//! The termination test runs after the clock advance, so the reported count is
//! one past the last simulated cycle, and even an empty trace takes one cycle.

use crate::common::SimError;
use crate::config::Config;
use crate::core::pipeline::stages::{
    complete_stage, dispatch_stage, fetch_stage, issue_stage, retire_stage,
};
use crate::core::pipeline::cdb::CommonDataBus;
use crate::core::pipeline::state::CoreState;
use crate::core::record::{InstTag, InstructionRecord};
use crate::trace::TraceSource;

/// Replays one trace through the out-of-order core.
#[derive(Debug)]
pub struct TomasuloEngine<'a, T: TraceSource + ?Sized> {
    trace: &'a T,
    core: CoreState,
    cycle: u64,
    finished: bool,
    max_cycles: Option<u64>,
    trace_pipeline: bool,
}

impl<'a, T: TraceSource + ?Sized> TomasuloEngine<'a, T> {
    /// Creates an engine at cycle 1 with all structures empty.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if `config` fails validation.
    pub fn new(trace: &'a T, config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            trace,
            core: CoreState::new(&config.tomasulo, trace.len()),
            cycle: 1,
            finished: false,
            max_cycles: config.general.max_cycles,
            trace_pipeline: config.general.trace_pipeline,
        })
    }

    /// Current value of the cycle counter.
    #[inline]
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Returns true once the termination condition has been observed.
    #[inline]
    pub const fn is_done(&self) -> bool {
        self.finished
    }

    /// Read access to the microarchitectural state.
    pub const fn core(&self) -> &CoreState {
        &self.core
    }

    /// The broadcast bus as left by the last simulated cycle.
    pub const fn bus(&self) -> &CommonDataBus {
        &self.core.bus
    }

    /// Record of the instruction with sequence index `tag`, if it was fetched.
    pub fn record(&self, tag: InstTag) -> Option<&InstructionRecord> {
        self.core.records.get(tag)
    }

    /// Simulates one cycle. Returns true while more cycles remain.
    pub fn step(&mut self) -> bool {
        if self.finished {
            return false;
        }
        let cycle = self.cycle;

        retire_stage(&mut self.core, cycle);
        complete_stage(&mut self.core, cycle);
        issue_stage(&mut self.core, cycle);
        dispatch_stage(&mut self.core, cycle);
        fetch_stage(&mut self.core, self.trace, cycle);

        self.core.debug_check();
        if self.trace_pipeline {
            let c = &self.core;
            let pending: Vec<_> = c.map_table.pending().collect();
            tracing::debug!(
                cycle,
                fq = c.fetch_queue.len(),
                "{:?} {:?} {:?} {:?} cdb={:?} map={pending:?}",
                c.int_stations,
                c.fp_stations,
                c.int_units,
                c.fp_units,
                c.bus.occupant()
            );
        }

        self.cycle += 1;
        self.finished = self.is_drained();
        debug_assert!(
            !self.finished || self.core.map_table.is_empty(),
            "drained with pending producers"
        );
        !self.finished
    }

    /// Runs until termination and returns the final cycle count.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CycleLimit`] if `general.max_cycles` cycles elapse
    /// without the core draining.
    pub fn run(&mut self) -> Result<u64, SimError> {
        while self.step() {
            if let Some(limit) = self.max_cycles
                && self.cycle > limit
            {
                tracing::warn!(limit, "cycle limit reached before the core drained");
                return Err(SimError::CycleLimit { limit });
            }
        }
        self.core.stats.cycles = self.cycle;
        tracing::debug!(
            cycles = self.cycle,
            instructions = self.core.stats.instructions_fetched,
            "simulation finished"
        );
        Ok(self.cycle)
    }

    /// Consumes the engine, returning the final state.
    pub fn into_core(self) -> CoreState {
        self.core
    }

    fn is_drained(&self) -> bool {
        self.core.fetch_index >= self.trace.len()
            && self.core.fetch_queue.is_empty()
            && self.core.pools_empty()
    }
}
