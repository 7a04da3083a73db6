//! Microarchitectural state shared by the pipeline stages.
//!
//! Each stage is a free function over [`CoreState`]. The state owns every
//! record of the run plus the structures that reference them by tag.

use crate::config::TomasuloConfig;
use crate::core::pipeline::cdb::CommonDataBus;
use crate::core::pipeline::fetch_queue::FetchQueue;
use crate::core::pipeline::map_table::MapTable;
use crate::core::pipeline::slots::{Domain, SlotPool};
use crate::core::record::RecordArena;
use crate::isa::OpClass;
use crate::stats::SimStats;

/// Everything the stages read and write during one cycle.
#[derive(Debug)]
pub struct CoreState {
    /// All fetched records, indexed by tag.
    pub records: RecordArena,
    /// Fetched, not yet dispatched instructions.
    pub fetch_queue: FetchQueue,
    /// Integer reservation stations.
    pub int_stations: SlotPool,
    /// Floating-point reservation stations.
    pub fp_stations: SlotPool,
    /// Integer functional units.
    pub int_units: SlotPool,
    /// Floating-point functional units.
    pub fp_units: SlotPool,
    /// The single broadcast slot.
    pub bus: CommonDataBus,
    /// Latest pending producer per register.
    pub map_table: MapTable,
    /// Number of trace entries consumed so far (traps included).
    pub fetch_index: usize,
    int_latency: u64,
    fp_latency: u64,
    /// Counters updated by the stages.
    pub stats: SimStats,
}

impl CoreState {
    /// Builds an empty core sized by `config` for a trace of `trace_len` entries.
    pub fn new(config: &TomasuloConfig, trace_len: usize) -> Self {
        Self {
            records: RecordArena::with_capacity(trace_len),
            fetch_queue: FetchQueue::new(config.fetch_queue_size),
            int_stations: SlotPool::new("rs.int", config.int_reservation),
            fp_stations: SlotPool::new("rs.fp", config.fp_reservation),
            int_units: SlotPool::new("fu.int", config.int_units),
            fp_units: SlotPool::new("fu.fp", config.fp_units),
            bus: CommonDataBus::new(),
            map_table: MapTable::new(),
            fetch_index: 0,
            int_latency: config.int_latency,
            fp_latency: config.fp_latency,
            stats: SimStats::default(),
        }
    }

    /// Domain an opcode class executes in; `None` for control flow and traps.
    pub const fn domain_of(op: OpClass) -> Option<Domain> {
        if op.uses_int_unit() {
            Some(Domain::Int)
        } else if op.uses_fp_unit() {
            Some(Domain::Fp)
        } else {
            None
        }
    }

    /// Execution latency of a domain's functional units.
    #[inline]
    pub const fn latency(&self, domain: Domain) -> u64 {
        match domain {
            Domain::Int => self.int_latency,
            Domain::Fp => self.fp_latency,
        }
    }

    /// Reservation stations of `domain`.
    pub const fn stations(&self, domain: Domain) -> &SlotPool {
        match domain {
            Domain::Int => &self.int_stations,
            Domain::Fp => &self.fp_stations,
        }
    }

    /// Functional units of `domain`.
    pub const fn units(&self, domain: Domain) -> &SlotPool {
        match domain {
            Domain::Int => &self.int_units,
            Domain::Fp => &self.fp_units,
        }
    }

    /// Stations and units of `domain`, borrowed together along with the records.
    pub fn domain_mut(&mut self, domain: Domain) -> (&mut RecordArena, &mut SlotPool, &mut SlotPool) {
        match domain {
            Domain::Int => (&mut self.records, &mut self.int_stations, &mut self.int_units),
            Domain::Fp => (&mut self.records, &mut self.fp_stations, &mut self.fp_units),
        }
    }

    /// Returns true once every station and unit is empty.
    pub fn pools_empty(&self) -> bool {
        self.int_stations.is_empty()
            && self.fp_stations.is_empty()
            && self.int_units.is_empty()
            && self.fp_units.is_empty()
    }

    /// Debug-build consistency checks run after every cycle.
    ///
    /// Unit occupants must also hold a station, and every occupied station must
    /// belong to a record in a station-holding stage.
    pub fn debug_check(&self) {
        if cfg!(debug_assertions) {
            for domain in Domain::ALL {
                let stations = self.stations(domain);
                let units = self.units(domain);
                for (_, tag) in units.occupants() {
                    debug_assert!(
                        stations.contains(tag),
                        "{tag} in {} without a station",
                        units.name()
                    );
                }
                for (slot, tag) in stations.occupants() {
                    let stage = self.records.live(tag).stage();
                    debug_assert!(
                        stage.holds_station(),
                        "{}[{slot}] holds {tag} in stage {stage:?}",
                        stations.name()
                    );
                }
            }
        }
    }
}
