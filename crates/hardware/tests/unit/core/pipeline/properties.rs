//! Randomized Scheduling Invariants.
//!
//! Arbitrary traces over every opcode class with a small register pool, so
//! dependencies, bus contention, and structural stalls are all common.

use std::collections::HashMap;

use proptest::prelude::*;
use tomsim_core::common::RegId;
use tomsim_core::config::Config;
use tomsim_core::core::pipeline::{CoreState, Domain};
use tomsim_core::core::record::{InstTag, Stage};
use tomsim_core::trace::{Trace, TraceBuilder, TraceSource};
use tomsim_core::{Simulator, TomasuloEngine};

use crate::common::traces::trace_strategy;

const CYCLE_GUARD: u64 = 100_000;

fn guarded_config() -> Config {
    let mut config = Config::default();
    config.general.max_cycles = Some(CYCLE_GUARD);
    config
}

fn total_cycles(trace: &Trace) -> u64 {
    Simulator::new(guarded_config()).unwrap().run(trace).unwrap().total_cycles
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Queue, stations, and units never hold more than their capacity.
    #[test]
    fn occupancy_within_capacity(trace in trace_strategy(40)) {
        let config = guarded_config();
        let mut engine = TomasuloEngine::new(&trace, &config).unwrap();
        loop {
            let more = engine.step();
            let core = engine.core();
            prop_assert!(core.fetch_queue.len() <= core.fetch_queue.capacity());
            for domain in Domain::ALL {
                prop_assert!(core.stations(domain).occupied() <= core.stations(domain).capacity());
                prop_assert!(core.units(domain).occupied() <= core.units(domain).capacity());
                prop_assert!(core.units(domain).occupied() <= core.stations(domain).occupied());
            }
            if !more {
                prop_assert!(core.map_table.is_empty());
                break;
            }
            prop_assert!(engine.cycle() < CYCLE_GUARD);
        }
    }

    /// A unit never starts an entry while an older ready entry of its domain
    /// keeps waiting.
    #[test]
    fn units_start_oldest_ready_first(trace in trace_strategy(40)) {
        let config = guarded_config();
        let mut engine = TomasuloEngine::new(&trace, &config).unwrap();
        loop {
            let cycle = engine.cycle();
            let more = engine.step();
            let core = engine.core();
            for domain in Domain::ALL {
                let held: Vec<_> = core
                    .stations(domain)
                    .occupants()
                    .map(|(_, tag)| core.records.live(tag))
                    .collect();
                let youngest_started = held
                    .iter()
                    .filter(|r| r.stage() == Stage::Executing && r.timing().execute == cycle)
                    .map(|r| r.tag)
                    .max();
                // Entries dispatched this cycle arrived after issue ran.
                let oldest_waiting = held
                    .iter()
                    .filter(|r| r.is_ready() && r.timing().issue < cycle)
                    .map(|r| r.tag)
                    .min();
                if let (Some(started), Some(waiting)) = (youngest_started, oldest_waiting) {
                    prop_assert!(started < waiting, "cycle {}: {} started before {}", cycle, started, waiting);
                }
                for r in &held {
                    prop_assert_eq!(CoreState::domain_of(r.inst.op), Some(domain));
                }
            }
            if !more {
                break;
            }
        }
    }

    /// Whenever several finished instructions compete, the bus carries the oldest.
    #[test]
    fn bus_winner_is_oldest(trace in trace_strategy(40)) {
        let config = guarded_config();
        let mut engine = TomasuloEngine::new(&trace, &config).unwrap();
        while engine.step() {
            let core = engine.core();
            let losers: Vec<InstTag> = core
                .records
                .iter()
                .filter(|r| r.stage() == Stage::Completed)
                .map(|r| r.tag)
                .collect();
            match engine.bus().occupant() {
                Some(winner) => prop_assert!(losers.iter().all(|&l| l > winner)),
                None => prop_assert!(losers.is_empty()),
            }
        }
    }

    /// Every run terminates with all records retired or dropped and ordered stamps.
    #[test]
    fn runs_drain_with_ordered_stamps(trace in trace_strategy(60)) {
        let config = guarded_config();
        let report = Simulator::new(config.clone()).unwrap().run(&trace).unwrap();
        prop_assert!(report.total_cycles as usize > report.timings.len());

        for row in &report.timings {
            let t = row.timing;
            prop_assert!(t.is_ordered(), "{:?}", row);
            if row.op.is_control() {
                prop_assert_eq!(row.stage, Stage::Dropped);
                prop_assert_eq!((t.issue, t.execute, t.broadcast), (0, 0, 0));
                continue;
            }
            prop_assert_eq!(row.stage, Stage::Retired);
            prop_assert!(t.dispatch < t.issue && t.issue < t.execute);
            let latency = if row.op.uses_fp_unit() {
                config.tomasulo.fp_latency
            } else {
                config.tomasulo.int_latency
            };
            if row.op.produces_bus_value() {
                prop_assert!(t.broadcast >= t.execute + latency);
            } else {
                prop_assert_eq!(t.broadcast, 0);
            }
        }
    }

    /// No instruction starts executing before its newest producer broadcast.
    #[test]
    fn dependents_wait_for_producers(trace in trace_strategy(60)) {
        let report = Simulator::new(guarded_config()).unwrap().run(&trace).unwrap();
        let mut writer: HashMap<RegId, usize> = HashMap::new();
        for seq in 1..=trace.len() {
            let inst = trace.get(seq);
            if inst.op.is_trap() {
                continue;
            }
            if !inst.op.is_control() {
                let execute = report.timing(seq).unwrap().timing.execute;
                for (_, reg) in inst.sources() {
                    if let Some(&w) = writer.get(&reg) {
                        let broadcast = report.timing(w).unwrap().timing.broadcast;
                        prop_assert!(execute > broadcast, "#{} read {} from #{}", seq, reg, w);
                    }
                }
            }
            if inst.op.produces_bus_value() {
                for reg in inst.destinations() {
                    let _ = writer.insert(reg, seq);
                }
            }
        }
    }

    /// Appending an independent instruction never shortens the run.
    #[test]
    fn cycles_monotonic_in_length(n in 0usize..60) {
        let shorter = TraceBuilder::new().independent_ints(n).build();
        let longer = TraceBuilder::new().independent_ints(n + 1).build();
        prop_assert!(total_cycles(&longer) >= total_cycles(&shorter));
    }
}
