//! Dispatch Stage.
//!
//! Examines only the fetch-queue head. Control flow is removed without
//! touching any other structure. Everything else needs a free reservation
//! station in its domain; if none is free the head waits and blocks the queue.
//!
//! On success the instruction's sources are looked up in the map table before
//! its own destinations are written, so an instruction that reads and writes the
//! same register depends on the older producer and never on itself.

use crate::core::pipeline::state::CoreState;
use crate::core::pipeline::slots::Domain;
use crate::core::record::{InstTag, Stage};
use crate::isa::MAX_SRC;

/// Executes the dispatch stage for `cycle`.
///
/// # Panics
///
/// Panics if the map table names a producer that is no longer in flight.
pub fn dispatch_stage(core: &mut CoreState, cycle: u64) {
    let Some(tag) = core.fetch_queue.head() else {
        return;
    };
    let op = core.records.live(tag).inst.op;

    let Some(domain) = CoreState::domain_of(op) else {
        debug_assert!(op.is_control(), "{tag}: {op} reached dispatch");
        let _ = core.fetch_queue.pop();
        core.records.live_mut(tag).advance(Stage::Dropped);
        core.stats.control_dropped += 1;
        tracing::trace!(cycle, seq = tag.0, %op, "dispatch: control flow dropped");
        return;
    };

    let Some(slot) = core.stations(domain).free_slot() else {
        core.stats.stalls_structural += 1;
        tracing::trace!(cycle, seq = tag.0, %domain, "dispatch: no free reservation station");
        return;
    };
    let _ = core.fetch_queue.pop();

    let mut waits: [Option<InstTag>; MAX_SRC] = [None; MAX_SRC];
    for (operand, reg) in core.records.live(tag).inst.sources() {
        if let Some(producer) = core.map_table.producer(reg) {
            let stage = core.records.live(producer).stage();
            assert!(
                stage.holds_station(),
                "{tag} reads {reg} from {producer} which is {stage:?}"
            );
            waits[operand] = Some(producer);
        }
    }

    let record = core.records.live_mut(tag);
    for (operand, producer) in waits.iter().enumerate() {
        if let Some(producer) = *producer {
            record.wait_on(operand, producer);
        }
    }
    record.stamp_issue(cycle);
    record.advance(Stage::Issued);

    if op.produces_bus_value() {
        for reg in record.inst.destinations() {
            core.map_table.set_producer(reg, tag);
        }
    }

    match domain {
        Domain::Int => {
            core.int_stations.fill(slot, tag);
            core.stats.dispatched_int += 1;
        }
        Domain::Fp => {
            core.fp_stations.fill(slot, tag);
            core.stats.dispatched_fp += 1;
        }
    }
    tracing::trace!(cycle, seq = tag.0, %domain, slot, "dispatch: entered reservation station");
}
