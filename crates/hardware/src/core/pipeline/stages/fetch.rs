//! Fetch Stage.
//!
//! Reads at most one instruction per cycle from the trace into the fetch queue.
//! Trap entries are consumed without producing a record. After the read, every
//! queued instruction that has not been stamped yet receives this cycle as its
//! dispatch stamp.

use crate::core::pipeline::state::CoreState;
use crate::core::record::{InstTag, InstructionRecord, Stage};
use crate::trace::TraceSource;

/// Executes the fetch stage for `cycle`.
pub fn fetch_stage<T: TraceSource + ?Sized>(core: &mut CoreState, trace: &T, cycle: u64) {
    while core.fetch_index < trace.len() && trace.get(core.fetch_index + 1).op.is_trap() {
        core.fetch_index += 1;
        core.stats.record_fetch(trace.get(core.fetch_index).op);
        tracing::trace!(cycle, seq = core.fetch_index, "fetch: trap skipped");
    }

    if core.fetch_index < trace.len() && !core.fetch_queue.is_full() {
        core.fetch_index += 1;
        let tag = InstTag(core.fetch_index);
        let inst = trace.get(tag.0).clone();
        core.stats.record_fetch(inst.op);
        tracing::trace!(cycle, seq = tag.0, op = %inst.op, "fetch");
        core.records.insert(InstructionRecord::new(tag, inst));
        core.fetch_queue.push(tag);
    }

    for tag in core.fetch_queue.iter() {
        let record = core.records.live_mut(tag);
        if record.stamp_dispatch(cycle) {
            record.advance(Stage::Dispatched);
        }
    }
}
