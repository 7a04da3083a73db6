//! Complete Stage.
//!
//! Scans the integer units and then the floating-point units for occupants
//! whose latency has elapsed. Stores have nothing to broadcast: they release
//! their station and unit here and retire immediately. Every other finished
//! instruction competes for the single bus slot; the oldest candidate across
//! both domains wins and the rest keep their unit and try again next cycle.

use crate::core::pipeline::slots::Domain;
use crate::core::pipeline::state::CoreState;
use crate::core::record::{InstTag, Stage};

/// Executes the complete stage for `cycle`.
///
/// # Panics
///
/// Panics if the bus still carries an occupant, which means the retire stage
/// did not run first.
pub fn complete_stage(core: &mut CoreState, cycle: u64) {
    assert!(core.bus.is_idle(), "bus not drained before cycle {cycle}");

    let mut candidates: Vec<InstTag> = Vec::new();
    let mut stores = 0;
    for domain in Domain::ALL {
        let latency = core.latency(domain);
        let (records, stations, units) = core.domain_mut(domain);
        let occupants: Vec<InstTag> = units.occupants().map(|(_, tag)| tag).collect();
        for tag in occupants {
            let record = records.live_mut(tag);
            let finished = match record.stage() {
                Stage::Completed => true,
                Stage::Executing => cycle >= record.timing().execute + latency,
                _ => false,
            };
            if !finished {
                continue;
            }
            if record.inst.op.produces_bus_value() {
                candidates.push(tag);
                continue;
            }

            record.advance(Stage::Retired);
            let _ = units.vacate(tag);
            let _ = stations.vacate(tag);
            stores += 1;
            tracing::trace!(cycle, seq = tag.0, %domain, "complete: store retired");
        }
    }
    core.stats.stores_retired += stores;

    let Some(&winner) = candidates.iter().min() else {
        return;
    };
    if candidates.len() > 1 {
        core.stats.bus_contention += 1;
    }
    for &tag in &candidates {
        let record = core.records.live_mut(tag);
        if tag == winner {
            record.stamp_broadcast(cycle);
            record.advance(Stage::Broadcasting);
        } else if record.stage() == Stage::Executing {
            record.advance(Stage::Completed);
        }
    }
    core.bus.place(winner);
    core.stats.broadcasts += 1;
    tracing::trace!(
        cycle,
        seq = winner.0,
        waiting = candidates.len() - 1,
        "complete: broadcast on common data bus"
    );
}
