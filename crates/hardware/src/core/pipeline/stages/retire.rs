//! Retire Stage.
//!
//! Drains the instruction broadcast in the previous cycle: clears matching
//! dependency tags in both station pools, frees its station and unit, and
//! removes it from the map table wherever it is still the newest producer.

use crate::core::pipeline::slots::Domain;
use crate::core::pipeline::state::CoreState;
use crate::core::record::Stage;

/// Executes the retire stage for `cycle`.
///
/// # Panics
///
/// Panics if the broadcasting instruction does not hold a station and a unit.
pub fn retire_stage(core: &mut CoreState, cycle: u64) {
    let Some(tag) = core.bus.occupant() else {
        return;
    };

    let mut woken = 0;
    for domain in Domain::ALL {
        let (records, stations, _) = core.domain_mut(domain);
        for (_, waiter) in stations.occupants() {
            woken += records.live_mut(waiter).resolve(tag);
        }
    }

    let op = core.records.live(tag).inst.op;
    let Some(domain) = CoreState::domain_of(op) else {
        panic!("{tag}: {op} was broadcast");
    };
    let (records, stations, units) = core.domain_mut(domain);
    assert!(stations.vacate(tag).is_some(), "{tag} retired without rs.{domain} slot");
    assert!(units.vacate(tag).is_some(), "{tag} retired without fu.{domain} slot");
    records.live_mut(tag).advance(Stage::Retired);

    let cleared = core.map_table.clear_producer(tag);
    let _ = core.bus.drain();
    core.stats.wakeups += woken as u64;
    tracing::trace!(cycle, seq = tag.0, woken, cleared, "retire: bus drained");
}
