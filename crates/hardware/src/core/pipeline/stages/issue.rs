//! Issue Stage.
//!
//! Every free functional unit takes the oldest ready entry of its domain's
//! reservation stations. An entry is ready once all its dependency tags have
//! been cleared by a bus drain.

use crate::core::pipeline::slots::Domain;
use crate::core::pipeline::state::CoreState;
use crate::core::record::Stage;

/// Executes the issue stage for `cycle`.
pub fn issue_stage(core: &mut CoreState, cycle: u64) {
    for domain in Domain::ALL {
        let (records, stations, units) = core.domain_mut(domain);
        let mut started = 0;
        for unit in 0..units.capacity() {
            if units.get(unit).is_some() {
                continue;
            }
            let oldest_ready = stations
                .occupants()
                .map(|(_, tag)| tag)
                .filter(|&tag| records.live(tag).is_ready())
                .min();
            let Some(tag) = oldest_ready else {
                break;
            };

            units.fill(unit, tag);
            let record = records.live_mut(tag);
            record.stamp_execute(cycle);
            record.advance(Stage::Executing);
            started += 1;
            tracing::trace!(cycle, seq = tag.0, %domain, unit, "issue: started execution");
        }
        match domain {
            Domain::Int => core.stats.executed_int += started,
            Domain::Fp => core.stats.executed_fp += started,
        }
    }
}
