//! Register map table for producer tracking.
//!
//! Maps each architectural register to the tag of the in-flight instruction
//! that will produce its next value, or `None` if the value is already
//! available. Dispatch reads it to build dependency tags and then overwrites
//! the entries of the instruction's own destinations; the broadcast drain
//! clears every entry still naming the broadcasting instruction.

use crate::common::{RegId, TOTAL_REGS};
use crate::core::record::InstTag;

/// Per-register latest-producer table.
#[derive(Debug, Clone)]
pub struct MapTable {
    entries: [Option<InstTag>; TOTAL_REGS],
}

impl Default for MapTable {
    fn default() -> Self {
        Self::new()
    }
}

impl MapTable {
    /// Create a map table with no pending producers.
    pub const fn new() -> Self {
        Self {
            entries: [None; TOTAL_REGS],
        }
    }

    /// Mark `tag` as the newest producer of `reg`, shadowing any older one.
    pub fn set_producer(&mut self, reg: RegId, tag: InstTag) {
        self.entries[reg.index()] = Some(tag);
    }

    /// The pending producer of `reg`, if any.
    #[inline]
    pub fn producer(&self, reg: RegId) -> Option<InstTag> {
        self.entries[reg.index()]
    }

    /// Clear every entry naming `tag`. Returns the number of entries cleared.
    ///
    /// Entries already overwritten by a younger dispatch name a different tag
    /// and are left alone.
    pub fn clear_producer(&mut self, tag: InstTag) -> usize {
        let mut cleared = 0;
        for slot in &mut self.entries {
            if *slot == Some(tag) {
                *slot = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Registers with a pending producer, in register order.
    pub fn pending(&self) -> impl Iterator<Item = (RegId, InstTag)> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, slot)| {
            slot.and_then(|tag| RegId::new(i).map(|reg| (reg, tag)))
        })
    }

    /// Returns true if no register has a pending producer.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }
}
