//! Common data bus.
//!
//! A single-slot channel: at most one completed instruction broadcasts per
//! cycle. The occupant placed by the execute stage in cycle N is drained by the
//! retire stage at the start of cycle N+1.

use crate::core::record::InstTag;

/// The single broadcast slot.
#[derive(Debug, Clone, Default)]
pub struct CommonDataBus {
    occupant: Option<InstTag>,
}

impl CommonDataBus {
    /// Creates an idle bus.
    pub const fn new() -> Self {
        Self { occupant: None }
    }

    /// Instruction currently broadcasting.
    #[inline]
    pub const fn occupant(&self) -> Option<InstTag> {
        self.occupant
    }

    /// Returns true if nothing is broadcasting.
    #[inline]
    pub const fn is_idle(&self) -> bool {
        self.occupant.is_none()
    }

    /// Puts `tag` on the bus.
    ///
    /// # Panics
    ///
    /// Panics if the bus was not drained since the last broadcast.
    pub fn place(&mut self, tag: InstTag) {
        assert!(
            self.occupant.is_none(),
            "bus already carries {:?} when placing {tag}",
            self.occupant
        );
        self.occupant = Some(tag);
    }

    /// Empties the bus, returning the previous occupant.
    pub fn drain(&mut self) -> Option<InstTag> {
        self.occupant.take()
    }
}
