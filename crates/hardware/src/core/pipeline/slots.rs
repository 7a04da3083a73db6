//! Fixed-capacity slot pools.
//!
//! Reservation stations and functional units are both modeled as a pool of
//! numbered slots, each empty or holding one instruction tag. Slot numbering is
//! stable: an instruction keeps its slot until a stage explicitly vacates it.

use std::fmt;

use crate::core::record::InstTag;

/// Execution domain of a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Integer compute, loads, and stores.
    Int,
    /// Floating-point compute.
    Fp,
}

impl Domain {
    /// Both domains, integer first.
    pub const ALL: [Self; 2] = [Self::Int, Self::Fp];
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Int => "int",
            Self::Fp => "fp",
        })
    }
}

/// A bounded set of slots holding at most one tag each.
#[derive(Clone)]
pub struct SlotPool {
    name: &'static str,
    slots: Vec<Option<InstTag>>,
}

impl SlotPool {
    /// Creates a pool of `capacity` empty slots.
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            slots: vec![None; capacity],
        }
    }

    /// Pool name used in diagnostics.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns true if every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Index of the lowest free slot.
    pub fn free_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Occupant of slot `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<InstTag> {
        self.slots[idx]
    }

    /// Places `tag` in slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is occupied or the tag already sits in this pool.
    pub fn fill(&mut self, idx: usize, tag: InstTag) {
        assert!(
            self.slots[idx].is_none(),
            "{} slot {idx} reported free but holds {:?}",
            self.name,
            self.slots[idx]
        );
        assert!(!self.contains(tag), "{} already holds {tag}", self.name);
        self.slots[idx] = Some(tag);
    }

    /// Returns true if `tag` occupies some slot.
    pub fn contains(&self, tag: InstTag) -> bool {
        self.slots.contains(&Some(tag))
    }

    /// Empties the slot holding `tag`. Returns the slot index, or `None`
    /// if `tag` is not in this pool.
    pub fn vacate(&mut self, tag: InstTag) -> Option<usize> {
        let idx = self.slots.iter().position(|s| *s == Some(tag))?;
        self.slots[idx] = None;
        Some(idx)
    }

    /// Occupied slots as `(slot, tag)` pairs in slot order.
    pub fn occupants(&self) -> impl Iterator<Item = (usize, InstTag)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|t| (i, t)))
    }
}

impl fmt::Debug for SlotPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.name)?;
        for (i, s) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match s {
                Some(t) => write!(f, "{t}")?,
                None => f.write_str("-")?,
            }
        }
        f.write_str("]")
    }
}
