//! In-flight instruction records and the arena that owns them.
//!
//! Every structure of the core (fetch queue, reservation stations, functional
//! units, the common data bus, the map table, dependency tags) refers to an
//! instruction by its [`InstTag`], never by pointer. The [`RecordArena`] owns
//! all records for the whole run, indexed by tag, so timestamps stay readable
//! after an instruction retires.

use std::fmt;

use crate::isa::{MAX_SRC, StaticInst};

/// Sequence index of an instruction: its 1-based position in the trace.
///
/// Tags are assigned at fetch and strictly increase in program order; the
/// smaller tag is always the older instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstTag(pub usize);

impl fmt::Display for InstTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle stage of an instruction record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Read from the trace into the fetch queue this cycle.
    Fetched,
    /// Waiting in the fetch queue with its dispatch cycle stamped.
    Dispatched,
    /// Holding a reservation station, waiting for operands or a unit.
    Issued,
    /// Occupying a functional unit.
    Executing,
    /// Finished executing, waiting to win the common data bus.
    Completed,
    /// On the common data bus this cycle.
    Broadcasting,
    /// All resources released.
    Retired,
    /// Control-flow instruction removed at dispatch.
    Dropped,
}

impl Stage {
    /// Legal forward transitions of the per-instruction state machine.
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Fetched, Self::Dispatched)
                | (Self::Dispatched, Self::Issued | Self::Dropped)
                | (Self::Issued, Self::Executing)
                | (
                    Self::Executing,
                    Self::Completed | Self::Broadcasting | Self::Retired
                )
                | (Self::Completed, Self::Broadcasting)
                | (Self::Broadcasting, Self::Retired)
        )
    }

    /// Stages in which the record holds a reservation station.
    pub const fn holds_station(self) -> bool {
        matches!(
            self,
            Self::Issued | Self::Executing | Self::Completed | Self::Broadcasting
        )
    }
}

/// Cycle stamps of one instruction. Zero means "not reached".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timestamps {
    /// First cycle the instruction was observed in the fetch queue.
    pub dispatch: u64,
    /// Cycle it entered a reservation station.
    pub issue: u64,
    /// Cycle it entered a functional unit.
    pub execute: u64,
    /// Cycle it was placed on the common data bus (0 for stores).
    pub broadcast: u64,
}

impl Timestamps {
    /// Checks `dispatch <= issue <= execute <= broadcast` over the stamps that are set.
    pub fn is_ordered(&self) -> bool {
        let set: Vec<u64> = [self.dispatch, self.issue, self.execute, self.broadcast]
            .into_iter()
            .filter(|&c| c != 0)
            .collect();
        set.windows(2).all(|w| w[0] <= w[1])
    }
}

/// One instruction flowing through the pipeline.
#[derive(Clone, Debug)]
pub struct InstructionRecord {
    /// Sequence index.
    pub tag: InstTag,
    /// Decoded instruction.
    pub inst: StaticInst,
    stage: Stage,
    timing: Timestamps,
    /// Producer each source operand is waiting on; `None` once available.
    waiting_on: [Option<InstTag>; MAX_SRC],
}

impl InstructionRecord {
    /// Creates a freshly fetched record.
    pub const fn new(tag: InstTag, inst: StaticInst) -> Self {
        Self {
            tag,
            inst,
            stage: Stage::Fetched,
            timing: Timestamps {
                dispatch: 0,
                issue: 0,
                execute: 0,
                broadcast: 0,
            },
            waiting_on: [None; MAX_SRC],
        }
    }

    /// Current lifecycle stage.
    #[inline]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Cycle stamps recorded so far.
    #[inline]
    pub const fn timing(&self) -> Timestamps {
        self.timing
    }

    /// Eligible to enter a functional unit: in a station, not yet executing,
    /// and no operand still waiting on a producer.
    pub fn is_ready(&self) -> bool {
        self.stage == Stage::Issued && self.waiting_on.iter().all(Option::is_none)
    }

    /// Moves to `next`.
    ///
    /// # Panics
    ///
    /// Panics on a transition the state machine does not allow; that is a
    /// scheduler bookkeeping bug.
    pub fn advance(&mut self, next: Stage) {
        assert!(
            self.stage.can_advance_to(next),
            "{}: illegal stage transition {:?} -> {:?}",
            self.tag,
            self.stage,
            next
        );
        self.stage = next;
    }

    /// Records operand `slot` as waiting on `producer`.
    pub fn wait_on(&mut self, slot: usize, producer: InstTag) {
        debug_assert!(producer < self.tag, "{} cannot depend on younger {producer}", self.tag);
        self.waiting_on[slot] = Some(producer);
    }

    /// Clears every operand waiting on `producer`. Returns how many were cleared.
    pub fn resolve(&mut self, producer: InstTag) -> usize {
        let mut cleared = 0;
        for tag in &mut self.waiting_on {
            if *tag == Some(producer) {
                *tag = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Stamps the dispatch cycle if it has not been stamped yet.
    ///
    /// Returns true if this call set the stamp.
    pub fn stamp_dispatch(&mut self, cycle: u64) -> bool {
        if self.timing.dispatch != 0 {
            return false;
        }
        self.timing.dispatch = cycle;
        true
    }

    /// Stamps entry into a reservation station.
    pub fn stamp_issue(&mut self, cycle: u64) {
        debug_assert!(cycle >= self.timing.dispatch);
        self.timing.issue = cycle;
    }

    /// Stamps entry into a functional unit.
    pub fn stamp_execute(&mut self, cycle: u64) {
        debug_assert!(cycle > self.timing.issue);
        self.timing.execute = cycle;
    }

    /// Stamps the broadcast cycle.
    pub fn stamp_broadcast(&mut self, cycle: u64) {
        debug_assert!(cycle > self.timing.execute);
        self.timing.broadcast = cycle;
    }
}

/// Owner of every record created during a run, indexed by tag.
///
/// Trap instructions never get a record; their slots stay empty.
#[derive(Debug)]
pub struct RecordArena {
    records: Vec<Option<InstructionRecord>>,
}

impl RecordArena {
    /// Creates an arena able to hold records for a trace of `len` instructions.
    pub fn with_capacity(len: usize) -> Self {
        let mut records = Vec::with_capacity(len);
        records.resize_with(len, || None);
        Self { records }
    }

    /// Stores a newly fetched record.
    ///
    /// # Panics
    ///
    /// Panics if a record with the same tag already exists.
    pub fn insert(&mut self, record: InstructionRecord) {
        let idx = record.tag.0 - 1;
        if idx >= self.records.len() {
            self.records.resize_with(idx + 1, || None);
        }
        assert!(self.records[idx].is_none(), "{} fetched twice", record.tag);
        self.records[idx] = Some(record);
    }

    /// Looks up a record.
    pub fn get(&self, tag: InstTag) -> Option<&InstructionRecord> {
        tag.0
            .checked_sub(1)
            .and_then(|i| self.records.get(i))
            .and_then(Option::as_ref)
    }

    /// Looks up a record that some structure of the core still references.
    ///
    /// # Panics
    ///
    /// Panics if the tag names no record: a dangling reference is a bookkeeping bug.
    pub fn live(&self, tag: InstTag) -> &InstructionRecord {
        match self.get(tag) {
            Some(r) => r,
            None => panic!("{tag} referenced but never fetched"),
        }
    }

    /// Mutable variant of [`RecordArena::live`].
    ///
    /// # Panics
    ///
    /// Panics if the tag names no record.
    pub fn live_mut(&mut self, tag: InstTag) -> &mut InstructionRecord {
        match tag
            .0
            .checked_sub(1)
            .and_then(|i| self.records.get_mut(i))
            .and_then(Option::as_mut)
        {
            Some(r) => r,
            None => panic!("{tag} referenced but never fetched"),
        }
    }

    /// Iterates all records in program order.
    pub fn iter(&self) -> impl Iterator<Item = &InstructionRecord> {
        self.records.iter().flatten()
    }
}
