//! Core processor implementation.
//!
//! This module contains the Tomasulo core: the instruction records and their
//! arena, the pipeline structures and stages, and the branch prediction unit
//! that can be run alongside it on recorded branch outcomes.

/// Tomasulo pipeline (queue, stations, units, bus, map table, stages, engine).
pub mod pipeline;

/// Instruction records, lifecycle stages, and the record arena.
pub mod record;

/// Execution-side units (branch predictors).
pub mod units;

pub use self::pipeline::TomasuloEngine;
