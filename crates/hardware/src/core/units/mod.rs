//! Execution-side units.
//!
//! The branch prediction unit is the only unit modeled beyond the generic
//! functional-unit pools of the pipeline.

/// Branch Resolution Unit: direction predictors and branch trace replay.
pub mod bru;
