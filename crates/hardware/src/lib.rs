//! Tomasulo out-of-order core simulator library.
//!
//! This crate replays decoded instruction traces through a cycle-by-cycle model
//! of a Tomasulo-style core:
//! 1. **Core:** Fetch queue, integer and floating-point reservation stations and
//!    functional units, a single common data bus, and a register map table.
//! 2. **Trace:** Instruction sources, the JSON loader, and a builder for synthetic traces.
//! 3. **Branch prediction:** Two-bit, two-level, and perceptron predictors replayed over branch traces.
//! 4. **Simulation:** Configuration, run driver, statistics, and per-instruction timing.
//!
//! ```
//! use tomsim_core::common::RegId;
//! use tomsim_core::{Config, Simulator, TraceBuilder};
//!
//! let r = RegId::int;
//! let trace = TraceBuilder::new().int(r(1), &[r(2)]).int(r(3), &[r(1)]).build();
//! let report = Simulator::new(Config::default()).unwrap().run(&trace).unwrap();
//! assert_eq!(report.timing(2).unwrap().timing.execute, 8);
//! ```

/// Common types (register ids, error types).
pub mod common;
/// Simulator configuration (defaults, core geometry, predictor geometry).
pub mod config;
/// Tomasulo core (records, pipeline structures, stages, engine, branch predictors).
pub mod core;
/// Instruction model (opcode classes, static instructions).
pub mod isa;
/// Trace loader and run driver.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;
/// Instruction and branch traces.
pub mod trace;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Cycle-driven engine over a borrowed trace.
pub use crate::core::TomasuloEngine;
/// Top-level simulator and its per-run report.
pub use crate::sim::{RunReport, Simulator};
/// Synthetic trace construction.
pub use crate::trace::{Trace, TraceBuilder, TraceSource};
