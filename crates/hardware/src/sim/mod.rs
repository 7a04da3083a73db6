//! Trace loading and the top-level run driver.

/// JSON instruction and branch trace loading.
pub mod loader;

/// Simulator and run report.
pub mod simulator;

pub use simulator::{RunReport, Simulator};
