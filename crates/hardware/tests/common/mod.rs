//! Shared test infrastructure.

/// Run harness wrapping `Simulator`.
pub mod harness;


pub use harness::TestContext;
