//! Tomasulo pipeline implementation.
//!
//! This module contains the out-of-order core and the structures it is built from:
//! 1. **Fetch queue:** Bounded FIFO between fetch and dispatch.
//! 2. **Slot pools:** Reservation stations and functional units per execution domain.
//! 3. **Common data bus:** Single-slot broadcast channel.
//! 4. **Map table:** Latest pending producer of each architectural register.
//! 5. **Stages:** Retire, complete, issue, dispatch, and fetch.
//! 6. **Engine:** The per-cycle driver and termination test.

/// Single-slot common data bus.
pub mod cdb;

/// Cycle loop and run driver.
pub mod engine;

/// Bounded instruction fetch queue.
pub mod fetch_queue;

/// Register producer tracking.
pub mod map_table;

/// Reservation-station and functional-unit pools.
pub mod slots;

/// Per-cycle stage functions.
pub mod stages;

/// State shared by all stages.
pub mod state;

pub use engine::TomasuloEngine;
pub use slots::Domain;
pub use state::CoreState;
