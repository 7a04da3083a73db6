//! Pipeline stage implementations.
//!
//! One free function per stage, each operating on [`CoreState`](super::state::CoreState).
//! The engine calls them once per cycle in reverse pipeline order so that a
//! value produced by a later stage in cycle N is only visible to an earlier
//! stage in cycle N+1:
//! 1. **Retire:** Drains the common data bus, waking dependents and releasing slots.
//! 2. **Complete:** Moves finished instructions onto the bus, oldest first.
//! 3. **Issue:** Starts ready reservation-station entries on free functional units.
//! 4. **Dispatch:** Moves the fetch-queue head into a reservation station.
//! 5. **Fetch:** Reads the next trace entry into the fetch queue.

/// Bus arbitration and store retirement.
pub mod complete;

/// Fetch-queue head to reservation station.
pub mod dispatch;

/// Trace reader.
pub mod fetch;

/// Reservation station to functional unit.
pub mod issue;

/// Bus drain and resource release.
pub mod retire;

pub use complete::complete_stage;
pub use dispatch::dispatch_stage;
pub use fetch::fetch_stage;
pub use issue::issue_stage;
pub use retire::retire_stage;
