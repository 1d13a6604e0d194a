//! Timed task records and the per-session task timer.
//!
//! This module owns the task type taxonomy with its implied-status mapping
//! tables, the three-state task timer that enforces at-most-one-active-task
//! per session, the work-log repository port through which task durations are
//! persisted, and the ticker that drives the one-second timer cadence. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The session ticker in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
