//! Roomkeeper: hotel room lifecycle and task coordination core.
//!
//! This crate provides the coordination engine behind housekeeping,
//! inspection, and maintenance operations: legal room-status transitions,
//! staff-initiated timed tasks, and an immutable audit trail of every
//! committed status change.
//!
//! # Architecture
//!
//! Roomkeeper follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external collaborators
//! - **Adapters**: Concrete implementations of ports (in-memory test doubles
//!   here; durable stores live outside this crate)
//!
//! # Modules
//!
//! - [`room`]: Room inventory, status transition table, and registry
//! - [`worklog`]: Timed task records and the per-session task timer
//! - [`workflow`]: The orchestration engine, audit trail, and notifications

pub mod room;
pub mod workflow;
pub mod worklog;

#[cfg(test)]
pub(crate) mod test_support;
