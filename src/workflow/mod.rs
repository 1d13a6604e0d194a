//! Workflow orchestration for Roomkeeper.
//!
//! This module owns the engine that coordinates status changes, task
//! lifecycle, audit-log emission, and user-facing notifications. Every
//! status-affecting edge is gated by the room transition table; every
//! committed transition produces exactly one immutable audit entry. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The workflow engine in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
