//! Room inventory and lifecycle state for Roomkeeper.
//!
//! This module owns the seven-state room lifecycle, the fixed transition
//! table that is the single source of truth for legal status changes, the
//! in-memory registry that holds the authoritative room snapshot, and the
//! repository port through which the durable store is reached. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Registry and sync services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
