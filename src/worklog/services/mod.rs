//! Session-scoped timer services.

pub mod ticker;

pub use ticker::SessionTicker;
