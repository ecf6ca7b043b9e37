//! Data models
//!
//! Shared between the calculator, the history service and any document
//! store backend. Field names of persisted documents live in
//! [`payment::fields`].

pub mod payment;
pub mod tip_rate;

// Re-exports
pub use payment::*;
pub use tip_rate::*;
