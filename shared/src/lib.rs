//! Shared types for the tipview workspace
//!
//! Domain types used by both `tip-auth` and `tip-core`: tip rates,
//! payment results and records, document field names, the unified
//! error code table and time helpers.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ErrorCategory, ErrorCode};
pub use models::{PaymentRecord, PaymentResult, TipRate};
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
