//! Unified error codes for the tipview workspace
//!
//! Every crate keeps its own `thiserror` enum; each of those maps onto an
//! [`ErrorCode`] so callers can pick a user-facing message or log category
//! without matching on crate-specific variants.
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 5xxx: Payment errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{ErrorCategory, ErrorCode};
//!
//! let code = ErrorCode::InvalidCredentials;
//! assert_eq!(code.code(), 1002);
//! assert_eq!(code.category(), ErrorCategory::Auth);
//! ```

mod category;
mod codes;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
