//! Error code table
//!
//! Codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 5xxx: Payment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unified error code enum
///
/// Represented as `u16` on the wire so clients in other languages can
/// switch on the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Session was signed out
    SessionRevoked = 1005,
    /// Account already exists for this email
    AccountExists = 1008,
    /// Federated identity token rejected
    FederatedSignInFailed = 1009,
    /// Identity provider unreachable or failed internally
    AuthProviderError = 1010,

    // ==================== 5xxx: Payment ====================
    /// Cost of service is not a non-negative number
    InvalidCost = 5001,
    /// No tip option selected
    TipRateNotSelected = 5002,

    // ==================== 9xxx: System ====================
    /// Document store read/write failed
    StoreError = 9002,
    /// Stored document could not be decoded
    StoreDecodeError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the user-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::RequiredField => "Email and password must not be blank.",

            ErrorCode::InvalidCredentials => "Incorrect password, please try again.",
            ErrorCode::TokenExpired => "Session expired, please sign in again",
            ErrorCode::TokenInvalid => "Authentication failed.",
            ErrorCode::SessionRevoked => "Signed out, please sign in again",
            ErrorCode::AccountExists => "Authentication failed.",
            ErrorCode::FederatedSignInFailed => "Authentication failed.",
            ErrorCode::AuthProviderError => "Authentication failed.",

            ErrorCode::InvalidCost => "Please enter a valid cost of service",
            ErrorCode::TipRateNotSelected => "Please select a tip option",

            ErrorCode::StoreError => "Payment history is unavailable",
            ErrorCode::StoreDecodeError => "Payment history contains an unreadable record",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            7 => Ok(ErrorCode::RequiredField),

            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::SessionRevoked),
            1008 => Ok(ErrorCode::AccountExists),
            1009 => Ok(ErrorCode::FederatedSignInFailed),
            1010 => Ok(ErrorCode::AuthProviderError),

            5001 => Ok(ErrorCode::InvalidCost),
            5002 => Ok(ErrorCode::TipRateNotSelected),

            9002 => Ok(ErrorCode::StoreError),
            9003 => Ok(ErrorCode::StoreDecodeError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
