use shared::{ErrorCategory, ErrorCode};
use thiserror::Error;
use tip_auth::AuthError;

use crate::calculator::InvalidInput;
use crate::db::StoreError;

/// Top-level error for [`TipService`](super::TipService) operations
#[derive(Debug, Error)]
pub enum TipError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TipError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TipError::InvalidInput(e) => e.code(),
            TipError::Auth(e) => e.code(),
            TipError::Store(e) => e.code(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    /// Message suitable for showing to the user
    pub fn user_message(&self) -> &'static str {
        self.code().message()
    }
}

/// Result type for [`TipService`](super::TipService) operations
pub type TipResult<T> = Result<T, TipError>;
