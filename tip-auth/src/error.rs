//! Authentication errors

use shared::ErrorCode;
use thiserror::Error;

/// Identity provider failure
///
/// Callers only need two user-facing outcomes ("wrong password" vs.
/// "authentication failed"), see [`AuthError::user_message`]; the finer
/// variants exist for logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("email and password must not be blank")]
    MissingCredentials,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("account already exists: {0}")]
    AccountExists(String),

    #[error("session expired")]
    TokenExpired,

    #[error("invalid session: {0}")]
    TokenInvalid(String),

    #[error("session signed out")]
    SessionRevoked,

    #[error("federated sign-in rejected: {0}")]
    FederatedRejected(String),

    #[error("identity provider error: {0}")]
    Provider(String),
}

impl AuthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::MissingCredentials => ErrorCode::RequiredField,
            AuthError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AuthError::AccountExists(_) => ErrorCode::AccountExists,
            AuthError::TokenExpired => ErrorCode::TokenExpired,
            AuthError::TokenInvalid(_) => ErrorCode::TokenInvalid,
            AuthError::SessionRevoked => ErrorCode::SessionRevoked,
            AuthError::FederatedRejected(_) => ErrorCode::FederatedSignInFailed,
            AuthError::Provider(_) => ErrorCode::AuthProviderError,
        }
    }

    /// Whether the user typed a wrong email/password pair
    pub fn is_invalid_credentials(&self) -> bool {
        matches!(self, AuthError::InvalidCredentials)
    }

    /// Message to show the user
    pub fn user_message(&self) -> &'static str {
        self.code().message()
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
