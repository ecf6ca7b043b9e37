//! Identity provider seam

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AuthResult;

/// Opaque session credential handed to the caller after sign-in
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep tokens out of logs
impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// The user behind a valid session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: String,
    pub email: String,
}

/// Verifies credentials and issues sessions
///
/// Every call is a single request/response; implementations must not
/// retry internally.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Email/password sign-in
    async fn verify_credentials(&self, email: &str, password: &str) -> AuthResult<SessionToken>;

    /// Exchange an ID token from a federated issuer for a session
    async fn verify_federated_token(&self, id_token: &str) -> AuthResult<SessionToken>;

    /// Register a new email/password account and sign it in
    async fn create_account(&self, email: &str, password: &str) -> AuthResult<SessionToken>;

    /// Resolve a session to its user
    async fn validate_session(&self, session: &SessionToken) -> AuthResult<SessionUser>;

    /// Revoke a session
    async fn sign_out(&self, session: &SessionToken) -> AuthResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_token() {
        let token = SessionToken::new("eyJhbGciOi.secret.sig");
        assert_eq!(format!("{token:?}"), "SessionToken(***)");
        assert_eq!(token.as_str(), "eyJhbGciOi.secret.sig");
    }
}
