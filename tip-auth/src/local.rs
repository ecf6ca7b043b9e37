//! In-process identity provider
//!
//! Accounts live in memory, keyed by lower-cased email. Password accounts
//! and federated accounts share the same table; a federated sign-in for
//! an email that already has a password account links the two.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult};
use crate::federated::FederatedVerifier;
use crate::jwt::JwtService;
use crate::password::{hash_password, verify_password};
use crate::provider::{IdentityProvider, SessionToken, SessionUser};

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

#[derive(Debug, Clone)]
struct Account {
    user_id: String,
    email: String,
    password_hash: Option<String>,
    federated_subject: Option<String>,
    created_at: i64,
}

impl Account {
    fn new(email: String) -> Self {
        Self {
            user_id: uuid::Uuid::new_v4().to_string(),
            email,
            password_hash: None,
            federated_subject: None,
            created_at: shared::util::now_millis(),
        }
    }
}

pub struct LocalIdentityProvider {
    jwt: JwtService,
    federated: Option<FederatedVerifier>,
    fixed_delay: Duration,
    accounts: DashMap<String, Account>,
    /// Signed-out sessions: `jti` → token `exp` (Unix seconds)
    revoked: DashMap<String, i64>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Both fields must be non-blank and within length limits
fn require_credentials(email: &str, password: &str) -> AuthResult<String> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    if email.len() > MAX_EMAIL_LEN || password.len() > MAX_PASSWORD_LEN {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(normalize_email(email))
}

impl LocalIdentityProvider {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            jwt: JwtService::with_config(config.jwt),
            federated: config.federated.map(FederatedVerifier::new),
            fixed_delay: config.fixed_delay,
            accounts: DashMap::new(),
            revoked: DashMap::new(),
        }
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Account creation time (Unix millis)
    pub fn created_at(&self, email: &str) -> Option<i64> {
        self.accounts
            .get(&normalize_email(email))
            .map(|a| a.created_at)
    }

    fn issue(&self, account: &Account) -> AuthResult<SessionToken> {
        self.jwt
            .generate_token(&account.user_id, &account.email)
            .map(SessionToken::new)
    }

    /// Signed-out sessions still awaiting expiry
    pub fn revoked_count(&self) -> usize {
        self.revoked.len()
    }

    async fn fixed_delay(&self) {
        if !self.fixed_delay.is_zero() {
            tokio::time::sleep(self.fixed_delay).await;
        }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn verify_credentials(&self, email: &str, password: &str) -> AuthResult<SessionToken> {
        let email = require_credentials(email, password)?;

        // Clone out so no map guard is held across the delay
        let account = self.accounts.get(&email).map(|a| a.value().clone());

        self.fixed_delay().await;

        let Some(account) = account else {
            tracing::warn!(email = %email, "Sign-in failed - account not found");
            return Err(AuthError::InvalidCredentials);
        };

        // Federated-only accounts have no password to check against
        let Some(hash) = account.password_hash.as_deref() else {
            tracing::warn!(email = %email, "Sign-in failed - account has no password");
            return Err(AuthError::InvalidCredentials);
        };

        let valid = verify_password(password, hash)
            .map_err(|e| AuthError::Provider(format!("Password verification failed: {e}")))?;
        if !valid {
            tracing::warn!(email = %email, "Sign-in failed - invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %account.user_id, "User signed in");
        self.issue(&account)
    }

    async fn verify_federated_token(&self, id_token: &str) -> AuthResult<SessionToken> {
        let verifier = self.federated.as_ref().ok_or_else(|| {
            AuthError::FederatedRejected("federated sign-in is not configured".to_string())
        })?;

        let identity = verifier.verify(id_token).inspect_err(|e| {
            tracing::warn!(issuer = %verifier.issuer(), error = %e, "Federated sign-in failed");
        })?;

        let account = {
            let mut entry = self
                .accounts
                .entry(identity.email.clone())
                .or_insert_with(|| Account::new(identity.email.clone()));

            match entry.federated_subject.clone() {
                Some(subject) if subject != identity.subject => {
                    return Err(AuthError::FederatedRejected(
                        "email is linked to another federated identity".to_string(),
                    ));
                }
                Some(_) => {}
                None => entry.federated_subject = Some(identity.subject.clone()),
            }
            entry.value().clone()
        };

        tracing::info!(
            user_id = %account.user_id,
            issuer = %verifier.issuer(),
            "User signed in with federated identity"
        );
        self.issue(&account)
    }

    async fn create_account(&self, email: &str, password: &str) -> AuthResult<SessionToken> {
        let email = require_credentials(email, password)?;

        // Hash before taking the entry lock
        let password_hash = hash_password(password)
            .map_err(|e| AuthError::Provider(format!("Password hashing failed: {e}")))?;

        let account = match self.accounts.entry(email.clone()) {
            Entry::Occupied(_) => {
                tracing::warn!(email = %email, "Account creation failed - email taken");
                return Err(AuthError::AccountExists(email));
            }
            Entry::Vacant(slot) => {
                let mut account = Account::new(email);
                account.password_hash = Some(password_hash);
                slot.insert(account).value().clone()
            }
        };

        tracing::info!(user_id = %account.user_id, "Account created");
        self.issue(&account)
    }

    async fn validate_session(&self, session: &SessionToken) -> AuthResult<SessionUser> {
        let claims = self.jwt.validate_token(session.as_str())?;
        if self.revoked.contains_key(&claims.jti) {
            return Err(AuthError::SessionRevoked);
        }
        Ok(SessionUser {
            user_id: claims.sub,
            email: claims.email,
        })
    }

    async fn sign_out(&self, session: &SessionToken) -> AuthResult<()> {
        match self.jwt.validate_token(session.as_str()) {
            Ok(claims) => {
                // Expired tokens fail validation on their own
                let now = chrono::Utc::now().timestamp();
                self.revoked.retain(|_, exp| *exp > now);
                self.revoked.insert(claims.jti, claims.exp);
                tracing::info!(user_id = %claims.sub, "User signed out");
                Ok(())
            }
            // Nothing left to revoke
            Err(AuthError::TokenExpired) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
