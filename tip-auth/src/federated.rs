//! Federated sign-in
//!
//! Verifies ID tokens minted by a trusted external issuer (signature,
//! issuer, audience, expiry) and extracts the identity they assert. The
//! sign-in protocol with the issuer itself happens elsewhere; this side
//! only receives the resulting token.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Trusted issuer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederatedConfig {
    pub issuer: String,
    /// Our client ID at the issuer
    pub audience: String,
    /// Shared HS256 verification secret
    pub secret: String,
}

impl FederatedConfig {
    /// Load from `FEDERATED_ISSUER`, `FEDERATED_AUDIENCE`, `FEDERATED_SECRET`
    ///
    /// Returns `None` when no secret is configured (federated sign-in off).
    pub fn from_env() -> Option<Self> {
        let secret = std::env::var("FEDERATED_SECRET").ok()?;
        Some(Self {
            issuer: std::env::var("FEDERATED_ISSUER")
                .unwrap_or_else(|_| "https://accounts.google.com".to_string()),
            audience: std::env::var("FEDERATED_AUDIENCE")
                .unwrap_or_else(|_| "tipview-web-client".to_string()),
            secret,
        })
    }
}

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<bool>,
}

/// Identity asserted by a verified ID token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedIdentity {
    /// Subject at the issuer
    pub subject: String,
    pub email: String,
}

#[derive(Clone)]
pub struct FederatedVerifier {
    config: FederatedConfig,
    decoding_key: DecodingKey,
}

impl FederatedVerifier {
    pub fn new(config: FederatedConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            decoding_key,
        }
    }

    pub fn issuer(&self) -> &str {
        &self.config.issuer
    }

    pub fn verify(&self, id_token: &str) -> AuthResult<FederatedIdentity> {
        if id_token.trim().is_empty() {
            return Err(AuthError::FederatedRejected("empty ID token".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iss", "aud"]);

        let claims = decode::<IdTokenClaims>(id_token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AuthError::FederatedRejected("ID token expired".to_string())
                }
                _ => AuthError::FederatedRejected(e.to_string()),
            })?
            .claims;

        if claims.email_verified == Some(false) {
            return Err(AuthError::FederatedRejected("email not verified".to_string()));
        }

        let email = claims
            .email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AuthError::FederatedRejected("ID token has no email".to_string()))?;

        Ok(FederatedIdentity {
            subject: claims.sub,
            email,
        })
    }
}
