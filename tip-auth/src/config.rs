use std::time::Duration;

use crate::error::AuthResult;
use crate::federated::FederatedConfig;
use crate::jwt::JwtConfig;

/// Identity provider configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|--------|------|
/// | JWT_SECRET | (debug: random) | Session signing secret |
/// | JWT_EXPIRATION_MINUTES | 1440 | Session lifetime |
/// | AUTH_FIXED_DELAY_MS | 500 | Fixed delay on every sign-in attempt |
/// | FEDERATED_SECRET | unset | Enables federated sign-in |
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    /// `None` disables federated sign-in
    pub federated: Option<FederatedConfig>,
    /// Applied before answering a password sign-in, hit or miss
    pub fixed_delay: Duration,
}

impl AuthConfig {
    pub fn from_env() -> AuthResult<Self> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            federated: FederatedConfig::from_env(),
            fixed_delay: Duration::from_millis(
                std::env::var("AUTH_FIXED_DELAY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(500),
            ),
        })
    }

    /// Random secret, no delay, no federated issuer
    pub fn ephemeral() -> Self {
        Self {
            jwt: JwtConfig::ephemeral(),
            federated: None,
            fixed_delay: Duration::ZERO,
        }
    }

    pub fn with_federated(mut self, federated: FederatedConfig) -> Self {
        self.federated = Some(federated);
        self
    }
}
