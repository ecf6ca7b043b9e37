//! Identity provider for tipview
//!
//! Payment operations only run behind a valid session. This crate defines
//! the [`IdentityProvider`] seam the rest of the workspace talks to, plus
//! [`LocalIdentityProvider`], an in-process implementation:
//!
//! - email/password accounts hashed with Argon2
//! - sessions issued as HS256 JWTs, revocable via sign-out
//! - federated sign-in by exchanging an ID token from a trusted issuer
//!
//! ```text
//! tip-auth/src/
//! ├── config.rs     # AuthConfig (env)
//! ├── error.rs      # AuthError
//! ├── federated.rs  # ID token verification
//! ├── jwt.rs        # session tokens
//! ├── local.rs      # LocalIdentityProvider
//! ├── password.rs   # Argon2 helpers
//! └── provider.rs   # IdentityProvider trait, SessionToken
//! ```

pub mod config;
pub mod error;
pub mod federated;
pub mod jwt;
pub mod local;
pub mod password;
pub mod provider;

// Re-exports
pub use config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use federated::{FederatedConfig, FederatedIdentity, FederatedVerifier};
pub use jwt::{Claims, JwtConfig, JwtService};
pub use local::LocalIdentityProvider;
pub use provider::{IdentityProvider, SessionToken, SessionUser};
