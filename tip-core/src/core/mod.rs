//! Core module: configuration, errors and the [`TipService`] facade
//!
//! - [`Config`]: environment-driven settings
//! - [`TipError`]: top-level error
//! - [`TipService`]: sign-in, submit and recent-payments flow

pub mod config;
pub mod error;
pub mod service;

pub use config::Config;
pub use error::{TipError, TipResult};
pub use service::{Submission, TipService};
