//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The underlying config source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A price override must be a positive number of cents.
    #[error("catalog price override '{0}' must be greater than zero")]
    NonPositivePrice(&'static str),
}
