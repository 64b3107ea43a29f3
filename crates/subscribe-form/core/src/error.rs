//! Error types

use thiserror::Error;

/// Errors raised while loading validator configuration.
///
/// Validation itself never fails: invalid input is reported through the
/// page's error display, not through this type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
