//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Unknown default strategy: {0}")]
    UnknownStrategy(String),

    #[error("Maximum catalog size must be greater than zero")]
    InvalidCatalogLimit,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
