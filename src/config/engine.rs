//! Engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::questions::Strategy;

/// Decision engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Strategy used when a request names none
    #[serde(default = "default_strategy")]
    pub default_strategy: String,

    /// Largest catalog accepted at ingestion
    #[serde(default = "default_max_catalog_items")]
    pub max_catalog_items: usize,

    /// Reject catalogs whose items declare different features
    #[serde(default)]
    pub require_uniform_features: bool,

    /// Seed for reproducible random picks
    pub random_seed: Option<u64>,
}

impl EngineConfig {
    /// The configured default strategy.
    ///
    /// Falls back to the first registered strategy when the name is unknown;
    /// `validate` reports that case.
    pub fn strategy(&self) -> Strategy {
        Strategy::parse(&self.default_strategy).unwrap_or_default()
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if Strategy::parse(&self.default_strategy).is_err() {
            return Err(ValidationError::UnknownStrategy(self.default_strategy.clone()));
        }
        if self.max_catalog_items == 0 {
            return Err(ValidationError::InvalidCatalogLimit);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_strategy: default_strategy(),
            max_catalog_items: default_max_catalog_items(),
            require_uniform_features: false,
            random_seed: None,
        }
    }
}

fn default_strategy() -> String {
    Strategy::FirstQuestion.name().to_string()
}

fn default_max_catalog_items() -> usize {
    5000
}
