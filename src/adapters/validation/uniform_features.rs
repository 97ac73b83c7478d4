use tracing::warn;

use crate::domain::catalog::Catalog;
use crate::ports::{CatalogRejection, CatalogValidator};

/// Requires every item to declare every feature seen in the catalog.
///
/// Flags are expressed by absence, so catalogs using them fail this rule.
/// Enable it only for catalogs that spell out every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformFeaturesValidator;

impl UniformFeaturesValidator {
    pub fn new() -> Self {
        Self
    }
}

impl CatalogValidator for UniformFeaturesValidator {
    fn name(&self) -> &'static str {
        "uniform_features"
    }

    fn validate(&self, catalog: &Catalog) -> Result<(), CatalogRejection> {
        let ids = catalog.find_missing();
        if ids.is_empty() {
            return Ok(());
        }
        warn!(count = ids.len(), "Catalog items declare different features");
        Err(CatalogRejection::MissingFeatures { ids })
    }
}
