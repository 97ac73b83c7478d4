use tracing::warn;

use crate::domain::catalog::Catalog;
use crate::ports::{CatalogRejection, CatalogValidator};

/// Rejects catalogs in which two items share the same feature map.
///
/// Such items can never be told apart by any question.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateItemsValidator;

impl DuplicateItemsValidator {
    pub fn new() -> Self {
        Self
    }
}

impl CatalogValidator for DuplicateItemsValidator {
    fn name(&self) -> &'static str {
        "duplicate_items"
    }

    fn validate(&self, catalog: &Catalog) -> Result<(), CatalogRejection> {
        let ids = catalog.find_duplicates();
        if ids.is_empty() {
            return Ok(());
        }
        warn!(count = ids.len(), "Catalog has indistinguishable items");
        Err(CatalogRejection::Duplicates { ids })
    }
}
