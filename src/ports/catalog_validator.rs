//! Catalog Validator Port - Consistency checks run when a catalog is ingested.
//!
//! The engine itself accepts any well-formed catalog. Deployments that need
//! stricter rules (no duplicates, uniform feature keys) plug validators into
//! the ingestion handler.

use thiserror::Error;

use crate::domain::catalog::Catalog;
use crate::domain::foundation::{DomainError, ErrorCode, ItemId};

/// Port for checking a derived catalog before it is accepted.
///
/// # Contract
///
/// Implementations must:
/// - Be pure: no I/O, no mutation of the catalog
/// - Report every offending item id, in catalog order
pub trait CatalogValidator: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns `Ok(())` when the catalog satisfies the rule.
    fn validate(&self, catalog: &Catalog) -> Result<(), CatalogRejection>;
}

/// Why a catalog was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogRejection {
    #[error("Catalog contains duplicate items: {}", join(.ids))]
    Duplicates { ids: Vec<ItemId> },

    #[error("Items do not declare every feature: {}", join(.ids))]
    MissingFeatures { ids: Vec<ItemId> },
}

impl CatalogRejection {
    /// Ids of the offending items.
    pub fn ids(&self) -> &[ItemId] {
        match self {
            CatalogRejection::Duplicates { ids } | CatalogRejection::MissingFeatures { ids } => ids,
        }
    }

    /// Convert to client-safe error message.
    pub fn to_client_message(&self) -> String {
        match self {
            CatalogRejection::Duplicates { .. } => "Catalog contains duplicate items".to_string(),
            CatalogRejection::MissingFeatures { .. } => {
                "Some items do not declare every feature".to_string()
            }
        }
    }
}

impl From<CatalogRejection> for DomainError {
    fn from(err: CatalogRejection) -> Self {
        let code = match err {
            CatalogRejection::Duplicates { .. } => ErrorCode::DuplicateItems,
            CatalogRejection::MissingFeatures { .. } => ErrorCode::InconsistentFeatures,
        };
        DomainError::new(code, err.to_client_message()).with_detail("ids", join(err.ids()))
    }
}

fn join(ids: &[ItemId]) -> String {
    ids.iter().map(ItemId::as_str).collect::<Vec<_>>().join(",")
}
