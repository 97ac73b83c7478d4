//! IngestCatalogHandler - Command handler for accepting a new catalog.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::catalog::{Catalog, FeatureSummary, Item};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CatalogValidator;

/// Where the raw catalog comes from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// JSON text shaped `{id: {feature: value}}`.
    Json(String),
    /// YAML text with the same shape.
    Yaml(String),
    /// Items already constructed in code.
    Items(Vec<Item>),
}

impl CatalogSource {
    /// Picks the format from a file extension; anything but `json` is read
    /// as YAML.
    pub fn from_extension(extension: Option<&str>, contents: String) -> Self {
        match extension {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogSource::Json(contents),
            _ => CatalogSource::Yaml(contents),
        }
    }

    fn parse(self) -> Result<Catalog, DomainError> {
        let catalog = match self {
            CatalogSource::Json(text) => Catalog::from_json_str(&text)?,
            CatalogSource::Yaml(text) => Catalog::from_yaml_str(&text)?,
            CatalogSource::Items(items) => Catalog::derive(items)?,
        };
        Ok(catalog)
    }
}

/// Command to ingest a catalog.
#[derive(Debug, Clone)]
pub struct IngestCatalogCommand {
    pub source: CatalogSource,
}

/// Result of successful ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct IngestCatalogResult {
    /// Content digest identifying the catalog.
    pub id: String,
    #[serde(rename = "definition")]
    pub features: FeatureSummary,
    #[serde(rename = "dataset")]
    pub catalog: Catalog,
}

/// Handler for ingesting catalogs.
///
/// Rejects empty and oversized catalogs, then runs every registered
/// validator in order; the first rejection wins.
pub struct IngestCatalogHandler {
    validators: Vec<Arc<dyn CatalogValidator>>,
    max_items: usize,
}

impl IngestCatalogHandler {
    pub fn new(validators: Vec<Arc<dyn CatalogValidator>>, max_items: usize) -> Self {
        Self {
            validators,
            max_items,
        }
    }

    pub fn handle(&self, cmd: IngestCatalogCommand) -> Result<IngestCatalogResult, DomainError> {
        // 1. Parse and derive
        let catalog = cmd.source.parse()?;

        // 2. Size limits
        if catalog.is_empty() {
            return Err(DomainError::new(ErrorCode::EmptyCatalog, "Catalog has no items"));
        }
        if catalog.len() > self.max_items {
            warn!(items = catalog.len(), max = self.max_items, "Catalog rejected: too large");
            return Err(DomainError::new(
                ErrorCode::CatalogTooLarge,
                format!("Catalog has more than {} items", self.max_items),
            )
            .with_detail("items", catalog.len().to_string()));
        }

        // 3. Consistency rules
        for validator in &self.validators {
            if let Err(rejection) = validator.validate(&catalog) {
                warn!(
                    validator = validator.name(),
                    offending = rejection.ids().len(),
                    "Catalog rejected"
                );
                return Err(rejection.into());
            }
        }

        let id = catalog.fingerprint();
        info!(
            catalog_id = %id,
            items = catalog.len(),
            features = catalog.features().len(),
            "Catalog ingested"
        );

        Ok(IngestCatalogResult {
            id,
            features: catalog.features().pure(),
            catalog,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{DuplicateItemsValidator, UniformFeaturesValidator};
    use crate::ports::CatalogRejection;

    const PIZZAS: &str = r#"
margherita:
  topping: [mozzarella, basil, tomatoes]
  ingredients: 3
inferno:
  topping: [tomatoes, chili]
  ingredients: 7
  spicy: true
"#;

    // ─────────────────────────────────────────────────────────────────────
    // Mock Implementation
    // ─────────────────────────────────────────────────────────────────────

    struct RejectingValidator;

    impl CatalogValidator for RejectingValidator {
        fn name(&self) -> &'static str {
            "rejecting"
        }

        fn validate(&self, catalog: &Catalog) -> Result<(), CatalogRejection> {
            Err(CatalogRejection::MissingFeatures {
                ids: catalog.ids().cloned().collect(),
            })
        }
    }

    fn handler(validators: Vec<Arc<dyn CatalogValidator>>) -> IngestCatalogHandler {
        IngestCatalogHandler::new(validators, 100)
    }

    fn yaml(text: &str) -> IngestCatalogCommand {
        IngestCatalogCommand {
            source: CatalogSource::Yaml(text.to_string()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Success Cases
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn ingests_valid_catalog() {
        let result = handler(vec![Arc::new(DuplicateItemsValidator::new())])
            .handle(yaml(PIZZAS))
            .unwrap();

        assert_eq!(result.catalog.len(), 2);
        assert_eq!(result.features.len(), 3);
        assert_eq!(result.id.len(), 64);
    }

    #[test]
    fn id_is_stable_across_formats() {
        let from_yaml = handler(vec![]).handle(yaml(PIZZAS)).unwrap();
        let from_json = handler(vec![])
            .handle(IngestCatalogCommand {
                source: CatalogSource::Json(
                    serde_json::to_string(&from_yaml.catalog).unwrap(),
                ),
            })
            .unwrap();
        assert_eq!(from_yaml.id, from_json.id);
    }

    #[test]
    fn result_serializes_with_api_keys() {
        let result = handler(vec![]).handle(yaml(PIZZAS)).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["id"].is_string());
        assert_eq!(json["definition"]["ingredients"]["type"], "number");
        assert_eq!(json["dataset"]["inferno"]["spicy"], true);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rejections
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn rejects_empty_catalog() {
        let err = handler(vec![])
            .handle(IngestCatalogCommand {
                source: CatalogSource::Json("{}".to_string()),
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCatalog);
    }

    #[test]
    fn rejects_malformed_input() {
        let err = handler(vec![])
            .handle(IngestCatalogCommand {
                source: CatalogSource::Json("[1, 2]".to_string()),
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn rejects_oversized_catalog() {
        let err = IngestCatalogHandler::new(vec![], 1)
            .handle(yaml(PIZZAS))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogTooLarge);
        assert_eq!(err.details.get("items"), Some(&"2".to_string()));
    }

    #[test]
    fn rejects_duplicates_listing_ids() {
        let err = handler(vec![Arc::new(DuplicateItemsValidator::new())])
            .handle(yaml("a: {size: 1}\nb: {size: 1}\nc: {size: 2}\n"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateItems);
        assert_eq!(err.details.get("ids"), Some(&"a,b".to_string()));
    }

    #[test]
    fn uniform_features_is_opt_in() {
        assert!(handler(vec![]).handle(yaml(PIZZAS)).is_ok());

        let err = handler(vec![Arc::new(UniformFeaturesValidator::new())])
            .handle(yaml(PIZZAS))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InconsistentFeatures);
        assert_eq!(err.details.get("ids"), Some(&"margherita".to_string()));
    }

    #[test]
    fn first_rejection_wins() {
        let err = handler(vec![
            Arc::new(RejectingValidator),
            Arc::new(DuplicateItemsValidator::new()),
        ])
        .handle(yaml("a: {size: 1}\nb: {size: 1}\n"))
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InconsistentFeatures);
    }

    #[test]
    fn source_format_follows_extension() {
        assert!(matches!(
            CatalogSource::from_extension(Some("JSON"), String::new()),
            CatalogSource::Json(_)
        ));
        assert!(matches!(
            CatalogSource::from_extension(Some("yml"), String::new()),
            CatalogSource::Yaml(_)
        ));
        assert!(matches!(
            CatalogSource::from_extension(None, String::new()),
            CatalogSource::Yaml(_)
        ));
    }
}
