//! Validation Adapters - `CatalogValidator` implementations.
//!
//! - `DuplicateItemsValidator` - rejects items with identical feature maps
//! - `UniformFeaturesValidator` - rejects items missing a feature others declare

mod duplicate_items;
mod uniform_features;

pub use duplicate_items::DuplicateItemsValidator;
pub use uniform_features::UniformFeaturesValidator;
