//! Catalog Module - Items, feature classification and filtering.
//!
//! # Components
//!
//! - `Catalog` - Immutable item table with its derived `FeatureSet`
//! - `FeatureSpec` - Kind, allowed values and matching predicate per feature
//! - `FeatureSet` / `FeatureSummary` - All specs of a catalog and their plain form
//! - `Answers` - Ordered answers used to narrow a catalog
//! - `query` - Negation and numeric operator syntax shared by answers
//!
//! All operations are pure: filtering and slicing return new catalogs and
//! never touch the original.

#[allow(clippy::module_inception)]
mod catalog;
mod answers;
mod feature_set;
mod feature_spec;
mod item;
pub mod query;
mod value;

pub use answers::Answers;
pub use catalog::Catalog;
pub use feature_set::{FeatureSet, FeatureShape, FeatureSummary};
pub use feature_spec::{FeatureKind, FeatureSpec};
pub use item::{Features, Item};
pub use value::{FeatureValue, Scalar};
