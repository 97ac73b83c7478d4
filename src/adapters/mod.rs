//! Adapters - Implementations of port interfaces.
//!
//! - `random` - `RandomSource` implementations (thread-local, seeded, fixed)
//! - `validation` - `CatalogValidator` implementations

pub mod random;
pub mod validation;

pub use random::{FixedRandomSource, SeededRandomSource, ThreadRandomSource};
pub use validation::{DuplicateItemsValidator, UniformFeaturesValidator};
