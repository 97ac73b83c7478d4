//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RandomSource` - Uniform index draws for the random strategy
//! - `CatalogValidator` - Consistency rules applied when a catalog is ingested

mod catalog_validator;
mod random_source;

pub use catalog_validator::{CatalogRejection, CatalogValidator};
pub use random_source::RandomSource;
