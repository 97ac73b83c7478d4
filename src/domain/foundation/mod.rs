//! Foundation module - Shared domain primitives.
//!
//! Contains the identifier value object and the error types that form the
//! vocabulary of the decision engine.

mod errors;
mod ids;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::ItemId;
