//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Value '{value}' of feature '{field}' starts with reserved character '{prefix}'")]
    ReservedPrefix {
        field: String,
        value: String,
        prefix: char,
    },

    #[error("Item id '{id}' appears more than once")]
    DuplicateId { id: String },

    #[error("Expected {expected} for '{field}'")]
    InvalidShape { field: String, expected: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a reserved prefix validation error.
    pub fn reserved_prefix(field: impl Into<String>, value: impl Into<String>, prefix: char) -> Self {
        ValidationError::ReservedPrefix {
            field: field.into(),
            value: value.into(),
            prefix,
        }
    }

    /// Creates a duplicate id validation error.
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        ValidationError::DuplicateId { id: id.into() }
    }

    /// Creates a structural shape validation error.
    pub fn invalid_shape(field: impl Into<String>, expected: impl Into<String>) -> Self {
        ValidationError::InvalidShape {
            field: field.into(),
            expected: expected.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    InvalidInput,
    UnknownStrategy,

    // Catalog errors
    EmptyCatalog,
    DuplicateItems,
    InconsistentFeatures,
    CatalogTooLarge,
    NoMatchingItems,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::UnknownStrategy => "UNKNOWN_STRATEGY",
            ErrorCode::EmptyCatalog => "EMPTY_CATALOG",
            ErrorCode::DuplicateItems => "DUPLICATE_ITEMS",
            ErrorCode::InconsistentFeatures => "INCONSISTENT_FEATURES",
            ErrorCode::CatalogTooLarge => "CATALOG_TOO_LARGE",
            ErrorCode::NoMatchingItems => "NO_MATCHING_ITEMS",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates an invalid input error for a specific field.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message).with_detail("field", field.into())
    }

    /// Creates the error raised when a strategy name is not registered.
    pub fn unknown_strategy(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(
            ErrorCode::UnknownStrategy,
            format!("Strategy '{}' is not registered", name),
        )
        .with_detail("strategy", name)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::InvalidInput, err.to_string())
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("name");
        assert_eq!(format!("{}", err), "Field 'name' cannot be empty");
    }

    #[test]
    fn validation_error_reserved_prefix_names_the_character() {
        let err = ValidationError::reserved_prefix("topping", "-ham", '-');
        assert_eq!(
            format!("{}", err),
            "Value '-ham' of feature 'topping' starts with reserved character '-'"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::EmptyCatalog, "Catalog has no items");
        assert_eq!(format!("{}", err), "[EMPTY_CATALOG] Catalog has no items");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::DuplicateItems, "Duplicates found")
            .with_detail("ids", "a,b")
            .with_detail("count", "2");

        assert_eq!(err.details.get("ids"), Some(&"a,b".to_string()));
        assert_eq!(err.details.get("count"), Some(&"2".to_string()));
    }

    #[test]
    fn unknown_strategy_carries_the_name() {
        let err = DomainError::unknown_strategy("coin_flip");
        assert_eq!(err.code, ErrorCode::UnknownStrategy);
        assert_eq!(err.details.get("strategy"), Some(&"coin_flip".to_string()));
    }

    #[test]
    fn validation_error_converts_to_invalid_input() {
        let err: DomainError = ValidationError::duplicate_id("margherita").into();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.message.contains("margherita"));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::UnknownStrategy), "UNKNOWN_STRATEGY");
        assert_eq!(format!("{}", ErrorCode::NoMatchingItems), "NO_MATCHING_ITEMS");
    }
}
