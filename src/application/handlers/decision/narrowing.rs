use tracing::debug;

use crate::domain::catalog::{Answers, Catalog};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Applies the answers and fails when nothing survives.
pub(super) fn narrow(catalog: &Catalog, answers: &Answers) -> Result<Catalog, DomainError> {
    let remaining = catalog.filter(answers);
    if remaining.is_empty() {
        debug!(answers = answers.len(), "No items match the answers");
        return Err(DomainError::new(
            ErrorCode::NoMatchingItems,
            "No items match the given answers",
        ));
    }
    Ok(remaining)
}
