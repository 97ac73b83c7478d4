//! NextQuestionHandler - Query handler picking the single next question.

use std::sync::Arc;

use serde::Serialize;

use super::narrowing::narrow;
use crate::domain::catalog::{Answers, Catalog, FeatureSummary};
use crate::domain::foundation::DomainError;
use crate::domain::questions::{QuestionSet, Strategy};
use crate::ports::RandomSource;

/// Query for the next question.
#[derive(Debug, Clone)]
pub struct NextQuestionQuery {
    pub catalog: Catalog,
    pub answers: Answers,
    /// Registered strategy name; the handler's default when `None`.
    pub strategy: Option<String>,
}

/// Remaining catalog and the picked question.
///
/// `question` is empty when the catalog is down to one item or when no
/// feature separates the remaining items.
#[derive(Debug, Clone, Serialize)]
pub struct NextQuestionResult {
    pub definition: FeatureSummary,
    pub dataset: Catalog,
    pub strategies: Vec<Strategy>,
    pub strategy: Strategy,
    pub question: QuestionSet,
    pub answers: Answers,
}

/// Handler for picking the next question.
pub struct NextQuestionHandler {
    random_source: Arc<dyn RandomSource>,
    default_strategy: Strategy,
}

impl NextQuestionHandler {
    pub fn new(random_source: Arc<dyn RandomSource>, default_strategy: Strategy) -> Self {
        Self {
            random_source,
            default_strategy,
        }
    }

    pub fn handle(&self, query: NextQuestionQuery) -> Result<NextQuestionResult, DomainError> {
        // Validate the strategy before touching the catalog
        let strategy = match query.strategy.as_deref() {
            Some(name) => Strategy::parse(name)?,
            None => self.default_strategy,
        };

        let remaining = narrow(&query.catalog, &query.answers)?;
        let question = remaining
            .questions()
            .pick_with(strategy, self.random_source.as_ref());

        Ok(NextQuestionResult {
            definition: remaining.features().pure(),
            strategies: Strategy::ALL.to_vec(),
            strategy,
            question,
            dataset: remaining,
            answers: query.answers,
        })
    }
}
