//! ListQuestionsHandler - Query handler returning every informative question.

use serde::Serialize;

use super::narrowing::narrow;
use crate::domain::catalog::{Answers, Catalog, FeatureSummary};
use crate::domain::foundation::DomainError;
use crate::domain::questions::{QuestionSet, Strategy};

/// Query for the questions still worth asking.
#[derive(Debug, Clone)]
pub struct ListQuestionsQuery {
    pub catalog: Catalog,
    pub answers: Answers,
}

/// Remaining catalog and all of its questions.
#[derive(Debug, Clone, Serialize)]
pub struct ListQuestionsResult {
    pub definition: FeatureSummary,
    pub dataset: Catalog,
    pub strategies: Vec<Strategy>,
    pub questions: QuestionSet,
    pub answers: Answers,
}

/// Handler for listing questions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListQuestionsHandler;

impl ListQuestionsHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, query: ListQuestionsQuery) -> Result<ListQuestionsResult, DomainError> {
        let remaining = narrow(&query.catalog, &query.answers)?;
        let questions = remaining.questions();

        Ok(ListQuestionsResult {
            definition: remaining.features().pure(),
            strategies: Strategy::ALL.to_vec(),
            questions,
            dataset: remaining,
            answers: query.answers,
        })
    }
}
