//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod decision;

pub use decision::{
    // Commands
    CatalogSource, IngestCatalogCommand, IngestCatalogHandler, IngestCatalogResult,
    // Queries
    ListQuestionsHandler, ListQuestionsQuery, ListQuestionsResult,
    NextQuestionHandler, NextQuestionQuery, NextQuestionResult,
};
