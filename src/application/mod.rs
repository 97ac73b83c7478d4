//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Ingestion is the only command; listing and picking questions are queries.

pub mod handlers;

pub use handlers::{
    CatalogSource, IngestCatalogCommand, IngestCatalogHandler, IngestCatalogResult,
    ListQuestionsHandler, ListQuestionsQuery, ListQuestionsResult, NextQuestionHandler,
    NextQuestionQuery, NextQuestionResult,
};
