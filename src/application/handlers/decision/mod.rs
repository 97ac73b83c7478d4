//! Decision handlers - ingesting catalogs and asking questions about them.

mod ingest_catalog;
mod list_questions;
mod narrowing;
mod next_question;

pub use ingest_catalog::{
    CatalogSource, IngestCatalogCommand, IngestCatalogHandler, IngestCatalogResult,
};
pub use list_questions::{ListQuestionsHandler, ListQuestionsQuery, ListQuestionsResult};
pub use next_question::{NextQuestionHandler, NextQuestionQuery, NextQuestionResult};
