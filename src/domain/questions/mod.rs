//! Questions Module - Informative questions and the strategies picking them.
//!
//! A `QuestionSet` is computed by `Catalog::questions()`; a `Strategy`
//! narrows it to the single question shown to the user.

mod question_set;
mod strategy;

pub use question_set::{AnswerOption, Question, QuestionSet};
pub use strategy::Strategy;
