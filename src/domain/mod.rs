//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors)
//! - `catalog` - Items, feature classification, answers and filtering
//! - `questions` - Question sets and the strategies that pick from them

pub mod catalog;
pub mod foundation;
pub mod questions;
