//! Help Me Decide - Guided decision making over item catalogs
//!
//! This crate narrows a catalog of described items down to one by asking a
//! single informative question at a time, in the manner of "20 questions".
//! Feature kinds are inferred from the data, answers filter the catalog, and
//! a pluggable strategy picks the next question.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
