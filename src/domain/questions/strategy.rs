//! Question-picking strategies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::question_set::Question;
use crate::domain::foundation::DomainError;
use crate::ports::RandomSource;

/// Policy choosing which informative question to ask next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Always the first question in feature order.
    #[default]
    FirstQuestion,
    /// A uniformly random question.
    RandomQuestion,
}

impl Strategy {
    /// Every registered strategy, in presentation order.
    pub const ALL: [Strategy; 2] = [Strategy::FirstQuestion, Strategy::RandomQuestion];

    /// Registered names, as exposed to clients.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(|strategy| strategy.name())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::FirstQuestion => "first_question",
            Strategy::RandomQuestion => "random_question",
        }
    }

    /// Looks a strategy up by its registered name.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == name)
            .ok_or_else(|| DomainError::unknown_strategy(name))
    }

    /// Selects one question; `None` only when there are no questions.
    pub fn select<'a>(&self, questions: &'a [Question], rng: &dyn RandomSource) -> Option<&'a Question> {
        if questions.is_empty() {
            return None;
        }
        match self {
            Strategy::FirstQuestion => questions.first(),
            Strategy::RandomQuestion => questions.get(rng.pick_index(questions.len()) % questions.len()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Strategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::parse(s)
    }
}
