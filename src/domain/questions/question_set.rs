//! Question sets - the informative questions left for a catalog.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::debug;

use super::strategy::Strategy;
use crate::domain::catalog::Scalar;
use crate::domain::foundation::{DomainError, ItemId};
use crate::ports::RandomSource;

/// One candidate answer and the items that would survive it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOption {
    pub value: Scalar,
    pub item_ids: Vec<ItemId>,
}

impl AnswerOption {
    pub fn new(value: Scalar, item_ids: Vec<ItemId>) -> Self {
        Self { value, item_ids }
    }
}

/// A feature worth asking about, with its informative answers.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub feature: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn new(feature: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            feature: feature.into(),
            options,
        }
    }

    /// Returns the option for a candidate value.
    pub fn option(&self, value: &Scalar) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.value == *value)
    }

    /// Candidate values in domain order.
    pub fn values(&self) -> impl Iterator<Item = &Scalar> {
        self.options.iter().map(|option| &option.value)
    }
}

impl Serialize for Question {
    /// `{value: [ids]}`; values are rendered as map keys.
    ///
    /// Values rendering to the same key (`"3"` and `3`) share one entry
    /// holding the union of their ids.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<(String, Vec<&ItemId>)> = Vec::with_capacity(self.options.len());
        for option in &self.options {
            let key = option.value.to_string();
            let index = match entries.iter().position(|(k, _)| *k == key) {
                Some(index) => index,
                None => {
                    entries.push((key, Vec::new()));
                    entries.len() - 1
                }
            };
            let ids = &mut entries[index].1;
            for id in &option.item_ids {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, ids) in &entries {
            map.serialize_entry(key, ids)?;
        }
        map.end()
    }
}

/// Feature to candidate-answer mapping for one catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionSet {
    /// The catalog has at most one item; there is nothing to ask.
    NoQuestions,
    /// Informative questions in feature order; may be empty.
    Open(Vec<Question>),
}

impl QuestionSet {
    /// True for the `NoQuestions` sentinel.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, QuestionSet::NoQuestions)
    }

    pub fn questions(&self) -> &[Question] {
        match self {
            QuestionSet::NoQuestions => &[],
            QuestionSet::Open(questions) => questions,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions().iter()
    }

    pub fn get(&self, feature: &str) -> Option<&Question> {
        self.iter().find(|q| q.feature == feature)
    }

    pub fn first(&self) -> Option<&Question> {
        self.questions().first()
    }

    pub fn len(&self) -> usize {
        self.questions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions().is_empty()
    }

    /// Takes the single question out of a picked set.
    pub fn into_single(self) -> Option<Question> {
        match self {
            QuestionSet::NoQuestions => None,
            QuestionSet::Open(questions) => questions.into_iter().next(),
        }
    }

    /// Picks one question with the strategy registered under `strategy`.
    ///
    /// The `NoQuestions` sentinel ignores the name and returns itself, so
    /// even an unknown name is accepted there.
    ///
    /// # Errors
    ///
    /// `UnknownStrategy` when the name is not registered.
    pub fn pick(&self, strategy: &str, rng: &dyn RandomSource) -> Result<QuestionSet, DomainError> {
        if self.is_exhausted() {
            return Ok(QuestionSet::NoQuestions);
        }
        let strategy: Strategy = strategy.parse()?;
        Ok(self.pick_with(strategy, rng))
    }

    /// Picks one question with a known strategy.
    pub fn pick_with(&self, strategy: Strategy, rng: &dyn RandomSource) -> QuestionSet {
        match self {
            QuestionSet::NoQuestions => QuestionSet::NoQuestions,
            QuestionSet::Open(questions) => {
                let picked: Vec<Question> = strategy.select(questions, rng).into_iter().cloned().collect();
                debug!(
                    strategy = strategy.name(),
                    candidates = questions.len(),
                    feature = picked.first().map(|q| q.feature.as_str()),
                    "Question picked"
                );
                QuestionSet::Open(picked)
            }
        }
    }
}

impl Default for QuestionSet {
    fn default() -> Self {
        QuestionSet::Open(Vec::new())
    }
}

impl Serialize for QuestionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let questions = self.questions();
        let mut map = serializer.serialize_map(Some(questions.len()))?;
        for question in questions {
            map.serialize_entry(&question.feature, question)?;
        }
        map.end()
    }
}
