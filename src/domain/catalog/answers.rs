//! Answers - the ordered feature/value pairs accumulated during a session.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use super::query::parse_answer_token;
use super::value::FeatureValue;
use crate::domain::foundation::ValidationError;

/// Ordered answers given so far.
///
/// Order only affects intermediate results while filtering; the final set of
/// surviving items does not depend on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    entries: Vec<(String, FeatureValue)>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an answer, replacing an earlier answer for the same feature.
    pub fn with(mut self, feature: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        self.insert(feature, value);
        self
    }

    /// Adds an answer, replacing an earlier answer for the same feature.
    pub fn insert(&mut self, feature: impl Into<String>, value: impl Into<FeatureValue>) {
        let feature = feature.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(f, _)| *f == feature) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((feature, value)),
        }
    }

    /// Reads answers from a JSON value, which must be an object.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        if !value.is_object() {
            return Err(ValidationError::invalid_shape("answers", "a map of feature to value"));
        }
        Answers::deserialize(value)
            .map_err(|e| ValidationError::invalid_format("answers", e.to_string()))
    }

    /// Parses answers from JSON text, keeping the document's key order.
    pub fn from_json_str(json: &str) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ValidationError::invalid_format("answers", e.to_string()))?;
        if !value.is_object() {
            return Err(ValidationError::invalid_shape("answers", "a map of feature to value"));
        }
        serde_json::from_str(json).map_err(|e| ValidationError::invalid_format("answers", e.to_string()))
    }

    /// Builds answers from raw `feature=value` pairs such as a query string.
    ///
    /// A feature given once becomes a typed scalar (see
    /// [`parse_answer_token`]); a feature given several times becomes an
    /// all-of collection answer.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            match grouped.iter_mut().find(|(k, _)| *k == key) {
                Some((_, values)) => values.push(value),
                None => grouped.push((key, vec![value])),
            }
        }

        let entries = grouped
            .into_iter()
            .map(|(key, mut values)| {
                let value = if values.len() == 1 {
                    FeatureValue::Scalar(parse_answer_token(&values.remove(0)))
                } else {
                    FeatureValue::Set(values)
                };
                (key, value)
            })
            .collect();

        Self { entries }
    }

    pub fn get(&self, feature: &str) -> Option<&FeatureValue> {
        self.entries
            .iter()
            .find(|(f, _)| f == feature)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.entries.iter().map(|(f, v)| (f.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Answers
where
    K: Into<String>,
    V: Into<FeatureValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut answers = Answers::new();
        for (feature, value) in iter {
            answers.insert(feature, value);
        }
        answers
    }
}

impl Serialize for Answers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (feature, value) in &self.entries {
            map.serialize_entry(feature, value)?;
        }
        map.end()
    }
}

struct AnswersVisitor;

impl<'de> Visitor<'de> for AnswersVisitor {
    type Value = Answers;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of feature name to answer")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut answers = Answers::new();
        while let Some((feature, value)) = access.next_entry::<String, FeatureValue>()? {
            answers.insert(feature, value);
        }
        Ok(answers)
    }
}

impl<'de> Deserialize<'de> for Answers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AnswersVisitor)
    }
}
