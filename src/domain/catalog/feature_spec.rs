//! Feature specifications - inferred kind, allowed values and matching.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::item::Item;
use super::query::{self, NumericComparison};
use super::value::{FeatureValue, Scalar};
use super::Catalog;
use crate::domain::foundation::ValidationError;
use crate::domain::questions::AnswerOption;

/// The value shape a feature was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    /// At least one item holds a collection; answers test membership.
    #[serde(rename = "set")]
    SetMembership,
    /// Every value is numeric; answers may use `<N`, `>N`, `!N`.
    #[serde(rename = "number")]
    NumericRange,
    /// A single value exists; items either have it or do not.
    #[serde(rename = "flag")]
    Flag,
    /// Anything else; answers must equal the value.
    #[serde(rename = "value")]
    FreeValue,
}

impl FeatureKind {
    /// Returns the serialized name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::SetMembership => "set",
            FeatureKind::NumericRange => "number",
            FeatureKind::Flag => "flag",
            FeatureKind::FreeValue => "value",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification and allowed-value domain of one feature.
#[derive(Debug, Clone)]
pub struct FeatureSpec {
    name: String,
    kind: FeatureKind,
    domain: Vec<Scalar>,
}

impl FeatureSpec {
    /// Creates a spec, validating the name and every domain value.
    ///
    /// The domain is deduplicated, keeping first occurrences.
    pub fn new(
        name: impl Into<String>,
        kind: FeatureKind,
        domain: Vec<Scalar>,
    ) -> Result<Self, ValidationError> {
        let spec = Self {
            name: name.into(),
            kind,
            domain: dedup(domain),
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Checks the name and that no domain value starts with a reserved
    /// query character.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::empty_field("feature"));
        }
        for value in &self.domain {
            if let Some(text) = value.as_text() {
                if let Some(prefix) = query::reserved_prefix(text) {
                    return Err(ValidationError::reserved_prefix(&self.name, text, prefix));
                }
            }
        }
        Ok(())
    }

    /// Classifies a feature from every value observed for it.
    ///
    /// Rules, first match wins:
    /// 1. any collection: `SetMembership`, domain is the union of elements
    /// 2. a single distinct scalar: `Flag`
    /// 3. only numeric scalars: `NumericRange`
    /// 4. otherwise: `FreeValue`
    pub fn classify<'a, I>(name: impl Into<String>, observed: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = &'a FeatureValue>,
    {
        let spec = Self::classify_unchecked(name, observed);
        spec.validate()?;
        Ok(spec)
    }

    /// Classifies without validating; only for values that already passed
    /// validation as part of a larger catalog.
    pub(crate) fn classify_unchecked<'a, I>(name: impl Into<String>, observed: I) -> Self
    where
        I: IntoIterator<Item = &'a FeatureValue>,
    {
        let name = name.into();
        let observed: Vec<&FeatureValue> = observed.into_iter().collect();

        if observed.iter().any(|v| matches!(v, FeatureValue::Set(_))) {
            let mut domain = Vec::new();
            for value in observed {
                match value {
                    FeatureValue::Set(elements) => {
                        domain.extend(elements.iter().cloned().map(Scalar::Text))
                    }
                    FeatureValue::Scalar(scalar) => domain.push(scalar.clone()),
                }
            }
            return Self {
                name,
                kind: FeatureKind::SetMembership,
                domain: dedup(domain),
            };
        }

        let distinct = dedup(observed.iter().filter_map(|v| v.as_scalar().cloned()).collect());
        let kind = if distinct.len() == 1 {
            FeatureKind::Flag
        } else if distinct.iter().all(Scalar::is_numeric) {
            FeatureKind::NumericRange
        } else {
            FeatureKind::FreeValue
        };
        Self {
            name,
            kind,
            domain: distinct,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    /// Allowed values in first-observed order.
    pub fn domain(&self) -> &[Scalar] {
        &self.domain
    }

    fn domain_contains(&self, query: &FeatureValue) -> bool {
        match query {
            FeatureValue::Scalar(scalar) => self.domain.contains(scalar),
            FeatureValue::Set(_) => false,
        }
    }

    /// Checks whether an item satisfies the answer `query` for this feature.
    ///
    /// Holds when any of the following does, in order:
    /// - the item holds a collection and the query is a member, an all-of
    ///   list of (possibly `-`negated) members, or a `-`negated member
    /// - the item's value equals the query
    /// - the feature is a flag, the item lacks it, and the query is not the
    ///   flag's value
    /// - the feature is numeric and the query is the value as text or an
    ///   operator expression that holds for it
    pub fn matches(&self, item: &Item, query: &FeatureValue) -> bool {
        let value = item.feature(&self.name);

        if let Some(FeatureValue::Set(elements)) = value {
            if set_matches(elements, query) {
                return true;
            }
        }

        if value == Some(query) {
            return true;
        }

        if self.kind == FeatureKind::Flag && value.is_none() && !self.domain_contains(query) {
            return true;
        }

        if self.kind == FeatureKind::NumericRange {
            if let Some(FeatureValue::Scalar(scalar)) = value {
                return numeric_matches(scalar, query);
            }
        }

        false
    }

    /// Maps each domain value to the ids of the catalog items matching it.
    pub fn organize(&self, catalog: &Catalog) -> Vec<AnswerOption> {
        if catalog.is_empty() {
            return Vec::new();
        }

        self.domain
            .iter()
            .map(|value| {
                let query = FeatureValue::Scalar(value.clone());
                let item_ids = catalog
                    .items()
                    .filter(|item| self.matches(item, &query))
                    .map(|item| item.id.clone())
                    .collect();
                AnswerOption::new(value.clone(), item_ids)
            })
            .collect()
    }
}

/// Permissive comparison: name and kind must agree, and every value of the
/// left-hand domain must appear in the right-hand one.
///
/// Domains depend on which items were sampled, so a spec built from a subset
/// of items compares equal to the spec built from all of them. The relation
/// is not symmetric.
impl PartialEq for FeatureSpec {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.domain.iter().all(|v| other.domain.contains(v))
    }
}

impl fmt::Display for FeatureSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.domain.iter().map(ToString::to_string).collect();
        write!(f, "{} ({}) = [{}]", self.name, self.kind, values.join(", "))
    }
}

fn dedup(values: Vec<Scalar>) -> Vec<Scalar> {
    let mut unique: Vec<Scalar> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}

fn set_matches(elements: &[String], query: &FeatureValue) -> bool {
    let contains = |v: &str| elements.iter().any(|e| e == v);
    match query {
        FeatureValue::Scalar(Scalar::Text(term)) => {
            contains(term) || query::negated(term).is_some_and(|v| !contains(v))
        }
        FeatureValue::Scalar(_) => false,
        FeatureValue::Set(terms) => terms.iter().all(|term| match query::negated(term) {
            Some(v) => !contains(v),
            None => contains(term),
        }),
    }
}

fn numeric_matches(value: &Scalar, query: &FeatureValue) -> bool {
    let (Some(number), Some(text)) = (value.as_f64(), query.as_scalar().and_then(Scalar::as_text))
    else {
        return false;
    };
    text == value.to_string()
        || NumericComparison::parse(text).is_some_and(|comparison| comparison.evaluate(number))
}
