//! Feature sets - every feature spec of one catalog.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::feature_spec::{FeatureKind, FeatureSpec};
use super::item::Item;
use super::value::{FeatureValue, Scalar};
use crate::domain::foundation::ValidationError;

/// Ordered name to spec mapping for one catalog.
///
/// Order is the order in which feature names are first seen while scanning
/// the catalog's items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    specs: Vec<FeatureSpec>,
}

impl FeatureSet {
    /// Scans the items once and classifies every feature found.
    pub fn derive<'a, I>(items: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let specs = observe(items)
            .into_iter()
            .map(|(name, values)| FeatureSpec::classify(name, values))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { specs })
    }

    /// Re-derives specs for items taken from an already validated catalog.
    pub(crate) fn rederive<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let specs = observe(items)
            .into_iter()
            .map(|(name, values)| FeatureSpec::classify_unchecked(name, values))
            .collect();

        Self { specs }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureSpec> {
        self.specs.iter().find(|spec| spec.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureSpec> {
        self.specs.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(FeatureSpec::name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Serializable projection keeping only kind and domain per feature.
    pub fn pure(&self) -> FeatureSummary {
        FeatureSummary {
            features: self
                .specs
                .iter()
                .map(|spec| {
                    (
                        spec.name().to_string(),
                        FeatureShape {
                            kind: spec.kind(),
                            values: spec.domain().to_vec(),
                        },
                    )
                })
                .collect(),
        }
    }
}

/// Groups every observed value by feature name, in first-seen order.
fn observe<'a, I>(items: I) -> Vec<(&'a str, Vec<&'a FeatureValue>)>
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut observed: Vec<(&str, Vec<&FeatureValue>)> = Vec::new();
    for item in items {
        for (name, value) in item.features.iter() {
            match observed.iter_mut().find(|(n, _)| *n == name) {
                Some((_, values)) => values.push(value),
                None => observed.push((name, vec![value])),
            }
        }
    }
    observed
}

/// Kind and allowed values of one feature, as exposed to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureShape {
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    pub values: Vec<Scalar>,
}

impl PartialEq for FeatureShape {
    /// Domains compare by content; order is not significant.
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.values.len() == other.values.len()
            && self.values.iter().all(|v| other.values.contains(v))
    }
}

/// The plain `{name -> {type, values}}` form of a feature set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSummary {
    features: Vec<(String, FeatureShape)>,
}

impl FeatureSummary {
    pub fn get(&self, name: &str) -> Option<&FeatureShape> {
        self.features
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, shape)| shape)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureShape)> {
        self.features.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Serialize for FeatureSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.features.len()))?;
        for (name, shape) in &self.features {
            map.serialize_entry(name, shape)?;
        }
        map.end()
    }
}

struct FeatureSummaryVisitor;

impl<'de> Visitor<'de> for FeatureSummaryVisitor {
    type Value = FeatureSummary;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of feature name to {type, values}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut features = Vec::new();
        while let Some(entry) = access.next_entry::<String, FeatureShape>()? {
            features.push(entry);
        }
        Ok(FeatureSummary { features })
    }
}

impl<'de> Deserialize<'de> for FeatureSummary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FeatureSummaryVisitor)
    }
}
