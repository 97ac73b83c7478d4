//! Catalog aggregate - the working set of items under consideration.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::answers::Answers;
use super::feature_set::FeatureSet;
use super::item::{Features, Item};
use super::value::{FeatureValue, Scalar};
use crate::domain::foundation::{ItemId, ValidationError};
use crate::domain::questions::{Question, QuestionSet};

/// An immutable table of items plus the feature set derived from them.
///
/// Every operation that changes membership returns a new catalog whose
/// feature set is derived from the surviving items only. Clones share the
/// underlying data.
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Arc<CatalogData>,
}

#[derive(Debug)]
struct CatalogData {
    items: Vec<Item>,
    features: FeatureSet,
}

impl Catalog {
    /// Creates a catalog with no items.
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), FeatureSet::default())
    }

    /// Validates the items and derives the feature set from a full scan.
    ///
    /// # Errors
    ///
    /// - an id appears twice
    /// - an item has no features
    /// - a feature name is empty or a value starts with a reserved character
    pub fn derive(items: Vec<Item>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(ValidationError::duplicate_id(item.id.as_str()));
            }
            if item.features.is_empty() {
                return Err(ValidationError::empty_field(format!("features of '{}'", item.id)));
            }
        }

        let features = FeatureSet::derive(&items)?;
        debug!(items = items.len(), features = features.len(), "Catalog derived");
        Ok(Self::from_parts(items, features))
    }

    /// Reads a catalog from a JSON value shaped `{id: {feature: value}}`.
    ///
    /// Note that `serde_json::Value` does not keep key order; use
    /// [`Catalog::from_json_str`] when item or feature order matters.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let map = value
            .as_object()
            .ok_or_else(|| ValidationError::invalid_shape("catalog", "a map of id to features"))?;
        for (id, features) in map {
            if !features.as_object().is_some_and(|f| !f.is_empty()) {
                return Err(ValidationError::invalid_shape(
                    id.as_str(),
                    "a non-empty map of feature to value",
                ));
            }
        }

        let raw = RawCatalog::deserialize(value)
            .map_err(|e| ValidationError::invalid_format("catalog", e.to_string()))?;
        raw.into_catalog()
    }

    /// Parses a catalog from JSON text, keeping document order.
    pub fn from_json_str(json: &str) -> Result<Self, ValidationError> {
        let raw: RawCatalog = serde_json::from_str(json)
            .map_err(|e| ValidationError::invalid_format("catalog", e.to_string()))?;
        raw.into_catalog()
    }

    /// Parses a catalog from YAML text, keeping document order.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ValidationError> {
        let raw: RawCatalog = serde_yaml::from_str(yaml)
            .map_err(|e| ValidationError::invalid_format("catalog", e.to_string()))?;
        raw.into_catalog()
    }

    fn from_parts(items: Vec<Item>, features: FeatureSet) -> Self {
        Self {
            inner: Arc::new(CatalogData { items, features }),
        }
    }

    /// Builds a catalog from a subset of this catalog's items.
    fn subset(items: Vec<Item>) -> Self {
        let features = FeatureSet::rederive(&items);
        Self::from_parts(items, features)
    }

    /// Returns true if both handles point at the same catalog instance.
    pub fn ptr_eq(&self, other: &Catalog) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The feature set derived when this catalog was built.
    pub fn features(&self) -> &FeatureSet {
        &self.inner.features
    }

    /// Iterates items in catalog order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.inner.items.iter()
    }

    /// Iterates item ids in catalog order.
    pub fn ids(&self) -> impl Iterator<Item = &ItemId> {
        self.inner.items.iter().map(|item| &item.id)
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.inner.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.is_empty()
    }

    /// Narrows the catalog to the items satisfying every answer.
    ///
    /// Answers are applied in order, each one judged by this catalog's
    /// feature specs. The survivors then get a freshly derived feature set,
    /// so kinds and domains may differ from this catalog's. An answer about
    /// an unknown feature matches nothing.
    ///
    /// An empty catalog or empty answers return this same instance.
    pub fn filter(&self, answers: &Answers) -> Catalog {
        if self.is_empty() || answers.is_empty() {
            return self.clone();
        }

        let specs = self.features();
        let mut survivors: Vec<&Item> = self.items().collect();
        for (feature, value) in answers.iter() {
            match specs.get(feature) {
                Some(spec) => survivors.retain(|item| spec.matches(item, value)),
                None => survivors.clear(),
            }
        }

        debug!(
            answers = answers.len(),
            before = self.len(),
            after = survivors.len(),
            "Catalog filtered"
        );
        Self::subset(survivors.into_iter().cloned().collect())
    }

    /// Computes the questions that still split this catalog.
    ///
    /// Answer values matched by every remaining item are dropped, and so are
    /// features left without any answer value. A catalog with at most one
    /// item has nothing left to ask.
    pub fn questions(&self) -> QuestionSet {
        if self.len() <= 1 {
            return QuestionSet::NoQuestions;
        }

        let questions: Vec<Question> = self
            .features()
            .iter()
            .filter_map(|spec| {
                let mut options = spec.organize(self);
                // ids are unique, so a full-length match is the whole catalog
                options.retain(|option| option.item_ids.len() != self.len());
                if options.is_empty() {
                    None
                } else {
                    Some(Question::new(spec.name(), options))
                }
            })
            .collect();

        debug!(
            items = self.len(),
            questions = questions.len(),
            "Questions computed"
        );
        QuestionSet::Open(questions)
    }

    /// Ids of items whose features equal another item's, in catalog order.
    pub fn find_duplicates(&self) -> Vec<ItemId> {
        self.items()
            .filter(|item| {
                self.items()
                    .any(|other| other.id != item.id && other.features == item.features)
            })
            .map(|item| item.id.clone())
            .collect()
    }

    /// Ids of items that do not declare every feature of the catalog.
    pub fn find_missing(&self) -> Vec<ItemId> {
        let names: Vec<&str> = self.features().names().collect();
        self.items()
            .filter(|item| names.iter().any(|name| !item.features.contains(name)))
            .map(|item| item.id.clone())
            .collect()
    }

    /// All items except the given ids.
    pub fn without<S: AsRef<str>>(&self, ids: &[S]) -> Catalog {
        let excluded: HashSet<&str> = ids.iter().map(AsRef::as_ref).collect();
        Self::subset(
            self.items()
                .filter(|item| !excluded.contains(item.id.as_str()))
                .cloned()
                .collect(),
        )
    }

    /// Only the given ids, in catalog order.
    pub fn only<S: AsRef<str>>(&self, ids: &[S]) -> Catalog {
        let included: HashSet<&str> = ids.iter().map(AsRef::as_ref).collect();
        Self::subset(
            self.items()
                .filter(|item| included.contains(item.id.as_str()))
                .cloned()
                .collect(),
        )
    }

    /// SHA-256 over a canonical rendering of the items.
    ///
    /// Feature order inside an item does not affect the digest; item order
    /// does.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for item in self.items() {
            hasher.update(item.id.as_str().as_bytes());
            hasher.update(b"\x1d");

            let mut features: Vec<(&str, &FeatureValue)> = item.features.iter().collect();
            features.sort_by(|a, b| a.0.cmp(b.0));
            for (name, value) in features {
                hasher.update(name.as_bytes());
                hasher.update(b"\x1f");
                update_with_value(&mut hasher, value);
                hasher.update(b"\x1e");
            }
        }
        format!("{:x}", hasher.finalize())
    }
}

fn update_with_value(hasher: &mut Sha256, value: &FeatureValue) {
    match value {
        FeatureValue::Scalar(Scalar::Text(s)) => {
            hasher.update(b"s:");
            hasher.update(s.as_bytes());
        }
        FeatureValue::Scalar(Scalar::Integer(n)) => hasher.update(format!("i:{}", n).as_bytes()),
        FeatureValue::Scalar(Scalar::Decimal(n)) => hasher.update(format!("d:{}", n).as_bytes()),
        FeatureValue::Scalar(Scalar::Bool(b)) => hasher.update(format!("b:{}", b).as_bytes()),
        FeatureValue::Set(elements) => {
            hasher.update(b"l:");
            for element in elements {
                hasher.update(element.as_bytes());
                hasher.update(b"\x1c");
            }
        }
    }
}

/// Catalogs compare by membership: same ids with equal features.
impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .items()
                .all(|item| other.get(item.id.as_str()) == Some(item))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for item in self.items() {
            map.serialize_entry(item.id.as_str(), &item.features)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawCatalog::deserialize(deserializer)?
            .into_catalog()
            .map_err(de::Error::custom)
    }
}

/// Id to features table as read from a document, before validation.
struct RawCatalog {
    entries: Vec<(String, Features)>,
}

impl RawCatalog {
    fn into_catalog(self) -> Result<Catalog, ValidationError> {
        let items = self
            .entries
            .into_iter()
            .map(|(id, features)| {
                Ok(Item {
                    id: ItemId::new(id)?,
                    features,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;
        Catalog::derive(items)
    }
}

struct RawCatalogVisitor;

impl<'de> Visitor<'de> for RawCatalogVisitor {
    type Value = RawCatalog;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of item id to features")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(entry) = access.next_entry::<String, Features>()? {
            entries.push(entry);
        }
        Ok(RawCatalog { entries })
    }
}

impl<'de> Deserialize<'de> for RawCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RawCatalogVisitor)
    }
}
