//! Feature values - the tagged shapes an item attribute can take.

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single scalar feature value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Bool(bool),
}

impl Scalar {
    /// Returns true for integer and decimal values.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Scalar::Integer(_) | Scalar::Decimal(_))
    }

    /// Returns the numeric value, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(n) => Some(*n as f64),
            Scalar::Decimal(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Integer(n) => write!(f, "{}", n),
            Scalar::Decimal(n) => write!(f, "{}", n),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(value as i64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Decimal(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Text(s) => serializer.serialize_str(s),
            Scalar::Integer(n) => serializer.serialize_i64(*n),
            Scalar::Decimal(n) => serializer.serialize_f64(*n),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match FeatureValue::deserialize(deserializer)? {
            FeatureValue::Scalar(scalar) => Ok(scalar),
            FeatureValue::Set(_) => Err(de::Error::custom("expected a scalar, got a collection")),
        }
    }
}

/// The value an item holds for one feature.
///
/// A missing key is the third shape ("absent"); lookups model it as `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Scalar(Scalar),
    /// Unordered for matching; enumeration order is kept for determinism.
    Set(Vec<String>),
}

impl FeatureValue {
    /// Builds a collection value from anything string-like.
    pub fn set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FeatureValue::Set(values.into_iter().map(Into::into).collect())
    }

    /// Returns the scalar, if this is one.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            FeatureValue::Scalar(s) => Some(s),
            FeatureValue::Set(_) => None,
        }
    }

    /// Returns the collection elements, if this is a collection.
    pub fn as_set(&self) -> Option<&[String]> {
        match self {
            FeatureValue::Set(values) => Some(values),
            FeatureValue::Scalar(_) => None,
        }
    }
}

macro_rules! scalar_feature_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FeatureValue {
                fn from(value: $ty) -> Self {
                    FeatureValue::Scalar(value.into())
                }
            }
        )*
    };
}

scalar_feature_value!(Scalar, &str, String, i64, i32, f64, bool);

impl From<Vec<&str>> for FeatureValue {
    fn from(values: Vec<&str>) -> Self {
        FeatureValue::set(values)
    }
}

impl From<Vec<String>> for FeatureValue {
    fn from(values: Vec<String>) -> Self {
        FeatureValue::Set(values)
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FeatureValue::Scalar(scalar) => scalar.serialize(serializer),
            FeatureValue::Set(values) => values.serialize(serializer),
        }
    }
}

struct FeatureValueVisitor;

impl<'de> Visitor<'de> for FeatureValueVisitor {
    type Value = FeatureValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean or list of strings")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(FeatureValue::Scalar(Scalar::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(FeatureValue::Scalar(Scalar::Integer(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        let scalar = match i64::try_from(v) {
            Ok(n) => Scalar::Integer(n),
            Err(_) => Scalar::Decimal(v as f64),
        };
        Ok(FeatureValue::Scalar(scalar))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(FeatureValue::Scalar(Scalar::Decimal(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(FeatureValue::Scalar(Scalar::Text(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(FeatureValue::Scalar(Scalar::Text(v)))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        // null elements carry no information and are dropped
        while let Some(element) = seq.next_element::<Option<String>>()? {
            if let Some(value) = element {
                values.push(value);
            }
        }
        Ok(FeatureValue::Set(values))
    }
}

impl<'de> Deserialize<'de> for FeatureValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FeatureValueVisitor)
    }
}
