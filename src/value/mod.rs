//! The structural value tree shared by every part of the crate.
//!
//! A [`Value`] is either an ordered [`Mapping`], a [`Sequence`] or a
//! [`Scalar`] leaf. Trees are owned outright: cloning a value yields a fully
//! independent copy, and nothing in a tree ever refers back to another node.

mod navigate;
mod traversal;

use std::fmt;

use derive_more::{From, IsVariant};
use hashlink::LinkedHashMap;

pub use navigate::{Navigator, split_path};
pub use traversal::{Copier, Dumper, TraversalPolicy};

/// Key under which per-node filesystem metadata is stored.
pub const INFO_KEY: &str = "_info";
/// Top-level key holding the alias table.
pub const ALIASES_KEY: &str = "_aliases";

/// String keyed mapping that remembers insertion order.
pub type Mapping = LinkedHashMap<String, Value>;
pub type Sequence = Vec<Value>;

#[derive(Debug, Clone, PartialEq, From, IsVariant)]
pub enum Value {
    Mapping(Mapping),
    Sequence(Sequence),
    Scalar(Scalar),
}

/// Leaf values. The core never looks inside them beyond rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Default for Value {
    fn default() -> Self {
        Value::Mapping(Mapping::new())
    }
}

impl Value {
    pub fn empty_mapping() -> Self {
        Value::Mapping(Mapping::new())
    }

    pub fn null() -> Self {
        Value::Scalar(Scalar::Null)
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Resolves a dotted path below this node. See [`Navigator`].
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        Navigator::new(self).get(path)
    }

    /// Folds `other` into `self` one level deep.
    ///
    /// When both sides are mappings, each key of `other` overwrites the
    /// matching key of `self` and new keys are appended. Otherwise `other`
    /// replaces `self` entirely.
    pub fn merge_shallow(&mut self, other: Value) {
        match (self, other) {
            (Value::Mapping(target), Value::Mapping(source)) => {
                for (key, value) in source {
                    target.replace(key, value);
                }
            }
            (this, other) => *this = other,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x:?}"),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(Scalar::Integer)
            .unwrap_or(Scalar::Float(value as f64))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value.into())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::null(),
            serde_json::Value::Bool(b) => b.into(),
            serde_json::Value::Number(n) => Value::Scalar(
                n.as_i64()
                    .map(Scalar::Integer)
                    .or_else(|| n.as_u64().map(Scalar::from))
                    .unwrap_or_else(|| Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
            ),
            serde_json::Value::String(s) => s.into(),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Mapping(iter.into_iter().collect())
    }
}
