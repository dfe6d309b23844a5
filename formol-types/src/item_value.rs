use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ItemError;

/// Keys and values of a map node.
pub type ItemMap = BTreeMap<String, ItemValue>;

/// A node of a form item.
///
/// Items are plain nested data: scalars, lists and maps. Containers are
/// reference counted so that copying an item is cheap and an update only
/// copies the nodes along the written path (see [`crate::resolve::set`]).
/// Untouched subtrees keep their identity, which [`ItemValue::same_node`]
/// exposes and equality uses as a shortcut.
#[derive(Debug, Clone, Default)]
pub enum ItemValue {
    /// Absent or explicit null value (also fills holes in sparse lists).
    #[default]
    Null,

    /// A boolean value (checkboxes, switches).
    Bool(bool),

    /// An integer value.
    Int(i64),

    /// A floating-point value.
    Float(f64),

    /// A string value (text-like inputs, dates, colours).
    String(String),

    /// A list node, addressed by numeric path segments.
    List(Arc<Vec<ItemValue>>),

    /// A map node, addressed by key path segments.
    Map(Arc<ItemMap>),
}

impl ItemValue {
    /// An empty map node, the shape of a blank item.
    pub fn empty_map() -> Self {
        Self::Map(Arc::new(ItemMap::new()))
    }

    /// An empty list node.
    pub fn empty_list() -> Self {
        Self::List(Arc::new(Vec::new()))
    }

    /// Build a map node from key/value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<ItemValue>,
    {
        Self::Map(Arc::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this node is a list or a map.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map(_))
    }

    /// Whether the value counts as "not filled in" for a required field.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Map(map) => map.is_empty(),
            Self::Bool(_) | Self::Int(_) | Self::Float(_) => false,
        }
    }

    /// Loose truthiness: null, `false`, `0`, NaN and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::List(_) | Self::Map(_) => true,
        }
    }

    /// Pointer identity for containers, value equality for scalars.
    ///
    /// Two containers are the same node only if they share storage, which is
    /// what survives a copy-on-write update of a sibling path.
    pub fn same_node(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => Arc::ptr_eq(a, b),
            (Self::Map(a), Self::Map(b)) => Arc::ptr_eq(a, b),
            (a, b) if !a.is_container() && !b.is_container() => a == b,
            _ => false,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an integer (integral floats included).
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    /// Try to get this value as a float (integers included).
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a list.
    pub fn as_list(&self) -> Option<&[ItemValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get this value as a map.
    pub fn as_map(&self) -> Option<&ItemMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Text shown in a plain input for this value.
    pub fn display_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Parse an item from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ItemError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(Self::from(value))
    }

    /// Convert to a `serde_json::Value`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::List(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

/// Exact comparison: `b` must be integral and convert back to `a`.
fn int_eq_float(a: i64, b: f64) -> bool {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    b.fract() == 0.0 && (-LIMIT..LIMIT).contains(&b) && b as i64 == a
}

impl PartialEq for ItemValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => int_eq_float(*a, *b),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::List(a), Self::List(b)) => Arc::ptr_eq(a, b) || a == b,
            (Self::Map(a), Self::Map(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ItemValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s:?}"),
            container => write!(f, "{}", container.to_json()),
        }
    }
}

impl From<serde_json::Value> for ItemValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map(Self::Float).unwrap_or(Self::Null),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(Arc::new(items.into_iter().map(Self::from).collect()))
            }
            serde_json::Value::Object(map) => Self::Map(Arc::new(
                map.into_iter().map(|(k, v)| (k, Self::from(v))).collect(),
            )),
        }
    }
}

impl From<&ItemValue> for serde_json::Value {
    fn from(value: &ItemValue) -> Self {
        value.to_json()
    }
}

impl From<ItemValue> for serde_json::Value {
    fn from(value: ItemValue) -> Self {
        value.to_json()
    }
}

impl From<String> for ItemValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for ItemValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for ItemValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for ItemValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for ItemValue {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for ItemValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for ItemValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<ItemValue>> for ItemValue {
    fn from(items: Vec<ItemValue>) -> Self {
        Self::List(Arc::new(items))
    }
}

impl From<ItemMap> for ItemValue {
    fn from(map: ItemMap) -> Self {
        Self::Map(Arc::new(map))
    }
}

impl<T: Into<ItemValue>> From<Option<T>> for ItemValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

impl Serialize for ItemValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => items.as_slice().serialize(serializer),
            Self::Map(map) => map.as_ref().serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ItemValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}
