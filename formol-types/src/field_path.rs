use std::fmt;

use serde::{Deserialize, Serialize};

/// A path into a form item, e.g. `"properties.extra.1.name"`.
///
/// Paths are the unit of identity for dirtiness and error tracking.
/// Segments are separated by dots; a segment made only of ASCII digits,
/// without a leading zero, addresses a list index. Anything else addresses
/// a map key.
/// The empty path addresses the whole item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath {
    /// Dot-separated path string, e.g. "address.street"
    path: String,
}

/// One step of a [`FieldPath`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A list index (`"3"`).
    Index(usize),
    /// A map key (`"street"`).
    Key(&'a str),
}

impl<'a> Segment<'a> {
    /// Classify a raw segment.
    pub fn parse(raw: &'a str) -> Self {
        let canonical = raw == "0" || !raw.starts_with('0');
        if canonical && !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            match raw.parse() {
                Ok(index) => Self::Index(index),
                Err(_) => Self::Key(raw),
            }
        } else {
            Self::Key(raw)
        }
    }

    /// The segment as it appears in the path string.
    pub fn as_key(&self) -> std::borrow::Cow<'a, str> {
        match self {
            Self::Index(index) => std::borrow::Cow::Owned(index.to_string()),
            Self::Key(key) => std::borrow::Cow::Borrowed(key),
        }
    }
}

impl FieldPath {
    /// Create a new path from a dot-separated string.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Create an empty path (the whole item).
    pub fn empty() -> Self {
        Self {
            path: String::new(),
        }
    }

    /// Derive a path from a human label.
    ///
    /// Words are camel-cased and anything that is not alphanumeric is
    /// dropped: `"Number 1"` becomes `number1`, `"Date of birth"` becomes
    /// `dateOfBirth`.
    pub fn from_label(label: &str) -> Self {
        let mut path = String::new();
        for word in label
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let mut chars = word.chars();
            if path.is_empty() {
                path.extend(chars.flat_map(char::to_lowercase));
            } else if let Some(first) = chars.next() {
                path.extend(first.to_uppercase());
                path.extend(chars.flat_map(char::to_lowercase));
            }
        }
        Self::new(path)
    }

    /// Get the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Get the raw segments of this path.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.').filter(|s| !s.is_empty())
    }

    /// Get the classified segments of this path.
    pub fn parsed(&self) -> impl Iterator<Item = Segment<'_>> {
        self.segments().map(Segment::parse)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FieldPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for FieldPath {
    fn from(s: &String) -> Self {
        Self::new(s.clone())
    }
}

impl From<&FieldPath> for FieldPath {
    fn from(p: &FieldPath) -> Self {
        p.clone()
    }
}
