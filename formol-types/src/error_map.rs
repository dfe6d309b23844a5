use std::collections::HashMap;

use crate::FieldPath;

/// Validation messages keyed by [`FieldPath`].
///
/// An entry with an empty message means "no error for this path". Validators
/// use it to state that a path they own is fine, which is different from
/// leaving the path out: an absent key says nothing about the path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    messages: HashMap<FieldPath, String>,
}

impl ErrorMap {
    /// Create a new empty error map.
    pub fn new() -> Self {
        Self {
            messages: HashMap::new(),
        }
    }

    /// Insert a message at the given path (an empty message clears it).
    pub fn insert(&mut self, path: impl Into<FieldPath>, message: impl Into<String>) {
        self.messages.insert(path.into(), message.into());
    }

    /// Builder form of [`ErrorMap::insert`].
    pub fn with(mut self, path: impl Into<FieldPath>, message: impl Into<String>) -> Self {
        self.insert(path, message);
        self
    }

    /// Get the raw entry at the given path, empty messages included.
    pub fn entry(&self, path: &FieldPath) -> Option<&str> {
        self.messages.get(path).map(String::as_str)
    }

    /// Get the error at the given path, if there is a non-empty one.
    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        self.entry(path).filter(|m| !m.is_empty())
    }

    /// Check if an entry (possibly empty) exists at the given path.
    pub fn contains(&self, path: &FieldPath) -> bool {
        self.messages.contains_key(path)
    }

    /// Remove the entry at the given path.
    pub fn remove(&mut self, path: &FieldPath) -> Option<String> {
        self.messages.remove(path)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Get an iterator over all entries, empty messages included.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.messages.iter().map(|(p, m)| (p, m.as_str()))
    }

    /// Get an iterator over the non-empty messages only.
    pub fn errors(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.iter().filter(|(_, m)| !m.is_empty())
    }

    /// Whether any non-empty message is present.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<P: Into<FieldPath>, M: Into<String>> FromIterator<(P, M)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (P, M)>>(iter: I) -> Self {
        Self {
            messages: iter
                .into_iter()
                .map(|(p, m)| (p.into(), m.into()))
                .collect(),
        }
    }
}

impl From<HashMap<FieldPath, String>> for ErrorMap {
    fn from(messages: HashMap<FieldPath, String>) -> Self {
        Self { messages }
    }
}

impl IntoIterator for ErrorMap {
    type Item = (FieldPath, String);
    type IntoIter = std::collections::hash_map::IntoIter<FieldPath, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_is_not_an_error() {
        let errors = ErrorMap::new().with("a", "").with("b", "Required");

        assert!(errors.contains(&FieldPath::new("a")));
        assert_eq!(errors.get(&FieldPath::new("a")), None);
        assert_eq!(errors.entry(&FieldPath::new("a")), Some(""));
        assert_eq!(errors.get(&FieldPath::new("b")), Some("Required"));
        assert_eq!(errors.errors().count(), 1);
        assert!(errors.has_errors());
    }

    #[test]
    fn only_empty_entries_do_not_block() {
        let errors: ErrorMap = [("a", ""), ("b", "")].into_iter().collect();
        assert_eq!(errors.len(), 2);
        assert!(!errors.has_errors());
    }
}
