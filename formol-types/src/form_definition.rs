use crate::{FieldDeclaration, FieldPath};

/// The ordered list of fields a form is built from.
///
/// A definition is presentation-agnostic: it only says which paths are
/// edited, with which renderer key and which constraints. Declaration order
/// is the order of focus navigation and of the changed-paths list handed to
/// the submit handler.
#[derive(Debug, Clone)]
pub struct FormDefinition {
    /// All declared fields, in declaration order.
    pub fields: Vec<FieldDeclaration>,
}

impl FormDefinition {
    /// Create a new form definition with the given fields.
    pub fn new(fields: Vec<FieldDeclaration>) -> Self {
        Self { fields }
    }

    /// Create an empty form definition.
    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field.
    pub fn with_field(mut self, field: FieldDeclaration) -> Self {
        self.fields.push(field);
        self
    }

    /// Get the fields.
    pub fn fields(&self) -> &[FieldDeclaration] {
        &self.fields
    }

    /// Find the first field declared at `path`.
    pub fn field(&self, path: &FieldPath) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|f| &f.path() == path)
    }

    /// Position of the first field declared at `path`.
    pub fn position(&self, path: &FieldPath) -> Option<usize> {
        self.fields.iter().position(|f| &f.path() == path)
    }

    /// Declared paths in declaration order, without duplicates.
    pub fn paths(&self) -> Vec<FieldPath> {
        let mut paths: Vec<FieldPath> = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let path = field.path();
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }

    /// Check if the form has any fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

impl Default for FormDefinition {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromIterator<FieldDeclaration> for FormDefinition {
    fn from_iter<I: IntoIterator<Item = FieldDeclaration>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
