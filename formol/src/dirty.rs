//! Dirty tracking: which declared paths differ from the original item.

use formol_types::{FieldPath, ItemValue, resolve};

/// Whether the value at `path` differs between the two items.
///
/// A missing value and an explicit null are different.
pub fn is_path_dirty(original: &ItemValue, transient: &ItemValue, path: &FieldPath) -> bool {
    resolve::get(transient, path) != resolve::get(original, path)
}

/// The changed paths among `paths`, in the given order.
pub fn changed_paths(original: &ItemValue, transient: &ItemValue, paths: &[FieldPath]) -> Vec<FieldPath> {
    paths
        .iter()
        .filter(|path| is_path_dirty(original, transient, path))
        .cloned()
        .collect()
}

/// Cached dirty state of a form, recomputed after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyTracker {
    changed: Vec<FieldPath>,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from scratch.
    pub fn recompute(&mut self, original: &ItemValue, transient: &ItemValue, paths: &[FieldPath]) {
        self.changed = changed_paths(original, transient, paths);
        tracing::trace!(changed = self.changed.len(), "dirty state recomputed");
    }

    /// Whether any declared path is dirty.
    pub fn is_dirty(&self) -> bool {
        !self.changed.is_empty()
    }

    pub fn is_path_dirty(&self, path: &FieldPath) -> bool {
        self.changed.contains(path)
    }

    /// Dirty paths in declaration order.
    pub fn changed(&self) -> &[FieldPath] {
        &self.changed
    }
}
