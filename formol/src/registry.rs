use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use formol_types::FieldRenderer;

use crate::renderers::{self, TextRenderer};

/// Key used for fields without a declared type.
pub const DEFAULT_KIND: &str = "text";

/// Maps type keys to field renderers.
///
/// A form holds the built-in registry with the caller's overrides merged
/// over it. Lookup happens on every render and validation, so a swapped
/// registry takes effect on the next event.
#[derive(Clone)]
pub struct FieldRegistry {
    renderers: HashMap<String, Arc<dyn FieldRenderer>>,
}

impl FieldRegistry {
    /// The built-in registry.
    pub fn new() -> Self {
        Self {
            renderers: renderers::builtins()
                .into_iter()
                .map(|(key, renderer)| (key.to_string(), renderer))
                .collect(),
        }
    }

    /// An empty registry, used to describe overrides.
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Register `renderer` under `key`, replacing what was there.
    pub fn with(mut self, key: impl Into<String>, renderer: impl FieldRenderer + 'static) -> Self {
        self.insert(key, Arc::new(renderer));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, renderer: Arc<dyn FieldRenderer>) {
        self.renderers.insert(key.into(), renderer);
    }

    /// Merge `overrides` over this registry, key by key.
    pub fn merged(mut self, overrides: &FieldRegistry) -> Self {
        for (key, renderer) in &overrides.renderers {
            self.renderers.insert(key.clone(), Arc::clone(renderer));
        }
        self
    }

    /// Get the renderer registered under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Arc<dyn FieldRenderer>> {
        self.renderers.get(key)
    }

    /// Resolve the renderer of a field.
    ///
    /// An empty key means [`DEFAULT_KIND`]. An unknown key also falls back to
    /// the text renderer.
    pub fn resolve(&self, key: &str) -> Arc<dyn FieldRenderer> {
        let key = if key.is_empty() { DEFAULT_KIND } else { key };
        if let Some(renderer) = self.renderers.get(key) {
            return Arc::clone(renderer);
        }
        tracing::debug!(kind = key, "unknown field type, using the text renderer");
        match self.renderers.get(DEFAULT_KIND) {
            Some(renderer) => Arc::clone(renderer),
            None => Arc::new(TextRenderer::new(DEFAULT_KIND)),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.renderers.contains_key(key)
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

/// Identity of a renderer instance, used to detect a retyped field.
pub(crate) fn renderer_id(renderer: &Arc<dyn FieldRenderer>) -> usize {
    Arc::as_ptr(renderer) as *const () as usize
}
