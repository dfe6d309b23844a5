//! Layered validation state.
//!
//! Three layers of messages are kept apart and merged on read:
//! - local: the field-level pass (native constraints, then the custom validator)
//! - form: the whole-form validator
//! - server: errors returned by the submit handler
//!
//! Each layer entry is invalidated by its own event. Local and form entries
//! are recomputed on every change and blur, server entries are dropped when
//! their path is edited again.

use std::collections::HashMap;

use formol_types::{
    ErrorMap, FieldDeclaration, FieldPath, FieldProps, FieldRenderer, ItemValue, Violation,
};

use crate::i18n::Labels;

/// Lifecycle of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldStatus {
    /// Never focused since the form was (re)built.
    #[default]
    Pristine,
    /// Focused, not yet validated.
    Touched,
    /// A validation pass is running.
    Validating,
    Valid,
    Invalid,
}

/// Why a field failed its field-level pass.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFailure {
    /// A native constraint of the renderer.
    Native(Violation),
    /// The custom validator's message.
    Custom(String),
}

impl FieldFailure {
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native(_))
    }

    /// Message shown inline.
    pub fn message(&self, labels: &Labels) -> String {
        match self {
            Self::Native(violation) => labels.violation(violation),
            Self::Custom(message) => message.clone(),
        }
    }
}

/// Run the field-level pass: native constraints first, then the custom
/// validator. The first failure is authoritative.
///
/// `props` are the declared props merged over the renderer defaults.
pub fn check_field(
    renderer: &dyn FieldRenderer,
    field: &FieldDeclaration,
    props: &FieldProps,
    value: Option<&ItemValue>,
    item: &ItemValue,
) -> Result<(), FieldFailure> {
    if !props.no_native_validation {
        renderer
            .validity(value, props)
            .map_err(FieldFailure::Native)?;
    }
    if let Some(validator) = field.validator() {
        match validator(value, item) {
            Err(message) if !message.is_empty() => return Err(FieldFailure::Custom(message)),
            _ => {}
        }
    }
    Ok(())
}

/// Validation state of a form.
#[derive(Debug, Clone, Default)]
pub struct Validation {
    local: ErrorMap,
    form: ErrorMap,
    server: ErrorMap,
    status: HashMap<FieldPath, FieldStatus>,
    edits: HashMap<FieldPath, u64>,
}

impl Validation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, path: &FieldPath) -> FieldStatus {
        self.status.get(path).copied().unwrap_or_default()
    }

    /// Focus: `Pristine → Touched`. Other statuses are kept.
    pub fn touch(&mut self, path: &FieldPath) {
        let status = self.status.entry(path.clone()).or_default();
        if *status == FieldStatus::Pristine {
            *status = FieldStatus::Touched;
        }
    }

    pub fn begin(&mut self, path: &FieldPath) {
        self.status.insert(path.clone(), FieldStatus::Validating);
    }

    /// Store the outcome of the field-level pass of `path`.
    pub fn record_field(&mut self, path: &FieldPath, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => {
                self.local.remove(path);
            }
            Err(message) => self.local.insert(path.clone(), message),
        }
        self.settle(path);
    }

    /// Store the whole-form validator's result.
    ///
    /// Only returned keys are touched: a message replaces the previous one,
    /// an empty message clears it.
    pub fn apply_form(&mut self, returned: ErrorMap) {
        for (path, message) in returned {
            if message.is_empty() {
                self.form.remove(&path);
            } else {
                self.form.insert(path.clone(), message);
            }
            if self.status.contains_key(&path) {
                self.settle(&path);
            }
        }
    }

    fn settle(&mut self, path: &FieldPath) {
        let status = if self.error(path).is_some() {
            FieldStatus::Invalid
        } else {
            FieldStatus::Valid
        };
        self.status.insert(path.clone(), status);
    }

    /// A new value was committed at `path`.
    ///
    /// Bumps the edit version of the path and drops its server error, and
    /// only its own. Returns the new version.
    pub fn edited(&mut self, path: &FieldPath) -> u64 {
        self.server.remove(path);
        let version = self.edits.entry(path.clone()).or_default();
        *version += 1;
        *version
    }

    pub fn edit_version(&self, path: &FieldPath) -> u64 {
        self.edits.get(path).copied().unwrap_or_default()
    }

    pub fn edit_versions(&self) -> HashMap<FieldPath, u64> {
        self.edits.clone()
    }

    /// Add a server error. Empty messages are ignored.
    pub fn insert_server(&mut self, path: FieldPath, message: String) {
        if message.is_empty() {
            return;
        }
        self.server.insert(path.clone(), message);
        if self.status.contains_key(&path) {
            self.settle(&path);
        }
    }

    pub fn clear_server(&mut self) {
        self.server.clear();
    }

    /// The error shown at `path`.
    ///
    /// A field-level error wins over a server error, which wins over a
    /// whole-form validator error.
    pub fn error(&self, path: &FieldPath) -> Option<&str> {
        self.local
            .get(path)
            .or_else(|| self.server.get(path))
            .or_else(|| self.form.get(path))
    }

    /// All errors, merged with the same precedence as [`Validation::error`].
    pub fn errors(&self) -> ErrorMap {
        let mut merged = ErrorMap::new();
        for layer in [&self.form, &self.server, &self.local] {
            for (path, message) in layer.errors() {
                merged.insert(path.clone(), message);
            }
        }
        merged
    }

    /// Whether a field-level or whole-form error exists.
    pub fn has_local_errors(&self) -> bool {
        self.local.has_errors() || self.form.has_errors()
    }

    pub fn has_server_errors(&self) -> bool {
        self.server.has_errors()
    }

    pub fn has_errors(&self) -> bool {
        self.has_local_errors() || self.has_server_errors()
    }

    pub fn reset_status(&mut self, path: &FieldPath) {
        self.status.remove(path);
    }

    /// Drop every message and status. Edit versions keep counting.
    pub fn clear(&mut self) {
        self.local.clear();
        self.form.clear();
        self.server.clear();
        self.status.clear();
    }

    /// Forget everything about paths that are no longer declared.
    pub fn retain_paths(&mut self, paths: &[FieldPath]) {
        for layer in [&mut self.local, &mut self.form, &mut self.server] {
            let gone: Vec<FieldPath> = layer
                .iter()
                .map(|(path, _)| path.clone())
                .filter(|path| !paths.contains(path))
                .collect();
            for path in gone {
                layer.remove(&path);
            }
        }
        self.status.retain(|path, _| paths.contains(path));
    }
}
