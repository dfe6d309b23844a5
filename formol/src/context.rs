use formol_types::{ErrorMap, FieldPath, ItemValue};

use crate::form::{Controls, Form};
use crate::i18n::Labels;
use crate::submission::SubmissionState;
use crate::validation::FieldStatus;

/// Read-only view of a form, handed to code rendered around the fields.
///
/// Event handlers (`on_change`, `on_focus`, `on_blur`, ...) live on
/// [`Form`] itself since they need exclusive access.
#[derive(Debug, Clone, Copy)]
pub struct FormContext<'a> {
    form: &'a Form,
}

impl<'a> FormContext<'a> {
    pub(crate) fn new(form: &'a Form) -> Self {
        Self { form }
    }

    /// The transient item.
    pub fn item(&self) -> &'a ItemValue {
        self.form.item()
    }

    pub fn original(&self) -> &'a ItemValue {
        self.form.original()
    }

    pub fn value(&self, path: &FieldPath) -> Option<&'a ItemValue> {
        self.form.value(path)
    }

    pub fn error(&self, path: &FieldPath) -> Option<&'a str> {
        self.form.error(path)
    }

    pub fn errors(&self) -> ErrorMap {
        self.form.errors()
    }

    pub fn status(&self, path: &FieldPath) -> FieldStatus {
        self.form.status(path)
    }

    pub fn read_only(&self) -> bool {
        self.form.read_only()
    }

    pub fn disabled(&self) -> bool {
        self.form.disabled()
    }

    pub fn labels(&self) -> &'static Labels {
        self.form.labels()
    }

    pub fn is_dirty(&self) -> bool {
        self.form.is_dirty()
    }

    pub fn changed_paths(&self) -> &'a [FieldPath] {
        self.form.changed_paths()
    }

    pub fn state(&self) -> SubmissionState {
        self.form.state()
    }

    pub fn controls(&self) -> Controls {
        self.form.controls()
    }
}
