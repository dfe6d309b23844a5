use serde::{Deserialize, Serialize};

use crate::FormError;

/// Runtime flags of a form.
///
/// Every flag can also be toggled on a live form (see `Form::set_read_only`
/// and friends). Hosts that keep settings in files can deserialize this
/// directly; missing keys take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormOptions {
    /// Render every field read-only and disable submit/cancel.
    pub read_only: bool,

    /// Disable every field and the controls.
    pub disabled: bool,

    /// Enter in a single-line field moves focus to the next field.
    pub focus_next_on_enter: bool,

    /// Language tag of the chrome strings.
    pub locale: String,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            read_only: false,
            disabled: false,
            focus_next_on_enter: false,
            locale: "en".to_string(),
        }
    }
}

impl FormOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_focus_next_on_enter(mut self, focus_next_on_enter: bool) -> Self {
        self.focus_next_on_enter = focus_next_on_enter;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Load options from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(text)?)
    }
}
