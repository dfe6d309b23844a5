use crate::{FieldPath, FieldProps, ItemValue};

/// What a renderer gets to draw one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub path: &'a FieldPath,
    pub label: &'a str,

    /// Current value (the draft for a fast field being edited).
    pub value: Option<&'a ItemValue>,

    /// Declared props merged over the renderer defaults, with the form's
    /// read-only and disabled flags folded in.
    pub props: &'a FieldProps,

    /// Error shown inline, if any.
    pub error: Option<&'a str>,
}

/// Presentation-agnostic description of a rendered field.
///
/// Hosts turn this into real controls (DOM nodes, terminal widgets, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub path: FieldPath,
    pub label: String,

    /// Input kind, e.g. `"text"`, `"number"`, `"textarea"`, `"select"`.
    pub input: String,

    /// Whether plain Enter inserts a line break in this control.
    pub multiline: bool,

    pub value: Option<ItemValue>,

    /// The value as shown in a text control.
    pub text: String,

    pub props: FieldProps,
    pub error: Option<String>,
}

impl Widget {
    pub fn read_only(&self) -> bool {
        self.props.read_only
    }

    pub fn disabled(&self) -> bool {
        self.props.disabled
    }

    pub fn required(&self) -> bool {
        self.props.required
    }
}
