use crate::{FieldPath, FieldProps, FieldView, ItemValue, Violation, Widget};

/// Trait for field renderers, the per-type half of a field.
///
/// A renderer is looked up by type key in the field registry every time a
/// field is rendered or validated, so swapping the registry retypes mounted
/// fields on the next event.
pub trait FieldRenderer: Send + Sync {
    /// Input kind handed to the host (`"text"`, `"number"`, `"textarea"`, ...).
    fn input(&self) -> &str;

    /// Whether plain Enter belongs to the control (line breaks).
    fn multiline(&self) -> bool {
        false
    }

    /// Per-type default props, merged under the declared ones.
    fn defaults(&self) -> FieldProps {
        FieldProps::default()
    }

    /// Convert a raw widget value into the value stored in the item.
    ///
    /// Called on every change. Values that cannot be converted are kept as
    /// they are so that [`validity`](Self::validity) can report them.
    fn normalize(&self, value: ItemValue) -> ItemValue {
        value
    }

    /// Check the native constraints of `value` against `props`.
    ///
    /// # Returns
    /// * `Ok(())` if every constraint is satisfied
    /// * `Err(violation)` for the first unsatisfied one
    fn validity(&self, value: Option<&ItemValue>, props: &FieldProps) -> Result<(), Violation>;

    /// Text shown in the control for `value`.
    fn text(&self, value: Option<&ItemValue>) -> String {
        value.map(ItemValue::display_text).unwrap_or_default()
    }

    /// Describe the widget for `view`.
    fn render(&self, view: &FieldView<'_>) -> Widget {
        Widget {
            path: view.path.clone(),
            label: view.label.to_string(),
            input: self.input().to_string(),
            multiline: self.multiline(),
            value: view.value.cloned(),
            text: self.text(view.value),
            props: view.props.clone(),
            error: view.error.map(str::to_string),
        }
    }
}

/// Trait for the environment a form is mounted in.
///
/// The engine asks its host for the few side effects it cannot perform
/// itself. Every method has a no-op default; `()` is a host that does
/// nothing.
pub trait FormHost {
    /// Whether the host can show inline validity bubbles itself.
    fn supports_report_validity(&self) -> bool {
        false
    }

    /// Show the native validity messages of the given fields.
    fn report_validity(&mut self, _invalid: &[FieldPath]) {}

    /// Trigger the submit control, so that a host without
    /// [`report_validity`](Self::report_validity) shows its native messages.
    ///
    /// The engine calls this at most once per blocked attempt. Hosts must
    /// not feed the resulting event back as a new submit intent.
    fn click_submit(&mut self) {}

    /// Move focus to (and scroll to) the given field.
    fn focus_field(&mut self, _path: &FieldPath) {}
}

impl FormHost for () {}
