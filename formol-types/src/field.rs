use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::{FieldPath, ItemValue};

/// Field-level validator.
///
/// Receives the field's current value (if any) and the whole transient item
/// (for inter-field conditions). Returns `Err(message)` when the value is
/// rejected.
pub type FieldValidator =
    Arc<dyn Fn(Option<&ItemValue>, &ItemValue) -> Result<(), String> + Send + Sync>;

/// A single declared field of a form.
#[derive(Clone)]
pub struct FieldDeclaration {
    /// Explicit path, if one was given.
    name: Option<FieldPath>,

    /// The label shown next to the widget.
    label: String,

    /// Registry key of the renderer. Empty means the default text renderer.
    kind: String,

    /// Optional custom validator.
    validator: Option<FieldValidator>,

    /// Constraints and rendering props handed to the renderer.
    props: FieldProps,
}

impl FieldDeclaration {
    /// Declare a field with the given label.
    ///
    /// Without an explicit [`name`](Self::named), the path is derived from
    /// the label (`"Number 1"` lives at `number1`).
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            name: None,
            label: label.into(),
            kind: String::new(),
            validator: None,
            props: FieldProps::default(),
        }
    }

    /// Set the path of the field explicitly.
    pub fn named(mut self, path: impl Into<FieldPath>) -> Self {
        self.name = Some(path.into());
        self
    }

    /// Set the registry key of the renderer.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.props.required = true;
        self
    }

    /// Attach a custom validator.
    pub fn validate<F>(mut self, validator: F) -> Self
    where
        F: Fn(Option<&ItemValue>, &ItemValue) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Lower numeric bound.
    pub fn min(mut self, min: f64) -> Self {
        self.props.min = Some(min);
        self
    }

    /// Upper numeric bound.
    pub fn max(mut self, max: f64) -> Self {
        self.props.max = Some(max);
        self
    }

    /// Numeric step.
    pub fn step(mut self, step: f64) -> Self {
        self.props.step = Some(step);
        self
    }

    /// Minimum text length, in characters.
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.props.min_length = Some(min_length);
        self
    }

    /// Maximum text length, in characters.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.props.max_length = Some(max_length);
        self
    }

    /// Allowed choices for select-like fields.
    pub fn choices(mut self, choices: impl IntoIterator<Item = Choice>) -> Self {
        self.props.choices = choices.into_iter().collect();
        self
    }

    /// Allow several values (select, file).
    pub fn multiple(mut self) -> Self {
        self.props.multiple = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.props.placeholder = Some(placeholder.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.props.unit = Some(unit.into());
        self
    }

    /// Render this field read-only regardless of the form flag.
    pub fn read_only(mut self) -> Self {
        self.props.read_only = true;
        self
    }

    /// Disable this field regardless of the form flag.
    pub fn disabled(mut self) -> Self {
        self.props.disabled = true;
        self
    }

    /// Buffer edits and commit them to the item on blur.
    pub fn fast(mut self) -> Self {
        self.props.fast = true;
        self
    }

    /// Skip the renderer's native constraint check for this field.
    pub fn no_native_validation(mut self) -> Self {
        self.props.no_native_validation = true;
        self
    }

    /// Pass an opaque prop through to the renderer.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<ItemValue>) -> Self {
        self.props.extra.insert(key.into(), value.into());
        self
    }

    /// Get the path of this field.
    pub fn path(&self) -> FieldPath {
        match &self.name {
            Some(name) => name.clone(),
            None => FieldPath::from_label(&self.label),
        }
    }

    /// Get the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the registry key (empty for the default renderer).
    pub fn kind_key(&self) -> &str {
        &self.kind
    }

    /// Get the custom validator.
    pub fn validator(&self) -> Option<&FieldValidator> {
        self.validator.as_ref()
    }

    /// Get the declared props.
    pub fn props(&self) -> &FieldProps {
        &self.props
    }
}

impl fmt::Debug for FieldDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDeclaration")
            .field("path", &self.path())
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("validator", &self.validator.is_some())
            .field("props", &self.props)
            .finish()
    }
}

/// Constraints and rendering props of a field.
///
/// Renderers contribute per-type defaults which the declared props are
/// merged over (see [`FieldProps::merged_over`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldProps {
    pub required: bool,
    pub read_only: bool,
    pub disabled: bool,
    pub multiple: bool,
    pub fast: bool,
    pub no_native_validation: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub choices: Vec<Choice>,
    pub placeholder: Option<String>,
    pub unit: Option<String>,
    /// Opaque props, passed through untouched.
    pub extra: BTreeMap<String, ItemValue>,
}

impl FieldProps {
    /// Merge these props over `defaults`: flags are or-ed, declared values win.
    pub fn merged_over(&self, defaults: &FieldProps) -> FieldProps {
        let mut extra = defaults.extra.clone();
        extra.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        FieldProps {
            required: self.required || defaults.required,
            read_only: self.read_only || defaults.read_only,
            disabled: self.disabled || defaults.disabled,
            multiple: self.multiple || defaults.multiple,
            fast: self.fast || defaults.fast,
            no_native_validation: self.no_native_validation || defaults.no_native_validation,
            min: self.min.or(defaults.min),
            max: self.max.or(defaults.max),
            step: self.step.or(defaults.step),
            min_length: self.min_length.or(defaults.min_length),
            max_length: self.max_length.or(defaults.max_length),
            choices: if self.choices.is_empty() {
                defaults.choices.clone()
            } else {
                self.choices.clone()
            },
            placeholder: self.placeholder.clone().or_else(|| defaults.placeholder.clone()),
            unit: self.unit.clone().or_else(|| defaults.unit.clone()),
            extra,
        }
    }

    /// Whether `value` is one of the declared choices.
    pub fn has_choice(&self, value: &ItemValue) -> bool {
        self.choices.iter().any(|c| &c.value == value)
    }
}

/// One option of a select-like field.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    /// Text shown to the user.
    pub label: String,

    /// Value stored in the item when chosen.
    pub value: ItemValue,
}

impl Choice {
    /// Create a choice with a label and a value.
    pub fn new(label: impl Into<String>, value: impl Into<ItemValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Create a choice whose value is its own label.
    pub fn plain(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: ItemValue::String(label.clone()),
            label,
        }
    }
}

impl From<&str> for Choice {
    fn from(label: &str) -> Self {
        Self::plain(label)
    }
}
