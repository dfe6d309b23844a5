//! Built-in field renderers.
//!
//! Each renderer covers a family of type keys and carries the native
//! constraint checks of that family. [`builtins`] lists the registry keys
//! they are installed under.

use std::sync::Arc;

use formol_types::{FieldProps, FieldRenderer, ItemValue, Violation};

use crate::constraints;

/// Shape a text value must have, beyond its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextShape {
    Any,
    Email,
    Url,
    Color,
    Date,
    Time,
    DateTimeLocal,
    Week,
    Month,
    /// Rich text; an empty paragraph counts as empty.
    Html,
}

/// Renderer for text-like inputs.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    input: &'static str,
    multiline: bool,
    shape: TextShape,
}

impl TextRenderer {
    /// A single-line input accepting any text.
    pub fn new(input: &'static str) -> Self {
        Self {
            input,
            multiline: false,
            shape: TextShape::Any,
        }
    }

    /// A multi-line input.
    pub fn multiline(input: &'static str) -> Self {
        Self {
            multiline: true,
            ..Self::new(input)
        }
    }

    pub fn with_shape(mut self, shape: TextShape) -> Self {
        self.shape = shape;
        self
    }

    fn shape_ok(&self, text: &str, props: &FieldProps) -> Result<(), Violation> {
        let ok = match self.shape {
            TextShape::Any | TextShape::Html => return Ok(()),
            TextShape::Email if props.multiple => text
                .split(',')
                .map(str::trim)
                .all(constraints::is_email),
            TextShape::Email => constraints::is_email(text),
            TextShape::Url => constraints::is_url(text),
            TextShape::Color => constraints::is_color(text),
            TextShape::Date => constraints::is_date(text),
            TextShape::Time => constraints::is_time(text),
            TextShape::DateTimeLocal => constraints::is_datetime_local(text),
            TextShape::Week => constraints::is_week(text),
            TextShape::Month => constraints::is_month(text),
        };
        match (ok, self.shape) {
            (true, _) => Ok(()),
            (false, TextShape::Email | TextShape::Url) => Err(Violation::TypeMismatch),
            (false, _) => Err(Violation::BadInput),
        }
    }
}

fn is_empty_html(text: &str) -> bool {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    matches!(compact.as_str(), "" | "<p></p>" | "<p><br></p>" | "<p><br/></p>")
}

impl FieldRenderer for TextRenderer {
    fn input(&self) -> &str {
        self.input
    }

    fn multiline(&self) -> bool {
        self.multiline
    }

    fn normalize(&self, value: ItemValue) -> ItemValue {
        match value {
            ItemValue::String(text) if self.shape == TextShape::Html && is_empty_html(&text) => {
                ItemValue::String(String::new())
            }
            other => other,
        }
    }

    fn validity(&self, value: Option<&ItemValue>, props: &FieldProps) -> Result<(), Violation> {
        if constraints::presence(value, props)? {
            return Ok(());
        }
        let text = match value {
            Some(ItemValue::String(text)) => text.clone(),
            Some(ItemValue::Int(_) | ItemValue::Float(_)) if self.shape == TextShape::Any => {
                value.map(ItemValue::display_text).unwrap_or_default()
            }
            Some(_) => return Err(Violation::TypeMismatch),
            None => return Ok(()),
        };
        constraints::length(&text, props)?;
        self.shape_ok(&text, props)
    }
}

/// Renderer for numeric inputs (`number`, `range`, `money`).
#[derive(Debug, Clone)]
pub struct NumberRenderer {
    input: &'static str,
    defaults: FieldProps,
}

impl NumberRenderer {
    pub fn new(input: &'static str) -> Self {
        Self {
            input,
            defaults: FieldProps::default(),
        }
    }

    /// A slider: 0 to 100 by steps of 1 unless declared otherwise.
    pub fn range() -> Self {
        Self {
            input: "range",
            defaults: FieldProps {
                min: Some(0.0),
                max: Some(100.0),
                step: Some(1.0),
                ..Default::default()
            },
        }
    }

    /// An amount with cents.
    pub fn money() -> Self {
        Self {
            input: "money",
            defaults: FieldProps {
                step: Some(0.01),
                ..Default::default()
            },
        }
    }
}

impl FieldRenderer for NumberRenderer {
    fn input(&self) -> &str {
        self.input
    }

    fn defaults(&self) -> FieldProps {
        self.defaults.clone()
    }

    fn normalize(&self, value: ItemValue) -> ItemValue {
        let ItemValue::String(text) = value else {
            return value;
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return ItemValue::Null;
        }
        if let Ok(int) = trimmed.parse::<i64>() {
            return ItemValue::Int(int);
        }
        match trimmed.parse::<f64>() {
            Ok(float) if float.is_finite() => ItemValue::Float(float),
            _ => ItemValue::String(text),
        }
    }

    fn validity(&self, value: Option<&ItemValue>, props: &FieldProps) -> Result<(), Violation> {
        if constraints::presence(value, props)? {
            return Ok(());
        }
        let Some(number) = value.and_then(constraints::number) else {
            return Err(Violation::BadInput);
        };
        constraints::range(number, props)
    }
}

/// Renderer for fields picking among declared choices.
///
/// `checkbox-set` always holds a list; the other keys hold a single value
/// unless the field is declared `multiple`.
#[derive(Debug, Clone)]
pub struct ChoiceRenderer {
    input: &'static str,
    many: bool,
}

impl ChoiceRenderer {
    /// A single-value picker (`radio`, `select`, ...).
    pub fn single(input: &'static str) -> Self {
        Self { input, many: false }
    }

    /// A multi-value picker (`checkbox-set`).
    pub fn many(input: &'static str) -> Self {
        Self { input, many: true }
    }
}

impl FieldRenderer for ChoiceRenderer {
    fn input(&self) -> &str {
        self.input
    }

    fn defaults(&self) -> FieldProps {
        FieldProps {
            multiple: self.many,
            ..Default::default()
        }
    }

    fn validity(&self, value: Option<&ItemValue>, props: &FieldProps) -> Result<(), Violation> {
        if constraints::presence(value, props)? {
            return Ok(());
        }
        let Some(value) = value else {
            return Ok(());
        };
        if props.choices.is_empty() {
            return Ok(());
        }
        match value {
            ItemValue::List(values) if props.multiple => {
                if values.iter().all(|v| props.has_choice(v)) {
                    Ok(())
                } else {
                    Err(Violation::NotAChoice)
                }
            }
            ItemValue::List(_) | ItemValue::Map(_) => Err(Violation::TypeMismatch),
            single if props.has_choice(single) => Ok(()),
            _ => Err(Violation::NotAChoice),
        }
    }

    fn text(&self, value: Option<&ItemValue>) -> String {
        match value {
            Some(ItemValue::List(values)) => values
                .iter()
                .map(ItemValue::display_text)
                .collect::<Vec<_>>()
                .join(", "),
            other => other.map(ItemValue::display_text).unwrap_or_default(),
        }
    }
}

/// Renderer for on/off inputs (`checkbox`, `switch`).
#[derive(Debug, Clone)]
pub struct BooleanRenderer {
    input: &'static str,
}

impl BooleanRenderer {
    pub fn new(input: &'static str) -> Self {
        Self { input }
    }
}

impl FieldRenderer for BooleanRenderer {
    fn input(&self) -> &str {
        self.input
    }

    fn normalize(&self, value: ItemValue) -> ItemValue {
        match value {
            ItemValue::String(text) => ItemValue::Bool(matches!(text.as_str(), "on" | "true" | "1")),
            other => other,
        }
    }

    fn validity(&self, value: Option<&ItemValue>, props: &FieldProps) -> Result<(), Violation> {
        match value {
            None | Some(ItemValue::Null) | Some(ItemValue::Bool(false)) if props.required => {
                Err(Violation::ValueMissing)
            }
            None | Some(ItemValue::Null) | Some(ItemValue::Bool(_)) => Ok(()),
            Some(_) => Err(Violation::TypeMismatch),
        }
    }
}

/// Renderer for file inputs. Only presence is checked.
#[derive(Debug, Clone, Default)]
pub struct FileRenderer;

impl FieldRenderer for FileRenderer {
    fn input(&self) -> &str {
        "file"
    }

    fn validity(&self, value: Option<&ItemValue>, props: &FieldProps) -> Result<(), Violation> {
        constraints::presence(value, props).map(|_| ())
    }
}

fn entry(
    key: &'static str,
    renderer: impl FieldRenderer + 'static,
) -> (&'static str, Arc<dyn FieldRenderer>) {
    (key, Arc::new(renderer))
}

/// The built-in registry content, as `(type key, renderer)` pairs.
pub fn builtins() -> Vec<(&'static str, Arc<dyn FieldRenderer>)> {
    let shaped = |input, shape| TextRenderer::new(input).with_shape(shape);
    vec![
        entry("text", TextRenderer::new("text")),
        entry("area", TextRenderer::multiline("textarea")),
        entry("email", shaped("email", TextShape::Email)),
        entry("number", NumberRenderer::new("number")),
        entry("range", NumberRenderer::range()),
        entry("money", NumberRenderer::money()),
        entry("tel", TextRenderer::new("tel")),
        entry("url", shaped("url", TextShape::Url)),
        entry("search", TextRenderer::new("search")),
        entry("password", TextRenderer::new("password")),
        entry("checkbox", BooleanRenderer::new("checkbox")),
        entry("switch", BooleanRenderer::new("switch")),
        entry("radio", ChoiceRenderer::single("radio")),
        entry("checkbox-set", ChoiceRenderer::many("checkbox-set")),
        entry("radio-set", ChoiceRenderer::single("radio-set")),
        entry("select", ChoiceRenderer::single("select")),
        entry("select-menu", ChoiceRenderer::single("select-menu")),
        entry("color", shaped("color", TextShape::Color)),
        entry("calendar", shaped("calendar", TextShape::Date)),
        entry("date", shaped("date", TextShape::Date)),
        entry("time", shaped("time", TextShape::Time)),
        entry("datetime-local", shaped("datetime-local", TextShape::DateTimeLocal)),
        entry("week", shaped("week", TextShape::Week)),
        entry("month", shaped("month", TextShape::Month)),
        entry("html", TextRenderer::multiline("html").with_shape(TextShape::Html)),
        entry("file", FileRenderer),
    ]
}

/// Add or remove `choice` in a multi-valued field.
///
/// A missing or non-list value counts as the empty list. Checking a choice
/// that is already present leaves the list as it is.
pub fn toggle_choice(current: Option<&ItemValue>, choice: &ItemValue, checked: bool) -> ItemValue {
    let mut values: Vec<ItemValue> = current
        .and_then(ItemValue::as_list)
        .map(<[ItemValue]>::to_vec)
        .unwrap_or_default();
    if checked {
        if !values.contains(choice) {
            values.push(choice.clone());
        }
    } else {
        values.retain(|v| v != choice);
    }
    ItemValue::from(values)
}
