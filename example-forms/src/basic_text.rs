use formol::{FieldDeclaration, FormDefinition, ItemValue};

/// A single text field, path `text` (derived from its label).
pub fn basic_text() -> FormDefinition {
    FormDefinition::new(vec![FieldDeclaration::new("Text")])
}

/// The item `{"text": "foo"}`.
pub fn basic_text_item() -> ItemValue {
    ItemValue::from_pairs([("text", "foo")])
}
