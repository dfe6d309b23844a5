use formol::{ErrorMap, FieldDeclaration, FormDefinition, ItemValue, resolve};

/// Two numbers, `number1` and `number2`.
pub fn numbers() -> FormDefinition {
    FormDefinition::new(vec![
        FieldDeclaration::new("Number 1").kind("number"),
        FieldDeclaration::new("Number 2").kind("number"),
    ])
}

/// The item `{"number1": 42, "number2": 49}`.
pub fn numbers_item() -> ItemValue {
    ItemValue::from_pairs([("number1", 42), ("number2", 49)])
}

/// Whole-form validator: `number2` must be greater than `number1`.
pub fn number2_greater(item: &ItemValue) -> ErrorMap {
    let number = |path: &str| resolve::get(item, &path.into()).and_then(ItemValue::as_float);
    let message = match (number("number1"), number("number2")) {
        (Some(n1), Some(n2)) if n2 <= n1 => "Must be greater than number 1",
        _ => "",
    };
    ErrorMap::new().with("number2", message)
}
