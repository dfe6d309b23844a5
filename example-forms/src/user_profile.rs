use formol::{Choice, FieldDeclaration, FormDefinition, ItemValue};

/// A profile stored as a nested item.
///
/// Fields live at nested map paths (`properties.name`), list indices
/// (`addresses.0.city`) and a deep mixed path that does not exist in the
/// sample item.
pub fn user_profile() -> FormDefinition {
    FormDefinition::new(vec![
        FieldDeclaration::new("Name")
            .named("properties.name")
            .required()
            .min_length(2),
        FieldDeclaration::new("Email")
            .named("properties.email")
            .kind("email"),
        FieldDeclaration::new("Age")
            .named("properties.age")
            .kind("number")
            .min(0.0)
            .max(150.0),
        FieldDeclaration::new("City")
            .named("addresses.0.city")
            .required(),
        FieldDeclaration::new("Color")
            .named("properties.color")
            .kind("select")
            .choices([
                Choice::new("Red", "#ff0000"),
                Choice::new("Green", "#00ff00"),
                Choice::new("Blue", "#0000ff"),
            ]),
        FieldDeclaration::new("Here we are")
            .named("properties.extra.1.more.again.0.hereweare")
            .kind("number"),
        FieldDeclaration::new("Newsletter").kind("switch"),
    ])
}

/// A sample profile.
pub fn user_profile_item() -> ItemValue {
    ItemValue::from(serde_json::json!({
        "properties": {
            "name": "Jane Doe",
            "email": "jane@example.org",
            "age": 34,
            "color": "#00ff00"
        },
        "addresses": [
            {"city": "Lyon", "zip": "69001"},
            {"city": "Paris", "zip": "75001"}
        ],
        "newsletter": false
    }))
}
