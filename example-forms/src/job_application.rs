use formol::{Choice, FieldDeclaration, FormDefinition, ItemValue, resolve};

/// Highest salary accepted by the form.
pub const MAX_SALARY: f64 = 250_000.0;

/// A job application: choices, a rich-text letter and inter-field checks.
pub fn job_application() -> FormDefinition {
    FormDefinition::new(vec![
        FieldDeclaration::new("Full name").required(),
        FieldDeclaration::new("Position")
            .kind("radio-set")
            .required()
            .choices(["Engineer", "Designer", "Manager"].map(Choice::from)),
        FieldDeclaration::new("Skills")
            .kind("checkbox-set")
            .choices(["Rust", "SQL", "Design", "Management"].map(Choice::from)),
        FieldDeclaration::new("Salary")
            .kind("money")
            .min(0.0)
            .max(MAX_SALARY),
        FieldDeclaration::new("Graduation").kind("date"),
        FieldDeclaration::new("Start date")
            .kind("date")
            .validate(start_after_graduation),
        FieldDeclaration::new("Cover letter").kind("html").fast(),
        FieldDeclaration::new("Portfolio").kind("url"),
        FieldDeclaration::new("Terms").kind("checkbox").required(),
    ])
}

/// Field validator of `startDate`: it cannot precede `graduation`.
///
/// ISO dates compare correctly as strings.
pub fn start_after_graduation(value: Option<&ItemValue>, item: &ItemValue) -> Result<(), String> {
    let start = value.and_then(ItemValue::as_str);
    let graduation = resolve::get(item, &"graduation".into()).and_then(ItemValue::as_str);
    match (start, graduation) {
        (Some(start), Some(graduation)) if !start.is_empty() && start < graduation => {
            Err("Start date must be after graduation".to_string())
        }
        _ => Ok(()),
    }
}
