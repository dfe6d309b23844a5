//! Built-in chrome strings.
//!
//! Only the strings the engine itself produces live here: the submit and
//! cancel captions and the messages of native constraint violations.

use formol_types::Violation;

/// Chrome strings of one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Language tag of the table (`"en"`, `"fr"`).
    pub language: &'static str,
    pub submit: &'static str,
    pub cancel: &'static str,
    /// Fallback for a failure without a dedicated message.
    pub constraints_not_satisfied: &'static str,
    pub value_missing: &'static str,
    pub type_mismatch: &'static str,
    pub bad_input: &'static str,
    /// `{min}` is replaced by the bound.
    pub range_underflow: &'static str,
    /// `{max}` is replaced by the bound.
    pub range_overflow: &'static str,
    /// `{step}` is replaced by the step.
    pub step_mismatch: &'static str,
    /// `{min_length}` is replaced by the length.
    pub too_short: &'static str,
    /// `{max_length}` is replaced by the length.
    pub too_long: &'static str,
    pub not_a_choice: &'static str,
}

pub static EN: Labels = Labels {
    language: "en",
    submit: "Submit",
    cancel: "Cancel",
    constraints_not_satisfied: "Constraints not satisfied",
    value_missing: "Please fill out this field.",
    type_mismatch: "Please enter a valid value.",
    bad_input: "Please enter a valid value.",
    range_underflow: "Value must be greater than or equal to {min}.",
    range_overflow: "Value must be less than or equal to {max}.",
    step_mismatch: "Please enter a valid value (step {step}).",
    too_short: "Please use at least {min_length} characters.",
    too_long: "Please use no more than {max_length} characters.",
    not_a_choice: "Please select one of the available options.",
};

pub static FR: Labels = Labels {
    language: "fr",
    submit: "Envoyer",
    cancel: "Annuler",
    constraints_not_satisfied: "Contraintes non satisfaites",
    value_missing: "Veuillez renseigner ce champ.",
    type_mismatch: "Veuillez saisir une valeur valide.",
    bad_input: "Veuillez saisir une valeur valide.",
    range_underflow: "La valeur doit être supérieure ou égale à {min}.",
    range_overflow: "La valeur doit être inférieure ou égale à {max}.",
    step_mismatch: "Veuillez saisir une valeur valide (pas de {step}).",
    too_short: "Veuillez utiliser au moins {min_length} caractères.",
    too_long: "Veuillez utiliser au plus {max_length} caractères.",
    not_a_choice: "Veuillez choisir une des options proposées.",
};

impl Labels {
    /// Look up the table for a language tag.
    ///
    /// Matching is on the primary subtag only (`fr-CA` uses `fr`) and is
    /// case-insensitive. Unknown languages fall back to English.
    pub fn for_locale(tag: &str) -> &'static Labels {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match language.as_str() {
            "fr" => &FR,
            _ => &EN,
        }
    }

    /// Message for a native constraint violation.
    pub fn violation(&self, violation: &Violation) -> String {
        match violation {
            Violation::ValueMissing => self.value_missing.to_string(),
            Violation::TypeMismatch => self.type_mismatch.to_string(),
            Violation::BadInput => self.bad_input.to_string(),
            Violation::RangeUnderflow { min } => {
                self.range_underflow.replace("{min}", &min.to_string())
            }
            Violation::RangeOverflow { max } => {
                self.range_overflow.replace("{max}", &max.to_string())
            }
            Violation::StepMismatch { step } => {
                self.step_mismatch.replace("{step}", &step.to_string())
            }
            Violation::TooShort { min_length } => self
                .too_short
                .replace("{min_length}", &min_length.to_string()),
            Violation::TooLong { max_length } => self
                .too_long
                .replace("{max_length}", &max_length.to_string()),
            Violation::NotAChoice => self.not_a_choice.to_string(),
            Violation::Custom(message) if message.is_empty() => {
                self.constraints_not_satisfied.to_string()
            }
            Violation::Custom(message) => message.clone(),
        }
    }
}
