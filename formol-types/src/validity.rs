use std::fmt;

/// A failed native constraint, as reported by a renderer's validity check.
///
/// These mirror the browser constraint-validation states. The engine turns
/// them into localized messages; they are never shown raw.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// A required field has no value.
    ValueMissing,

    /// The value has the wrong shape for the field type (e.g. a bad e-mail).
    TypeMismatch,

    /// The raw input could not be converted (e.g. `"12a"` in a number field).
    BadInput,

    /// The value is below `min`.
    RangeUnderflow { min: f64 },

    /// The value is above `max`.
    RangeOverflow { max: f64 },

    /// The value is not a multiple of `step` (offset from `min`).
    StepMismatch { step: f64 },

    /// The text is shorter than `min_length` characters.
    TooShort { min_length: usize },

    /// The text is longer than `max_length` characters.
    TooLong { max_length: usize },

    /// The value is not one of the declared choices.
    NotAChoice,

    /// Renderer-specific failure with its own message.
    Custom(String),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValueMissing => write!(f, "value missing"),
            Self::TypeMismatch => write!(f, "type mismatch"),
            Self::BadInput => write!(f, "bad input"),
            Self::RangeUnderflow { min } => write!(f, "range underflow (min {min})"),
            Self::RangeOverflow { max } => write!(f, "range overflow (max {max})"),
            Self::StepMismatch { step } => write!(f, "step mismatch (step {step})"),
            Self::TooShort { min_length } => write!(f, "too short (min {min_length})"),
            Self::TooLong { max_length } => write!(f, "too long (max {max_length})"),
            Self::NotAChoice => write!(f, "not a choice"),
            Self::Custom(message) => write!(f, "{message}"),
        }
    }
}
