use crate::{FieldPath, ItemValue};

/// Error type for form operations.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The path does not belong to any declared field.
    #[error("No field is declared at `{0}`")]
    UnknownField(FieldPath),

    /// The form options could not be loaded.
    #[error("Invalid form options: {0}")]
    Options(#[from] serde_json::Error),
}

impl FormError {
    /// Create an unknown-field error.
    pub fn unknown_field(path: impl Into<FieldPath>) -> Self {
        Self::UnknownField(path.into())
    }

    /// Check if this error is about an undeclared path.
    pub fn is_unknown_field(&self) -> bool {
        matches!(self, Self::UnknownField(_))
    }
}

/// Error type for a submission attempt.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The submit handler failed. The attempt is over; the form stays dirty.
    #[error("Submit handler failed: {0}")]
    Rejected(#[from] anyhow::Error),

    /// A reply arrived for a submission the form no longer waits for.
    #[error("Submission #{0} is not in flight")]
    NotInFlight(u64),
}

impl SubmitError {
    /// Check if the handler itself failed.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Error type for item conversion.
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    /// The text is not valid JSON.
    #[error("Invalid item JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A submit reply is neither falsy nor a mapping of server errors.
    #[error(
        "onSubmit return value must be a mapping of server errors (ie: {{ fieldName: 'error' }}) got: {0}"
    )]
    MalformedReply(ItemValue),
}

impl ItemError {
    /// Check if this error comes from JSON parsing.
    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// Check if this error is a malformed submit reply.
    pub fn is_malformed_reply(&self) -> bool {
        matches!(self, Self::MalformedReply(_))
    }
}
