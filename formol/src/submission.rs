//! Submission state machine.
//!
//! A submission runs in two phases. [`Form::begin_submit`](crate::Form::begin_submit)
//! validates the whole form and, if nothing blocks, hands out a
//! [`PendingSubmission`] snapshot. The form stays editable while the
//! snapshot is out. [`Form::complete_submit`](crate::Form::complete_submit)
//! takes the handler's reply and rebases, resets or records server errors.

use std::collections::HashMap;

use formol_types::{ErrorMap, FieldPath, ItemError, ItemValue};

/// Observable state of a form's submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// No declared path differs from the original item.
    Clean,
    /// Some declared path was changed.
    Dirty,
    /// The pre-submit validation pass is running.
    Validating,
    /// A submission is in flight.
    Submitting,
    /// The last submission came back with server errors that still stand.
    ServerRejected,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Phase {
    #[default]
    Idle,
    Validating,
    Submitting(u64),
}

/// Phase and id bookkeeping of a form.
#[derive(Debug, Default)]
pub(crate) struct Submission {
    phase: Phase,
    next_id: u64,
}

impl Submission {
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub(crate) fn validating(&mut self) {
        self.phase = Phase::Validating;
    }

    pub(crate) fn idle(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Enter `Submitting` and return the id of the new attempt.
    pub(crate) fn start(&mut self) -> u64 {
        self.next_id += 1;
        self.phase = Phase::Submitting(self.next_id);
        self.next_id
    }

    /// Leave `Submitting` if `id` is the attempt in flight.
    pub(crate) fn finish(&mut self, id: u64) -> bool {
        if self.phase == Phase::Submitting(id) {
            self.phase = Phase::Idle;
            true
        } else {
            false
        }
    }
}

/// Snapshot handed to the submit handler.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub(crate) id: u64,
    pub(crate) item: ItemValue,
    pub(crate) original: ItemValue,
    pub(crate) changed: Vec<FieldPath>,
    /// Item generation the snapshot was taken from.
    pub(crate) generation: u64,
    /// Edit versions at snapshot time.
    pub(crate) versions: HashMap<FieldPath, u64>,
}

impl PendingSubmission {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The transient item being submitted.
    pub fn item(&self) -> &ItemValue {
        &self.item
    }

    /// The original item the form was built from.
    pub fn original(&self) -> &ItemValue {
        &self.original
    }

    /// Declared paths that differ from the original, in declaration order.
    pub fn changed_paths(&self) -> &[FieldPath] {
        &self.changed
    }

    pub(crate) fn version(&self, path: &FieldPath) -> u64 {
        self.versions.get(path).copied().unwrap_or_default()
    }
}

/// Result of a submit intent's first phase.
#[derive(Debug)]
#[must_use]
pub enum SubmitStart {
    /// Validation passed; the submission is in flight.
    Started(PendingSubmission),
    /// Nothing to do: clean, read-only, disabled or already submitting.
    Ignored,
    /// Validation failed; the handler must not be called.
    Blocked,
}

/// How a submit intent ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing to do: clean, read-only, disabled, already submitting, or no
    /// handler.
    Ignored,
    /// Validation failed; the handler was not called.
    Blocked,
    /// The handler accepted the item.
    Saved,
    /// The handler returned server errors; the applied ones are listed.
    ServerRejected(ErrorMap),
    /// The item was replaced while the submission was in flight; the reply
    /// was dropped.
    Superseded,
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Interpreted reply of a submit handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Falsy or an empty mapping.
    Accepted,
    /// Non-empty mapping of field errors.
    Rejected(ErrorMap),
}

/// Interpret a submit handler's return value.
///
/// `Null`, `false`, `0`, `""` and an empty map accept the submission. A map
/// of strings rejects it with those messages (empty strings and nulls are no
/// error). Anything else is malformed.
pub fn interpret_reply(reply: &ItemValue) -> Result<Reply, ItemError> {
    if !reply.is_truthy() {
        return Ok(Reply::Accepted);
    }
    let ItemValue::Map(entries) = reply else {
        return Err(ItemError::MalformedReply(reply.clone()));
    };
    let mut errors = ErrorMap::new();
    for (path, message) in entries.iter() {
        match message {
            ItemValue::String(message) if !message.is_empty() => {
                errors.insert(path.as_str(), message.as_str())
            }
            ItemValue::String(_) | ItemValue::Null => {}
            _ => return Err(ItemError::MalformedReply(reply.clone())),
        }
    }
    if errors.is_empty() {
        Ok(Reply::Accepted)
    } else {
        Ok(Reply::Rejected(errors))
    }
}

/// Synchronous submit handler: `(item, original, changed paths) -> reply`.
pub type SubmitHandler =
    Box<dyn FnMut(&ItemValue, &ItemValue, &[FieldPath]) -> anyhow::Result<ItemValue> + Send>;
