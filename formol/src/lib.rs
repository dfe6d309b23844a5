//! # formol
//!
//! Form state engine for nested, irregular data.
//!
//! A [`Form`] binds an arbitrary item (maps, lists and scalars, nested to
//! any depth) to a list of declared fields. It keeps the original item and a
//! transient copy, tracks which declared paths changed, validates in layers
//! (native constraints, custom validators, a whole-form validator, server
//! errors) and drives the submit/cancel lifecycle. Drawing the widgets is
//! left to the host: the engine hands out [`FormView`] descriptions and
//! takes events back.
//!
//! ## Usage
//!
//! ```rust
//! use formol::{ErrorMap, FieldDeclaration, Form, FormDefinition, ItemValue, TestHost};
//!
//! let definition = FormDefinition::new(vec![
//!     FieldDeclaration::new("Number 1").kind("number"),
//!     FieldDeclaration::new("Number 2").kind("number"),
//! ]);
//!
//! let mut form = Form::new(definition)
//!     .with_item(ItemValue::from_pairs([("number1", 42), ("number2", 49)]))
//!     .with_validator(|item| {
//!         let n1 = item.as_map().and_then(|m| m.get("number1")).and_then(ItemValue::as_int);
//!         let n2 = item.as_map().and_then(|m| m.get("number2")).and_then(ItemValue::as_int);
//!         let message = match (n1, n2) {
//!             (Some(n1), Some(n2)) if n2 <= n1 => "Must be greater than number 1",
//!             _ => "",
//!         };
//!         ErrorMap::new().with("number2", message)
//!     })
//!     .on_submit(|_item, _original, _changed| Ok(ItemValue::Null));
//!
//! form.on_change("number2", 21);
//! assert!(!form.controls().submit_enabled);
//!
//! form.on_change("number2", 43);
//! assert!(form.controls().submit_enabled);
//! assert!(form.submit(&mut TestHost::new()).unwrap().is_saved());
//! assert!(!form.is_dirty());
//! ```
//!
//! ## Field types
//!
//! Renderers are looked up by type key in a [`FieldRegistry`]. The built-in
//! keys are `text`, `area`, `email`, `number`, `range`, `money`, `tel`, `url`,
//! `search`, `password`, `checkbox`, `switch`, `radio`, `checkbox-set`,
//! `radio-set`, `select`, `select-menu`, `color`, `calendar`, `date`, `time`,
//! `datetime-local`, `week`, `month`, `html` and `file`. Overrides are merged
//! over them with [`Form::with_registry`].
//!
//! ## Diagnostics
//!
//! The engine logs through `tracing` and never installs a subscriber.
//! Malformed submit replies and failing handlers are reported at `error`.

// Re-export all types from formol-types
pub use formol_types::*;

pub mod constraints;

mod context;
pub use context::FormContext;

pub mod dirty;
pub use dirty::DirtyTracker;

mod form;
pub use form::{Controls, Form, FormValidator, FormView, RenderedField};

pub mod i18n;
pub use i18n::Labels;

mod keyboard;
pub use keyboard::{FocusTarget, Key, KeyEvent, KeyOutcome, Modifiers};

mod options;
pub use options::FormOptions;

mod registry;
pub use registry::{DEFAULT_KIND, FieldRegistry};

pub mod renderers;

mod submission;
pub use submission::{
    PendingSubmission, Reply, SubmissionState, SubmitHandler, SubmitOutcome, SubmitStart,
    interpret_reply,
};

mod validation;
pub use validation::{FieldFailure, FieldStatus, Validation, check_field};

// Test host for driving forms without a user interface
mod test_host;
pub use test_host::TestHost;
