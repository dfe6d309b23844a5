//! Core types for the formol crate.
//!
//! This crate provides the presentation-agnostic building blocks of a form:
//! - `FieldPath` and `ItemValue` - Addressing and holding nested item data
//! - `resolve` - Copy-on-write reads and writes by path
//! - `FormDefinition` and `FieldDeclaration` - The declared fields
//! - `ErrorMap` - Path-keyed validation messages
//! - `FieldRenderer` and `FormHost` traits - For renderers and host environments

mod field_path;
pub use field_path::{FieldPath, Segment};

mod item_value;
pub use item_value::{ItemMap, ItemValue};

pub mod resolve;

mod error_map;
pub use error_map::ErrorMap;

mod field;
pub use field::{Choice, FieldDeclaration, FieldProps, FieldValidator};

mod form_definition;
pub use form_definition::FormDefinition;

mod validity;
pub use validity::Violation;

mod widget;
pub use widget::{FieldView, Widget};

mod error;
pub use error::{FormError, ItemError, SubmitError};

mod traits;
pub use traits::{FieldRenderer, FormHost};
