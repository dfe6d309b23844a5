//! Test host for driving forms without a user interface.
//!
//! `TestHost` implements [`FormHost`] by recording every request the engine
//! makes, so tests can assert on them.
//!
//! # Example
//!
//! ```rust
//! use formol::{FieldDeclaration, Form, FormDefinition, ItemValue, SubmitOutcome, TestHost};
//!
//! let mut form = Form::new(FormDefinition::new(vec![
//!     FieldDeclaration::new("Number").kind("number").max(2000.0),
//! ]))
//! .with_item(ItemValue::from_pairs([("number", 31)]))
//! .on_submit(|_, _, _| Ok(ItemValue::Null));
//!
//! form.on_change("number", 9999);
//!
//! let mut host = TestHost::new();
//! assert_eq!(form.submit(&mut host).unwrap(), SubmitOutcome::Blocked);
//! assert_eq!(host.reported().len(), 1);
//! assert_eq!(host.last_focused().map(|p| p.as_str()), Some("number"));
//! ```

use formol_types::{FieldPath, FormHost};

/// A host that records what the engine asks of it.
#[derive(Debug, Clone)]
pub struct TestHost {
    report_validity: bool,
    reported: Vec<Vec<FieldPath>>,
    submit_clicks: usize,
    focused: Vec<FieldPath>,
}

impl TestHost {
    /// Create a host that can report validity inline.
    pub fn new() -> Self {
        Self {
            report_validity: true,
            reported: Vec::new(),
            submit_clicks: 0,
            focused: Vec::new(),
        }
    }

    /// Create a host without inline validity reporting, so the engine falls
    /// back to clicking the submit control.
    pub fn without_report_validity() -> Self {
        Self {
            report_validity: false,
            ..Self::new()
        }
    }

    /// Every `report_validity` call, with the invalid paths it named.
    pub fn reported(&self) -> &[Vec<FieldPath>] {
        &self.reported
    }

    /// Number of times the submit control was clicked.
    pub fn submit_clicks(&self) -> usize {
        self.submit_clicks
    }

    /// Every field focused, oldest first.
    pub fn focused(&self) -> &[FieldPath] {
        &self.focused
    }

    pub fn last_focused(&self) -> Option<&FieldPath> {
        self.focused.last()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.reported.clear();
        self.submit_clicks = 0;
        self.focused.clear();
    }
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FormHost for TestHost {
    fn supports_report_validity(&self) -> bool {
        self.report_validity
    }

    fn report_validity(&mut self, invalid: &[FieldPath]) {
        self.reported.push(invalid.to_vec());
    }

    fn click_submit(&mut self) {
        self.submit_clicks += 1;
    }

    fn focus_field(&mut self, path: &FieldPath) {
        self.focused.push(path.clone());
    }
}
