//! Enter-to-advance keyboard navigation.

use formol_types::FieldPath;

/// A key, as far as navigation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    Escape,
    Char(char),
    Other,
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A key-down event on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn enter() -> Self {
        Self::new(Key::Enter)
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    /// Whether this key press should move focus to the next field.
    ///
    /// In a single-line field plain Enter advances and Shift+Enter is left
    /// to the control. In a multi-line field plain Enter inserts a line
    /// break; Ctrl+Enter (or Meta+Enter) advances.
    pub fn advances(&self, multiline: bool) -> bool {
        if self.key != Key::Enter || self.modifiers.alt {
            return false;
        }
        if multiline {
            self.modifiers.ctrl || self.modifiers.meta
        } else {
            !self.modifiers.shift
        }
    }
}

/// Where focus goes after an advancing key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    /// The next enabled field in declaration order.
    Field(FieldPath),
    /// The submit control: there is no field after this one.
    Submit,
}

/// What the host should do with a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The engine moved focus; the host must swallow the key.
    FocusNext(FocusTarget),
    /// Default handling of the key.
    PassThrough,
}

impl KeyOutcome {
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough)
    }
}
