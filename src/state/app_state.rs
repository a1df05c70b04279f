//! Application state definitions

use super::forms::{FormValidator, Navigable};

/// Which element of the form has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Index into the form's field list
    Field(usize),
    SubmitButton,
}

/// Focus ring over the visible fields followed by the submit button
#[derive(Debug, Clone, Default)]
pub struct FormFocus {
    /// Field indices in tab order (hidden fields excluded)
    slots: Vec<usize>,
    active: usize,
}

impl FormFocus {
    pub fn new(slots: Vec<usize>) -> Self {
        Self { slots, active: 0 }
    }

    pub fn current(&self) -> Focus {
        match self.slots.get(self.active) {
            Some(&index) => Focus::Field(index),
            None => Focus::SubmitButton,
        }
    }

    /// Field index under focus, if focus is on a field
    pub fn field(&self) -> Option<usize> {
        match self.current() {
            Focus::Field(index) => Some(index),
            Focus::SubmitButton => None,
        }
    }

    pub fn is_on_submit(&self) -> bool {
        matches!(self.current(), Focus::SubmitButton)
    }

    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    pub fn focus_first(&mut self) {
        self.active = 0;
    }
}

impl Navigable for FormFocus {
    fn field_count(&self) -> usize {
        self.slots.len() + 1 // fields + submit button
    }
    fn active_field(&self) -> usize {
        self.active
    }
    fn set_active_field(&mut self, index: usize) {
        self.active = index.min(self.slots.len());
    }
}

/// Whether the anti-forgery token was obtained
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TokenStatus {
    #[default]
    Missing,
    Configured,
    Fetched,
    Failed(String),
}

impl TokenStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, TokenStatus::Configured | TokenStatus::Fetched)
    }
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub validator: FormValidator,
    pub focus: FormFocus,
    pub token_status: TokenStatus,
}

impl AppState {
    pub fn new(validator: FormValidator) -> Self {
        let focus = FormFocus::new(validator.form().visible_indices());
        Self {
            validator,
            focus,
            token_status: TokenStatus::default(),
        }
    }

    /// Move focus forward, validating the field being left
    pub fn next_form_field(&mut self) {
        self.blur_current();
        self.focus.next_field();
    }

    /// Move focus backward, validating the field being left
    pub fn prev_form_field(&mut self) {
        self.blur_current();
        self.focus.prev_field();
    }

    fn blur_current(&mut self) {
        if let Some(index) = self.focus.field() {
            self.validator.on_blur(index);
        }
    }

    /// Focused field if it accepts typed text
    fn focused_text_field(&self) -> Option<usize> {
        self.focus.field().filter(|&index| {
            self.validator
                .form()
                .field(index)
                .is_some_and(|f| !f.kind.is_select())
        })
    }

    /// Handle character input in the focused field
    pub fn form_input_char(&mut self, c: char) {
        if let Some(index) = self.focused_text_field() {
            self.validator.input_char(index, c);
        }
    }

    /// Handle backspace in the focused field
    pub fn form_backspace(&mut self) {
        if let Some(index) = self.focused_text_field() {
            self.validator.input_backspace(index);
        }
    }

    /// Step the focused select field through its options
    pub fn form_cycle_option(&mut self, forward: bool) {
        if let Some(index) = self.focus.field() {
            self.validator.select_adjacent_option(index, forward);
        }
    }

    /// Enter inserts a newline only in multiline fields
    pub fn form_newline(&mut self) -> bool {
        let multiline = self
            .focus
            .field()
            .and_then(|i| self.validator.form().field(i))
            .is_some_and(|f| f.is_multiline());

        if multiline {
            self.form_input_char('\n');
        }
        multiline
    }

    pub fn is_submitting(&self) -> bool {
        self.validator.state().is_in_flight()
    }
}
