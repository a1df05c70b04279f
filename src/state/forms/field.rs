//! Form field value objects

use super::validation::ValidationError;

/// Type tag of a field, mirroring the HTML input type it stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Textarea,
    Select,
    Hidden,
    /// Brazilian taxpayer id, `000.000.000-00`
    Cpf,
    /// Brazilian currency, `R$ 0,00`, zero allowed
    Money,
    /// Brazilian currency that must be greater than zero
    PositiveMoney,
}

impl FieldKind {
    pub fn is_multiline(&self) -> bool {
        matches!(self, FieldKind::Textarea)
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, FieldKind::Hidden)
    }

    pub fn is_select(&self) -> bool {
        matches!(self, FieldKind::Select)
    }
}

/// One `<option>` of a select field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    /// Key used in the submitted form data
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    /// Value restored by a form reset
    pub default_value: String,
    pub placeholder: Option<String>,
    /// Inline error annotation, at most one per field
    pub error: Option<ValidationError>,
    /// Choices of a select field, in page order
    pub options: Vec<SelectOption>,
}

impl FormField {
    /// Create a new empty field
    pub fn new(name: &str, label: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required,
            value: String::new(),
            default_value: String::new(),
            placeholder: None,
            error: None,
            options: Vec::new(),
        }
    }

    /// Create a required field
    pub fn required(name: &str, label: &str, kind: FieldKind) -> Self {
        Self::new(name, label, kind, true)
    }

    /// Create an optional field
    pub fn optional(name: &str, label: &str, kind: FieldKind) -> Self {
        Self::new(name, label, kind, false)
    }

    /// Create a hidden field carrying a fixed value
    pub fn hidden(name: &str, value: &str) -> Self {
        let mut field = Self::new(name, name, FieldKind::Hidden, false);
        field.set_default(value.to_string());
        field
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    /// Set both the default and the current value
    pub fn set_default(&mut self, value: String) {
        self.value.clone_from(&value);
        self.default_value = value;
    }

    pub fn is_multiline(&self) -> bool {
        self.kind.is_multiline()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    /// Value of the option before or after the selected one, wrapping
    ///
    /// An unknown current value moves to the first option.
    pub fn adjacent_option(&self, forward: bool) -> Option<&str> {
        let count = self.options.len();
        if count == 0 {
            return None;
        }
        let next = match self.options.iter().position(|o| o.value == self.value) {
            Some(current) if forward => (current + 1) % count,
            Some(current) => (current + count - 1) % count,
            None => 0,
        };
        Some(self.options[next].value.as_str())
    }

    /// Restore the default value and drop any error annotation
    pub fn reset(&mut self) {
        self.value.clone_from(&self.default_value);
        self.error = None;
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        if let Some(option) = self.options.iter().find(|o| o.value == self.value) {
            return option.label.clone();
        }
        if self.value.is_empty() {
            self.placeholder.clone().unwrap_or_default()
        } else {
            self.value.clone()
        }
    }
}
