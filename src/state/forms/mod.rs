//! Form domain layer
//!
//! Fields, validation rules, the site's lead forms and the validator that
//! drives their submit cycle.

mod field;
mod form_state;
mod validation;
mod validator;

pub use field::{FormField, SelectOption};
pub use form_state::{Form, FormKind, FormMethod, FormPayload, Navigable, CSRF_FIELD};
pub use validator::{FormValidator, SubmissionState, SubmitBlocked};

#[cfg(test)]
pub use field::FieldKind;
#[cfg(test)]
pub use validation::ValidationError;
