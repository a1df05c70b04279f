//! Client-side validation gate in front of a form submission
//!
//! `FormValidator` owns a [`Form`] snapshot and reacts to the same events a
//! browser form does: blur validates a field, input clears its error, submit
//! validates everything and, if the form is clean, hands out the payload to
//! send. The submit control is disabled from [`FormValidator::begin_submission`]
//! until [`FormValidator::finish_submission`], whatever the outcome.

use super::field::SelectOption;
use super::form_state::{Form, FormMethod, FormPayload};
use super::validation;
use crate::state::alerts::{AlertKind, AlertQueue};
use crate::submit::{FormSubmitter, SubmissionError};
use thiserror::Error;

/// Alert text after a successful submission
pub const SUCCESS_MESSAGE: &str = "Mensagem enviada com sucesso!";

/// Where the form is in its submit cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(SubmissionError),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }
}

/// Why a submit did not produce a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("Por favor, corrija os erros abaixo.")]
    Invalid { errors: usize },
    #[error("Envio em andamento")]
    InFlight,
}

/// Validation and submission state machine for one form
#[derive(Debug)]
pub struct FormValidator {
    form: Form,
    state: SubmissionState,
    alerts: AlertQueue,
}

impl FormValidator {
    /// Bind to a form; the field list is fixed from here on
    pub fn new(form: Form, alerts: AlertQueue) -> Self {
        Self {
            form,
            state: SubmissionState::Idle,
            alerts,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn alerts(&self) -> &AlertQueue {
        &self.alerts
    }

    pub fn alerts_mut(&mut self) -> &mut AlertQueue {
        &mut self.alerts
    }

    /// Refresh the hidden anti-forgery field
    pub fn set_csrf_token(&mut self, token: &str) {
        self.form.set_csrf_token(token);
    }

    /// Validate one field, replacing any previous annotation
    ///
    /// Out-of-range indices have nothing to validate and pass.
    pub fn validate_field(&mut self, index: usize) -> bool {
        let Some(field) = self.form.field_mut(index) else {
            return true;
        };

        field.error = None;
        let outcome = validation::validate(field.kind, field.required, &field.value).and_then(|()| {
            if field.kind.is_select() {
                validation::validate_choice(&field.value, &field.options)
            } else {
                Ok(())
            }
        });
        match outcome {
            Ok(()) => true,
            Err(err) => {
                field.error = Some(err);
                false
            }
        }
    }

    /// Validate every field so all errors show at once
    pub fn validate_form(&mut self) -> bool {
        (0..self.form.fields().len()).fold(true, |valid, index| {
            self.validate_field(index) && valid
        })
    }

    pub fn clear_field_error(&mut self, index: usize) {
        if let Some(field) = self.form.field_mut(index) {
            field.error = None;
        }
    }

    #[cfg(test)]
    pub fn field_error(&self, index: usize) -> Option<&validation::ValidationError> {
        self.form.field(index).and_then(|f| f.error.as_ref())
    }

    /// Focus left a field
    pub fn on_blur(&mut self, index: usize) -> bool {
        self.validate_field(index)
    }

    /// The user changed a field's value
    pub fn on_input(&mut self, index: usize, value: String) {
        self.acknowledge();
        if let Some(field) = self.form.field_mut(index) {
            field.value = value;
        }
        self.clear_field_error(index);
    }

    /// Append a typed character to a field
    pub fn input_char(&mut self, index: usize, c: char) {
        self.acknowledge();
        if let Some(field) = self.form.field_mut(index) {
            field.push_char(c);
        }
        self.clear_field_error(index);
    }

    /// Remove the last character of a field
    pub fn input_backspace(&mut self, index: usize) {
        self.acknowledge();
        if let Some(field) = self.form.field_mut(index) {
            field.pop_char();
        }
        self.clear_field_error(index);
    }

    /// Move a select field to its previous or next option
    pub fn select_adjacent_option(&mut self, index: usize, forward: bool) {
        let next = self
            .form
            .field(index)
            .and_then(|f| f.adjacent_option(forward))
            .map(str::to_string);
        if let Some(value) = next {
            self.on_input(index, value);
        }
    }

    /// Replace a select field's choices, e.g. with the page's inventory
    pub fn set_select_options(&mut self, name: &str, options: Vec<SelectOption>) {
        if self.form.set_options(name, options) {
            tracing::debug!("Loaded choices for {name}");
        }
    }

    pub fn set_method(&mut self, method: FormMethod) {
        self.form.method = method;
    }

    /// Return a settled outcome to `Idle`
    pub fn acknowledge(&mut self) {
        if matches!(
            self.state,
            SubmissionState::Succeeded | SubmissionState::Failed(_)
        ) {
            self.state = SubmissionState::Idle;
        }
    }

    /// The submit event: validate, then start a submission
    pub fn handle_submit(&mut self) -> Result<FormPayload, SubmitBlocked> {
        self.check_submittable()?;
        self.begin_submission()
    }

    /// Reject a submit that is in flight or has invalid fields
    fn check_submittable(&mut self) -> Result<(), SubmitBlocked> {
        if self.state.is_in_flight() {
            return Err(SubmitBlocked::InFlight);
        }
        self.acknowledge();

        if !self.validate_form() {
            let errors = self.form.error_count();
            tracing::debug!("Submit blocked by {errors} invalid field(s)");
            return Err(SubmitBlocked::Invalid { errors });
        }
        Ok(())
    }

    /// Disable the control, show the loading label and snapshot the payload
    pub fn begin_submission(&mut self) -> Result<FormPayload, SubmitBlocked> {
        if self.state.is_in_flight() {
            return Err(SubmitBlocked::InFlight);
        }

        self.form.submit.set_loading();
        self.state = SubmissionState::Submitting;
        tracing::info!("Submitting {} form to {}", self.form.title, self.form.action);

        Ok(self.form.payload())
    }

    /// Restore the control and report the outcome
    ///
    /// On success the form is reset; on failure the values stay so the user
    /// can try again.
    pub fn finish_submission(&mut self, outcome: Result<u16, SubmissionError>) {
        self.form.submit.restore();

        match outcome {
            Ok(status) => {
                tracing::info!("{} form accepted ({status})", self.form.title);
                self.alerts.push(AlertKind::Success, SUCCESS_MESSAGE);
                self.form.reset();
                self.state = SubmissionState::Succeeded;
            }
            Err(err) => {
                match &err {
                    SubmissionError::Rejected { status } => {
                        tracing::warn!("{} form rejected with status {status}", self.form.title)
                    }
                    other => tracing::warn!("{} form failed: {other}", self.form.title),
                }
                self.alerts.push(AlertKind::Danger, err.to_string());
                self.state = SubmissionState::Failed(err);
            }
        }
    }

    /// Send the current values with `submitter` and settle the outcome
    pub async fn submit_form<S>(&mut self, submitter: &S) -> Result<(), SubmitBlocked>
    where
        S: FormSubmitter + ?Sized,
    {
        let payload = self.begin_submission()?;
        let outcome = submitter.submit(payload).await;
        self.finish_submission(outcome);
        Ok(())
    }

    /// Validate and, if clean, submit in one call
    pub async fn submit_with<S>(&mut self, submitter: &S) -> Result<(), SubmitBlocked>
    where
        S: FormSubmitter + ?Sized,
    {
        self.check_submittable()?;
        self.submit_form(submitter).await
    }
}
