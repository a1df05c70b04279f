//! Application state and core logic

use crate::state::{AppState, FormValidator, SubmitBlocked, TokenStatus};
use crate::submit::{FormPage, FormSubmitter, HttpSubmitter, SubmissionError};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Window for the second Ctrl+C press
const QUIT_WINDOW: Duration = Duration::from_secs(1);

type PendingSubmission = JoinHandle<Result<u16, SubmissionError>>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Transport used for submissions
    submitter: Arc<dyn FormSubmitter>,
    /// Request currently in flight
    pending: Option<PendingSubmission>,
    /// Whether the app should quit
    quit: bool,
    /// One-line feedback in the status bar
    pub status_message: Option<String>,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create the app after loading the form page
    pub async fn new(
        mut validator: FormValidator,
        http: HttpSubmitter,
        csrf_token: Option<String>,
    ) -> Result<Self> {
        let token_status = load_form_page(&mut validator, &http, csrf_token).await;
        let mut app = Self::with_submitter(validator, Arc::new(http));

        if let TokenStatus::Failed(_) = token_status {
            app.status_message = Some("Token CSRF indisponível".to_string());
        }
        app.state.token_status = token_status;

        Ok(app)
    }

    /// Create the app around any submitter
    pub fn with_submitter(validator: FormValidator, submitter: Arc<dyn FormSubmitter>) -> Self {
        Self {
            state: AppState::new(validator),
            submitter,
            pending: None,
            quit: false,
            status_message: None,
            last_ctrl_c: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn has_pending_submission(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle a key press
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // feedback only lasts until the next key
        self.status_message = None;
        if !(ctrl && key.code == KeyCode::Char('c')) {
            self.last_ctrl_c = None;
        }

        match key.code {
            KeyCode::Char('c') if ctrl => self.handle_ctrl_c(),
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Tab | KeyCode::Down => self.state.next_form_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_form_field(),
            KeyCode::Enter => {
                if self.state.focus.is_on_submit() {
                    self.submit();
                } else if !self.state.form_newline() {
                    self.state.next_form_field();
                }
            }
            KeyCode::Left => self.state.form_cycle_option(false),
            KeyCode::Right => self.state.form_cycle_option(true),
            KeyCode::Esc => {
                self.state.validator.alerts_mut().dismiss_latest();
            }
            KeyCode::Backspace => self.state.form_backspace(),
            KeyCode::Char(c) if !ctrl => self.state.form_input_char(c),
            _ => {}
        }
        Ok(())
    }

    fn handle_ctrl_c(&mut self) {
        let now = Instant::now();
        if self
            .last_ctrl_c
            .is_some_and(|last| now.duration_since(last) < QUIT_WINDOW)
        {
            self.quit = true;
        } else {
            self.last_ctrl_c = Some(now);
            self.status_message = Some("Pressione Ctrl+C novamente para sair".to_string());
        }
    }

    /// The submit event: validate and, if clean, send in the background
    pub fn submit(&mut self) {
        match self.state.validator.handle_submit() {
            Ok(payload) => {
                let submitter = Arc::clone(&self.submitter);
                self.pending = Some(tokio::spawn(
                    async move { submitter.submit(payload).await },
                ));
            }
            Err(SubmitBlocked::Invalid { errors }) => {
                self.status_message = Some(format!(
                    "{} ({errors})",
                    SubmitBlocked::Invalid { errors }
                ));
            }
            Err(SubmitBlocked::InFlight) => {
                tracing::debug!("Ignoring submit while a request is in flight");
            }
        }
    }

    /// Periodic work: settle a finished submission and drop expired alerts
    pub async fn tick(&mut self) {
        if self.pending.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = self.pending.take() {
                let outcome = handle
                    .await
                    .unwrap_or_else(|err| Err(SubmissionError::Transport(err.to_string())));
                let succeeded = outcome.is_ok();
                self.state.validator.finish_submission(outcome);
                if succeeded {
                    self.state.focus.focus_first();
                }
            }
        }

        self.state.validator.alerts_mut().drain_expired();
    }
}

/// Load the form page and apply it; a token passed in wins over the page's
pub async fn load_form_page(
    validator: &mut FormValidator,
    http: &HttpSubmitter,
    csrf_token: Option<String>,
) -> TokenStatus {
    let action = validator.form().action.clone();
    let page_token = match http.fetch_form_page(&action).await {
        Ok(page) => Ok(apply_form_page(validator, page)),
        Err(err) => {
            tracing::warn!("Could not load form page: {err:#}");
            Err(err.to_string())
        }
    };

    match (csrf_token, page_token) {
        (Some(token), _) => {
            validator.set_csrf_token(&token);
            TokenStatus::Configured
        }
        (None, Ok(Some(token))) => {
            validator.set_csrf_token(&token);
            TokenStatus::Fetched
        }
        (None, Ok(None)) => TokenStatus::Missing,
        (None, Err(err)) => TokenStatus::Failed(err),
    }
}

/// Adopt the page's method and select choices; returns its token
fn apply_form_page(validator: &mut FormValidator, page: FormPage) -> Option<String> {
    if let Some(method) = page.method {
        validator.set_method(method);
    }
    for (name, options) in page.selects {
        validator.set_select_options(&name, options);
    }
    page.csrf_token
}
