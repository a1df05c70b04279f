//! Regional TUI - lead forms for the Regional Veículos site
//!
//! A Ratatui-based TUI for filling in the contact and financing forms,
//! validating them field by field and posting them to the site.

mod app;
mod cli;
mod config;
mod platform;
mod state;
mod submit;
mod ui;

use anyhow::{anyhow, bail, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::TuiConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use state::{AlertQueue, Form, FormValidator, SubmissionState, SubmitBlocked};
use std::io;
use std::time::Duration;
use submit::HttpSubmitter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Poll interval while a submission is in flight
const PENDING_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "regional_tui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = TuiConfig::load()?;

    let form = match cli.command {
        Commands::Config {
            base_url,
            timeout_secs,
            alert_timeout_ms,
        } => {
            if let Some(base_url) = base_url {
                config.base_url = Some(config::parse_base_url(&base_url)?.to_string());
            }
            if timeout_secs.is_some() {
                config.request_timeout_secs = timeout_secs;
            }
            if alert_timeout_ms.is_some() {
                config.alert_timeout_ms = alert_timeout_ms;
            }
            config.save()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }
        Commands::Contato => {
            let base = config.resolve_base_url(cli.base_url.as_deref())?;
            Form::contact(&base, "")?
        }
        Commands::Financiamento { car_id, car } => {
            let base = config.resolve_base_url(cli.base_url.as_deref())?;
            Form::financing(&base, "", car_id, car.as_deref())?
        }
    };

    tracing::info!("Opening {} form at {}", form.title, form.action);

    let http = HttpSubmitter::new(config.request_timeout())?;
    let mut validator = FormValidator::new(form, AlertQueue::new(config.alert_timeout()));
    apply_assignments(&mut validator, &cli.assignments)?;
    let csrf_token = cli.csrf_token.or(config.csrf_token);

    if cli.send {
        return send_without_ui(validator, http, csrf_token).await;
    }

    let mut app = App::new(validator, http, csrf_token).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Prefill fields given as `--set NAME=VALUE`
fn apply_assignments(validator: &mut FormValidator, assignments: &[(String, String)]) -> Result<()> {
    for (name, value) in assignments {
        let index = validator
            .form()
            .field_index(name)
            .ok_or_else(|| anyhow!("Unknown field `{name}` in {} form", validator.form().title))?;
        validator.on_input(index, value.clone());
    }
    Ok(())
}

/// Validate and submit once, reporting on stdout/stderr
async fn send_without_ui(
    mut validator: FormValidator,
    http: HttpSubmitter,
    csrf_token: Option<String>,
) -> Result<()> {
    let token_status = app::load_form_page(&mut validator, &http, csrf_token).await;
    tracing::debug!("Anti-forgery token: {token_status:?}");

    match validator.submit_with(&http).await {
        Ok(()) => {}
        Err(blocked @ SubmitBlocked::Invalid { .. }) => {
            for field in validator.form().fields() {
                if let Some(error) = &field.error {
                    eprintln!("{}: {error}", field.name);
                }
            }
            bail!("{blocked}");
        }
        Err(blocked) => bail!("{blocked}"),
    }

    match validator.state() {
        SubmissionState::Failed(err) => bail!("{err}"),
        _ => {
            if let Some(alert) = validator.alerts().latest() {
                println!("{}", alert.message);
            }
            Ok(())
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        let poll_interval = if app.has_pending_submission() {
            PENDING_POLL_INTERVAL
        } else {
            POLL_INTERVAL
        };

        if event::poll(poll_interval)? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key).await?;
                }
            }
        }

        app.tick().await;

        if app.should_quit() {
            return Ok(());
        }
    }
}
