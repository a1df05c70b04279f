//! Layout components (header, status bar)

use crate::app::App;
use crate::platform::{DISMISS_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{FormKind, TokenStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Quit hint on the right (double Ctrl+C to quit)
const QUIT_HINT: &str = " ^C^C:quit ";

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the header with the site and the form's target address
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.state.validator.form();
    let host = form.action.host_str().unwrap_or("?");
    let subject = match &form.kind {
        FormKind::Contact => String::new(),
        FormKind::Financing { car_id: Some(id) } => format!("  carro #{id}"),
        FormKind::Financing { car_id: None } => String::new(),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Regional Veículos ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{host} "), Style::default().fg(Color::Blue)),
        Span::styled(
            format!("{} {}", form.method.as_str(), form.action.path()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(subject, Style::default().fg(Color::Yellow)),
    ]));

    frame.render_widget(header, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Token status
    let token_status = if app.state.token_status.is_available() {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else if matches!(app.state.token_status, TokenStatus::Failed(_)) {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Yellow))
    };
    spans.push(token_status);

    spans.push(Span::styled(
        hints(app),
        Style::default().fg(Color::DarkGray),
    ));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    if app.state.is_submitting() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            "enviando...",
            Style::default().fg(Color::Cyan),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(QUIT_HINT.len() as u16),
        y: area.y,
        width: (QUIT_HINT.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(QUIT_HINT).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the element under focus
fn hints(app: &App) -> String {
    let dismiss = if app.state.validator.alerts().is_empty() {
        String::new()
    } else {
        format!("  {DISMISS_SHORTCUT}:fechar alerta")
    };

    if app.state.focus.is_on_submit() {
        format!("Tab:next  Enter:enviar  {SUBMIT_SHORTCUT}:enviar{dismiss}")
    } else {
        format!("Tab/↑↓:nav  ←→:opção  {SUBMIT_SHORTCUT}:enviar{dismiss}")
    }
}
