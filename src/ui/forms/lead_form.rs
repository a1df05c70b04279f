//! Lead form rendering (contact and financing)

use super::field_renderer::{draw_field, field_height, first_visible};
use crate::app::App;
use crate::state::{SubmissionState, TokenStatus};
use crate::ui::components::{alerts_height, render_action_button, render_alerts, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the form with its action panel on the right
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(28), // Action panel
        ])
        .split(area);

    let alerts = app.state.validator.alerts().alerts();
    let alert_rows = alerts_height(alerts, main_chunks[0].width);
    let form_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(alert_rows), // Alerts sit above the form
            Constraint::Min(0),             // Form
        ])
        .split(main_chunks[0]);

    render_alerts(frame, form_chunks[0], alerts);
    draw_form(frame, form_chunks[1], app);
    draw_action_panel(frame, main_chunks[1], app);
}

/// Draw the visible fields, scrolled so the focused one is on screen
fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.state.validator.form();
    let focused = app.state.focus.field();

    let block = Block::default()
        .title(format!(" {} ", form.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused.is_some() {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let slots = app.state.focus.slots();
    let heights: Vec<u16> = slots
        .iter()
        .filter_map(|&i| form.field(i))
        .map(field_height)
        .collect();
    let focused_slot = focused.and_then(|f| slots.iter().position(|&i| i == f));
    let start = first_visible(&heights, focused_slot, inner.height);

    let mut y = inner.y;
    for (&index, &height) in slots.iter().zip(heights.iter()).skip(start) {
        if y + height > inner.y + inner.height {
            break;
        }
        if let Some(field) = form.field(index) {
            let field_area = Rect {
                x: inner.x,
                y,
                width: inner.width,
                height,
            };
            draw_field(frame, field_area, field, focused == Some(index));
        }
        y += height;
    }
}

/// Draw the submit button and submission details
fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.state.focus.is_on_submit();
    let form = app.state.validator.form();

    let block = Block::default()
        .title(" Ações ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }));
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Min(0),                // Details
        ])
        .split(inner_area);

    render_action_button(
        frame,
        chunks[0],
        &form.submit.label,
        is_focused,
        !form.submit.disabled,
        Some(Color::Green),
    );

    let (state_label, state_color) = match app.state.validator.state() {
        SubmissionState::Idle => ("Pronto", Color::DarkGray),
        SubmissionState::Submitting => ("Enviando", Color::Yellow),
        SubmissionState::Succeeded => ("Enviado", Color::Green),
        SubmissionState::Failed(_) => ("Falhou", Color::Red),
    };

    let (token_label, token_color) = match &app.state.token_status {
        TokenStatus::Configured => ("configurado", Color::Green),
        TokenStatus::Fetched => ("obtido", Color::Green),
        TokenStatus::Missing => ("ausente", Color::Yellow),
        TokenStatus::Failed(_) => ("falhou", Color::Red),
    };

    let details = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Estado: ", Style::default().fg(Color::DarkGray)),
            Span::styled(state_label, Style::default().fg(state_color)),
        ]),
        Line::from(vec![
            Span::styled("Token: ", Style::default().fg(Color::DarkGray)),
            Span::styled(token_label, Style::default().fg(token_color)),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{} ", form.method.as_str()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(form.action.path().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Erros: ", Style::default().fg(Color::DarkGray)),
            Span::raw(form.error_count().to_string()),
        ]),
    ]);
    frame.render_widget(details, chunks[1]);
}
