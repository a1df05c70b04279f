//! Alert banners shown above the form

use crate::state::{Alert, AlertKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by an alert's top and bottom borders
const BORDER_ROWS: u16 = 2;

fn alert_color(kind: AlertKind) -> Color {
    match kind {
        AlertKind::Success => Color::Green,
        AlertKind::Danger => Color::Red,
    }
}

/// Columns left for text inside the borders
fn text_width(width: u16) -> usize {
    usize::from(width.saturating_sub(2).max(1))
}

/// Rows one alert needs at `width` columns, borders included
pub fn alert_height(alert: &Alert, width: u16) -> u16 {
    let lines = wrap_text(&alert.message, text_width(width)).len();
    u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(BORDER_ROWS)
}

/// Rows all alerts need at `width` columns
pub fn alerts_height(alerts: &[Alert], width: u16) -> u16 {
    alerts
        .iter()
        .fold(0u16, |total, alert| total.saturating_add(alert_height(alert, width)))
}

/// Render alerts newest first, as many as fit
pub fn render_alerts(frame: &mut Frame, area: Rect, alerts: &[Alert]) {
    let bottom = area.y.saturating_add(area.height);
    let mut y = area.y;

    for alert in alerts.iter().rev() {
        let height = alert_height(alert, area.width).min(bottom.saturating_sub(y));
        if height <= BORDER_ROWS {
            break;
        }

        let color = alert_color(alert.kind);
        let lines: Vec<Line> = wrap_text(&alert.message, text_width(area.width))
            .into_iter()
            .map(|line| Line::from(Span::styled(line, Style::default().fg(color))))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                format!(" {} ", alert.created_at.format("%H:%M:%S")),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Span::styled(" Esc ", Style::default().fg(Color::DarkGray)));

        let alert_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        frame.render_widget(Paragraph::new(lines).block(block), alert_area);
        y += height;
    }
}

/// Wrap text to fit within a maximum width
///
/// Words longer than the width are split across lines.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            let width = current_line.chars().count() + word_len + 1;
            if width > max_width && !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
            }

            if word_len > max_width {
                let chars: Vec<char> = word.chars().collect();
                let mut chunks = chars.chunks(max_width).peekable();
                while let Some(chunk) = chunks.next() {
                    let piece: String = chunk.iter().collect();
                    if chunks.peek().is_some() {
                        lines.push(piece);
                    } else {
                        current_line = piece;
                    }
                }
                continue;
            }

            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
