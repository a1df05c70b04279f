//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows used by a single-line field
pub const FIELD_HEIGHT: u16 = 3;

/// Rows used by a multiline field
pub const MULTILINE_FIELD_HEIGHT: u16 = 6;

pub fn field_height(field: &FormField) -> u16 {
    if field.is_multiline() {
        MULTILINE_FIELD_HEIGHT
    } else {
        FIELD_HEIGHT
    }
}

/// Draw a form field with its inline error, if any
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let border_color = match (field.has_error(), is_active) {
        (true, _) => Color::Red,
        (false, true) => Color::Cyan,
        (false, false) => Color::DarkGray,
    };

    let value_style = if field.value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let display_str = field.display_value();
    let cursor = if is_active { "▌" } else { "" };

    let mut lines: Vec<Line> = if field.kind.is_select() {
        let arrow_style = Style::default().fg(if is_active { Color::Cyan } else { Color::DarkGray });
        vec![Line::from(vec![
            Span::styled("◀ ", arrow_style),
            Span::styled(display_str, value_style),
            Span::styled(" ▶", arrow_style),
        ])]
    } else if field.value.is_empty() {
        vec![Line::from(Span::styled(display_str, value_style))]
    } else {
        display_str
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), value_style)))
            .collect()
    };

    if is_active && !field.kind.is_select() {
        let cursor_span = Span::styled(cursor, Style::default().fg(Color::Cyan));
        if field.value.is_empty() {
            lines = vec![Line::from(cursor_span)];
        } else if let Some(last) = lines.last_mut() {
            last.spans.push(cursor_span);
        }
    }

    let title = if field.required {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    };

    let mut block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if let Some(error) = &field.error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

/// First field to draw so that `focused` fits in `available` rows
pub fn first_visible(heights: &[u16], focused: Option<usize>, available: u16) -> usize {
    let Some(focused) = focused else {
        // keep the tail visible when the submit button has focus
        let mut used = 0u16;
        for (i, h) in heights.iter().enumerate().rev() {
            used = used.saturating_add(*h);
            if used > available {
                return i + 1;
            }
        }
        return 0;
    };

    let mut start = 0;
    let mut used: u16 = heights.iter().take(focused + 1).sum();
    while used > available && start < focused {
        used -= heights[start];
        start += 1;
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldKind;

    #[test]
    fn test_field_heights() {
        let text = FormField::required("nome", "Nome", FieldKind::Text);
        let area = FormField::required("mensagem", "Mensagem", FieldKind::Textarea);
        assert_eq!(field_height(&text), FIELD_HEIGHT);
        assert_eq!(field_height(&area), MULTILINE_FIELD_HEIGHT);
    }

    #[test]
    fn test_first_visible_when_everything_fits() {
        assert_eq!(first_visible(&[3, 3, 6], Some(2), 20), 0);
        assert_eq!(first_visible(&[3, 3, 6], None, 20), 0);
    }

    #[test]
    fn test_first_visible_scrolls_to_focused() {
        // 4 fields of 3 rows, 7 rows available, focus on the last
        assert_eq!(first_visible(&[3, 3, 3, 3], Some(3), 7), 2);
    }

    #[test]
    fn test_first_visible_focus_on_submit_shows_tail() {
        assert_eq!(first_visible(&[3, 3, 3, 3], None, 7), 2);
    }

    #[test]
    fn test_first_visible_never_skips_focused() {
        assert_eq!(first_visible(&[3, 10], Some(1), 5), 1);
    }
}
