//! Stacked text inputs with a focused field.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::theme;

/// Height of one input, including its border.
pub const FIELD_HEIGHT: u16 = 3;

/// What a single input shows. Values are borrowed from whoever owns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField<'a> {
    /// Title on the input border.
    pub label: &'a str,
    /// Current text.
    pub value: &'a str,
    /// Dim hint drawn while `value` is empty.
    pub placeholder: &'a str,
    /// Draws the border in the error colour.
    pub invalid: bool,
}

/// Total height needed to draw `count` fields.
pub fn form_height(count: usize) -> u16 {
    FIELD_HEIGHT.saturating_mul(u16::try_from(count).unwrap_or(u16::MAX))
}

/// Renders `fields` top to bottom; `focus` is the index of the active one.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(fields: &[FormField<'_>], focus: usize, frame: &mut Frame, area: Rect) {
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    let rows = Layout::vertical(constraints).split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_focused = i == focus;

        let border = if field.invalid {
            theme::ERROR
        } else if is_focused {
            theme::FOCUS
        } else {
            theme::DIM
        };

        let block = Block::default()
            .title(field.label)
            .borders(Borders::ALL)
            .border_style(border);

        let mut spans = if field.value.is_empty() && !is_focused {
            vec![Span::styled(field.placeholder, theme::DIM)]
        } else {
            vec![Span::raw(field.value)]
        };
        if is_focused {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), rows[i]);
    }
}
