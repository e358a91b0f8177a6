//! Help screen: scrollable keybinding reference.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::Action;
use crate::tui::app::Screen;
use crate::tui::theme;

static TRIP_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "next / prev field"),
    ("↑/↓", "prev / next field"),
    ("Backspace", "delete last character"),
    ("Ctrl+U", "clear field"),
    ("Enter", "optimize route (ignored while waiting)"),
    ("F1", "help"),
    ("Esc / Ctrl+C", "quit"),
];

static HELP_KEYS: &[(&str, &str)] = &[("↑/↓", "scroll"), ("q / Esc", "back")];

static INPUT_NOTES: &[&str] = &[
    "Locations are \"longitude, latitude\" in decimal degrees.",
    "MPG and tank size must be numbers greater than zero.",
    "Failed requests can be retried with Enter.",
];

/// State for the help screen.
#[derive(Debug, Clone, Default)]
pub struct HelpState {
    scroll: u16,
}

impl HelpState {
    /// Creates a new [`HelpState`] scrolled to the top.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current scroll offset.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Resets the scroll position to the top.
    pub fn reset(&mut self) {
        self.scroll = 0;
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(Screen::Trip),
            _ => Action::None,
        }
    }
}

fn build_section(title: &'static str, keys: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(""), Line::from(Span::styled(title, theme::HEADING))];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<20}"), theme::FOCUS),
            Span::styled(*desc, theme::DIM),
        ]));
    }
    lines
}

fn help_content() -> Vec<Line<'static>> {
    let mut lines = build_section("Trip", TRIP_KEYS);
    lines.extend(build_section("Help", HELP_KEYS));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Input", theme::HEADING)));
    lines.extend(
        INPUT_NOTES
            .iter()
            .map(|note| Line::from(Span::styled(format!("  {note}"), theme::DIM))),
    );
    lines
}

/// Renders the help screen.
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(theme::ACCENT);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let content = Paragraph::new(help_content()).scroll((state.scroll(), 0));
    frame.render_widget(content, content_area);

    let footer = Paragraph::new(Line::from("↑/↓: scroll  q/Esc: back")).style(theme::DIM);
    frame.render_widget(footer, footer_area);
}
