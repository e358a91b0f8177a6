//! Shared styles and the loading spinner, fixed at compile time.

use ratatui::style::{Color, Modifier, Style};

/// Borders and titles.
pub const ACCENT: Style = Style::new().fg(Color::Cyan);
/// Section headings.
pub const HEADING: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
/// Focused input border and key names in help.
pub const FOCUS: Style = Style::new().fg(Color::Yellow);
/// Unfocused borders, hints, and footers.
pub const DIM: Style = Style::new().fg(Color::DarkGray);
/// Error text and invalid field borders.
pub const ERROR: Style = Style::new().fg(Color::Red);
/// Successful figures.
pub const VALUE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
/// The submit line while idle.
pub const BUTTON: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Cyan)
    .add_modifier(Modifier::BOLD);
/// The submit line while a request is in flight.
pub const BUTTON_BUSY: Style = Style::new().fg(Color::Black).bg(Color::DarkGray);

/// Spinner frames, advanced once per UI tick.
pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner frame for the given tick.
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}
