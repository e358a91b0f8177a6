//! Route summary card.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::RouteSummary;
use crate::tui::theme;

/// Formats a dollar amount with two decimals, e.g. `$450.50`.
pub fn format_cost(amount: f64) -> String {
    format!("${amount:.2}")
}

fn stat(label: &str, value: String, unit: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<16}"), theme::DIM),
        Span::styled(value, theme::VALUE),
        Span::styled(format!(" {unit}"), theme::DIM),
    ])
}

/// Builds the card body: headline figures, then one line per named stop.
pub fn summary_lines(summary: &RouteSummary) -> Vec<Line<'static>> {
    let mut lines = vec![
        stat(
            "Total Distance",
            format!("{}", summary.total_distance_miles),
            "miles",
        ),
        stat("Fuel Used", format!("{}", summary.total_gallons_used), "gal"),
        stat("Total Cost", format_cost(summary.total_fuel_cost), ""),
        stat("Fuel Stops", summary.stop_count().to_string(), ""),
    ];

    for (i, stop) in summary.fuel_stops.iter().enumerate() {
        let Some(station) = stop.station() else {
            continue;
        };
        let mut spans = vec![Span::styled(format!("    {}. {station}", i + 1), theme::DIM)];
        if let Some(price) = stop.price() {
            spans.push(Span::styled(
                format!("  {}/gal", format_cost(price)),
                theme::DIM,
            ));
        }
        lines.push(Line::from(spans));
    }
    lines
}

#[mutants::skip]
pub fn draw_summary(summary: &RouteSummary, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Route Summary ")
        .borders(Borders::ALL)
        .border_style(theme::ACCENT);
    frame.render_widget(Paragraph::new(summary_lines(summary)).block(block), area);
}
