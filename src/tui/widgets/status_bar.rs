//! Status bar widget: where requests go and whether one is in flight.

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::RequestSource;
use crate::tui::theme;

/// Data passed to the status bar; decoupled from the controller so it can be
/// built in tests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// The configured service URL.
    pub endpoint: String,
    /// Where request bodies come from.
    pub source: RequestSource,
    /// Whether a request is in flight.
    pub loading: bool,
    /// When the latest response arrived.
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Renders a one-line status bar.
///
/// Display format:
/// - Idle, never resolved: `http://host/api/  form`
/// - In flight:            `http://host/api/  form  waiting for service…`
/// - Resolved:             `http://host/api/  form  updated 14:03:22 UTC`
///
/// The `fixed` source is flagged in yellow since the form is not sent.
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let mut spans: Vec<Span> = vec![Span::styled(ctx.endpoint.clone(), theme::ACCENT)];
    spans.push(Span::raw("  "));

    match ctx.source {
        RequestSource::Form => spans.push(Span::styled("form", theme::ACCENT)),
        RequestSource::Fixed => spans.push(Span::styled("fixed request", theme::FOCUS)),
    }

    if ctx.loading {
        spans.push(Span::styled("  waiting for service\u{2026}", theme::DIM));
    } else if let Some(at) = ctx.resolved_at {
        spans.push(Span::styled(
            format!("  updated {} UTC", at.format("%H:%M:%S")),
            theme::DIM,
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
