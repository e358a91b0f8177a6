//! Trip screen: the form, the submit button, and the latest outcome.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{TripField, TripInput};
use crate::submission::RenderView;
use crate::tui::action::Action;
use crate::tui::app::Screen;
use crate::tui::theme;
use crate::tui::widgets::{FormField, draw_form, draw_summary, form_height};

/// State for the trip screen: the form contents and which input has focus.
#[derive(Debug, Clone, Default)]
pub struct TripState {
    trip: TripInput,
    focus: TripField,
    invalid: Option<TripField>,
}

impl TripState {
    /// Creates a form holding the default trip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                Action::None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit(|value| value.clear());
                Action::None
            }
            KeyCode::Char(ch) => {
                self.edit(|value| value.push(ch));
                Action::None
            }
            KeyCode::Backspace => {
                self.edit(|value| {
                    value.pop();
                });
                Action::None
            }
            KeyCode::Enter => {
                self.invalid = None;
                Action::Submit
            }
            KeyCode::F(1) => Action::Navigate(Screen::Help),
            KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }

    /// Applies `change` to a copy of the focused value and stores the result.
    fn edit(&mut self, change: impl FnOnce(&mut String)) {
        let mut value = self.trip.get(self.focus).to_string();
        change(&mut value);
        self.trip.set_field(self.focus, value);
        if self.invalid == Some(self.focus) {
            self.invalid = None;
        }
    }

    /// The current form contents.
    pub fn trip(&self) -> &TripInput {
        &self.trip
    }

    /// The focused field.
    pub fn focus(&self) -> TripField {
        self.focus
    }

    /// Highlights `field` as the reason the last submit was rejected.
    pub fn mark_invalid(&mut self, field: TripField) {
        self.invalid = Some(field);
        self.focus = field;
    }

    /// The field highlighted as invalid, if any.
    pub fn invalid(&self) -> Option<TripField> {
        self.invalid
    }

    fn form_fields(&self) -> Vec<FormField<'_>> {
        TripField::ALL
            .into_iter()
            .map(|field| FormField {
                label: field.label(),
                value: self.trip.get(field),
                placeholder: field.placeholder(),
                invalid: self.invalid == Some(field),
            })
            .collect()
    }
}

/// Text and style of the submit line.
fn submit_line(loading: bool, tick: usize) -> Line<'static> {
    if loading {
        Line::from(Span::styled(
            format!(" {} Optimizing Route... ", theme::spinner_frame(tick)),
            theme::BUTTON_BUSY,
        ))
    } else {
        Line::from(Span::styled(" Optimize Route ", theme::BUTTON))
    }
}

/// Renders the trip screen from the form state and the controller's view.
#[mutants::skip]
pub fn draw_trip(state: &TripState, view: &RenderView<'_>, tick: usize, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Route Optimization ")
        .borders(Borders::ALL)
        .border_style(theme::ACCENT);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [subtitle_area, form_area, button_area, error_area, result_area, footer_area] =
        Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(form_height(TripField::ALL.len())),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

    frame.render_widget(
        Paragraph::new("Find the most fuel-efficient route for your journey").style(theme::DIM),
        subtitle_area,
    );

    draw_form(&state.form_fields(), state.focus.index(), frame, form_area);

    frame.render_widget(Paragraph::new(submit_line(view.loading, tick)), button_area);

    if let Some(err) = view.error {
        let error = Paragraph::new(Line::from(vec![
            Span::styled("\u{2716} ", theme::ERROR),
            Span::styled(err, theme::ERROR),
        ]));
        frame.render_widget(error, error_area);
    }

    if let Some(summary) = view.result {
        draw_summary(summary, frame, result_area);
    }

    let footer = Paragraph::new(Line::from(
        "Tab/Shift+Tab: next/prev  Enter: optimize  Ctrl+U: clear  F1: help  Esc: quit",
    ))
    .style(theme::DIM);
    frame.render_widget(footer, footer_area);
}
