use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use tokio::runtime::Handle;

use crate::config::Config;
use crate::service::{HttpRouteService, RouteService};
use crate::submission::{Dispatcher, Submit, SubmissionController};

use super::action::Action;
use super::error::AppError;
use super::screens::{HelpState, TripState, draw_help, draw_trip};
use super::widgets::{StatusBarContext, draw_status_bar};

/// How long the loop waits for a key before checking for responses.
const TICK: Duration = Duration::from_millis(100);

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Enter a trip and see the optimized route.
    Trip,
    /// Show keybinding help.
    Help,
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    trip: TripState,
    help: HelpState,
    controller: SubmissionController,
    dispatcher: Dispatcher,
    endpoint: String,
    tick: usize,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` on the [`Screen::Trip`] screen.
    ///
    /// Requests are sent through `service` on the runtime behind `handle`.
    pub fn new(config: &Config, service: Arc<dyn RouteService>, handle: Handle) -> Self {
        Self {
            screen: Screen::Trip,
            trip: TripState::new(),
            help: HelpState::new(),
            controller: SubmissionController::new(config.request_source),
            dispatcher: Dispatcher::new(service, handle),
            endpoint: config.endpoint.clone(),
            tick: 0,
            should_quit: false,
        }
    }

    /// Creates an `App` that posts to the configured endpoint over HTTP.
    pub fn connect(config: &Config, handle: Handle) -> Result<Self, AppError> {
        let service = HttpRouteService::new(config.endpoint.clone())?;
        Ok(Self::new(config, Arc::new(service), handle))
    }

    /// Main event loop: draw → poll event → dispatch → apply responses → check quit.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(TICK)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
            self.drain_resolutions();
            self.tick = self.tick.wrapping_add(1);
        }
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        let view = self.controller.view();
        match self.screen {
            Screen::Trip => draw_trip(&self.trip, &view, self.tick, frame, main_area),
            Screen::Help => draw_help(&self.help, frame, main_area),
        }

        let ctx = StatusBarContext {
            endpoint: self.endpoint.clone(),
            source: self.controller.source(),
            loading: view.loading,
            resolved_at: view.resolved_at,
        };
        draw_status_bar(&ctx, frame, status_area);
    }

    /// Handles a key event: global keys first, then the current screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let action = match self.screen {
            Screen::Trip => self.trip.handle_key(key),
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => {
                if screen == Screen::Help {
                    self.help.reset();
                }
                self.screen = screen;
            }
            Action::Submit => self.submit(),
            Action::Quit => self.should_quit = true,
        }
    }

    fn submit(&mut self) {
        match self.controller.submit(self.trip.trip()) {
            Submit::Issued(ticket, request) => self.dispatcher.dispatch(ticket, request),
            Submit::Ignored => {}
            Submit::Rejected(err) => self.trip.mark_invalid(err.field()),
        }
    }

    /// Applies every response that has arrived. Returns how many were applied.
    pub fn drain_resolutions(&mut self) -> usize {
        let mut applied = 0;
        while let Some(resolution) = self.dispatcher.try_next() {
            if self.controller.resolve(resolution) {
                applied += 1;
            }
        }
        if applied > 0 {
            info!("applied {applied} response(s)");
        }
        applied
    }

    /// Waits for the next response and applies it.
    #[cfg(test)]
    async fn settle(&mut self) {
        let resolution = self.dispatcher.next().await.unwrap();
        self.controller.resolve(resolution);
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the submission controller.
    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    /// Returns the trip screen state.
    pub fn trip(&self) -> &TripState {
        &self.trip
    }
}
