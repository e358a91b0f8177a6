//! Actions returned by screen event handlers.

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these to drive the submission controller and
/// navigate between screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Send the current trip to the route service.
    Submit,
    /// Quit the application.
    Quit,
}
