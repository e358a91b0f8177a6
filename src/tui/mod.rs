//! TUI: App state, event loop, screens, widgets.

pub mod action;
pub mod app;
pub mod error;
pub mod screens;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use error::AppError;
