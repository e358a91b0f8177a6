//! TUI screen implementations.

pub mod help;
pub mod trip;

pub use help::{HelpState, draw_help};
pub use trip::{TripState, draw_trip};
