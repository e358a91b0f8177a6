//! Reusable TUI widgets.

pub mod form;
pub mod status_bar;
pub mod summary;

pub use form::{FormField, draw_form, form_height};
pub use status_bar::{StatusBarContext, draw_status_bar};
pub use summary::{draw_summary, format_cost, summary_lines};
