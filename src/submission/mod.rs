//! Submission lifecycle: one trigger, one request, one outcome.

mod controller;
mod dispatch;

pub use controller::{
    GENERIC_FAILURE, RenderView, Resolution, Submit, SubmissionController, SubmissionState, Ticket,
};
pub use dispatch::Dispatcher;
