#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Terminal client for a fuel-aware route optimization service.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod submission;
pub mod tui;
