//! rental-stats - A rental market report dashboard backed by automation webhooks.
//!
//! This crate provides:
//! - A stateless relay that forwards report and contact requests to external webhooks
//! - The dashboard page and a typed client carrying the same session state
//! - Environment configuration and logging setup

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod relay;
pub mod server;
