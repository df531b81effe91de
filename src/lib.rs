//! Blog client - session, content and routing logic for the personal blog
//! platform.
//!
//! This library exposes modules for the `blog` binary and for integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod router;
pub mod state;
pub mod traits;
