//! CLI for the blog client.
//!
//! - Argument parsing ([`args`])
//! - Command execution against a [`crate::app::BlogApp`] ([`commands`])
//! - Version display ([`version`])
//!
//! # Usage
//!
//! ```ignore
//! use blog_client::cli::{parse_args, run_command, CliCommand};
//!
//! let command = parse_args(std::env::args());
//! run_command(&app, command, &mut std::io::stdout()).await?;
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use commands::run_command;
pub use version::{version_string, VERSION};
