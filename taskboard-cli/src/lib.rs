//! Taskboard command-line front end.
//!
//! The binary in `main.rs` parses arguments, loads [`config::Settings`] and
//! dispatches to [`commands`].

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Commands};
pub use config::{ConfigError, Settings};
