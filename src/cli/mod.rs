//! CLI module - Command-line interface for the settings tool.
//!
//! Provides commands for:
//! - `show` - Print the resolved settings
//! - `check` - Validate the resolved settings

pub mod args;

pub use args::{Cli, Commands};
