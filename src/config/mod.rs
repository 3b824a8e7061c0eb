//! Application configuration module
//!
//! Resolves the settings record from explicit values, the environment and
//! an optional `.env` file.

mod constants;
mod loader;
mod settings;

pub use constants::*;
pub use loader::{SettingsLoader, SettingsOverrides, ValueSource};
pub use settings::Settings;
