//! PhyRISK settings - configuration record for the PhyRISK backend
//!
//! Resolves the project name, database URL and JWT parameters once at
//! startup and hands them out as an immutable [`Settings`] value.
//!
//! # Resolution Order
//!
//! 1. explicit values ([`SettingsOverrides`])
//! 2. process environment
//! 3. the `.env` file
//! 4. built-in defaults
//!
//! # Modules
//!
//! - **config**: Settings record, loader and constants
//! - **errors**: Centralized error handling
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//!
//! # Example
//!
//! ```no_run
//! use phyrisk_settings::Settings;
//!
//! let settings = Settings::from_env()?;
//! println!("{}", settings.project_name());
//! # Ok::<(), phyrisk_settings::ConfigError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;

// Re-export commonly used types at crate root
pub use config::{Settings, SettingsLoader, SettingsOverrides};
pub use errors::{ConfigError, ConfigResult};
