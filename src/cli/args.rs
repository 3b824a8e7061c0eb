//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{SettingsLoader, SettingsOverrides, DEFAULT_ENV_FILE};

/// PhyRISK settings - inspect and check the resolved configuration
#[derive(Parser, Debug)]
#[command(name = "phyrisk-settings")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Environment file to read
    #[arg(long, global = true, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Do not read any environment file
    #[arg(long, global = true, conflicts_with = "env_file")]
    pub no_env_file: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resolved settings (secret redacted)
    Show(ShowArgs),

    /// Check the resolved settings against their constraints
    Check,
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Explicit values. These take precedence over the environment and the env file.
#[derive(Args, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Project display name
    #[arg(long, global = true)]
    pub project_name: Option<String>,

    /// Database connection URL
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// JWT signing secret
    #[arg(long, global = true)]
    pub jwt_secret_key: Option<String>,

    /// JWT signing algorithm (e.g. HS256)
    #[arg(long, global = true)]
    pub jwt_algorithm: Option<String>,

    /// Access token lifetime in minutes
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub access_token_expire_minutes: Option<i64>,
}

impl From<OverrideArgs> for SettingsOverrides {
    fn from(args: OverrideArgs) -> Self {
        Self {
            project_name: args.project_name,
            database_url: args.database_url,
            jwt_secret_key: args.jwt_secret_key,
            jwt_algorithm: args.jwt_algorithm,
            access_token_expire_minutes: args.access_token_expire_minutes,
        }
    }
}

impl Cli {
    /// Build the settings loader described by the global flags.
    pub fn loader(&self) -> SettingsLoader {
        let loader = if self.no_env_file {
            SettingsLoader::new().without_env_file()
        } else {
            SettingsLoader::new().env_file(&self.env_file)
        };

        loader.overrides(SettingsOverrides::from(self.overrides.clone()))
    }
}
