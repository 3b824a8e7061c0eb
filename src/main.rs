//! PhyRISK settings - CLI entry point
//!
//! Loads the settings once and dispatches to the requested command.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phyrisk_settings::{
    cli::{Cli, Commands},
    commands,
};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    // Load configuration; a value that cannot be coerced aborts startup
    let settings = match cli.loader().load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(code = e.code(), "Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?settings, "Configuration loaded");

    // Execute command
    let result = match &cli.command {
        Commands::Show(args) => commands::show::execute(args, &settings),
        Commands::Check => commands::check::execute(&settings),
    };

    // Handle errors
    if let Err(e) = result {
        tracing::error!(code = e.code(), "Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
