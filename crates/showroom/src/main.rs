// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Showroom - AI visit analysis for car showroom CRMs.
//!
//! This is the binary entry point for the analysis service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod analyze;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use showroom_config::{ConfigError, ShowroomConfig};

/// Showroom - AI visit analysis for car showroom CRMs.
#[derive(Parser, Debug)]
#[command(name = "showroom", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the usual locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP gateway.
    Serve,
    /// Analyze a single visit request read from a JSON file.
    Analyze {
        /// Path to a JSON visit analysis request.
        #[arg(long)]
        file: PathBuf,
        /// Skip the model and score with the rule-based fallback.
        #[arg(long)]
        offline: bool,
    },
    /// Print the effective configuration with secrets redacted.
    Config,
}

fn load_config(path: Option<&PathBuf>) -> Result<ShowroomConfig, Vec<ConfigError>> {
    match path {
        Some(path) => showroom_config::load_and_validate_path(path),
        None => showroom_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            showroom_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Analyze { file, offline }) => {
            analyze::run_analyze(config, &file, offline).await
        }
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("showroom: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn print_config(config: &ShowroomConfig) -> Result<(), showroom_core::ShowroomError> {
    let rendered = toml::to_string_pretty(&config.redacted())
        .map_err(|e| showroom_core::ShowroomError::Config(format!("cannot render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}
