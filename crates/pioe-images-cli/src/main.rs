//! Main CLI entry point for the pioe image builder

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

mod commands;

/// pioe image builder - build and test the pioe CI base images
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    quiet: u8,

    /// Configuration file path (global option)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build an image per configured variant
    Build {
        /// Extra variants as `<family>-<base-image>` selectors, tried
        /// in addition to each family's defaults
        #[arg(value_name = "SELECTOR")]
        selectors: Vec<String>,

        /// Recipe template path
        #[arg(short, long, value_name = "FILE", default_value = "Dockerfile.j2")]
        template: PathBuf,

        /// Render recipes but skip all docker invocations
        #[arg(long)]
        noop: bool,

        /// Build all variants concurrently instead of one at a time
        #[arg(long)]
        multi: bool,

        /// Keep a stale image instead of removing it before the build
        #[arg(long)]
        keep: bool,
    },

    /// Run each built image as a container and report failures
    Test {
        /// Report where the package volume left the build artifacts
        #[arg(long)]
        with_packages: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre for better error reports
    color_eyre::install()?;

    // Parse command line arguments
    let cli = Cli::parse();

    // Set up logging
    setup_logging(cli.verbose, cli.quiet)?;

    // Determine config path
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from("pioe-images.yaml"));

    // Handle commands
    let result = match cli.command {
        Commands::Build { selectors, template, noop, multi, keep } => {
            let command =
                commands::BuildCommand::new(config_path, template, selectors, noop, multi, keep);
            command.execute().await
        }

        Commands::Test { with_packages } => {
            let command = commands::TestCommand::new(config_path, with_packages);
            command.execute().await
        }
    };

    // Handle command execution result
    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn setup_logging(verbose: u8, quiet: u8) -> Result<()> {
    let log_level = match (verbose, quiet) {
        (0, 0) => "info",
        (1, 0) => "debug",
        (2, 0) => "trace",
        (v, 0) if v > 2 => "trace",
        (0, 1) => "warn",
        (0, 2) => "error",
        (0, q) if q > 2 => "off",
        _ => "info", // If both are set, default to info
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    Ok(())
}
