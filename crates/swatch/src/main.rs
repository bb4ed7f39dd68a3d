//! Swatch CLI - component documentation builder.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod watcher;

#[derive(Parser)]
#[command(name = "swatch")]
#[command(about = "Build component documentation from YAML specs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to swatch.toml config file
    #[arg(short, long, default_value = swatch_static::CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a config file, layout templates and an example component
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Build the documentation site
    Build {
        /// Output directory (defaults to config or "dist/docs")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail when a component template cannot be rendered
        #[arg(long)]
        strict: bool,
    },

    /// Rebuild whenever docs or templates change
    Watch,

    /// Preview the built documentation
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve (defaults to the configured output)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Build { output, strict } => {
            commands::build::run(&cli.config, output, strict)?;
        }
        Commands::Watch => {
            commands::watch::run(&cli.config).await?;
        }
        Commands::Serve { port, dir, no_open } => {
            commands::serve::run(&cli.config, port, dir, !no_open).await?;
        }
    }

    Ok(())
}
