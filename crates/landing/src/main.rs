//! Landing CLI - static landing page for versioned documentation.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "landing")]
#[command(about = "Generate a static landing page for versioned documentation")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (defaults to landing.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the landing page
    Build {
        /// Output directory (defaults to a stub-landing directory in the system temp dir)
        #[arg(long)]
        outpath: Option<PathBuf>,

        /// Directory containing one subdirectory per documentation version
        #[arg(long)]
        docspath: Option<PathBuf>,

        /// Template directory (defaults to the built-in theme)
        #[arg(short, long)]
        templates: Option<PathBuf>,

        /// Site name shown on the page
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Print the discovered versions as JSON
    Versions {
        /// Output directory the version links are relative to
        #[arg(long)]
        outpath: Option<PathBuf>,

        /// Directory containing one subdirectory per documentation version
        #[arg(long)]
        docspath: Option<PathBuf>,
    },

    /// Write the built-in theme to a directory for customizing
    Init {
        /// Target template directory
        #[arg(short, long, default_value = "templates")]
        dir: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout is reserved for command output
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Build {
            outpath,
            docspath,
            templates,
            name,
        } => {
            let overrides = config::Overrides {
                outpath,
                docspath,
                templates,
                name,
            };
            commands::build::run(cli.config.as_deref(), overrides)?;
        }
        Commands::Versions { outpath, docspath } => {
            let overrides = config::Overrides {
                outpath,
                docspath,
                ..Default::default()
            };
            commands::versions::run(cli.config.as_deref(), overrides)?;
        }
        Commands::Init { dir, yes } => {
            commands::init::run(&dir, yes)?;
        }
    }

    Ok(())
}
