//! Landing page build command.

use std::path::Path;

use anyhow::{Context, Result};
use landing_static::{generate, SystemTempDir, VersionScanner};

use crate::config::{ConfigFile, Overrides};

/// Run the build command.
pub fn run(config_path: Option<&Path>, overrides: Overrides) -> Result<()> {
    tracing::info!("Building landing page...");

    let options = ConfigFile::load(config_path)
        .and_then(|config| config.into_options(overrides))
        .context("config phase failed")?;

    let scanner = VersionScanner::from_env().context("failed to read working directory")?;
    let result = generate(options, &scanner, &SystemTempDir)?;

    tracing::info!(
        "Rendered {} pages and {} assets in {}ms",
        result.pages,
        result.assets,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());
    if let Some(docs) = &result.docspath {
        tracing::info!("Linked docs: {}", docs.display());
    }

    Ok(())
}
