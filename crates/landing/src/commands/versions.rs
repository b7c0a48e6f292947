//! Print discovered versions without rendering.

use std::path::Path;

use anyhow::{Context, Result};
use landing_static::{discover, SystemTempDir, VersionScanner};

use crate::config::{ConfigFile, Overrides};

/// Run the versions command.
pub fn run(config_path: Option<&Path>, overrides: Overrides) -> Result<()> {
    let options = ConfigFile::load(config_path)
        .and_then(|config| config.into_options(overrides))
        .context("config phase failed")?;

    let scanner = VersionScanner::from_env().context("failed to read working directory")?;
    let (_, versions) = discover(&options, &scanner, &SystemTempDir)?;

    println!("{}", serde_json::to_string_pretty(&versions)?);

    Ok(())
}
