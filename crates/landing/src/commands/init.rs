//! Write the built-in theme out for customizing.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use landing_static::assets::AssetPipeline;
use landing_static::BUILTIN_TEMPLATES;

use crate::config::DEFAULT_CONFIG_FILE;

/// Run the init command.
pub fn run(dir: &Path, yes: bool) -> Result<()> {
    tracing::info!("Writing built-in theme to {}", dir.display());

    let files = BUILTIN_TEMPLATES
        .iter()
        .chain(AssetPipeline::builtin())
        .copied();

    let mut written = 0;
    for (relative, contents) in files {
        let path = dir.join(relative);
        if path.exists() && !yes {
            tracing::warn!("{} already exists. Use --yes to overwrite.", path.display());
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
        written += 1;
    }

    // Point a fresh config at the new templates
    let config_path = Path::new(DEFAULT_CONFIG_FILE);
    if !config_path.exists() {
        let templates = toml::Value::String(dir.to_string_lossy().into_owned());
        let config = format!("{DEFAULT_CONFIG}templates = {templates}\n");
        fs::write(config_path, config).context("Failed to write landing.toml")?;
        tracing::info!("Created {}", DEFAULT_CONFIG_FILE);
    }

    tracing::info!("Initialization complete, {} files written", written);
    tracing::info!("Run 'landing build --docspath <dir>' to render the page.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Landing page configuration

[site]
# Name shown in the page title and header
name = "stub"

[context]
# Extra values available in the index template
# tagline = "..."

[build]
# Directory with one subdirectory per documentation version
# docspath = "docs/build"

# Output directory (defaults to a stub-landing directory in the system temp dir)
# outpath = "out"

# Directories copied verbatim from the template directory
static_dirs = ["css", "js", "images"]

# Template directory
"#;
