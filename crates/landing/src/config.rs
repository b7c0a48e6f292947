//! Configuration file (landing.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use landing_static::assets::default_static_dirs;
use landing_static::{GenerateOptions, TemplateSource, DEFAULT_SITE_NAME};
use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "landing.toml";

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    site: SiteConfig,
    #[serde(default)]
    build: BuildSettings,
    /// Extra values passed to the landing page
    #[serde(default)]
    context: toml::Table,

    /// Directory relative paths in the file are resolved against
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
struct SiteConfig {
    #[serde(default = "default_name")]
    name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BuildSettings {
    outpath: Option<PathBuf>,
    docspath: Option<PathBuf>,
    templates: Option<PathBuf>,
    #[serde(default = "default_static_dirs")]
    static_dirs: Vec<String>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            outpath: None,
            docspath: None,
            templates: None,
            static_dirs: default_static_dirs(),
        }
    }
}

fn default_name() -> String {
    DEFAULT_SITE_NAME.to_string()
}

/// Values given on the command line. They take precedence over the file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub outpath: Option<PathBuf>,
    pub docspath: Option<PathBuf>,
    pub templates: Option<PathBuf>,
    pub name: Option<String>,
}

impl ConfigFile {
    /// Load the config file.
    ///
    /// An explicitly given file must exist. Without one, `landing.toml` in the
    /// working directory is used if present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config = Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Merge the file with command line overrides.
    pub fn into_options(self, overrides: Overrides) -> Result<GenerateOptions> {
        let base = self.base_dir;
        let from_file = |p: Option<PathBuf>| p.map(|p| base.join(p));

        let templates = overrides
            .templates
            .or_else(|| from_file(self.build.templates))
            .map(TemplateSource::Directory)
            .unwrap_or_default();

        let extra = match serde_json::to_value(self.context)? {
            serde_json::Value::Object(map) => map,
            _ => anyhow::bail!("[context] must be a table"),
        };

        Ok(GenerateOptions {
            outpath: overrides.outpath.or_else(|| from_file(self.build.outpath)),
            docspath: overrides.docspath.or_else(|| from_file(self.build.docspath)),
            templates,
            static_dirs: self.build.static_dirs,
            name: overrides.name.unwrap_or(self.site.name),
            extra,
        })
    }
}
