//! One-shot landing page generation.

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::assets::default_static_dirs;
use crate::context::{SiteContext, VersionEntry, DEFAULT_SITE_NAME};
use crate::error::{GenerateError, Phase};
use crate::output::{OutputDir, TempDirProvider};
use crate::renderer::{RenderJob, RenderReport, SiteRenderer};
use crate::scanner::{DirectoryLister, VersionScanner};
use crate::templates::TemplateSource;

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Output directory; falls back to `<temp>/stub-landing`
    pub outpath: Option<PathBuf>,

    /// Directory with one subdirectory per documentation version
    pub docspath: Option<PathBuf>,

    /// Template and static asset source
    pub templates: TemplateSource,

    /// Directories copied verbatim from the template source
    pub static_dirs: Vec<String>,

    /// Site display name
    pub name: String,

    /// Extra data for the entry page
    pub extra: Map<String, Value>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            outpath: None,
            docspath: None,
            templates: TemplateSource::Builtin,
            static_dirs: default_static_dirs(),
            name: DEFAULT_SITE_NAME.to_string(),
            extra: Map::new(),
        }
    }
}

/// Resolve the output directory and scan for versions, writing nothing.
pub fn discover<L: DirectoryLister>(
    options: &GenerateOptions,
    scanner: &VersionScanner<L>,
    temp: &dyn TempDirProvider,
) -> Result<(OutputDir, Vec<VersionEntry>), GenerateError> {
    let output =
        OutputDir::resolve(options.outpath.as_deref(), temp).map_err(Phase::Output.wrap())?;
    if output.is_fallback() {
        tracing::info!("No output path given, using {}", output.path().display());
    }

    let versions = scanner
        .scan(options.docspath.as_deref(), output.path())
        .map_err(Phase::Scan.wrap())?;

    tracing::info!("Found {} documentation versions", versions.len());
    for version in &versions {
        tracing::info!("  {} -> {}", version.name, version.path);
    }

    Ok((output, versions))
}

/// Resolve the output directory, scan for versions and render the site.
///
/// The output directory is only created after the scan succeeded, so a
/// missing docs directory leaves it untouched.
pub fn generate<L: DirectoryLister>(
    options: GenerateOptions,
    scanner: &VersionScanner<L>,
    temp: &dyn TempDirProvider,
) -> Result<RenderReport, GenerateError> {
    let (output, versions) = discover(&options, scanner, temp)?;

    output.ensure().map_err(Phase::Output.wrap())?;

    let site = SiteContext::new(options.name, versions).with_extra(options.extra);
    let job = RenderJob {
        outpath: output.into_path(),
        docspath: options.docspath,
        templates: options.templates,
        static_dirs: options.static_dirs,
    };

    SiteRenderer::new(job, &site)
        .render()
        .map_err(Phase::Render.wrap())
}
