//! Site renderer.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use minijinja::{context, Value};

use crate::assets::{default_static_dirs, write_file, AssetPipeline};
use crate::context::SiteContext;
use crate::error::Result;
use crate::templates::{output_name, TemplateEngine, TemplateSource, ENTRY_PAGE};

/// Everything needed for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    /// Output directory
    pub outpath: PathBuf,

    /// Directory the versions were scanned from. Only reported back; the
    /// version links are already in the site context.
    pub docspath: Option<PathBuf>,

    /// Template and static asset source
    pub templates: TemplateSource,

    /// Directories copied verbatim from the template source
    pub static_dirs: Vec<String>,
}

impl RenderJob {
    /// Job with the built-in theme and the default static dirs.
    pub fn new(outpath: impl Into<PathBuf>) -> Self {
        Self {
            outpath: outpath.into(),
            docspath: None,
            templates: TemplateSource::Builtin,
            static_dirs: default_static_dirs(),
        }
    }
}

/// Result of a render pass.
#[derive(Debug)]
pub struct RenderReport {
    /// Number of pages rendered
    pub pages: usize,

    /// Number of static files written
    pub assets: usize,

    /// Total render time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,

    /// Docs directory the site links into, if any
    pub docspath: Option<PathBuf>,
}

/// Renders a site once.
///
/// [`SiteRenderer::render`] consumes the renderer: it either produces a
/// report or fails, and in both cases the renderer is gone. Retrying means
/// building a new one.
pub struct SiteRenderer {
    job: RenderJob,
    contexts: BTreeMap<String, Value>,
}

impl SiteRenderer {
    /// Create a renderer whose entry page receives `site`.
    pub fn new(job: RenderJob, site: &SiteContext) -> Self {
        let mut contexts = BTreeMap::new();
        contexts.insert(ENTRY_PAGE.to_string(), site.to_value());

        Self { job, contexts }
    }

    /// Give page `page` (an output name such as `about/index.html`) its own context.
    pub fn with_page_context(mut self, page: impl Into<String>, context: Value) -> Self {
        self.contexts.insert(page.into(), context);
        self
    }

    /// Render every page and copy the static assets.
    ///
    /// Pages are expanded in memory before anything is written, so a template
    /// error leaves the output directory untouched. A failure while copying or
    /// writing leaves whatever was already written in place.
    pub fn render(self) -> Result<RenderReport> {
        let start = Instant::now();
        let Self { job, contexts } = self;

        match &job.docspath {
            Some(docs) => tracing::debug!(
                "Rendering {} for versions in {}",
                job.outpath.display(),
                docs.display()
            ),
            None => tracing::debug!("Rendering {} without versions", job.outpath.display()),
        }

        let engine = TemplateEngine::load(&job.templates, &job.static_dirs)?;

        let mut rendered = Vec::with_capacity(engine.pages().len());
        for template in engine.pages() {
            let page = output_name(template);
            let html = match contexts.get(&page) {
                Some(ctx) => engine.render(template, ctx)?,
                None => engine.render(template, &context! {})?,
            };
            tracing::debug!("Rendered {} from {}", page, template);
            rendered.push((page, html));
        }

        let assets = match &job.templates {
            TemplateSource::Builtin => AssetPipeline::write_builtin(&job.outpath, &job.static_dirs)?,
            TemplateSource::Directory(dir) => {
                let mut copied = 0;
                for static_dir in &job.static_dirs {
                    copied +=
                        AssetPipeline::copy_dir(&dir.join(static_dir), &job.outpath.join(static_dir))?;
                }
                copied
            }
        };

        for (page, html) in &rendered {
            write_file(&job.outpath.join(page), html.as_bytes())?;
        }

        Ok(RenderReport {
            pages: rendered.len(),
            assets,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: job.outpath,
            docspath: job.docspath,
        })
    }
}
