//! Static landing page generator for versioned documentation.
//!
//! Scans a directory of built documentation versions and renders a landing
//! page linking to each of them.

pub mod assets;
pub mod context;
pub mod error;
pub mod output;
pub mod paths;
pub mod pipeline;
pub mod renderer;
pub mod scanner;
pub mod templates;

pub use context::{SiteContext, VersionEntry, DEFAULT_SITE_NAME};
pub use error::{Error, GenerateError, Phase, Result};
pub use output::{OutputDir, SystemTempDir, TempDirProvider, FALLBACK_DIR_NAME};
pub use pipeline::{discover, generate, GenerateOptions};
pub use renderer::{RenderJob, RenderReport, SiteRenderer};
pub use scanner::{DirectoryLister, FsLister, ListedEntry, VersionScanner};
pub use templates::{TemplateEngine, TemplateSource, BUILTIN_TEMPLATES};
