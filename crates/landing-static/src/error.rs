//! Errors raised while discovering versions and rendering the site.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while generating a landing page.
///
/// Every variant is fatal to the run. Nothing is retried and no cleanup of a
/// partially written output directory is attempted.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Docs directory not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to render template {name}: {source}")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn template(name: impl Into<String>, source: minijinja::Error) -> Self {
        Self::Template {
            name: name.into(),
            source,
        }
    }
}

/// Stage of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Resolving or creating the output directory
    Output,
    /// Scanning the docs directory for versions
    Scan,
    /// Expanding templates and copying assets
    Render,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Output => "output",
            Phase::Scan => "scan",
            Phase::Render => "render",
        })
    }
}

/// An [`Error`] tagged with the phase it happened in.
#[derive(Debug, thiserror::Error)]
#[error("{phase} phase failed")]
pub struct GenerateError {
    pub phase: Phase,
    #[source]
    pub source: Error,
}

impl Phase {
    pub(crate) fn wrap(self) -> impl FnOnce(Error) -> GenerateError {
        move |source| GenerateError {
            phase: self,
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
