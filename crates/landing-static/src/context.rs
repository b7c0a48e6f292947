//! Data handed to the templates.

use serde::Serialize;
use serde_json::{Map, Value};

/// Site name used when none is configured.
pub const DEFAULT_SITE_NAME: &str = "stub";

/// A documentation version found under the docs directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionEntry {
    /// Directory name, used as the version label (e.g. `v1.2.0`, `latest`)
    pub name: String,
    /// Link from the output directory to the version's docs root
    pub path: String,
}

/// Context for the landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteContext {
    /// Site display name
    pub name: String,
    /// Versions in directory listing order
    pub versions: Vec<VersionEntry>,
    /// Extra user data, merged into the template context by [`SiteContext::to_value`]
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl SiteContext {
    pub fn new(name: impl Into<String>, versions: Vec<VersionEntry>) -> Self {
        Self {
            name: name.into(),
            versions,
            extra: Map::new(),
        }
    }

    /// Attach extra key/value data. `name` and `versions` cannot be overridden.
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    /// Build the template context value.
    pub fn to_value(&self) -> minijinja::Value {
        minijinja::context! {
            name => &self.name,
            versions => &self.versions,
            ..minijinja::Value::from_serialize(&self.extra)
        }
    }
}

impl Default for SiteContext {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_NAME, Vec::new())
    }
}
