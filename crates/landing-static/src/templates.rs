//! Template engine for rendering site pages.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Name of the page that receives the site context.
pub const ENTRY_PAGE: &str = "index.html";

/// Suffixes stripped from a template name to get its output name.
const TEMPLATE_SUFFIXES: &[&str] = &[".j2", ".jinja", ".jinja2"];

/// RFC 3986 unreserved characters: A-Z a-z 0-9 - . _ ~
const PATH_SEGMENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Where page templates and static assets come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TemplateSource {
    /// The embedded default theme
    #[default]
    Builtin,
    /// A template tree on disk; static dirs are looked up inside it
    Directory(PathBuf),
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
    pages: Vec<String>,
}

impl TemplateEngine {
    /// Load templates from `source`. Files under `static_dirs` are not templates.
    pub fn load(source: &TemplateSource, static_dirs: &[String]) -> Result<Self> {
        match source {
            TemplateSource::Builtin => Self::builtin(),
            TemplateSource::Directory(dir) => Self::from_dir(dir, static_dirs),
        }
    }

    /// Engine with the default landing page templates.
    pub fn builtin() -> Result<Self> {
        let mut env = new_environment();

        for &(name, source) in BUILTIN_TEMPLATES {
            env.add_template_owned(name.to_string(), source.to_string())
                .map_err(|e| Error::template(name, e))?;
        }

        Ok(Self {
            env,
            pages: vec![ENTRY_PAGE.to_string()],
        })
    }

    /// Engine over every template found below `dir`.
    ///
    /// Templates are named by their `/`-separated path relative to `dir`.
    /// Partials (file name starting with `_`) can be included or extended but
    /// are not rendered as pages. Hidden files and directories are ignored.
    /// Two pages with the same output name (`index.html` and `index.jinja`)
    /// are a configuration error.
    pub fn from_dir(dir: &Path, static_dirs: &[String]) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::io(
                "read templates from",
                dir,
                std::io::ErrorKind::NotFound.into(),
            ));
        }

        let mut env = new_environment();
        env.set_loader(minijinja::path_loader(dir));

        let mut pages = Vec::new();
        let mut outputs: HashMap<String, String> = HashMap::new();
        let walker = WalkDir::new(dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                Error::io("read templates from", path, e.into())
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(dir).unwrap_or(entry.path());
            if is_under_static_dir(relative, static_dirs) || is_partial(relative) {
                continue;
            }

            let Some(name) = template_name(relative) else {
                tracing::warn!("Skipping template with non UTF-8 path {}", relative.display());
                continue;
            };

            if let Some(first) = outputs.insert(output_name(&name), name.clone()) {
                return Err(Error::Configuration(format!(
                    "templates {} and {} both render to {}",
                    first,
                    name,
                    output_name(&name)
                )));
            }
            pages.push(name);
        }

        tracing::debug!("Found {} page templates in {}", pages.len(), dir.display());

        Ok(Self { env, pages })
    }

    /// Page templates in sorted order.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Render template `name` against `context`.
    pub fn render(&self, name: &str, context: &Value) -> Result<String> {
        let tmpl = self
            .env
            .get_template(name)
            .map_err(|e| Error::template(name, e))?;

        tmpl.render(context).map_err(|e| Error::template(name, e))
    }
}

/// Output file name for a template.
///
/// A trailing `.j2`, `.jinja` or `.jinja2` is dropped and a name left without
/// an extension gets `.html`.
pub fn output_name(template: &str) -> String {
    let stem = TEMPLATE_SUFFIXES
        .iter()
        .find_map(|suffix| template.strip_suffix(suffix))
        .unwrap_or(template);

    let file_name = stem.rsplit('/').next().unwrap_or(stem);
    if Path::new(file_name).extension().is_some() {
        stem.to_string()
    } else {
        format!("{stem}.html")
    }
}

/// Percent-encode each `/`-separated segment of a relative link.
///
/// Available to templates as the `urlpath` filter.
pub fn url_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT_SET).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

fn urlpath_filter(value: String) -> String {
    url_path(&value)
}

fn new_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_filter("urlpath", urlpath_filter);
    env.set_auto_escape_callback(|name| {
        let output = output_name(name);
        match Path::new(&output).extension().and_then(|e| e.to_str()) {
            Some("html" | "htm" | "xml") => AutoEscape::Html,
            _ => AutoEscape::None,
        }
    });
    env
}

fn template_name(relative: &Path) -> Option<String> {
    let parts: Option<Vec<&str>> = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    parts.map(|parts| parts.join("/"))
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|n| n.starts_with('.'))
}

fn is_partial(relative: &Path) -> bool {
    relative
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('_'))
}

fn is_under_static_dir(relative: &Path, static_dirs: &[String]) -> bool {
    match relative.components().next() {
        Some(Component::Normal(first)) => static_dirs.iter().any(|d| first == d.as_str()),
        _ => false,
    }
}

/// Embedded theme templates as `(name, source)`.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] =
    &[("_base.html", BASE_TEMPLATE), (ENTRY_PAGE, INDEX_TEMPLATE)];

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{% block title %}{{ name }} documentation{% endblock %}</title>
  <link rel="icon" href="images/logo.svg" type="image/svg+xml">
  <link rel="stylesheet" href="css/landing.css">
</head>
<body>
  <header class="header">
    <img class="logo" src="images/logo.svg" alt="" width="40" height="40">
    <h1 class="title">{{ name }}</h1>
  </header>
  <main class="main">
    {% block content %}{% endblock %}
  </main>
  <script src="js/landing.js"></script>
</body>
</html>
"##;

const INDEX_TEMPLATE: &str = r##"{% extends "_base.html" %}

{% block content %}
{% if versions %}
<p class="lead">Choose a documentation version</p>
<input class="version-filter" type="search" placeholder="Filter versions" hidden>
<ul class="versions">
{% for version in versions %}
  <li class="version" data-version="{{ version.name }}">
    <a href="{{ version.path|urlpath }}/index.html">{{ version.name }}</a>
  </li>
{% endfor %}
</ul>
{% else %}
<p class="empty">No documentation versions have been published yet.</p>
{% endif %}
{% endblock %}
"##;
