//! Static asset handling.
//!
//! Assets are copied byte for byte. Nothing is minified or validated.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Static directories copied by default.
pub const DEFAULT_STATIC_DIRS: &[&str] = &["css", "js", "images"];

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Embedded theme assets as `(relative path, contents)`.
    pub fn builtin() -> &'static [(&'static str, &'static str)] {
        BUILTIN_ASSETS
    }

    /// Write the embedded assets whose top-level directory is in `static_dirs`.
    ///
    /// A listed dir with no embedded assets is an error, the same as a
    /// missing source dir in [`AssetPipeline::copy_dir`]. All dirs are checked
    /// before anything is written. Returns the number of files written.
    pub fn write_builtin(output_dir: &Path, static_dirs: &[String]) -> Result<usize> {
        if let Some(dir) = static_dirs
            .iter()
            .find(|d| !BUILTIN_ASSETS.iter().any(|&(relative, _)| top_dir(relative) == d.as_str()))
        {
            return Err(Error::io(
                "copy static directory",
                dir,
                std::io::ErrorKind::NotFound.into(),
            ));
        }

        let mut written = 0;

        for &(relative, contents) in BUILTIN_ASSETS {
            if !static_dirs.iter().any(|d| d == top_dir(relative)) {
                continue;
            }

            write_file(&output_dir.join(relative), contents.as_bytes())?;
            written += 1;
        }

        Ok(written)
    }

    /// Copy `source` into `target` recursively, preserving relative paths.
    ///
    /// Existing files in `target` are overwritten, others are left alone.
    /// Returns the number of files copied.
    pub fn copy_dir(source: &Path, target: &Path) -> Result<usize> {
        if !source.is_dir() {
            return Err(Error::io(
                "copy static directory",
                source,
                std::io::ErrorKind::NotFound.into(),
            ));
        }

        let mut copied = 0;

        for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(source).to_path_buf();
                Error::io("copy static directory", path, e.into())
            })?;

            let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
            let destination = target.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&destination)
                    .map_err(|e| Error::io("create directory", &destination, e))?;
            } else {
                fs::copy(entry.path(), &destination)
                    .map_err(|e| Error::io("copy", entry.path(), e))?;
                copied += 1;
            }
        }

        tracing::debug!("Copied {} files from {}", copied, source.display());

        Ok(copied)
    }
}

/// Write `contents` to `path`, creating parent directories.
pub(crate) fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io("create directory", parent, e))?;
    }
    fs::write(path, contents).map_err(|e| Error::io("write", path, e))
}

fn top_dir(relative: &str) -> &str {
    relative.split('/').next().unwrap_or(relative)
}

/// Default static dirs as owned strings.
pub fn default_static_dirs() -> Vec<String> {
    DEFAULT_STATIC_DIRS.iter().map(|d| d.to_string()).collect()
}

const BUILTIN_ASSETS: &[(&str, &str)] = &[
    ("css/landing.css", DEFAULT_CSS),
    ("images/logo.svg", DEFAULT_LOGO),
    ("js/landing.js", DEFAULT_JS),
];

const DEFAULT_CSS: &str = r#"/* Documentation landing page */

:root {
  --background: #ffffff;
  --foreground: #1f2933;
  --muted: #f5f7fa;
  --muted-foreground: #616e7c;
  --border: #e4e7eb;
  --primary: #0b6bcb;
  --primary-foreground: #ffffff;
  --radius: 0.375rem;
}

@media (prefers-color-scheme: dark) {
  :root {
    --background: #111418;
    --foreground: #e4e7eb;
    --muted: #1c2128;
    --muted-foreground: #9aa5b1;
    --border: #2d333b;
    --primary: #4c9aff;
  }
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

.header {
  display: flex;
  align-items: center;
  gap: 1rem;
  padding: 2rem;
  border-bottom: 1px solid var(--border);
  background: var(--muted);
}

.title {
  font-size: 1.75rem;
  font-weight: 700;
}

.main {
  max-width: 640px;
  margin: 0 auto;
  padding: 2rem;
}

.lead {
  color: var(--muted-foreground);
  margin-bottom: 1rem;
}

.version-filter {
  width: 100%;
  padding: 0.5rem 0.75rem;
  margin-bottom: 1rem;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  background: var(--background);
  color: var(--foreground);
}

.versions {
  list-style: none;
}

.version a {
  display: block;
  padding: 0.75rem 1rem;
  margin-bottom: 0.5rem;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  color: var(--foreground);
  text-decoration: none;
  transition: background 0.15s, color 0.15s;
}

.version a:hover,
.version a:focus-visible {
  background: var(--primary);
  color: var(--primary-foreground);
}

.empty {
  color: var(--muted-foreground);
  font-style: italic;
}
"#;

const DEFAULT_JS: &str = r#"// Documentation landing page
(function() {
  'use strict';

  const items = Array.from(document.querySelectorAll('.version'));
  const filter = document.querySelector('.version-filter');

  // Only worth filtering a long list
  if (!filter || items.length < 6) return;

  filter.hidden = false;
  filter.addEventListener('input', () => {
    const query = filter.value.trim().toLowerCase();
    items.forEach(item => {
      const name = (item.dataset.version || '').toLowerCase();
      item.hidden = query !== '' && !name.includes(query);
    });
  });
})();
"#;

const DEFAULT_LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 40 40" width="40" height="40">
  <rect x="4" y="6" width="24" height="30" rx="3" fill="#0b6bcb"/>
  <rect x="12" y="2" width="24" height="30" rx="3" fill="#4c9aff"/>
  <path d="M17 11h14M17 17h14M17 23h9" stroke="#ffffff" stroke-width="2" stroke-linecap="round"/>
</svg>
"##;
