//! Documentation version discovery.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::context::VersionEntry;
use crate::error::{Error, Result};
use crate::paths::relative_path;

/// An immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// Base name
    pub name: OsString,
    /// Full path (the listed directory joined with `name`)
    pub path: PathBuf,
    /// Whether the entry is a directory, following symlinks
    pub is_dir: bool,
}

/// Capability to list the children of a directory.
pub trait DirectoryLister {
    /// List the immediate children of `dir` in listing order.
    ///
    /// Returns [`Error::NotFound`] when `dir` is missing or not a directory.
    fn list(&self, dir: &Path) -> Result<Vec<ListedEntry>>;
}

/// Lists directories on the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list(&self, dir: &Path) -> Result<Vec<ListedEntry>> {
        match fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(Error::NotFound {
                    path: dir.to_path_buf(),
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound {
                    path: dir.to_path_buf(),
                })
            }
            Err(e) => return Err(Error::io("read", dir, e)),
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| Error::io("list", dir, e))? {
            let entry = entry.map_err(|e| Error::io("list", dir, e))?;
            let path = entry.path();
            // fs::metadata follows symlinks; dangling links count as files
            let is_dir = fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false);

            entries.push(ListedEntry {
                name: entry.file_name(),
                path,
                is_dir,
            });
        }

        Ok(entries)
    }
}

/// Finds documentation version directories.
#[derive(Debug, Clone)]
pub struct VersionScanner<L = FsLister> {
    lister: L,
    cwd: PathBuf,
}

impl VersionScanner<FsLister> {
    /// Scanner over the real filesystem, resolving relative paths against the
    /// process working directory.
    pub fn from_env() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| Error::io("read", "current directory", e))?;
        Ok(Self::new(FsLister, cwd))
    }
}

impl<L: DirectoryLister> VersionScanner<L> {
    pub fn new(lister: L, cwd: impl Into<PathBuf>) -> Self {
        Self {
            lister,
            cwd: cwd.into(),
        }
    }

    /// Scan `docspath` for version directories, linking each from `outpath`.
    ///
    /// No `docspath` means no versions. A `docspath` that does not exist is an
    /// error, not an empty list.
    pub fn scan(&self, docspath: Option<&Path>, outpath: &Path) -> Result<Vec<VersionEntry>> {
        let Some(docspath) = docspath else {
            tracing::debug!("No docs path given, version list is empty");
            return Ok(Vec::new());
        };

        let mut versions = Vec::new();

        for entry in self.lister.list(docspath)? {
            if !entry.is_dir {
                tracing::debug!("Skipping non-directory {}", entry.path.display());
                continue;
            }

            let name = match entry.name.into_string() {
                Ok(name) => name,
                Err(name) => {
                    tracing::warn!("Skipping version directory with non UTF-8 name {:?}", name);
                    continue;
                }
            };

            let path = relative_path(outpath, &entry.path, &self.cwd)?;
            tracing::debug!("Found version {} at {}", name, path);

            versions.push(VersionEntry { name, path });
        }

        Ok(versions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// In-memory directory tree.
    #[derive(Default)]
    struct MemoryLister {
        dirs: HashMap<PathBuf, Vec<(&'static str, bool)>>,
    }

    impl MemoryLister {
        fn with_dir(mut self, dir: &str, children: Vec<(&'static str, bool)>) -> Self {
            self.dirs.insert(PathBuf::from(dir), children);
            self
        }
    }

    impl DirectoryLister for MemoryLister {
        fn list(&self, dir: &Path) -> Result<Vec<ListedEntry>> {
            let children = self.dirs.get(dir).ok_or_else(|| Error::NotFound {
                path: dir.to_path_buf(),
            })?;

            Ok(children
                .iter()
                .map(|(name, is_dir)| ListedEntry {
                    name: OsString::from(name),
                    path: dir.join(name),
                    is_dir: *is_dir,
                })
                .collect())
        }
    }

    fn entry(name: &str, path: &str) -> VersionEntry {
        VersionEntry {
            name: name.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn no_docspath_means_no_versions() {
        let scanner = VersionScanner::new(MemoryLister::default(), "/work");
        let versions = scanner.scan(None, Path::new("/tmp/site")).unwrap();
        assert!(versions.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn skips_files_and_keeps_listing_order() {
        let lister = MemoryLister::default().with_dir(
            "docs",
            vec![("v1.1", true), ("README.md", false), ("v1.0", true)],
        );
        let scanner = VersionScanner::new(lister, "/work");

        let versions = scanner
            .scan(Some(Path::new("docs")), Path::new("./out"))
            .unwrap();

        assert_eq!(
            versions,
            vec![entry("v1.1", "../docs/v1.1"), entry("v1.0", "../docs/v1.0")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn links_resolve_back_to_version_dirs() {
        let lister = MemoryLister::default().with_dir("/docs", vec![("v1", true)]);
        let scanner = VersionScanner::new(lister, "/work");

        let versions = scanner
            .scan(Some(Path::new("/docs")), Path::new("/tmp/site"))
            .unwrap();

        assert_eq!(versions, vec![entry("v1", "../../docs/v1")]);
        let resolved =
            crate::paths::absolutize(&Path::new("/tmp/site").join(&versions[0].path), Path::new("/"))
                .unwrap();
        assert_eq!(resolved, PathBuf::from("/docs/v1"));
    }

    #[test]
    fn missing_docspath_is_not_found() {
        let scanner = VersionScanner::new(MemoryLister::default(), "/work");
        let err = scanner
            .scan(Some(Path::new("nowhere")), Path::new("out"))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn fs_lister_reports_missing_dir() {
        let temp = tempfile::tempdir().unwrap();
        let err = FsLister.list(&temp.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn fs_lister_rejects_file_as_docspath() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("docs");
        fs::write(&file, "not a directory").unwrap();

        let err = FsLister.list(&file).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn scans_real_directories() {
        let temp = tempfile::tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(docs.join("v1.0")).unwrap();
        fs::create_dir_all(docs.join("v1.1")).unwrap();
        fs::write(docs.join("README.md"), "# Docs").unwrap();

        let scanner = VersionScanner::new(FsLister, temp.path());
        let mut versions = scanner.scan(Some(&docs), &temp.path().join("out")).unwrap();
        versions.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            versions,
            vec![entry("v1.0", "../docs/v1.0"), entry("v1.1", "../docs/v1.1")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinks_to_directories_only() {
        use std::os::unix::fs::symlink;

        let temp = tempfile::tempdir().unwrap();
        let docs = temp.path().join("docs");
        let builds = temp.path().join("builds");
        fs::create_dir_all(&docs).unwrap();
        fs::create_dir_all(builds.join("2.0")).unwrap();
        fs::write(builds.join("notes.txt"), "notes").unwrap();

        symlink(builds.join("2.0"), docs.join("latest")).unwrap();
        symlink(builds.join("notes.txt"), docs.join("notes")).unwrap();
        symlink(builds.join("gone"), docs.join("dangling")).unwrap();

        let scanner = VersionScanner::new(FsLister, temp.path());
        let versions = scanner.scan(Some(&docs), &temp.path().join("out")).unwrap();

        assert_eq!(versions, vec![entry("latest", "../docs/latest")]);
    }
}
