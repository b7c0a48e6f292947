//! Output directory resolution.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directory created under the temp dir when no output path is given.
pub const FALLBACK_DIR_NAME: &str = "stub-landing";

/// Source of the process-wide temporary directory.
pub trait TempDirProvider {
    fn temp_dir(&self) -> PathBuf;
}

/// Uses [`std::env::temp_dir`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTempDir;

impl TempDirProvider for SystemTempDir {
    fn temp_dir(&self) -> PathBuf {
        env::temp_dir()
    }
}

/// A resolved output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    path: PathBuf,
    fallback: bool,
}

impl OutputDir {
    /// Resolve the output directory without touching the filesystem beyond a
    /// metadata check of an explicit path.
    ///
    /// An explicit path is used verbatim. Without one, the result is
    /// `<temp>/stub-landing`. Two runs without an explicit path share that
    /// directory.
    pub fn resolve(outpath: Option<&Path>, temp: &dyn TempDirProvider) -> Result<Self> {
        match outpath {
            Some(path) => {
                if path.exists() && !path.is_dir() {
                    return Err(Error::Configuration(format!(
                        "output path {} exists and is not a directory",
                        path.display()
                    )));
                }
                Ok(Self {
                    path: path.to_path_buf(),
                    fallback: false,
                })
            }
            None => Ok(Self {
                path: temp.temp_dir().join(FALLBACK_DIR_NAME),
                fallback: true,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this is the temp-dir fallback.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Create the directory if needed.
    ///
    /// The fallback creates only its own directory; the temp dir itself must
    /// already exist. An explicit path is created with its parents.
    pub fn ensure(&self) -> Result<()> {
        if self.path.is_dir() {
            return Ok(());
        }

        let created = if self.fallback {
            fs::create_dir(&self.path)
        } else {
            fs::create_dir_all(&self.path)
        };

        match created {
            Ok(()) => {
                tracing::debug!("Created output directory {}", self.path.display());
                Ok(())
            }
            // Another run created it first
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && self.path.is_dir() => Ok(()),
            Err(e) => Err(Error::io("create output directory", &self.path, e)),
        }
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FixedTemp(PathBuf);

    impl TempDirProvider for FixedTemp {
        fn temp_dir(&self) -> PathBuf {
            self.0.clone()
        }
    }

    #[test]
    fn explicit_path_is_used_verbatim() {
        let out =
            OutputDir::resolve(Some(Path::new("./site/out")), &FixedTemp("/tmp".into())).unwrap();
        assert_eq!(out.path(), Path::new("./site/out"));
        assert!(!out.is_fallback());
    }

    #[test]
    fn falls_back_to_temp_dir() {
        let out = OutputDir::resolve(None, &FixedTemp("/var/tmp".into())).unwrap();
        assert_eq!(out.path(), Path::new("/var/tmp/stub-landing"));
        assert!(out.is_fallback());
    }

    #[test]
    fn resolving_does_not_create_anything() {
        let temp = tempfile::tempdir().unwrap();
        let out = OutputDir::resolve(None, &FixedTemp(temp.path().to_path_buf())).unwrap();
        assert!(!out.path().exists());
    }

    #[test]
    fn ensure_creates_fallback_once() {
        let temp = tempfile::tempdir().unwrap();
        let out = OutputDir::resolve(None, &FixedTemp(temp.path().to_path_buf())).unwrap();

        out.ensure().unwrap();
        assert!(temp.path().join(FALLBACK_DIR_NAME).is_dir());

        // second run reuses it
        out.ensure().unwrap();
    }

    #[test]
    fn fallback_does_not_create_missing_temp_parents() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("no-such-tmp");
        let out = OutputDir::resolve(None, &FixedTemp(missing.clone())).unwrap();

        let err = out.ensure().unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!missing.exists());
    }

    #[test]
    fn explicit_path_gets_parents() {
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("a/b/site");
        let out = OutputDir::resolve(Some(target.as_path()), &SystemTempDir).unwrap();

        out.ensure().unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn rejects_existing_file_as_output() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("index.html");
        fs::write(&file, "<html></html>").unwrap();

        let err = OutputDir::resolve(Some(file.as_path()), &SystemTempDir).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
