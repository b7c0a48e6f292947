//! Lexical path arithmetic.
//!
//! The output directory may not exist yet when version links are computed, so
//! nothing here consults the filesystem. Symlinks are not resolved.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Make `path` absolute against `cwd` and fold `.` and `..` components.
pub fn absolutize(path: &Path, cwd: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    if !joined.is_absolute() {
        return Err(Error::Configuration(format!(
            "cannot resolve {} to an absolute path",
            path.display()
        )));
    }

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            // `..` at the root stays at the root
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }

    Ok(normalized)
}

/// Compute the link from directory `from` to `to`, joined with `/`.
///
/// Both paths are made absolute against `cwd` first. Returns `"."` when they
/// name the same directory.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use landing_static::paths::relative_path;
///
/// let rel = relative_path(Path::new("out"), Path::new("docs/v1.0"), Path::new("/work")).unwrap();
/// assert_eq!(rel, "../docs/v1.0");
/// ```
pub fn relative_path(from: &Path, to: &Path, cwd: &Path) -> Result<String> {
    let from = absolutize(from, cwd)?;
    let to = absolutize(to, cwd)?;

    let from_parts: Vec<Component<'_>> = from.components().collect();
    let to_parts: Vec<Component<'_>> = to.components().collect();

    if prefix_of(&from_parts) != prefix_of(&to_parts) {
        return Err(Error::Configuration(format!(
            "no relative path from {} to {}",
            from.display(),
            to.display()
        )));
    }

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<&str> = vec![".."; from_parts.len() - common];
    for component in &to_parts[common..] {
        let segment = component.as_os_str().to_str().ok_or_else(|| {
            Error::Configuration(format!("path is not UTF-8: {}", to.display()))
        })?;
        segments.push(segment);
    }

    if segments.is_empty() {
        Ok(".".to_owned())
    } else {
        Ok(segments.join("/"))
    }
}

fn prefix_of<'a>(parts: &[Component<'a>]) -> Option<&'a OsStr> {
    parts.iter().find_map(|c| match c {
        Component::Prefix(prefix) => Some(prefix.as_os_str()),
        _ => None,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rel(from: &str, to: &str) -> String {
        relative_path(Path::new(from), Path::new(to), Path::new("/work")).unwrap()
    }

    #[test]
    fn folds_dot_components() {
        let path = absolutize(Path::new("a/./b/../c"), Path::new("/work")).unwrap();
        assert_eq!(path, PathBuf::from("/work/a/c"));
    }

    #[test]
    fn parent_of_root_is_root() {
        let path = absolutize(Path::new("/../../x"), Path::new("/work")).unwrap();
        assert_eq!(path, PathBuf::from("/x"));
    }

    #[test]
    fn rejects_relative_cwd() {
        let err = absolutize(Path::new("docs"), Path::new("not/absolute")).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn sibling_directories() {
        assert_eq!(rel("/tmp/site", "/tmp/docs/v1"), "../docs/v1");
    }

    #[test]
    fn unrelated_trees() {
        assert_eq!(rel("/tmp/site", "/docs/v1"), "../../docs/v1");
    }

    #[test]
    fn nested_below_output() {
        assert_eq!(rel("/srv/www", "/srv/www/docs/latest"), "docs/latest");
    }

    #[test]
    fn same_directory() {
        assert_eq!(rel("/srv/www", "/srv/www/"), ".");
    }

    #[test]
    fn relative_inputs_use_cwd() {
        assert_eq!(rel("./out", "docs/v1.0"), "../docs/v1.0");
        assert_eq!(rel("out/../site", "/work/docs/v1.1"), "../docs/v1.1");
    }

    #[test]
    fn resolving_the_link_returns_to_the_target() {
        let cases = [
            ("/tmp/site", "/docs/v1"),
            ("/a/b/c", "/a/x/y"),
            ("/", "/docs/latest"),
            ("/docs/latest/deep", "/docs"),
        ];

        for (from, to) in cases {
            let link = rel(from, to);
            let resolved = absolutize(&Path::new(from).join(&link), Path::new("/")).unwrap();
            assert_eq!(resolved, PathBuf::from(to), "link {link} from {from}");
        }
    }
}
