//! Path sandboxing against the vault root.
//!
//! Every caller-supplied path goes through [`PathGuard`] before it touches the
//! filesystem. Paths are normalized lexically, checked for containment by
//! comparing components (so `/vault-other` is never inside `/vault`), and then
//! checked again against the canonical location of their deepest existing
//! ancestor so a symlinked directory cannot lead outside the root.

use std::io;
use std::path::{Component, Path, PathBuf};

use super::VaultError;

/// Suffix every note path must carry.
pub const MARKDOWN_EXT: &str = ".md";

#[derive(Debug, Clone)]
pub struct PathGuard {
    /// Canonical vault root.
    root: PathBuf,
}

impl PathGuard {
    /// `root` must already be canonical.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a note path to an absolute path strictly inside the root.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, VaultError> {
        if path.is_empty() {
            return Err(VaultError::InvalidPath(path.to_string()));
        }

        let normalized = normalize(path)?;
        if normalized.as_os_str().is_empty() {
            return Err(VaultError::InvalidPath(path.to_string()));
        }

        let full = self.root.join(&normalized);
        if !full.starts_with(&self.root) || full == self.root {
            return Err(VaultError::PathTraversal(path.to_string()));
        }

        if !is_markdown(&full) {
            return Err(VaultError::NotMarkdown(path.to_string()));
        }

        self.check_real_location(&full, path)?;
        Ok(full)
    }

    /// Resolve a directory prefix for List/Search.
    ///
    /// Empty input is the root itself; there is no suffix requirement.
    pub fn resolve_dir(&self, subpath: &str) -> Result<PathBuf, VaultError> {
        if subpath.is_empty() {
            return Ok(self.root.clone());
        }

        let normalized = normalize(subpath)?;
        let full = self.root.join(&normalized);
        if !full.starts_with(&self.root) {
            return Err(VaultError::PathTraversal(subpath.to_string()));
        }

        self.check_real_location(&full, subpath)?;
        Ok(full)
    }

    /// Convert an absolute path below the root into a `/`-separated
    /// vault-relative string.
    pub fn relative(&self, full: &Path) -> Option<String> {
        let rel = full.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = rel.components().map(|c| c.as_os_str().to_string_lossy()).collect();
        Some(parts.join("/"))
    }

    // Symlinks inside the vault may point anywhere; whatever part of the path
    // already exists must still resolve below the root.
    fn check_real_location(&self, full: &Path, original: &str) -> Result<(), VaultError> {
        let Some(existing) = full.ancestors().find(|p| p.symlink_metadata().is_ok()) else {
            return Ok(());
        };

        match existing.canonicalize() {
            Ok(real) if real.starts_with(&self.root) => Ok(()),
            Ok(_) => Err(VaultError::PathTraversal(original.to_string())),
            // dangling symlink: nothing to read through it
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(VaultError::PathTraversal(original.to_string()))
            }
            Err(e) => Err(VaultError::io("resolve", existing, e)),
        }
    }
}

/// Lexically normalize a vault-relative path.
///
/// A leading `/` is treated as the vault root. `..` that would climb above
/// the root is a traversal attempt.
fn normalize(path: &str) -> Result<PathBuf, VaultError> {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();

    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(VaultError::PathTraversal(path.to_string()));
                }
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    Ok(parts.iter().collect())
}

pub(crate) fn is_markdown(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(MARKDOWN_EXT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn guard() -> (TempDir, PathGuard) {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        (dir, PathGuard::new(root))
    }

    #[rstest]
    #[case("note.md", "note.md")]
    #[case("./note.md", "note.md")]
    #[case("a/b/note.md", "a/b/note.md")]
    #[case("a/../note.md", "note.md")]
    #[case("a/./b/../note.md", "a/note.md")]
    #[case("/note.md", "note.md")]
    fn test_resolve_accepts(#[case] input: &str, #[case] expected: &str) {
        let (_dir, guard) = guard();
        let full = guard.resolve(input).unwrap();
        assert_eq!(full, guard.root().join(expected));
    }

    #[rstest]
    #[case("../note.md")]
    #[case("../../etc/passwd.md")]
    #[case("a/../../note.md")]
    #[case("./../note.md")]
    fn test_resolve_rejects_traversal(#[case] input: &str) {
        let (_dir, guard) = guard();
        assert!(matches!(guard.resolve(input), Err(VaultError::PathTraversal(_))));
    }

    #[rstest]
    #[case("note.txt")]
    #[case("note")]
    #[case("note.MD")]
    #[case("dir.md/note.markdown")]
    fn test_resolve_rejects_non_markdown(#[case] input: &str) {
        let (_dir, guard) = guard();
        assert!(matches!(guard.resolve(input), Err(VaultError::NotMarkdown(_))));
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("/")]
    #[case("a/..")]
    fn test_resolve_rejects_empty(#[case] input: &str) {
        let (_dir, guard) = guard();
        assert!(matches!(guard.resolve(input), Err(VaultError::InvalidPath(_))));
    }

    #[test]
    fn test_dotdot_inside_a_name_is_not_traversal() {
        let (_dir, guard) = guard();
        let full = guard.resolve("notes..old.md").unwrap();
        assert!(full.ends_with("notes..old.md"));
    }

    #[test]
    fn test_sibling_directory_with_shared_prefix_is_outside() {
        let parent = TempDir::new().unwrap();
        let root = parent.path().join("vault");
        let sibling = parent.path().join("vault-other");
        fs::create_dir(&root).unwrap();
        fs::create_dir(&sibling).unwrap();

        let guard = PathGuard::new(root.canonicalize().unwrap());
        let sibling = sibling.canonicalize().unwrap();

        assert!(!sibling.starts_with(guard.root()));
        assert!(matches!(
            guard.resolve("../vault-other/note.md"),
            Err(VaultError::PathTraversal(_))
        ));
    }

    #[test]
    fn test_resolve_dir() {
        let (_dir, guard) = guard();
        assert_eq!(guard.resolve_dir("").unwrap(), guard.root());
        assert_eq!(guard.resolve_dir(".").unwrap(), guard.root());
        assert_eq!(guard.resolve_dir("projects/").unwrap(), guard.root().join("projects"));
        assert!(matches!(guard.resolve_dir(".."), Err(VaultError::PathTraversal(_))));
        assert!(matches!(guard.resolve_dir("a/../../b"), Err(VaultError::PathTraversal(_))));
    }

    #[test]
    fn test_relative_uses_forward_slashes() {
        let (_dir, guard) = guard();
        let full = guard.root().join("a").join("b").join("note.md");
        assert_eq!(guard.relative(&full).as_deref(), Some("a/b/note.md"));
        assert_eq!(guard.relative(Path::new("/elsewhere/note.md")), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_cannot_escape() {
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.md"), "secret").unwrap();

        let (_dir, guard) = guard();
        std::os::unix::fs::symlink(outside.path(), guard.root().join("link")).unwrap();

        assert!(matches!(guard.resolve("link/secret.md"), Err(VaultError::PathTraversal(_))));
        assert!(matches!(guard.resolve("link/new.md"), Err(VaultError::PathTraversal(_))));
        assert!(matches!(guard.resolve_dir("link"), Err(VaultError::PathTraversal(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_within_vault_is_allowed() {
        let (_dir, guard) = guard();
        fs::create_dir(guard.root().join("real")).unwrap();
        fs::write(guard.root().join("real/note.md"), "hi").unwrap();
        std::os::unix::fs::symlink(guard.root().join("real"), guard.root().join("alias"))
            .unwrap();

        let full = guard.resolve("alias/note.md").unwrap();
        assert_eq!(full, guard.root().join("alias/note.md"));
    }
}
