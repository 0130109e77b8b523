//! Path resolution against the CI workspace root

use std::path::{Component, Path, PathBuf};

/// Resolves paths against the workspace root and back again
#[derive(Debug, Clone)]
pub struct WorkspacePaths {
    root: PathBuf,
}

impl WorkspacePaths {
    /// Create a resolver for the given (absolute) workspace root
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the workspace root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a path to absolute form.
    ///
    /// Absolute paths are returned untouched. Relative paths are joined to the
    /// workspace root and normalized lexically, so `./` prefixes disappear and
    /// `..` segments collapse. The file system is never consulted.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return PathBuf::new();
        }
        if path.is_absolute() {
            return path.to_path_buf();
        }
        normalize(&self.root.join(path))
    }

    /// Convert a path inside the workspace to its `./`-prefixed display form.
    ///
    /// Paths that are relative already, or that point outside the workspace,
    /// come back unchanged.
    pub fn to_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        match path.strip_prefix(&self.root) {
            Ok(rest) if rest.as_os_str().is_empty() => PathBuf::from("."),
            Ok(rest) => Path::new(".").join(rest),
            Err(_) => path.to_path_buf(),
        }
    }

    /// Whether a resolved path is the workspace root itself
    pub fn is_root(&self, path: impl AsRef<Path>) -> bool {
        self.resolve(path) == self.root
    }
}

/// Lexically normalize a path: drop `.` segments and fold `..` into the
/// preceding segment. `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}
