//! Request path → file resolution with root containment.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Where a request path led.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A regular file inside the root.
    File(PathBuf),
    /// The path leaves the root.
    Forbidden,
    /// Nothing servable at that path.
    NotFound,
}

/// Resolves request targets against a document root.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    root: PathBuf,
    index_file: String,
}

impl DocumentRoot {
    /// Canonicalize `root`. Fails if the directory does not exist.
    pub fn new(root: impl AsRef<Path>, index_file: impl Into<String>) -> io::Result<Self> {
        Ok(Self {
            root: root.as_ref().canonicalize()?,
            index_file: index_file.into(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolve a request target such as `/docs/a.html`.
    ///
    /// The first character of the target is dropped (the leading `/`); an empty
    /// remainder means the index file. The joined path is first normalised
    /// lexically, so `..` cannot climb out, then canonicalized so a symlink
    /// cannot point out either.
    pub fn resolve(&self, target: &str) -> Resolution {
        let mut chars = target.chars();
        chars.next();
        let relative = match chars.as_str() {
            "" => self.index_file.as_str(),
            rest => rest,
        };

        let joined = normalize(&self.root.join(relative));
        if !joined.starts_with(&self.root) {
            return Resolution::Forbidden;
        }

        match joined.canonicalize() {
            Ok(real) if !real.starts_with(&self.root) => Resolution::Forbidden,
            Ok(real) if real.is_file() => Resolution::File(real),
            _ => Resolution::NotFound,
        }
    }
}

/// Collapse `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
