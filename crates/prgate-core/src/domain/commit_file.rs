//! Parsed decomposition of a changed file path.

use serde::{Deserialize, Serialize};

/// A changed file split into directory segments, optional numeric-prefix
/// marker, base name and optional extension.
///
/// # Invariants
///
/// `to_path()` reproduces the raw path the file was parsed from: segments
/// joined by `/`, then `prefix`, `base` and `.extension`. An implicit
/// marker is recorded as `Some("")` so it contributes nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitFile {
    /// Directory segments, outermost first. Empty for top-level files.
    pub dirs: Vec<String>,

    /// Numeric-prefix marker carried by the file name, if any.
    pub prefix: Option<String>,

    /// File name without marker and extension.
    pub base: String,

    /// Extension without the leading dot.
    pub extension: Option<String>,
}

impl CommitFile {
    /// Whether the file name carried the numeric-prefix marker.
    pub fn has_marker(&self) -> bool {
        self.prefix.is_some()
    }

    /// `base.extension`, the name used in rejection reasons.
    pub fn file_name(&self) -> String {
        match &self.extension {
            Some(ext) => format!("{}.{}", self.base, ext),
            None => self.base.clone(),
        }
    }

    /// Directory segments joined by `/`.
    pub fn dir_path(&self) -> String {
        self.dirs.join("/")
    }

    /// Reconstruct the original repository path.
    pub fn to_path(&self) -> String {
        let name = format!(
            "{}{}",
            self.prefix.as_deref().unwrap_or_default(),
            self.file_name()
        );
        if self.dirs.is_empty() {
            name
        } else {
            format!("{}/{}", self.dir_path(), name)
        }
    }

    /// Whether the base name starts with an ASCII digit.
    pub fn starts_with_digit(&self) -> bool {
        self.base
            .chars()
            .next()
            .map(|c| c.is_ascii_digit())
            .unwrap_or(false)
    }
}
