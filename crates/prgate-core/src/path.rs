//! Changed-file path decomposition.
//!
//! Turns a raw repository path such as `Baekjoon/3주차/1000_alice.cpp` into a
//! [`CommitFile`]. Parsing never fails: every input string has exactly one
//! decomposition.

use crate::config::PrefixMarker;
use crate::domain::CommitFile;

/// Splits raw paths into [`CommitFile`]s.
#[derive(Debug, Clone, Default)]
pub struct PathParser {
    marker: PrefixMarker,
}

impl PathParser {
    pub fn new(marker: PrefixMarker) -> Self {
        Self { marker }
    }

    /// Decompose one raw path.
    ///
    /// The last `/`-separated segment is the file name. A name with more
    /// than one `.` is split at the last one (`a.b.cpp` → `a.b` + `cpp`);
    /// dot-files like `.gitignore` have no extension.
    pub fn parse(&self, raw: &str) -> CommitFile {
        let mut segments: Vec<String> = raw.split('/').map(str::to_string).collect();
        let name = segments.pop().unwrap_or_default();

        let (prefix, rest) = match &self.marker {
            PrefixMarker::Literal { tag } if !tag.is_empty() && name.starts_with(tag.as_str()) => {
                (Some(tag.clone()), &name[tag.len()..])
            }
            PrefixMarker::Literal { .. } => (None, name.as_str()),
            PrefixMarker::Implicit => {
                let leading_digit = name.chars().next().is_some_and(|c| c.is_ascii_digit());
                (leading_digit.then(String::new), name.as_str())
            }
        };

        let (base, extension) = split_extension(rest);

        CommitFile {
            dirs: segments,
            prefix,
            base: base.to_string(),
            extension: extension.map(str::to_string),
        }
    }

    /// Decompose every path, preserving order.
    pub fn parse_all<S: AsRef<str>>(&self, raw_paths: &[S]) -> Vec<CommitFile> {
        raw_paths.iter().map(|p| self.parse(p.as_ref())).collect()
    }
}

fn split_extension(name: &str) -> (&str, Option<&str>) {
    if name.starts_with('.') {
        return (name, None);
    }
    match name.rfind('.') {
        Some(idx) => (&name[..idx], Some(&name[idx + 1..])),
        None => (name, None),
    }
}
