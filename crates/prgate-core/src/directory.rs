//! Author identity lookup.
//!
//! Rules that compare names (`labels`, `file_username`) need the author's
//! display name. The mapping is injected through [`UserDirectory`] so hosts
//! and tests can supply their own.

use std::collections::BTreeMap;

/// Maps a platform login to a display name.
pub trait UserDirectory: Send + Sync {
    /// Display name for `id`, or `None` if the id is not a known member.
    fn lookup(&self, id: &str) -> Option<String>;
}

/// In-memory directory keyed by lowercased login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticDirectory {
    members: BTreeMap<String, String>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `login → display name` pairs. Logins are case-insensitive.
    pub fn from_members<I, K, V>(members: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            members: members
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
                .collect(),
        }
    }

    /// Add one member (builder pattern).
    pub fn with_member(mut self, id: &str, display_name: &str) -> Self {
        self.members
            .insert(id.to_lowercase(), display_name.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl UserDirectory for StaticDirectory {
    fn lookup(&self, id: &str) -> Option<String> {
        self.members.get(&id.to_lowercase()).cloned()
    }
}
