use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Unique identifier for a note.
///
/// Wraps the note's path relative to the vault root, always with `/`
/// separators so ids are stable across platforms.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Creates a new note ID from an already relative path string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds an ID from a path relative to the vault root.
    pub fn from_relative_path(path: &Path) -> Self {
        let parts: Vec<String> = path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Self(parts.join("/"))
    }

    /// Returns the underlying ID value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NoteId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NoteId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
