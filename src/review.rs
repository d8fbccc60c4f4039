//! The review file: proposals out, approvals back in.
//!
//! A review document is Markdown. Each note gets a section:
//!
//! ```text
//! ## Nota: Guerra do Paraguai
//! **Arquivo:** `historia/guerra.md`
//! **Confiança:** 0.85
//!
//! - **Área:** História do Brasil
//!   - Decisão: [ ]
//! - **Relevância CACD:** 4/5
//!   - Decisão: [ ]
//!
//! ---
//! ```
//!
//! The operator approves a field by turning its `[ ]` into `[x]`. Only the
//! field line directly above a checked decision is applied.

mod apply;
mod parser;
mod writer;

use std::path::PathBuf;

pub use apply::{ApplyOptions, ApplyReport, apply_approvals, apply_changes};
pub use parser::parse_review;
pub use writer::{ReviewEntry, render_review};

use crate::store::frontmatter::HeaderError;
use crate::{FieldValue, HeaderField, NoteId};

/// Error raised by the review file protocol.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("review file not found: {0}")]
    MissingFile(PathBuf),
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unexpected header in {path}: {source}")]
    Header {
        path: PathBuf,
        #[source]
        source: HeaderError,
    },
    #[error("no note matches review section {0:?}")]
    UnknownNote(String),
    #[error("{count} notes are titled {title:?}")]
    AmbiguousTitle { title: String, count: usize },
}

/// Fields approved for one review section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovedChanges {
    /// Title from the `## Nota:` line.
    pub title: String,
    /// Id from the `**Arquivo:**` line, when present.
    pub note_id: Option<NoteId>,
    /// Approved values, at most one per field.
    pub fields: Vec<(HeaderField, FieldValue)>,
}

impl ApprovedChanges {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            note_id: None,
            fields: Vec::new(),
        }
    }

    /// Records an approved value, replacing an earlier one for the same field.
    pub fn approve(&mut self, field: HeaderField, value: FieldValue) {
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn get(&self, field: HeaderField) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether `other` refers to the same note as this section.
    fn same_target(&self, other: &ApprovedChanges) -> bool {
        match (&self.note_id, &other.note_id) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.title == other.title,
            _ => false,
        }
    }

    /// Folds a later section for the same note into this one.
    fn merge(&mut self, later: ApprovedChanges) {
        for (field, value) in later.fields {
            self.approve(field, value);
        }
    }
}
