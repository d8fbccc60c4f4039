use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{ApprovedChanges, ReviewError};
use crate::store::frontmatter::NoteDocument;
use crate::utils::write_atomic;
use crate::{AnalyzerConfig, Header, NoteId, NoteStore};

/// How approved changes are written to note files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Copy each note to a sibling backup before its first rewrite.
    pub backup: bool,
    /// Extension that replaces the note's own for the backup copy.
    pub backup_extension: String,
}

impl ApplyOptions {
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self {
            backup: config.backup_original,
            backup_extension: config.backup_extension.clone(),
        }
    }

    fn backup_path(&self, path: &Path) -> PathBuf {
        path.with_extension(&self.backup_extension)
    }
}

/// Outcome of applying a parsed review document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Notes rewritten with their approved fields.
    pub updated: Vec<NoteId>,
    /// Notes whose changes were dropped because reading or writing failed.
    pub failed: usize,
    /// Sections that matched no note, or more than one.
    pub unresolved: usize,
}

/// Writes every approved section into its note and refreshes the stored
/// header.
///
/// Failures are per note: they are logged, counted, and the remaining
/// sections are still applied.
pub fn apply_approvals(
    store: &mut NoteStore,
    approvals: &[ApprovedChanges],
    options: &ApplyOptions,
) -> ApplyReport {
    let mut report = ApplyReport::default();

    for changes in approvals {
        let id = match resolve(store, changes) {
            Ok(id) => id,
            Err(e) => {
                warn!("skipping review section: {e}");
                report.unresolved += 1;
                continue;
            }
        };
        let Some(note) = store.get_mut(&id) else {
            report.unresolved += 1;
            continue;
        };

        match apply_changes(&note.path, changes, options) {
            Ok(header) => {
                note.header = header;
                debug!(note = %id, fields = changes.fields.len(), "metadata updated");
                report.updated.push(id);
            }
            Err(e) => {
                warn!(note = %id, "changes dropped: {e}");
                report.failed += 1;
            }
        }
    }

    info!(
        updated = report.updated.len(),
        failed = report.failed,
        unresolved = report.unresolved,
        "review applied"
    );
    report
}

/// Finds the note a section refers to: by id first, then by exact title.
fn resolve(store: &NoteStore, changes: &ApprovedChanges) -> Result<NoteId, ReviewError> {
    if let Some(id) = &changes.note_id
        && store.get(id).is_some()
    {
        return Ok(id.clone());
    }

    match store.find_by_title(&changes.title).as_slice() {
        [note] => Ok(note.id.clone()),
        [] => Err(ReviewError::UnknownNote(changes.title.clone())),
        many => Err(ReviewError::AmbiguousTitle {
            title: changes.title.clone(),
            count: many.len(),
        }),
    }
}

/// Merges `changes` into the header of the note file at `path`.
///
/// The file is re-read so edits made since the scan are kept. The body is
/// written back unchanged and the file is replaced atomically. With
/// backups enabled, the file is first copied to its backup path unless
/// that backup already exists.
///
/// # Errors
///
/// Returns `ReviewError::Io` when the note or its backup cannot be read or
/// written, and `ReviewError::Header` when the current header is not a
/// mapping. The note file is left untouched in both cases.
pub fn apply_changes(
    path: &Path,
    changes: &ApprovedChanges,
    options: &ApplyOptions,
) -> Result<Header, ReviewError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ReviewError::Io { path, source }
    };
    let header_err = |source| ReviewError::Header {
        path: path.to_path_buf(),
        source,
    };

    let content = fs::read_to_string(path).map_err(io_err(path))?;
    let mut doc = NoteDocument::parse(&content).map_err(header_err)?;
    for (field, value) in &changes.fields {
        doc.header.apply(*field, value);
    }
    let rendered = doc.render().map_err(header_err)?;

    if options.backup {
        let backup = options.backup_path(path);
        if !backup.exists() {
            fs::copy(path, &backup).map_err(io_err(&backup))?;
            debug!(backup = %backup.display(), "original note backed up");
        }
    }

    write_atomic(path, &rendered).map_err(io_err(path))?;
    Ok(doc.header)
}
