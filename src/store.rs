//! In-memory collection of the vault's notes.

pub mod frontmatter;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::{AnalyzerConfig, Header, Note, NoteBuilder, NoteId};

use frontmatter::{parse_header, split};

/// Error raised while loading notes.
#[derive(Debug, thiserror::Error)]
pub enum NoteLoadError {
    #[error("vault root not found: {0}")]
    MissingRoot(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is outside the vault root")]
    OutsideRoot(PathBuf),
}

/// Which files under the root count as notes.
#[derive(Debug, Clone)]
struct ScanRules {
    extension: String,
    template_marker: String,
    /// Generated artifacts at the vault root that must not be read as notes.
    excluded: Vec<String>,
    config: AnalyzerConfig,
}

impl ScanRules {
    fn from_config(config: &AnalyzerConfig) -> Self {
        Self {
            extension: config.note_extension.clone(),
            template_marker: config.template_marker.to_lowercase(),
            excluded: vec![config.feedback_file.clone(), config.report_file.clone()],
            config: config.clone(),
        }
    }

    fn is_note(&self, relative: &Path) -> bool {
        let Some(name) = relative.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let has_extension = relative
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension));

        let is_template = !self.template_marker.is_empty()
            && name.to_lowercase().contains(&self.template_marker);

        has_extension
            && !name.starts_with('.')
            && !is_template
            && !self.excluded.iter().any(|ex| Path::new(ex) == relative)
            && !self.config.is_processed_feedback_file(relative)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Owns every note loaded from the vault, keyed and iterated by id.
///
/// # Examples
///
/// ```
/// use cacd::{AnalyzerConfig, NoteStore};
///
/// # fn main() -> anyhow::Result<()> {
/// let dir = tempfile::tempdir()?;
/// std::fs::write(dir.path().join("nota.md"), "---\ntitle: Nota\n---\nCorpo")?;
///
/// let mut store = NoteStore::new(dir.path(), &AnalyzerConfig::default());
/// assert_eq!(store.scan()?, 1);
/// assert_eq!(store.find_by_title("Nota").len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct NoteStore {
    root: PathBuf,
    rules: ScanRules,
    notes: BTreeMap<NoteId, Note>,
}

impl NoteStore {
    pub fn new(root: impl Into<PathBuf>, config: &AnalyzerConfig) -> Self {
        Self {
            root: root.into(),
            rules: ScanRules::from_config(config),
            notes: BTreeMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Recursively loads every note under the root, replacing any
    /// previously loaded notes.
    ///
    /// Hidden files and directories, template files and the analyzer's own
    /// output files are skipped. A file that fails to load is logged and
    /// skipped; the scan goes on.
    ///
    /// # Errors
    ///
    /// Returns `NoteLoadError::MissingRoot` if the root is not a directory.
    pub fn scan(&mut self) -> Result<usize, NoteLoadError> {
        if !self.root.is_dir() {
            return Err(NoteLoadError::MissingRoot(self.root.clone()));
        }
        self.notes.clear();

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable vault entry: {e}");
                    continue;
                }
            };
            // Symlinked notes count; the link target's type decides.
            if !entry.path().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            if !self.rules.is_note(relative) {
                debug!(path = %relative.display(), "skipping non-note file");
                continue;
            }

            match self.load_note(entry.path()) {
                Ok(note) => self.insert(note),
                Err(e) => warn!("failed to load note: {e}"),
            }
        }

        info!(count = self.notes.len(), root = %self.root.display(), "notes loaded");
        Ok(self.notes.len())
    }

    /// Reads one note file.
    ///
    /// A header that is not valid YAML, or not a mapping, is logged and
    /// treated as empty; the note is then loaded with its raw content as
    /// body.
    ///
    /// # Errors
    ///
    /// Returns `NoteLoadError` if the file cannot be read or lies outside
    /// the root.
    pub fn load_note(&self, path: &Path) -> Result<Note, NoteLoadError> {
        let relative = path
            .strip_prefix(&self.root)
            .map_err(|_| NoteLoadError::OutsideRoot(path.to_path_buf()))?;
        let io_err = |source: std::io::Error| NoteLoadError::Io {
            path: path.to_path_buf(),
            source,
        };

        let content = fs::read_to_string(path).map_err(io_err)?;
        let modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(io_err)?;

        let raw = split(&content);
        let (header, body) = match raw.header.map(parse_header) {
            Some(Ok(header)) => (header, raw.body),
            Some(Err(e)) => {
                warn!(path = %relative.display(), "malformed header, loading as plain text: {e}");
                (Header::new(), content.as_str())
            }
            None => (Header::new(), raw.body),
        };

        Ok(NoteBuilder::new()
            .id(NoteId::from_relative_path(relative))
            .header(header)
            .body(body.trim())
            .path(path)
            .modified(OffsetDateTime::from(modified))
            .build())
    }

    /// Adds or replaces a note.
    pub fn insert(&mut self, note: Note) {
        self.notes.insert(note.id.clone(), note);
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn get_mut(&mut self, id: &NoteId) -> Option<&mut Note> {
        self.notes.get_mut(id)
    }

    /// Notes in id order.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    /// Every note whose title is exactly `title`, in id order.
    pub fn find_by_title(&self, title: &str) -> Vec<&Note> {
        self.notes.values().filter(|n| n.title == title).collect()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
