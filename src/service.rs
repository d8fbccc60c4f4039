use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::report::{StudyStats, render_report};
use crate::review::{ApplyOptions, ReviewEntry, ReviewError, apply_approvals, parse_review, render_review};
use crate::utils::{local_now, write_atomic};
use crate::{AnalyzerConfig, NoteId, NoteStore, Suggestion, SuggestionEngine, Taxonomy};

/// Result of writing a review file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackSummary {
    pub path: PathBuf,
    /// Number of note sections written.
    pub notes: usize,
}

/// Result of processing a review file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSummary {
    pub updated: usize,
    pub failed: usize,
    pub unresolved: usize,
    /// Where the consumed review file now lives.
    pub processed_path: PathBuf,
}

/// Service layer running the analyzer's operations over one vault.
///
/// MetadataAnalyzer owns the configuration, the loaded notes and the
/// suggestion engine. It is UI-independent: the CLI only picks which
/// operation to run and prints the summary.
///
/// # Examples
///
/// ```
/// use cacd::{AnalyzerConfig, MetadataAnalyzer, Taxonomy};
///
/// # fn main() -> anyhow::Result<()> {
/// let vault = tempfile::tempdir()?;
/// std::fs::write(vault.path().join("mercosul.md"), "O MERCOSUL e a integração regional.")?;
///
/// let taxonomy = Taxonomy::from_yaml_str("Política Internacional:\n  Integração Regional: [MERCOSUL]\n")?;
/// let mut analyzer = MetadataAnalyzer::new(vault.path(), &taxonomy, AnalyzerConfig::default());
/// assert_eq!(analyzer.scan()?, 1);
///
/// let summary = analyzer.generate_feedback()?.expect("one note to review");
/// assert_eq!(summary.notes, 1);
/// # Ok(())
/// # }
/// ```
pub struct MetadataAnalyzer {
    config: AnalyzerConfig,
    store: NoteStore,
    engine: SuggestionEngine,
}

impl MetadataAnalyzer {
    /// Creates an analyzer for the vault at `root`. No file is read until
    /// [`scan`](Self::scan).
    pub fn new(root: impl Into<PathBuf>, taxonomy: &Taxonomy, config: AnalyzerConfig) -> Self {
        let store = NoteStore::new(root, &config);
        let engine = SuggestionEngine::new(taxonomy, &config);
        Self {
            config,
            store,
            engine,
        }
    }

    /// Creates an analyzer, loading the taxonomy from `taxonomy_path`.
    ///
    /// An unreadable taxonomy is logged and replaced by an empty one, so
    /// every note classifies as unmatched.
    pub fn open(root: impl Into<PathBuf>, taxonomy_path: &Path, config: AnalyzerConfig) -> Self {
        let taxonomy = Taxonomy::load_or_empty(taxonomy_path);
        Self::new(root, &taxonomy, config)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn feedback_path(&self) -> PathBuf {
        self.store.root().join(&self.config.feedback_file)
    }

    pub fn processed_feedback_path(&self) -> PathBuf {
        self.store.root().join(self.config.processed_feedback_file())
    }

    pub fn report_path(&self) -> PathBuf {
        self.store.root().join(&self.config.report_file)
    }

    /// Loads every note in the vault. Returns the number of notes loaded.
    pub fn scan(&mut self) -> Result<usize> {
        self.store.scan().context("failed to scan vault")
    }

    /// Suggestion for a single loaded note.
    pub fn analyze_note(&self, id: &NoteId) -> Option<Suggestion> {
        self.store
            .get(id)
            .map(|note| self.engine.analyze(note, &self.store))
    }

    /// Suggestions worth reviewing: notes without complete metadata whose
    /// classification found an area, in store order.
    pub fn pending_suggestions(&self) -> Vec<Suggestion> {
        self.store
            .notes()
            .filter(|note| !note.has_complete_metadata())
            .map(|note| self.engine.analyze(note, &self.store))
            .filter(Suggestion::has_area)
            .collect()
    }

    /// Writes the review file for every pending suggestion.
    ///
    /// Returns `None`, and leaves any existing review file alone, when
    /// there is nothing to review.
    pub fn generate_feedback(&self) -> Result<Option<FeedbackSummary>> {
        let suggestions = self.pending_suggestions();
        if suggestions.is_empty() {
            info!("every note already has complete metadata");
            return Ok(None);
        }

        let entries: Vec<ReviewEntry<'_>> = suggestions
            .iter()
            .filter_map(|suggestion| {
                self.store
                    .get(&suggestion.note_id)
                    .map(|note| ReviewEntry { note, suggestion })
            })
            .collect();
        let document = render_review(&entries, local_now());

        let path = self.feedback_path();
        write_atomic(&path, &document)
            .with_context(|| format!("failed to write review file {}", path.display()))?;

        info!(path = %path.display(), notes = entries.len(), "review file written");
        Ok(Some(FeedbackSummary {
            path,
            notes: entries.len(),
        }))
    }

    /// Applies the approved fields of the review file, then renames it to
    /// its processed name. An earlier processed file is kept; the new one
    /// gets a numbered name.
    ///
    /// Notes that fail to update are counted in the summary; they do not
    /// fail the operation.
    ///
    /// # Errors
    ///
    /// Fails with [`ReviewError::MissingFile`] if there is no review file,
    /// or if the file cannot be read or renamed.
    pub fn process_feedback(&mut self) -> Result<ProcessSummary> {
        let path = self.feedback_path();
        if !path.is_file() {
            return Err(ReviewError::MissingFile(path).into());
        }

        let content = fs::read_to_string(&path)
            .map_err(|source| ReviewError::Io {
                path: path.clone(),
                source,
            })
            .context("failed to read review file")?;
        let approvals = parse_review(&content);
        info!(sections = approvals.len(), "approved review sections");

        let report = apply_approvals(
            &mut self.store,
            &approvals,
            &ApplyOptions::from_config(&self.config),
        );

        let processed_path = self.free_processed_feedback_path();
        fs::rename(&path, &processed_path).with_context(|| {
            format!(
                "failed to rename {} to {}",
                path.display(),
                processed_path.display()
            )
        })?;

        Ok(ProcessSummary {
            updated: report.updated.len(),
            failed: report.failed,
            unresolved: report.unresolved,
            processed_path,
        })
    }

    /// First processed review name not yet on disk, so earlier processed
    /// reviews are never overwritten.
    fn free_processed_feedback_path(&self) -> PathBuf {
        let base = self.processed_feedback_path();
        if !base.exists() {
            return base;
        }
        let path = (2..)
            .map(|n| {
                self.store
                    .root()
                    .join(self.config.numbered_processed_feedback_file(n))
            })
            .find(|path| !path.exists())
            .unwrap_or(base);
        warn!(
            existing = %self.processed_feedback_path().display(),
            path = %path.display(),
            "processed review file already exists, keeping both"
        );
        path
    }

    /// Statistics over the headers of the loaded notes.
    pub fn study_stats(&self) -> StudyStats {
        StudyStats::collect(&self.store, &self.config)
    }

    /// Writes the study report and returns its path.
    pub fn generate_report(&self) -> Result<PathBuf> {
        let document = render_report(&self.study_stats(), local_now());
        let path = self.report_path();
        write_atomic(&path, &document)
            .with_context(|| format!("failed to write report {}", path.display()))?;

        info!(path = %path.display(), "study report written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests;
