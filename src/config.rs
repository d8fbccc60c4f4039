//! Run configuration shared by every component.
//!
//! Settings start from [`AnalyzerConfig::default`], may be overlaid from
//! `CACD_*` environment variables, and the CLI applies its flags last.

use std::env;
use std::path::Path;
use std::str::FromStr;

use crate::autotagger::DEFAULT_MAX_TAGS;

/// Error raised when an environment override cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Configuration for scanning, suggesting and applying metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Notes with a shorter body are listed as thin in the study report.
    pub min_content_length: usize,
    /// Maximum number of tags proposed per note.
    pub max_tags: usize,
    /// Minimum confidence for a relevance score above 1.
    pub relevance_threshold: f64,
    /// Maximum number of related notes proposed per note.
    pub max_connections: usize,
    /// Review file name, relative to the vault root.
    pub feedback_file: String,
    /// Study report file name, relative to the vault root.
    pub report_file: String,
    /// Keep a one-time copy of each note before its first rewrite.
    pub backup_original: bool,
    /// Extension given to note backups.
    pub backup_extension: String,
    /// Extension of note files.
    pub note_extension: String,
    /// Files whose name contains this (case-insensitive) are skipped.
    pub template_marker: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_content_length: 50,
            max_tags: DEFAULT_MAX_TAGS,
            relevance_threshold: 0.3,
            max_connections: 3,
            feedback_file: "cacd_feedback.md".to_string(),
            report_file: "cacd_study_report.md".to_string(),
            backup_original: true,
            backup_extension: "bak".to_string(),
            note_extension: "md".to_string(),
            template_marker: "template".to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Builds the default configuration overlaid with environment variables.
    ///
    /// Recognised variables: `CACD_MIN_CONFIDENCE`, `CACD_MAX_TAGS`,
    /// `CACD_MAX_CONNECTIONS`, `CACD_FEEDBACK_FILE`, `CACD_REPORT_FILE`
    /// and `CACD_BACKUP` (`true`/`false`/`1`/`0`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = parse_var("CACD_MIN_CONFIDENCE")? {
            config.relevance_threshold = v;
        }
        if let Some(v) = parse_var("CACD_MAX_TAGS")? {
            config.max_tags = v;
        }
        if let Some(v) = parse_var("CACD_MAX_CONNECTIONS")? {
            config.max_connections = v;
        }
        if let Ok(v) = env::var("CACD_FEEDBACK_FILE")
            && !v.trim().is_empty()
        {
            config.feedback_file = v;
        }
        if let Ok(v) = env::var("CACD_REPORT_FILE")
            && !v.trim().is_empty()
        {
            config.report_file = v;
        }
        if let Ok(v) = env::var("CACD_BACKUP") {
            config.backup_original = match v.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "CACD_BACKUP",
                        value: v,
                    });
                }
            };
        }

        Ok(config)
    }

    /// Name the review file is renamed to once processed.
    ///
    /// `cacd_feedback.md` becomes `cacd_feedback.processed.md`. Only the
    /// last path component is rewritten.
    pub fn processed_feedback_file(&self) -> String {
        self.processed_name("processed")
    }

    /// Name for the `n`th processed review file kept alongside earlier
    /// ones: `cacd_feedback.processed-2.md` for `n == 2`.
    pub fn numbered_processed_feedback_file(&self, n: usize) -> String {
        self.processed_name(&format!("processed-{n}"))
    }

    /// Whether `relative` is one of the processed review files, numbered
    /// or not.
    pub fn is_processed_feedback_file(&self, relative: &Path) -> bool {
        let feedback = Path::new(&self.feedback_file);
        let (Some(stem), Some(name)) = (
            feedback.file_stem().and_then(|s| s.to_str()),
            relative.file_name().and_then(|n| n.to_str()),
        ) else {
            return false;
        };
        relative.parent() == feedback.parent() && name.starts_with(&format!("{stem}.processed"))
    }

    fn processed_name(&self, marker: &str) -> String {
        let feedback = Path::new(&self.feedback_file);
        let Some(stem) = feedback.file_stem().map(|s| s.to_string_lossy()) else {
            return format!("{}.{marker}", self.feedback_file);
        };
        let name = match feedback.extension() {
            Some(ext) => format!("{stem}.{marker}.{}", ext.to_string_lossy()),
            None => format!("{stem}.{marker}"),
        };
        feedback.with_file_name(name).to_string_lossy().into_owned()
    }
}

fn parse_var<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        Err(_) => Ok(None),
    }
}
