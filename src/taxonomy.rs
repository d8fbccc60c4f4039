//! CACD subject taxonomy and the keyword index built from it.
//!
//! The taxonomy is a YAML document of the form
//! `area -> { subarea -> [topic, ...] }`. Declaration order is preserved
//! and is the tie-break order used by the classifier.
//!
//! # Examples
//!
//! ```
//! use cacd::{KeywordIndex, Taxonomy};
//!
//! let taxonomy = Taxonomy::from_yaml_str(
//!     "História do Brasil:\n  Guerra do Paraguai:\n    - causas\n",
//! )?;
//! let index = KeywordIndex::build(&taxonomy);
//!
//! assert_eq!(taxonomy.areas().len(), 1);
//! assert!(index.lookup("paraguai").is_some());
//! # Ok::<(), cacd::TaxonomyLoadError>(())
//! ```

mod index;
mod normalizer;

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::{error, info, warn};

pub use index::{KeywordIndex, LabelPath};
pub use normalizer::TextNormalizer;

/// Error raised while reading or parsing a taxonomy file.
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyLoadError {
    #[error("failed to read taxonomy {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid taxonomy YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("taxonomy root must be a mapping of areas")]
    NotAMapping,
}

/// A subarea and its leaf topics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subarea {
    pub name: String,
    pub topics: Vec<String>,
}

/// A top-level area of the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub name: String,
    pub subareas: Vec<Subarea>,
}

/// The ordered label tree notes are classified against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    areas: Vec<Area>,
}

impl Taxonomy {
    /// Reads and parses a taxonomy file.
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyLoadError` if the file cannot be read or is not a
    /// YAML mapping at the top level.
    pub fn load(path: &Path) -> Result<Self, TaxonomyLoadError> {
        let raw = fs::read_to_string(path).map_err(|source| TaxonomyLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let taxonomy = Self::from_yaml_str(&raw)?;
        info!(
            path = %path.display(),
            areas = taxonomy.areas.len(),
            "taxonomy loaded"
        );
        Ok(taxonomy)
    }

    /// Loads a taxonomy, degrading to an empty one on failure.
    ///
    /// An empty taxonomy makes every classification unmatched, so a bad
    /// file disables suggestions instead of aborting the run.
    pub fn load_or_empty(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            error!(path = %path.display(), "failed to load taxonomy: {e}");
            Self::default()
        })
    }

    /// Parses a taxonomy from YAML text.
    ///
    /// Entries of unexpected shape below the area level are skipped: an
    /// area whose value is not a mapping has no subareas, a subarea whose
    /// value is not a list has no topics, and non-string topics are ignored.
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyLoadError` on invalid YAML or a non-mapping root.
    pub fn from_yaml_str(raw: &str) -> Result<Self, TaxonomyLoadError> {
        let root: Value = serde_yaml::from_str(raw)?;
        let Value::Mapping(root) = root else {
            return Err(TaxonomyLoadError::NotAMapping);
        };

        let mut areas = Vec::with_capacity(root.len());
        for (area_key, content) in &root {
            let Some(area_name) = scalar_name(area_key) else {
                warn!("skipping taxonomy area with non-scalar key");
                continue;
            };

            let subareas = match content {
                Value::Mapping(subareas) => subareas
                    .iter()
                    .filter_map(|(sub_key, topics)| {
                        let name = scalar_name(sub_key)?;
                        let topics = match topics {
                            Value::Sequence(items) => items
                                .iter()
                                .filter_map(|t| t.as_str().map(String::from))
                                .collect(),
                            _ => Vec::new(),
                        };
                        Some(Subarea { name, topics })
                    })
                    .collect(),
                _ => Vec::new(),
            };

            areas.push(Area {
                name: area_name,
                subareas,
            });
        }

        Ok(Self { areas })
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Every label path in declaration order: each area, then each of its
    /// subareas followed by that subarea's topics.
    pub fn label_paths(&self) -> Vec<LabelPath> {
        let mut labels = Vec::new();
        for area in &self.areas {
            labels.push(LabelPath::area(&area.name));
            for subarea in &area.subareas {
                labels.push(LabelPath::subarea(&area.name, &subarea.name));
                for topic in &subarea.topics {
                    labels.push(LabelPath::topic(&area.name, &subarea.name, topic));
                }
            }
        }
        labels
    }
}

fn scalar_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
