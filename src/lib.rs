pub mod autotagger;
pub mod classifier;
pub mod config;
pub mod models;
pub mod relevance;
pub mod report;
pub mod review;
pub mod service;
pub mod store;
pub mod suggester;
pub mod taxonomy;
mod utils;

pub use autotagger::{TagGenerator, TagNormalizer};
pub use classifier::{Classification, Classifier};
pub use config::{AnalyzerConfig, ConfigError};
pub use models::{FieldValue, Header, HeaderField, Note, NoteBuilder, NoteId, Suggestion, keys};
pub use relevance::RelevanceScorer;
pub use report::{HighlightedNote, StudyStats, render_report};
pub use review::{ApprovedChanges, ReviewError, parse_review, render_review};
pub use service::{FeedbackSummary, MetadataAnalyzer, ProcessSummary};
pub use store::frontmatter::{HeaderError, NoteDocument};
pub use store::{NoteLoadError, NoteStore};
pub use suggester::SuggestionEngine;
pub use taxonomy::{KeywordIndex, LabelPath, Taxonomy, TaxonomyLoadError, TextNormalizer};
