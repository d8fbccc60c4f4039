//! Builds one metadata proposal per note.
//!
//! The engine combines the classifier, the tag generator, the relevance
//! scorer and a connection finder over the other loaded notes.

use tracing::debug;

use crate::autotagger::TagGenerator;
use crate::classifier::Classifier;
use crate::relevance::RelevanceScorer;
use crate::{AnalyzerConfig, KeywordIndex, Note, NoteStore, Suggestion, Taxonomy, keys};

/// Produces [`Suggestion`]s for notes.
///
/// # Examples
///
/// ```
/// use cacd::{AnalyzerConfig, NoteBuilder, NoteStore, SuggestionEngine, Taxonomy};
///
/// # fn main() -> anyhow::Result<()> {
/// let taxonomy = Taxonomy::from_yaml_str("Geografia:\n  Geografia Urbana: [Metropolização]\n")?;
/// let config = AnalyzerConfig::default();
/// let engine = SuggestionEngine::new(&taxonomy, &config);
///
/// let note = NoteBuilder::new()
///     .id("urbanizacao.md")
///     .body("A metropolização e a geografia urbana do Brasil.")
///     .build();
/// let store = NoteStore::new(".", &config);
///
/// let suggestion = engine.analyze(&note, &store);
/// assert_eq!(suggestion.area.as_deref(), Some("Geografia"));
/// # Ok(())
/// # }
/// ```
pub struct SuggestionEngine {
    classifier: Classifier,
    tagger: TagGenerator,
    scorer: RelevanceScorer,
    max_connections: usize,
}

impl SuggestionEngine {
    pub fn new(taxonomy: &Taxonomy, config: &AnalyzerConfig) -> Self {
        Self {
            classifier: Classifier::new(KeywordIndex::build(taxonomy)),
            tagger: TagGenerator::new(config.max_tags),
            scorer: RelevanceScorer::new(config.relevance_threshold),
            max_connections: config.max_connections,
        }
    }

    /// Proposes metadata for `note`, looking up connections in `notes`.
    ///
    /// A note that already has a non-empty `area` and `relevancia_cacd`
    /// gets an empty suggestion with confidence 1.0.
    pub fn analyze(&self, note: &Note, notes: &NoteStore) -> Suggestion {
        if note.has_complete_metadata() {
            return Suggestion::complete(note.id.clone());
        }

        let classification = self.classifier.classify(&note.body, &note.title);
        let area = classification.area.as_deref();

        let tags = self.tagger.generate_tags(&note.body, &note.title, area);
        let relevance = self.scorer.score(note, area, classification.confidence);
        let connections = self.find_connections(
            note,
            classification.area.as_deref(),
            classification.subarea.as_deref(),
            notes,
        );

        debug!(
            note = %note.id,
            area = ?classification.area,
            confidence = classification.confidence,
            "note analyzed"
        );

        Suggestion {
            note_id: note.id.clone(),
            area: classification.area,
            subarea: classification.subarea,
            topic: classification.topic,
            tags,
            relevance: Some(relevance),
            connections,
            confidence: classification.confidence,
        }
    }

    /// Titles of other notes whose header shares the area or the subarea,
    /// in store order, at most `max_connections`.
    fn find_connections(
        &self,
        note: &Note,
        area: Option<&str>,
        subarea: Option<&str>,
        notes: &NoteStore,
    ) -> Vec<String> {
        if area.is_none() && subarea.is_none() {
            return Vec::new();
        }

        notes
            .notes()
            .filter(|other| other.id != note.id)
            .filter(|other| {
                let same_area =
                    area.is_some() && other.header.get_text(keys::AREA).as_deref() == area;
                let same_subarea = subarea.is_some()
                    && other.header.get_text(keys::SUBAREA).as_deref() == subarea;
                same_area || same_subarea
            })
            .take(self.max_connections)
            .map(|other| other.title.clone())
            .collect()
    }
}
