//! Bag-of-words classification of notes against the taxonomy.

use crate::taxonomy::{KeywordIndex, TextNormalizer};

/// Result of classifying one note.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub area: Option<String>,
    pub subarea: Option<String>,
    pub topic: Option<String>,
    /// Confidence in `[0.0, 1.0]`.
    pub confidence: f64,
}

impl Classification {
    /// No label matched.
    pub fn unmatched() -> Self {
        Self {
            area: None,
            subarea: None,
            topic: None,
            confidence: 0.0,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.area.is_some()
    }
}

/// Keyword-overlap classifier.
///
/// Stateless per call: every classification counts keyword hits from
/// scratch against the read-only index.
///
/// # Examples
///
/// ```
/// use cacd::{Classifier, KeywordIndex, Taxonomy};
///
/// let taxonomy = Taxonomy::from_yaml_str("ECONOMIA:\n  Macroeconomia: [Política monetária]\n")?;
/// let classifier = Classifier::new(KeywordIndex::build(&taxonomy));
///
/// let result = classifier.classify("A política monetária e a SELIC", "Juros");
/// assert_eq!(result.area.as_deref(), Some("ECONOMIA"));
/// assert!(result.confidence > 0.0);
/// # Ok::<(), cacd::TaxonomyLoadError>(())
/// ```
pub struct Classifier {
    index: KeywordIndex,
}

impl Classifier {
    pub fn new(index: KeywordIndex) -> Self {
        Self { index }
    }

    /// Classifies a note from its body and title.
    ///
    /// Each normalized word found in the index adds one hit to every label
    /// it points to; unknown words are ignored. The label with the most
    /// hits wins, ties going to the label declared first in the taxonomy.
    ///
    /// Confidence is `hits / max(0.1 * word_count, 1)` capped at 1.0, so
    /// short notes still reach a meaningful value.
    pub fn classify(&self, text: &str, title: &str) -> Classification {
        let words = TextNormalizer::words(&format!("{title} {text}"));
        if words.is_empty() || self.index.is_empty() {
            return Classification::unmatched();
        }

        let mut hits = vec![0usize; self.index.label_count()];
        for word in &words {
            if let Some(label_ids) = self.index.lookup(word) {
                for id in label_ids {
                    hits[*id] += 1;
                }
            }
        }

        // Strictly greater keeps the earliest-declared label on ties.
        let mut best: Option<(usize, usize)> = None;
        for (id, &count) in hits.iter().enumerate() {
            if count > 0 && best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((id, count));
            }
        }

        let Some((best_id, score)) = best else {
            return Classification::unmatched();
        };
        let Some(label) = self.index.label(best_id) else {
            return Classification::unmatched();
        };

        let denominator = (words.len() as f64 * 0.1).max(1.0);
        let confidence = (score as f64 / denominator).min(1.0);

        Classification {
            area: Some(label.area.clone()),
            subarea: label.subarea.clone(),
            topic: label.topic.clone(),
            confidence,
        }
    }
}
