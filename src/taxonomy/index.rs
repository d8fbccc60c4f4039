use std::collections::HashMap;

use super::{Taxonomy, TextNormalizer};

/// Words this short never enter the index.
const MIN_KEYWORD_LEN: usize = 3;

/// A fully qualified taxonomy label: an area, optionally narrowed to a
/// subarea and a topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelPath {
    pub area: String,
    pub subarea: Option<String>,
    pub topic: Option<String>,
}

impl LabelPath {
    pub fn area(area: &str) -> Self {
        Self {
            area: area.to_string(),
            subarea: None,
            topic: None,
        }
    }

    pub fn subarea(area: &str, subarea: &str) -> Self {
        Self {
            subarea: Some(subarea.to_string()),
            ..Self::area(area)
        }
    }

    pub fn topic(area: &str, subarea: &str, topic: &str) -> Self {
        Self {
            topic: Some(topic.to_string()),
            ..Self::subarea(area, subarea)
        }
    }

    /// The text whose words index this label: the most specific component.
    fn own_text(&self) -> &str {
        self.topic
            .as_deref()
            .or(self.subarea.as_deref())
            .unwrap_or(&self.area)
    }
}

/// Reverse index from normalized keyword to the labels it appears in.
///
/// Labels are numbered in taxonomy declaration order and each keyword
/// maps to an ascending, duplicate-free list of those numbers. Built once
/// and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    labels: Vec<LabelPath>,
    keywords: HashMap<String, Vec<usize>>,
}

impl KeywordIndex {
    /// Builds the index from every area, subarea and topic name.
    ///
    /// A label is indexed under each normalized word of its own name that
    /// is longer than two characters. One word may point to many labels;
    /// resolving that ambiguity is left to the classifier's scoring.
    pub fn build(taxonomy: &Taxonomy) -> Self {
        let labels = taxonomy.label_paths();
        let mut keywords: HashMap<String, Vec<usize>> = HashMap::new();

        for (label_id, label) in labels.iter().enumerate() {
            for word in TextNormalizer::words(label.own_text()) {
                if word.chars().count() < MIN_KEYWORD_LEN {
                    continue;
                }
                let entry = keywords.entry(word).or_default();
                if entry.last() != Some(&label_id) {
                    entry.push(label_id);
                }
            }
        }

        Self { labels, keywords }
    }

    /// Label ids a normalized word points to, in declaration order.
    pub fn lookup(&self, word: &str) -> Option<&[usize]> {
        self.keywords.get(word).map(Vec::as_slice)
    }

    /// Resolves a label id returned by [`lookup`](Self::lookup).
    pub fn label(&self, id: usize) -> Option<&LabelPath> {
        self.labels.get(id)
    }

    /// Number of labels in the taxonomy.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of distinct keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}
