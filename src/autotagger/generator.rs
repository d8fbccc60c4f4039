//! Rule-based tag generation for notes.

use tracing::debug;

use super::normalizer::TagNormalizer;
use super::rules::{AREA_TAG_CANDIDATES, KEYWORD_TAGS, PATTERN_TAGS, area_candidates};

/// Default cap on tags proposed for one note.
pub const DEFAULT_MAX_TAGS: usize = 5;

/// Derives free-form tags from a note's text and its classified area.
///
/// Deterministic: matching is case-insensitive substring or whole-word
/// regex over `title + " " + text`, and tags keep the order in which the
/// rules first produced them.
///
/// # Examples
///
/// ```
/// use cacd::TagGenerator;
///
/// let generator = TagGenerator::new(5);
/// let tags = generator.generate_tags(
///     "O Tratado de Assunção criou o MERCOSUL.",
///     "Origens do MERCOSUL",
///     Some("Política Internacional"),
/// );
///
/// assert!(tags.contains(&"integração-regional".to_string()));
/// assert!(tags.contains(&"instrumentos-jurídicos".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct TagGenerator {
    max_tags: usize,
}

impl Default for TagGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TAGS)
    }
}

impl TagGenerator {
    pub fn new(max_tags: usize) -> Self {
        Self { max_tags }
    }

    /// Generates tags in three passes:
    ///
    /// 1. up to two area candidates, each kept when one of its
    ///    hyphen-separated parts occurs in the text
    /// 2. every keyword-table tag whose keyword occurs in the text
    /// 3. one tag per matching vocabulary pattern
    ///
    /// The result is deduplicated and truncated to `max_tags`.
    pub fn generate_tags(&self, text: &str, title: &str, area: Option<&str>) -> Vec<String> {
        let combined = format!("{title} {text}").to_lowercase();
        let mut tags: Vec<&str> = Vec::new();

        if let Some(area) = area {
            for candidate in area_candidates(area).iter().take(AREA_TAG_CANDIDATES) {
                if candidate.split('-').any(|part| combined.contains(part)) {
                    tags.push(candidate);
                }
            }
        }

        for (keyword, tag) in KEYWORD_TAGS {
            if combined.contains(keyword) {
                tags.push(tag);
            }
        }

        for (pattern, tag) in PATTERN_TAGS.iter() {
            if pattern.is_match(&combined) {
                tags.push(tag);
            }
        }

        let mut tags = TagNormalizer::normalize_tags(tags);
        tags.truncate(self.max_tags);
        debug!(count = tags.len(), "generated tags");
        tags
    }
}
