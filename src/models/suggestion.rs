use serde::{Deserialize, Serialize};

use super::{FieldValue, HeaderField, NoteId};

/// Proposed metadata for one note.
///
/// Suggestions are recomputed on every run and only persist through the
/// review file. They refer to their note by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub note_id: NoteId,
    pub area: Option<String>,
    pub subarea: Option<String>,
    pub topic: Option<String>,
    pub tags: Vec<String>,
    pub relevance: Option<u8>,
    pub connections: Vec<String>,
    /// Classification confidence in `[0.0, 1.0]`.
    pub confidence: f64,
}

impl Suggestion {
    /// An empty suggestion for a note whose metadata is already complete.
    pub fn complete(note_id: NoteId) -> Self {
        Self {
            note_id,
            area: None,
            subarea: None,
            topic: None,
            tags: Vec::new(),
            relevance: None,
            connections: Vec::new(),
            confidence: 1.0,
        }
    }

    /// Whether classification produced an area worth reviewing.
    pub fn has_area(&self) -> bool {
        self.area.is_some()
    }

    /// The non-empty proposed fields in review order.
    pub fn proposed_fields(&self) -> Vec<(HeaderField, FieldValue)> {
        HeaderField::ALL
            .into_iter()
            .filter_map(|field| self.value_of(field).map(|value| (field, value)))
            .collect()
    }

    fn value_of(&self, field: HeaderField) -> Option<FieldValue> {
        let text = |v: &Option<String>| v.clone().map(FieldValue::Text);
        let list = |v: &Vec<String>| (!v.is_empty()).then(|| FieldValue::List(v.clone()));

        match field {
            HeaderField::Area => text(&self.area),
            HeaderField::Subarea => text(&self.subarea),
            HeaderField::Topic => text(&self.topic),
            HeaderField::Tags => list(&self.tags),
            HeaderField::Relevance => self.relevance.map(FieldValue::Score),
            HeaderField::Connections => list(&self.connections),
        }
    }
}
