use serde_yaml::{Mapping, Value};

use super::field::{FieldValue, HeaderField, keys};

/// Structured front matter of a note.
///
/// Wraps an order-preserving YAML mapping so that rewriting a note keeps
/// the author's key order and only appends or replaces merged fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header(Mapping);

impl Header {
    /// Creates an empty header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing YAML mapping.
    pub fn from_mapping(mapping: Mapping) -> Self {
        Self(mapping)
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a scalar value as text. Strings are returned as-is and
    /// numbers are rendered; any other shape yields `None`.
    pub fn get_text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Whether `key` holds a non-empty value (not null, empty, zero or false).
    pub fn has_value(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_truthy)
    }

    /// Whether the note already carries the metadata the analyzer fills in.
    pub fn is_complete(&self) -> bool {
        self.has_value(keys::AREA) && self.has_value(keys::RELEVANCE)
    }

    /// The relevance score, if present and numeric.
    pub fn relevance(&self) -> Option<u8> {
        match self.get(keys::RELEVANCE)? {
            Value::Number(n) => n.as_u64().and_then(|v| u8::try_from(v).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Inserts or replaces a value, keeping the position of existing keys.
    pub fn set(&mut self, key: &str, value: Value) {
        self.0.insert(Value::String(key.to_string()), value);
    }

    /// Merges an approved field into the header.
    pub fn apply(&mut self, field: HeaderField, value: &FieldValue) {
        self.set(field.key(), value.to_yaml());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}
