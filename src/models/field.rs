use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;

/// Header keys recognised in note front matter.
pub mod keys {
    pub const TITLE: &str = "title";
    pub const AREA: &str = "area";
    pub const SUBAREA: &str = "subarea";
    pub const TOPIC: &str = "topico";
    pub const TAGS: &str = "tags";
    pub const RELEVANCE: &str = "relevancia_cacd";
    pub const CONNECTIONS: &str = "conexoes";
}

/// A metadata field that can be proposed for review and merged into a header.
///
/// Declaration order is the order fields appear in a review section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderField {
    Area,
    Subarea,
    Topic,
    Tags,
    Relevance,
    Connections,
}

impl HeaderField {
    /// Every field, in review order.
    pub const ALL: [HeaderField; 6] = [
        Self::Area,
        Self::Subarea,
        Self::Topic,
        Self::Tags,
        Self::Relevance,
        Self::Connections,
    ];

    /// The front matter key this field is stored under.
    pub fn key(self) -> &'static str {
        match self {
            Self::Area => keys::AREA,
            Self::Subarea => keys::SUBAREA,
            Self::Topic => keys::TOPIC,
            Self::Tags => keys::TAGS,
            Self::Relevance => keys::RELEVANCE,
            Self::Connections => keys::CONNECTIONS,
        }
    }

    /// The bold label written in the review file.
    pub fn label(self) -> &'static str {
        match self {
            Self::Area => "Área",
            Self::Subarea => "Subárea",
            Self::Topic => "Tópico",
            Self::Tags => "Tags",
            Self::Relevance => "Relevância CACD",
            Self::Connections => "Conexões",
        }
    }

    /// Maps a review label back to its field, case-insensitively.
    ///
    /// Accepts the labels produced by [`HeaderField::label`] as well as
    /// their English names.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "área" | "area" => Some(Self::Area),
            "subárea" | "subarea" => Some(Self::Subarea),
            "tópico" | "topico" | "topic" => Some(Self::Topic),
            "tags" => Some(Self::Tags),
            "relevância cacd" | "relevancia cacd" | "relevance" => Some(Self::Relevance),
            "conexões" | "conexoes" | "connections" => Some(Self::Connections),
            _ => None,
        }
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// The value of a proposed or approved field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Score(u8),
}

impl FieldValue {
    /// Renders the value the way it appears after a review label.
    pub fn display_value(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::List(items) => items.join(", "),
            Self::Score(score) => format!("{score}/5"),
        }
    }

    /// Converts the value into its front matter representation.
    pub fn to_yaml(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::List(items) => {
                Value::Sequence(items.iter().cloned().map(Value::String).collect())
            }
            Self::Score(score) => Value::Number(u64::from(*score).into()),
        }
    }
}
