//! Splitting, parsing and rendering of note front matter.
//!
//! A header block starts with a `---` line at the very top of the file and
//! ends at the next `---` line. Everything after the closing line is the
//! body and is carried through rewrites byte for byte.

use serde_yaml::Value;

use crate::Header;

const MARKER: &str = "---";

/// Error raised when a header block is not a YAML mapping.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("invalid header YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("header is not a key/value mapping")]
    NotAMapping,
}

/// A note file cut into its raw header text and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDocument<'a> {
    /// Text between the markers, `None` when the file has no header block.
    pub header: Option<&'a str>,
    /// Everything after the closing marker line.
    pub body: &'a str,
}

/// Splits a note into header text and body.
///
/// Without an opening marker on the first line, or without a closing
/// marker, the whole content is body.
pub fn split(content: &str) -> RawDocument<'_> {
    let no_header = RawDocument {
        header: None,
        body: content,
    };

    let text = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some((first, rest)) = text.split_once('\n') else {
        return no_header;
    };
    if first.trim_end() != MARKER {
        return no_header;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == MARKER {
            return RawDocument {
                header: Some(&rest[..offset]),
                body: &rest[offset + line.len()..],
            };
        }
        offset += line.len();
    }

    no_header
}

/// Parses header text into a mapping. An empty block is an empty header.
///
/// # Errors
///
/// Returns `HeaderError` on invalid YAML or a non-mapping document.
pub fn parse_header(raw: &str) -> Result<Header, HeaderError> {
    if raw.trim().is_empty() {
        return Ok(Header::new());
    }
    match serde_yaml::from_str::<Value>(raw)? {
        Value::Null => Ok(Header::new()),
        Value::Mapping(mapping) => Ok(Header::from_mapping(mapping)),
        _ => Err(HeaderError::NotAMapping),
    }
}

/// A note file with its header parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDocument {
    pub header: Header,
    pub body: String,
}

impl NoteDocument {
    /// Parses a note strictly: a malformed header is an error.
    ///
    /// # Errors
    ///
    /// Returns `HeaderError` if the header block does not parse as a mapping.
    pub fn parse(content: &str) -> Result<Self, HeaderError> {
        let raw = split(content);
        let header = match raw.header {
            Some(text) => parse_header(text)?,
            None => Header::new(),
        };
        Ok(Self {
            header,
            body: raw.body.to_string(),
        })
    }

    /// Renders the header followed by the unchanged body.
    ///
    /// # Errors
    ///
    /// Returns `HeaderError` if the header cannot be serialized.
    pub fn render(&self) -> Result<String, HeaderError> {
        let yaml = if self.header.is_empty() {
            String::new()
        } else {
            serde_yaml::to_string(self.header.as_mapping())?
        };
        Ok(format!("{MARKER}\n{yaml}{MARKER}\n{}", self.body))
    }
}
