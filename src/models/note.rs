use std::path::{Path, PathBuf};

use time::OffsetDateTime;

use super::field::keys;
use super::{Header, NoteId};

/// A note loaded from the vault.
///
/// Notes are owned by the [`NoteStore`](crate::NoteStore) for the duration of
/// a run. The body is the text after the front matter block, trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Path relative to the vault root.
    pub id: NoteId,
    /// Title from the `title` header field, else the file stem.
    pub title: String,
    /// The note's text without front matter.
    pub body: String,
    /// Parsed front matter.
    pub header: Header,
    /// Absolute location of the note file.
    pub path: PathBuf,
    /// When the file was last modified.
    pub modified: OffsetDateTime,
}

impl Note {
    /// Length of the body in characters.
    pub fn content_length(&self) -> usize {
        self.body.chars().count()
    }

    /// Whether the header already carries a non-empty area and relevance.
    pub fn has_complete_metadata(&self) -> bool {
        self.header.is_complete()
    }

    /// Derives a title from the header, falling back to the file stem.
    pub fn derive_title(header: &Header, path: &Path) -> String {
        header
            .get_text(keys::TITLE)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default()
            })
    }
}

/// Builder for constructing `Note` instances with optional fields.
///
/// # Examples
///
/// ```
/// use cacd::NoteBuilder;
///
/// let note = NoteBuilder::new()
///     .id("historia/guerra-do-paraguai.md")
///     .body("A Guerra do Paraguai (1864-1870)")
///     .build();
///
/// assert_eq!(note.title, "guerra-do-paraguai");
/// assert!(note.header.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct NoteBuilder {
    id: Option<NoteId>,
    title: Option<String>,
    body: Option<String>,
    header: Option<Header>,
    path: Option<PathBuf>,
    modified: Option<OffsetDateTime>,
}

impl NoteBuilder {
    /// Creates a new `NoteBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the note ID.
    pub fn id(mut self, id: impl Into<NoteId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets an explicit title, overriding header and file stem.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the note body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the parsed front matter.
    pub fn header(mut self, header: Header) -> Self {
        self.header = Some(header);
        self
    }

    /// Sets the file location.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the modification timestamp.
    pub fn modified(mut self, modified: OffsetDateTime) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Builds the `Note`, using defaults for optional fields.
    ///
    /// # Panics
    ///
    /// Panics if `id` has not been set.
    pub fn build(self) -> Note {
        let id = self.id.expect("id is required");
        let header = self.header.unwrap_or_default();
        let path = self.path.unwrap_or_else(|| PathBuf::from(id.as_str()));
        let title = self
            .title
            .unwrap_or_else(|| Note::derive_title(&header, &path));

        Note {
            id,
            title,
            body: self.body.unwrap_or_default(),
            header,
            path,
            modified: self.modified.unwrap_or_else(OffsetDateTime::now_utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(yaml: &str) -> Header {
        Header::from_mapping(serde_yaml::from_str(yaml).unwrap())
    }

    #[test]
    fn title_comes_from_header_when_present() {
        let note = NoteBuilder::new()
            .id("mercosul.md")
            .header(header("title: Origens do MERCOSUL"))
            .build();

        assert_eq!(note.title, "Origens do MERCOSUL");
    }

    #[test]
    fn title_falls_back_to_file_stem() {
        let note = NoteBuilder::new()
            .id("geo/urbanizacao-brasil.md")
            .header(header("title: '  '"))
            .build();

        assert_eq!(note.title, "urbanizacao-brasil");
    }

    #[test]
    fn content_length_counts_characters() {
        let note = NoteBuilder::new().id("a.md").body("ação").build();
        assert_eq!(note.content_length(), 4);
    }

    #[test]
    fn complete_metadata_follows_header() {
        let note = NoteBuilder::new()
            .id("a.md")
            .header(header("area: Geografia\nrelevancia_cacd: 3"))
            .build();
        assert!(note.has_complete_metadata());

        let note = NoteBuilder::new().id("b.md").build();
        assert!(!note.has_complete_metadata());
    }
}
