use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Text normalization shared by the keyword index and the classifier.
///
/// Both sides must agree exactly for keyword lookups to hit, so every
/// word that enters or queries the index goes through here.
pub struct TextNormalizer;

impl TextNormalizer {
    /// Normalizes free text for keyword matching.
    ///
    /// # Normalization rules
    ///
    /// - Converts to lowercase
    /// - Decomposes (NFD) and drops combining marks, removing accents
    /// - Replaces every character that is not alphanumeric or `_` with a space
    /// - Collapses runs of whitespace and trims the ends
    ///
    /// # Examples
    ///
    /// ```
    /// use cacd::TextNormalizer;
    ///
    /// assert_eq!(TextNormalizer::normalize("História do Brasil"), "historia do brasil");
    /// assert_eq!(TextNormalizer::normalize("  Política-externa!  "), "politica externa");
    /// assert_eq!(TextNormalizer::normalize("É"), TextNormalizer::normalize("e"));
    /// ```
    #[must_use]
    pub fn normalize(text: &str) -> String {
        let stripped: String = text
            .to_lowercase()
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
            .collect();

        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Normalizes and splits into words.
    #[must_use]
    pub fn words(text: &str) -> Vec<String> {
        Self::normalize(text)
            .split(' ')
            .filter(|w| !w.is_empty())
            .map(String::from)
            .collect()
    }
}
