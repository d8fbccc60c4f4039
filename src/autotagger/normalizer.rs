/// Post-processing layer for tags.
///
/// Keeps tags in lowercase kebab-case whether they come from the rule
/// tables or from an operator editing the review file. Accented letters
/// are kept: `ação-diplomática` is a valid tag.
pub struct TagNormalizer;

impl TagNormalizer {
    /// Normalizes a single tag to lowercase kebab-case.
    ///
    /// # Normalization rules
    ///
    /// - Converts to lowercase
    /// - Turns whitespace and `_` into hyphens
    /// - Drops every other character that is not alphanumeric or a hyphen
    /// - Collapses repeated hyphens and trims them from both ends
    ///
    /// # Examples
    ///
    /// ```
    /// use cacd::TagNormalizer;
    ///
    /// assert_eq!(TagNormalizer::normalize_tag("Meio Ambiente"), "meio-ambiente");
    /// assert_eq!(TagNormalizer::normalize_tag("#Ação Diplomática!"), "ação-diplomática");
    /// assert_eq!(TagNormalizer::normalize_tag(" --onu-- "), "onu");
    /// ```
    #[must_use]
    pub fn normalize_tag(tag: &str) -> String {
        let kebab: String = tag
            .to_lowercase()
            .chars()
            .filter_map(|c| {
                if c.is_whitespace() || c == '_' {
                    Some('-')
                } else if c.is_alphanumeric() || c == '-' {
                    Some(c)
                } else {
                    None
                }
            })
            .collect();

        kebab
            .split('-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Normalizes a list of tags, dropping empties and later duplicates.
    ///
    /// Order of first occurrence is preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use cacd::TagNormalizer;
    ///
    /// let tags = vec!["Brasil".to_string(), "brasil".to_string(), " ".to_string()];
    /// assert_eq!(TagNormalizer::normalize_tags(tags), vec!["brasil"]);
    /// ```
    #[must_use]
    pub fn normalize_tags<I>(tags: I) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut seen = std::collections::HashSet::new();
        tags.into_iter()
            .map(|tag| Self::normalize_tag(tag.as_ref()))
            .filter(|tag| !tag.is_empty() && seen.insert(tag.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case_from_phrases() {
        assert_eq!(
            TagNormalizer::normalize_tag("Relações Internacionais"),
            "relações-internacionais"
        );
        assert_eq!(
            TagNormalizer::normalize_tag("comércio_internacional"),
            "comércio-internacional"
        );
    }

    #[test]
    fn test_accents_preserved() {
        assert_eq!(TagNormalizer::normalize_tag("Geopolítica"), "geopolítica");
        assert_eq!(TagNormalizer::normalize_tag("paz-segurança"), "paz-segurança");
    }

    #[test]
    fn test_punctuation_dropped() {
        assert_eq!(TagNormalizer::normalize_tag("onu!"), "onu");
        assert_eq!(TagNormalizer::normalize_tag("#mercosul"), "mercosul");
        assert_eq!(TagNormalizer::normalize_tag("---"), "");
        assert_eq!(TagNormalizer::normalize_tag("a -- b"), "a-b");
    }

    #[test]
    fn test_normalized_tags_are_fixed_points() {
        for tag in ["instrumentos-jurídicos", "brasil-estudos", "demografia"] {
            assert_eq!(TagNormalizer::normalize_tag(tag), tag);
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let tags = ["Conflitos", "brasil", "conflitos", "", "Brasil"];
        assert_eq!(
            TagNormalizer::normalize_tags(tags),
            vec!["conflitos", "brasil"]
        );
    }
}
