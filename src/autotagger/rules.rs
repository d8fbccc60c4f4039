//! Fixed tag tables for the CACD subject areas.

use std::sync::LazyLock;

use regex::Regex;

/// Candidate tags per area. Only the first two of each list are ever
/// proposed, and only when one of their hyphen-separated parts occurs in
/// the note.
pub const AREA_TAGS: &[(&str, &[&str])] = &[
    (
        "Língua Portuguesa",
        &["gramática", "ortografia", "redação", "literatura", "linguística"],
    ),
    (
        "Língua Inglesa",
        &["inglês", "tradução", "gramática-inglesa", "vocabulário"],
    ),
    (
        "História do Brasil",
        &["brasil", "colônia", "império", "república", "política-brasileira"],
    ),
    (
        "História Mundial",
        &["internacional", "guerra", "revolução", "imperialismo", "ideologia"],
    ),
    (
        "Política Internacional",
        &["diplomacia", "relações-internacionais", "onu", "mercosul", "geopolítica"],
    ),
    (
        "Geografia",
        &["território", "população", "economia-espacial", "meio-ambiente", "urbanização"],
    ),
    (
        "ECONOMIA",
        &[
            "macroeconomia",
            "microeconomia",
            "política-fiscal",
            "comércio-internacional",
            "desenvolvimento",
        ],
    ),
    (
        "DIREITO",
        &[
            "constitucional",
            "administrativo",
            "internacional-público",
            "tratados",
            "soberania",
        ],
    ),
    (
        "LÍNGUA ESPANHOLA",
        &["espanhol", "tradução-espanhol", "america-latina"],
    ),
    (
        "LÍNGUA FRANCESA",
        &["francês", "tradução-francês", "francofonia"],
    ),
];

/// How many area candidates are considered per note.
pub const AREA_TAG_CANDIDATES: usize = 2;

/// Substring keyword to tag.
pub const KEYWORD_TAGS: &[(&str, &str)] = &[
    ("constituição", "constitucional"),
    ("mercosul", "integração-regional"),
    ("onu", "multilateralismo"),
    ("guerra", "conflitos"),
    ("paz", "paz-segurança"),
    ("economia", "análise-econômica"),
    ("política", "ciência-política"),
    ("diplomacia", "ação-diplomática"),
    ("território", "geografia-política"),
    ("população", "demografia"),
    ("meio ambiente", "sustentabilidade"),
    ("brasil", "brasil-estudos"),
    ("direitos humanos", "direitos-humanos"),
    ("comércio", "comércio-internacional"),
];

/// Whole-word patterns over CACD vocabulary, each contributing one tag.
pub static PATTERN_TAGS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\b(tratado|acordo|convenção)\b", "instrumentos-jurídicos"),
        (r"\b(guerra|conflito|paz)\b", "segurança-internacional"),
        (
            r"\b(desenvolvimento|crescimento|econômico)\b",
            "desenvolvimento-econômico",
        ),
    ]
    .into_iter()
    .map(|(pattern, tag)| (Regex::new(pattern).expect("valid tag pattern"), tag))
    .collect()
});

/// Candidate tags for an area, if the area has any.
pub fn area_candidates(area: &str) -> &'static [&'static str] {
    AREA_TAGS
        .iter()
        .find(|(name, _)| *name == area)
        .map(|(_, tags)| *tags)
        .unwrap_or(&[])
}
