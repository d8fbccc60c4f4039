//! Study report over the metadata already present in note headers.
//!
//! Provides the `report` mode:
//! - coverage of the `area` field
//! - distribution by area and by relevance level
//! - study suggestions: thin areas, high relevance notes, short notes

use std::collections::HashMap;
use std::fmt;

use time::OffsetDateTime;

use crate::utils::format_timestamp;
use crate::{AnalyzerConfig, NoteStore, keys};

/// Areas with fewer notes than this are listed as low coverage.
pub const LOW_COVERAGE_THRESHOLD: usize = 5;
/// Notes at or above this relevance are suggested for review.
pub const HIGH_RELEVANCE: u8 = 4;
/// Maximum number of high relevance notes listed.
pub const MAX_HIGHLIGHTS: usize = 10;

/// A note suggested for review in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedNote {
    pub title: String,
    pub relevance: u8,
    pub area: Option<String>,
}

/// Statistics for the study report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudyStats {
    pub total_notes: usize,
    /// Notes with a non-empty `area`.
    pub notes_with_area: usize,
    /// Notes per area, most populated first, ties by name.
    pub by_area: Vec<(String, usize)>,
    /// Notes per relevance level; index 0 is level 1.
    pub by_relevance: [usize; 5],
    pub low_coverage_areas: Vec<String>,
    pub high_relevance: Vec<HighlightedNote>,
    /// Titles of notes shorter than the configured minimum.
    pub thin_notes: Vec<String>,
    pub min_content_length: usize,
}

impl StudyStats {
    /// Gathers statistics from the headers of every stored note.
    pub fn collect(store: &NoteStore, config: &AnalyzerConfig) -> Self {
        let mut stats = StudyStats {
            total_notes: store.len(),
            min_content_length: config.min_content_length,
            ..Default::default()
        };
        let mut areas: HashMap<String, usize> = HashMap::new();

        for note in store.notes() {
            let area = note
                .header
                .get_text(keys::AREA)
                .filter(|a| !a.trim().is_empty());
            if let Some(area) = &area {
                stats.notes_with_area += 1;
                *areas.entry(area.clone()).or_default() += 1;
            }

            if let Some(level @ 1..=5) = note.header.relevance() {
                stats.by_relevance[usize::from(level) - 1] += 1;
                if level >= HIGH_RELEVANCE {
                    stats.high_relevance.push(HighlightedNote {
                        title: note.title.clone(),
                        relevance: level,
                        area,
                    });
                }
            }

            if note.content_length() < config.min_content_length {
                stats.thin_notes.push(note.title.clone());
            }
        }

        stats.by_area = areas.into_iter().collect();
        stats
            .by_area
            .sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        stats.low_coverage_areas = stats
            .by_area
            .iter()
            .filter(|(_, count)| *count < LOW_COVERAGE_THRESHOLD)
            .map(|(area, _)| area.clone())
            .collect();

        // Stable sort keeps store order within a level.
        stats
            .high_relevance
            .sort_by(|a, b| b.relevance.cmp(&a.relevance));
        stats.high_relevance.truncate(MAX_HIGHLIGHTS);

        stats
    }

    /// Share of notes with an area, as a percentage.
    pub fn coverage(&self) -> f64 {
        percentage(self.notes_with_area, self.total_notes)
    }

    /// Number of notes at relevance `level` (1 to 5).
    pub fn relevance_count(&self, level: u8) -> usize {
        match level {
            1..=5 => self.by_relevance[usize::from(level) - 1],
            _ => 0,
        }
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders the report as Markdown.
pub fn render_report(stats: &StudyStats, generated_at: OffsetDateTime) -> String {
    ReportDocument {
        stats,
        generated_at,
    }
    .to_string()
}

struct ReportDocument<'a> {
    stats: &'a StudyStats,
    generated_at: OffsetDateTime,
}

impl fmt::Display for ReportDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats;
        writeln!(f, "# Relatório de Estudos CACD\n")?;
        writeln!(f, "**Gerado em:** {}\n", format_timestamp(self.generated_at))?;

        writeln!(f, "## Estatísticas Gerais\n")?;
        writeln!(f, "- **Total de notas:** {}", stats.total_notes)?;
        writeln!(f, "- **Notas com metadados:** {}", stats.notes_with_area)?;
        writeln!(f, "- **Cobertura:** {:.1}%\n", stats.coverage())?;

        writeln!(f, "## Distribuição por Área\n")?;
        for (area, count) in &stats.by_area {
            writeln!(
                f,
                "- **{area}:** {count} notas ({:.1}%)",
                percentage(*count, stats.notes_with_area)
            )?;
        }

        writeln!(f, "\n## Distribuição por Relevância CACD\n")?;
        for level in (1..=5u8).rev() {
            let count = stats.relevance_count(level);
            if count > 0 {
                writeln!(
                    f,
                    "- **Nível {level} {}:** {count} notas ({:.1}%)",
                    "⭐".repeat(usize::from(level)),
                    percentage(count, stats.notes_with_area)
                )?;
            }
        }

        writeln!(f, "\n## Sugestões de Estudo\n")?;

        if !stats.low_coverage_areas.is_empty() {
            writeln!(
                f,
                "### Áreas com baixa cobertura (menos de {LOW_COVERAGE_THRESHOLD} notas):"
            )?;
            for area in &stats.low_coverage_areas {
                writeln!(f, "- {area}")?;
            }
            writeln!(f)?;
        }

        if !stats.high_relevance.is_empty() {
            writeln!(f, "### Notas de Alta Relevância para Revisão:")?;
            for note in &stats.high_relevance {
                writeln!(
                    f,
                    "- **{}** (Rel: {}, Área: {})",
                    note.title,
                    note.relevance,
                    note.area.as_deref().unwrap_or("N/A")
                )?;
            }
            writeln!(f)?;
        }

        if !stats.thin_notes.is_empty() {
            writeln!(
                f,
                "### Notas curtas (menos de {} caracteres):",
                stats.min_content_length
            )?;
            for title in &stats.thin_notes {
                writeln!(f, "- {title}")?;
            }
        }
        Ok(())
    }
}
