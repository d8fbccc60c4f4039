use std::fmt;

use time::OffsetDateTime;

use crate::utils::format_timestamp;
use crate::{Note, Suggestion};

pub(super) const DOCUMENT_TITLE: &str = "# CACD - Revisão de Metadados";
pub(super) const SECTION_PREFIX: &str = "## Nota:";
pub(super) const FILE_LABEL: &str = "**Arquivo:**";
pub(super) const DECISION_PREFIX: &str = "- Decisão:";

const INSTRUCTIONS: &str = "**Instruções:** Marque com [x] para aprovar, [ ] para rejeitar";
const UNCHECKED: &str = "[ ]";

/// A note paired with the suggestion to review for it.
#[derive(Debug, Clone, Copy)]
pub struct ReviewEntry<'a> {
    pub note: &'a Note,
    pub suggestion: &'a Suggestion,
}

/// Renders a review document for `entries`, in the given order.
///
/// Every proposed field gets its own unchecked decision line.
pub fn render_review(entries: &[ReviewEntry<'_>], generated_at: OffsetDateTime) -> String {
    ReviewDocument {
        entries,
        generated_at,
    }
    .to_string()
}

struct ReviewDocument<'a> {
    entries: &'a [ReviewEntry<'a>],
    generated_at: OffsetDateTime,
}

impl fmt::Display for ReviewDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{DOCUMENT_TITLE}\n\nGerado em: {}\n\n{INSTRUCTIONS}\n\n",
            format_timestamp(self.generated_at)
        )?;
        for entry in self.entries {
            write_section(f, entry)?;
        }
        Ok(())
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, entry: &ReviewEntry<'_>) -> fmt::Result {
    let ReviewEntry { note, suggestion } = entry;

    writeln!(f, "{SECTION_PREFIX} {}", note.title)?;
    writeln!(f, "{FILE_LABEL} `{}`", note.id)?;
    writeln!(f, "**Confiança:** {:.2}\n", suggestion.confidence)?;

    for (field, value) in suggestion.proposed_fields() {
        writeln!(f, "- **{}:** {}", field.label(), value.display_value())?;
        writeln!(f, "  {DECISION_PREFIX} {UNCHECKED}")?;
    }

    f.write_str("\n---\n\n")
}
