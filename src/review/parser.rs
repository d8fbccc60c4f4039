use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::ApprovedChanges;
use super::writer::{DECISION_PREFIX, FILE_LABEL, SECTION_PREFIX};
use crate::utils::split_list;
use crate::{FieldValue, HeaderField, NoteId, TagNormalizer};

static FIELD_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?):\*\* (.+)").expect("valid field pattern"));

static FILE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Arquivo:\*\*\s*`([^`]+)`").expect("valid file pattern"));

/// Extracts the approved fields from a review document.
///
/// Sections are returned in document order. Sections that name the same
/// note are merged, later approvals winning, and sections without any
/// approved field are dropped. Checked decisions outside a section, or
/// under a line that is not a known field, are ignored.
pub fn parse_review(content: &str) -> Vec<ApprovedChanges> {
    let mut sections: Vec<ApprovedChanges> = Vec::new();
    let mut current: Option<ApprovedChanges> = None;
    let mut previous = "";

    for line in content.lines() {
        if let Some(title) = line.strip_prefix(SECTION_PREFIX) {
            if let Some(done) = current.take() {
                push_section(&mut sections, done);
            }
            current = Some(ApprovedChanges::new(title.trim()));
        } else if let Some(section) = current.as_mut() {
            if line.starts_with(FILE_LABEL)
                && let Some(caps) = FILE_LINE.captures(line)
            {
                section.note_id = Some(NoteId::new(caps[1].trim()));
            } else if is_checked(line)
                && let Some((field, value)) = parse_field_line(previous)
            {
                debug!(note = %section.title, %field, "approved field");
                section.approve(field, value);
            }
        }
        previous = line;
    }

    if let Some(done) = current {
        push_section(&mut sections, done);
    }
    sections.retain(|s| !s.is_empty());
    sections
}

fn push_section(sections: &mut Vec<ApprovedChanges>, section: ApprovedChanges) {
    match sections.iter_mut().find(|s| s.same_target(&section)) {
        Some(existing) => existing.merge(section),
        None => sections.push(section),
    }
}

fn is_checked(line: &str) -> bool {
    line.trim_start()
        .strip_prefix(DECISION_PREFIX)
        .map(str::trim)
        .is_some_and(|mark| mark.eq_ignore_ascii_case("[x]"))
}

/// Reads `**Label:** value` from the line above a checked decision.
fn parse_field_line(line: &str) -> Option<(HeaderField, FieldValue)> {
    let caps = FIELD_LINE.captures(line)?;
    let label = &caps[1];
    let Some(field) = HeaderField::from_label(label) else {
        debug!(label, "ignoring approval for unknown field");
        return None;
    };
    convert_value(field, caps[2].trim()).map(|value| (field, value))
}

fn convert_value(field: HeaderField, raw: &str) -> Option<FieldValue> {
    match field {
        HeaderField::Tags => {
            let tags = TagNormalizer::normalize_tags(split_list(raw));
            (!tags.is_empty()).then_some(FieldValue::List(tags))
        }
        HeaderField::Connections => {
            let titles = split_list(raw);
            (!titles.is_empty()).then_some(FieldValue::List(titles))
        }
        HeaderField::Relevance => {
            let leading = raw.split('/').next().unwrap_or_default().trim();
            match leading.parse::<u8>() {
                Ok(score @ 1..=5) => Some(FieldValue::Score(score)),
                _ => {
                    warn!(value = raw, "ignoring relevance outside 1..=5");
                    None
                }
            }
        }
        HeaderField::Area | HeaderField::Subarea | HeaderField::Topic => {
            (!raw.is_empty()).then(|| FieldValue::Text(raw.to_string()))
        }
    }
}
