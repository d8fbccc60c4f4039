//! End-to-end tests of the review workflow over the sample vault in
//! `tests/fixtures`: scan, write the review file, approve, process, report.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use cacd::{AnalyzerConfig, HeaderField, MetadataAnalyzer, NoteId, ReviewError, keys};
use tempfile::TempDir;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Copies the sample vault into a scratch directory so tests can rewrite it.
fn sample_vault() -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp vault");
    for entry in fs::read_dir(fixtures().join("vault")).expect("fixture vault") {
        let entry = entry.unwrap();
        fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
    }
    dir
}

fn open(vault: &TempDir, config: AnalyzerConfig) -> Result<MetadataAnalyzer> {
    let mut analyzer =
        MetadataAnalyzer::open(vault.path(), &fixtures().join("taxonomia_cacd.yaml"), config);
    analyzer.scan()?;
    Ok(analyzer)
}

fn approve_all(path: &Path) {
    let document = fs::read_to_string(path).unwrap();
    fs::write(path, document.replace("- Decisão: [ ]", "- Decisão: [x]")).unwrap();
}

#[test]
fn sample_vault_loads_every_note() -> Result<()> {
    let vault = sample_vault();
    let analyzer = open(&vault, AnalyzerConfig::default())?;

    assert_eq!(analyzer.store().len(), 5);
    let urbanizacao = analyzer
        .store()
        .get(&NoteId::new("urbanizacao-brasil.md"))
        .expect("note without header is loaded");
    assert_eq!(urbanizacao.title, "urbanizacao-brasil");
    assert!(urbanizacao.header.is_empty());
    Ok(())
}

#[test]
fn urbanization_note_is_classified_under_geography() -> Result<()> {
    let vault = sample_vault();
    let analyzer = open(&vault, AnalyzerConfig::default())?;

    let suggestion = analyzer
        .analyze_note(&NoteId::new("urbanizacao-brasil.md"))
        .expect("note exists");

    assert_eq!(suggestion.area.as_deref(), Some("Geografia"));
    assert_eq!(suggestion.subarea.as_deref(), Some("Geografia Urbana"));
    assert!(suggestion.confidence > 0.0 && suggestion.confidence <= 1.0);
    assert!(suggestion.tags.len() <= 5);
    assert!(matches!(suggestion.relevance, Some(1..=5)));
    Ok(())
}

#[test]
fn review_file_skips_notes_with_complete_metadata() -> Result<()> {
    let vault = sample_vault();
    let analyzer = open(&vault, AnalyzerConfig::default())?;

    let summary = analyzer.generate_feedback()?.expect("notes to review");
    let document = fs::read_to_string(&summary.path)?;

    assert_eq!(summary.path, vault.path().join("cacd_feedback.md"));
    assert!(document.starts_with("# CACD - Revisão de Metadados\n"));
    assert!(!document.contains("## Nota: Guerra do Paraguai"));
    assert!(!document.contains("`guerra-do-paraguai.md`"));
    assert_eq!(
        document.matches("## Nota:").count(),
        summary.notes,
        "one section per reviewed note"
    );
    assert!(!document.contains("- Decisão: [x]"));
    Ok(())
}

#[test]
fn approving_every_field_reproduces_the_suggestions() -> Result<()> {
    let vault = sample_vault();
    let mut analyzer = open(&vault, AnalyzerConfig::default())?;
    let suggestions = analyzer.pending_suggestions();
    assert!(!suggestions.is_empty());

    let summary = analyzer.generate_feedback()?.expect("notes to review");
    approve_all(&summary.path);
    let processed = analyzer.process_feedback()?;

    assert_eq!(processed.updated, suggestions.len());
    assert_eq!(processed.failed, 0);
    assert_eq!(processed.unresolved, 0);

    // Re-read from disk to check what was persisted, not just memory.
    let reloaded = open(&vault, AnalyzerConfig::default())?;
    for suggestion in &suggestions {
        let note = reloaded.store().get(&suggestion.note_id).expect("note kept");
        for (field, value) in suggestion.proposed_fields() {
            assert_eq!(
                note.header.get(field.key()),
                Some(&value.to_yaml()),
                "{field} of {}",
                note.id
            );
        }
    }

    assert!(reloaded.pending_suggestions().is_empty());
    assert_eq!(reloaded.generate_feedback()?, None);
    Ok(())
}

#[test]
fn processing_keeps_bodies_and_existing_keys() -> Result<()> {
    let vault = sample_vault();
    let mut analyzer = open(&vault, AnalyzerConfig::default())?;
    let path = vault.path().join("politica-monetaria.md");
    let original = fs::read_to_string(&path)?;

    let summary = analyzer.generate_feedback()?.expect("notes to review");
    approve_all(&summary.path);
    analyzer.process_feedback()?;

    let rewritten = fs::read_to_string(&path)?;
    let body = original.splitn(3, "---\n").nth(2).unwrap();
    assert!(rewritten.starts_with("---\ntitle: Política Monetária no Brasil\n"));
    assert!(rewritten.ends_with(body));
    assert_eq!(
        fs::read_to_string(vault.path().join("politica-monetaria.bak"))?,
        original
    );

    let note = analyzer
        .store()
        .get(&NoteId::new("politica-monetaria.md"))
        .unwrap();
    assert_eq!(
        note.header.get_text(keys::TITLE).as_deref(),
        Some("Política Monetária no Brasil")
    );
    Ok(())
}

#[test]
fn rejected_fields_are_left_alone() -> Result<()> {
    let vault = sample_vault();
    let mut analyzer = open(&vault, AnalyzerConfig::default())?;

    let summary = analyzer.generate_feedback()?.expect("notes to review");
    let document = fs::read_to_string(&summary.path)?;
    // Approve only the relevance line of every section.
    let approved: Vec<String> = {
        let lines: Vec<&str> = document.lines().collect();
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let above_is_relevance =
                    i > 0 && lines[i - 1].starts_with("- **Relevância CACD:**");
                if above_is_relevance {
                    line.replace("[ ]", "[x]")
                } else {
                    (*line).to_string()
                }
            })
            .collect()
    };
    fs::write(&summary.path, approved.join("\n"))?;

    let processed = analyzer.process_feedback()?;
    assert_eq!(processed.updated, summary.notes);

    for note in analyzer.store().notes() {
        if note.id.as_str() == "guerra-do-paraguai.md" {
            continue;
        }
        assert!(note.header.relevance().is_some(), "{} has relevance", note.id);
        assert!(note.header.get(HeaderField::Area.key()).is_none());
        assert!(!note.has_complete_metadata());
    }
    Ok(())
}

#[test]
fn process_without_review_file_fails() -> Result<()> {
    let vault = sample_vault();
    let mut analyzer = open(&vault, AnalyzerConfig::default())?;

    let err = analyzer.process_feedback().unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ReviewError>(),
        Some(ReviewError::MissingFile(_))
    ));
    Ok(())
}

#[test]
fn processed_review_file_is_renamed_not_deleted() -> Result<()> {
    let vault = sample_vault();
    let mut analyzer = open(&vault, AnalyzerConfig::default())?;

    let summary = analyzer.generate_feedback()?.expect("notes to review");
    let processed = analyzer.process_feedback()?;

    assert!(!summary.path.exists());
    assert_eq!(
        processed.processed_path,
        vault.path().join("cacd_feedback.processed.md")
    );
    assert!(fs::read_to_string(&processed.processed_path)?.contains("## Nota:"));
    Ok(())
}

#[test]
fn study_report_reflects_headers() -> Result<()> {
    let vault = sample_vault();
    let analyzer = open(&vault, AnalyzerConfig::default())?;

    let path = analyzer.generate_report()?;
    let report = fs::read_to_string(&path)?;

    assert!(report.contains("- **Total de notas:** 5"));
    assert!(report.contains("- **Notas com metadados:** 1"));
    assert!(report.contains("- **Cobertura:** 20.0%"));
    assert!(report.contains("- **História do Brasil:** 1 notas (100.0%)"));
    assert!(report.contains("- **Guerra do Paraguai** (Rel: 5, Área: História do Brasil)"));
    Ok(())
}
