use super::*;
use crate::{HeaderField, keys};
use tempfile::TempDir;

const TAXONOMY: &str = "\
História do Brasil:
  Guerra do Paraguai: [Tríplice Aliança, Causas da guerra]
  Império: [Segundo Reinado]
ECONOMIA:
  Comércio Internacional: [OMC, Balança comercial]
";

fn vault(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp vault");
    for (name, content) in files {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

fn analyzer(dir: &TempDir, config: AnalyzerConfig) -> MetadataAnalyzer {
    let taxonomy = Taxonomy::from_yaml_str(TAXONOMY).expect("valid taxonomy");
    let mut analyzer = MetadataAnalyzer::new(dir.path(), &taxonomy, config);
    analyzer.scan().expect("scan should succeed");
    analyzer
}

fn check_all(document: &str) -> String {
    document.replace("- Decisão: [ ]", "- Decisão: [x]")
}

#[test]
fn empty_vault_writes_no_review_file() {
    let dir = vault(&[]);
    let analyzer = analyzer(&dir, AnalyzerConfig::default());

    assert_eq!(analyzer.store().len(), 0);
    assert_eq!(analyzer.generate_feedback().unwrap(), None);
    assert!(!analyzer.feedback_path().exists());
}

#[test]
fn complete_notes_never_reach_the_review_file() {
    let dir = vault(&[
        (
            "completa.md",
            "---\ntitle: Completa\narea: ECONOMIA\nrelevancia_cacd: 3\n---\nOMC e comércio internacional.",
        ),
        ("pendente.md", "A Guerra do Paraguai e a Tríplice Aliança."),
    ]);
    let analyzer = analyzer(&dir, AnalyzerConfig::default());

    let summary = analyzer.generate_feedback().unwrap().expect("one pending note");
    let document = fs::read_to_string(&summary.path).unwrap();

    assert_eq!(summary.notes, 1);
    assert!(document.contains("## Nota: pendente"));
    assert!(!document.contains("Completa"));
}

#[test]
fn unmatched_notes_are_not_proposed() {
    let dir = vault(&[("bolo.md", "Receita de bolo de cenoura.")]);
    let analyzer = analyzer(&dir, AnalyzerConfig::default());

    assert!(analyzer.pending_suggestions().is_empty());
    assert_eq!(analyzer.generate_feedback().unwrap(), None);
}

#[test]
fn approving_everything_applies_every_suggested_value() {
    let dir = vault(&[
        (
            "historia/guerra.md",
            "---\ntitle: Guerra do Paraguai\nautor: eu\n---\n\nA Guerra do Paraguai opôs o Paraguai à Tríplice Aliança.\n",
        ),
        (
            "economia/omc.md",
            "A OMC regula o comércio internacional e a balança comercial.",
        ),
    ]);
    let mut analyzer = analyzer(&dir, AnalyzerConfig::default());
    let expected = analyzer.pending_suggestions();
    assert_eq!(expected.len(), 2);

    let summary = analyzer.generate_feedback().unwrap().unwrap();
    let document = fs::read_to_string(&summary.path).unwrap();
    fs::write(&summary.path, check_all(&document)).unwrap();

    let processed = analyzer.process_feedback().unwrap();

    assert_eq!(processed.updated, 2);
    assert_eq!(processed.failed, 0);
    assert_eq!(processed.unresolved, 0);
    assert!(processed.processed_path.exists());
    assert!(!summary.path.exists());

    for suggestion in expected {
        let note = analyzer.store().get(&suggestion.note_id).unwrap();
        for (field, value) in suggestion.proposed_fields() {
            assert_eq!(
                note.header.get(field.key()),
                Some(&value.to_yaml()),
                "{field} of {}",
                note.id
            );
        }
        assert!(note.has_complete_metadata());
    }

    let rewritten = fs::read_to_string(dir.path().join("historia/guerra.md")).unwrap();
    assert!(rewritten.starts_with("---\ntitle: Guerra do Paraguai\nautor: eu\narea: "));
    assert!(rewritten.ends_with("---\n\nA Guerra do Paraguai opôs o Paraguai à Tríplice Aliança.\n"));
}

#[test]
fn only_checked_fields_are_applied() {
    let dir = vault(&[("guerra.md", "A Guerra do Paraguai e a Tríplice Aliança.")]);
    let mut analyzer = analyzer(&dir, AnalyzerConfig::default());

    let summary = analyzer.generate_feedback().unwrap().unwrap();
    let document = fs::read_to_string(&summary.path).unwrap();
    let approved = document.replacen("- Decisão: [ ]", "- Decisão: [x]", 1);
    fs::write(&summary.path, approved).unwrap();

    analyzer.process_feedback().unwrap();

    let note = analyzer.store().get(&NoteId::new("guerra.md")).unwrap();
    assert_eq!(
        note.header.get_text(keys::AREA).as_deref(),
        Some("História do Brasil")
    );
    for field in [HeaderField::Subarea, HeaderField::Tags, HeaderField::Relevance] {
        assert!(note.header.get(field.key()).is_none(), "{field} was not approved");
    }
}

#[test]
fn backups_follow_configuration() {
    let original = "A Guerra do Paraguai e a Tríplice Aliança.";
    let dir = vault(&[("guerra.md", original)]);
    let mut analyzer = analyzer(&dir, AnalyzerConfig::default());

    let summary = analyzer.generate_feedback().unwrap().unwrap();
    let document = fs::read_to_string(&summary.path).unwrap();
    fs::write(&summary.path, check_all(&document)).unwrap();
    analyzer.process_feedback().unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("guerra.bak")).unwrap(),
        original
    );

    let dir = vault(&[("guerra.md", original)]);
    let config = AnalyzerConfig {
        backup_original: false,
        ..Default::default()
    };
    let mut analyzer = self::analyzer(&dir, config);
    let summary = analyzer.generate_feedback().unwrap().unwrap();
    let document = fs::read_to_string(&summary.path).unwrap();
    fs::write(&summary.path, check_all(&document)).unwrap();
    analyzer.process_feedback().unwrap();

    assert!(!dir.path().join("guerra.bak").exists());
}

#[test]
fn missing_review_file_is_an_error() {
    let dir = vault(&[("guerra.md", "Guerra do Paraguai")]);
    let mut analyzer = analyzer(&dir, AnalyzerConfig::default());

    let err = analyzer.process_feedback().unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ReviewError>(),
        Some(ReviewError::MissingFile(_))
    ));
}

#[test]
fn review_with_no_approvals_still_marks_file_processed() {
    let dir = vault(&[("guerra.md", "A Guerra do Paraguai e a Tríplice Aliança.")]);
    let mut analyzer = analyzer(&dir, AnalyzerConfig::default());
    analyzer.generate_feedback().unwrap();

    let summary = analyzer.process_feedback().unwrap();

    assert_eq!(summary.updated, 0);
    assert!(summary.processed_path.ends_with("cacd_feedback.processed.md"));
    assert!(summary.processed_path.exists());
    assert!(!analyzer.feedback_path().exists());
}

#[test]
fn second_processing_keeps_the_earlier_processed_review() {
    let dir = vault(&[("guerra.md", "A Guerra do Paraguai e a Tríplice Aliança.")]);
    let mut analyzer = analyzer(&dir, AnalyzerConfig::default());

    analyzer.generate_feedback().unwrap();
    let first = analyzer.process_feedback().unwrap();
    let first_content = fs::read_to_string(&first.processed_path).unwrap();
    analyzer.generate_feedback().unwrap();
    let second = analyzer.process_feedback().unwrap();

    assert_ne!(first.processed_path, second.processed_path);
    assert!(second.processed_path.ends_with("cacd_feedback.processed-2.md"));
    assert_eq!(fs::read_to_string(&first.processed_path).unwrap(), first_content);
    assert!(second.processed_path.exists());
    assert_eq!(analyzer.scan().unwrap(), 1);
}

#[cfg(unix)]
#[test]
fn approvals_rewrite_the_target_of_a_symlinked_note() {
    let outside = vault(&[("guerra.md", "A Guerra do Paraguai e a Tríplice Aliança.")]);
    let dir = vault(&[]);
    let link = dir.path().join("guerra.md");
    std::os::unix::fs::symlink(outside.path().join("guerra.md"), &link).unwrap();
    let config = AnalyzerConfig {
        backup_original: false,
        ..AnalyzerConfig::default()
    };
    let mut analyzer = analyzer(&dir, config);
    assert_eq!(analyzer.store().len(), 1);

    let summary = analyzer.generate_feedback().unwrap().unwrap();
    let document = fs::read_to_string(&summary.path).unwrap();
    fs::write(&summary.path, check_all(&document)).unwrap();
    assert_eq!(analyzer.process_feedback().unwrap().updated, 1);

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    let rewritten = fs::read_to_string(outside.path().join("guerra.md")).unwrap();
    assert!(rewritten.starts_with("---\n"));
    assert!(rewritten.contains("\narea: "));
    assert!(rewritten.ends_with("A Guerra do Paraguai e a Tríplice Aliança."));
}

#[test]
fn generated_files_are_not_rescanned_as_notes() {
    let dir = vault(&[("guerra.md", "A Guerra do Paraguai e a Tríplice Aliança.")]);
    let mut analyzer = analyzer(&dir, AnalyzerConfig::default());
    analyzer.generate_feedback().unwrap();
    analyzer.generate_report().unwrap();

    assert_eq!(analyzer.scan().unwrap(), 1);
}

#[test]
fn report_is_written_under_the_vault() {
    let dir = vault(&[(
        "omc.md",
        "---\ntitle: OMC\narea: ECONOMIA\nrelevancia_cacd: 5\n---\nOrganização Mundial do Comércio.",
    )]);
    let analyzer = analyzer(&dir, AnalyzerConfig::default());

    let path = analyzer.generate_report().unwrap();
    let report = fs::read_to_string(&path).unwrap();

    assert_eq!(path, dir.path().join("cacd_study_report.md"));
    assert!(report.contains("- **Total de notas:** 1"));
    assert!(report.contains("- **OMC** (Rel: 5, Área: ECONOMIA)"));
}

#[test]
fn missing_taxonomy_degrades_to_unmatched() {
    let dir = vault(&[("guerra.md", "Guerra do Paraguai")]);
    let mut analyzer = MetadataAnalyzer::open(
        dir.path(),
        &dir.path().join("nao-existe.yaml"),
        AnalyzerConfig::default(),
    );
    analyzer.scan().unwrap();

    let suggestion = analyzer.analyze_note(&NoteId::new("guerra.md")).unwrap();
    assert!(suggestion.area.is_none());
    assert_eq!(suggestion.relevance, Some(1));
}
