use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cacd::{AnalyzerConfig, MetadataAnalyzer};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// cacd - metadata analyzer for CACD study notes
#[derive(Parser, Debug)]
#[command(name = "cacd")]
#[command(about = "Classifies study notes against a taxonomy and proposes metadata for review")]
#[command(version)]
struct Cli {
    /// Root directory of the note vault
    #[arg(value_name = "VAULT")]
    vault: PathBuf,

    /// Taxonomy file (YAML: area -> subarea -> [topics])
    #[arg(short, long, value_name = "FILE")]
    taxonomy: PathBuf,

    /// Operation to run
    #[arg(short, long, value_enum, default_value_t = Mode::Analyze)]
    mode: Mode,

    /// Minimum classification confidence for a relevance above 1
    #[arg(long, value_name = "F")]
    min_confidence: Option<f64>,

    /// Rewrite notes without keeping a backup copy
    #[arg(long)]
    no_backup: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Available operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Write the review file for notes missing metadata
    Analyze,
    /// Regenerate the review file
    Feedback,
    /// Apply the approved fields of the review file
    Process,
    /// Write the study report
    Report,
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the run configuration: defaults, then `CACD_*` variables, then flags.
fn build_config(cli: &Cli) -> Result<AnalyzerConfig> {
    let mut config = AnalyzerConfig::from_env().context("invalid environment configuration")?;
    if let Some(min_confidence) = cli.min_confidence {
        config.relevance_threshold = min_confidence;
    }
    if cli.no_backup {
        config.backup_original = false;
    }
    Ok(config)
}

fn ensure_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("{what} not found: {}", path.display());
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    ensure_exists(&cli.vault, "vault")?;
    ensure_exists(&cli.taxonomy, "taxonomy file")?;

    let config = build_config(cli)?;
    let mut analyzer = MetadataAnalyzer::open(&cli.vault, &cli.taxonomy, config);
    analyzer.scan()?;

    match cli.mode {
        Mode::Analyze | Mode::Feedback => match analyzer.generate_feedback()? {
            Some(summary) => {
                println!(
                    "Review file written: {} ({} notes)",
                    summary.path.display(),
                    summary.notes
                );
                if cli.mode == Mode::Analyze {
                    println!("Mark approved fields with [x], then run with --mode process");
                }
            }
            None => println!("Nothing to review: every note already has complete metadata"),
        },
        Mode::Process => {
            let summary = analyzer.process_feedback()?;
            println!("Updated {} notes", summary.updated);
            if summary.failed > 0 || summary.unresolved > 0 {
                println!(
                    "Skipped {} failed and {} unresolved sections (see log)",
                    summary.failed, summary.unresolved
                );
            }
            println!("Review file moved to {}", summary.processed_path.display());
        }
        Mode::Report => {
            let path = analyzer.generate_report()?;
            println!("Study report written: {}", path.display());
        }
    }

    Ok(())
}
