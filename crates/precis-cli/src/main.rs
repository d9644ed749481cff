//! # precis
//!
//! Command-line entry point: reads a document, summarizes it down to a
//! target length through the hosted summarization model, optionally
//! extracts entities, and prints the result as text or JSON.

#![deny(unsafe_code)]

mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use precis_core::Document;
use precis_entities::{AggregatorConfig, EntityAggregator};
use precis_models::{HttpEntityModel, HttpModelConfig, HttpSummarizationModel};
use precis_settings::{ChunkingSettings, DEFAULT_TOKEN_FACTOR, PrecisSettings};
use precis_summarizer::{IterativeSummarizer, SUMMARY_FAILED, SummarizerConfig};
use tokio::io::AsyncReadExt;
use tracing::{error, info, warn};

use crate::report::Report;

/// Iteratively summarize a document and extract its named entities.
#[derive(Parser, Debug)]
#[command(name = "precis", version, about)]
struct Cli {
    /// Document to summarize; `-` or absent reads stdin.
    file: Option<PathBuf>,

    /// Settings file (defaults to `~/.precis/settings.json`).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Target summary length in words.
    #[arg(long)]
    target_length: Option<usize>,

    /// Maximum number of summarization passes.
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Segment budget per model call.
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Chunking strategy.
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Characters per token for the fixed-window strategy.
    #[arg(long)]
    token_factor: Option<f64>,

    /// Segments summarized concurrently within one pass.
    #[arg(long)]
    concurrency: Option<usize>,

    /// Also extract named entities.
    #[arg(long)]
    entities: bool,

    /// Entity labels, comma separated.
    #[arg(long, value_delimiter = ',')]
    labels: Option<Vec<String>>,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Pack whole sentences up to the word budget.
    Sentence,
    /// Fixed character windows.
    Fixed,
}

impl Cli {
    /// Overlay command-line values on loaded settings.
    fn apply_overrides(&self, settings: &mut PrecisSettings) {
        let s = &mut settings.summarizer;
        if let Some(v) = self.target_length {
            s.target_length = v;
        }
        if let Some(v) = self.max_iterations {
            s.max_iterations = v;
        }
        if let Some(v) = self.max_tokens {
            s.max_tokens = v;
        }
        if let Some(v) = self.concurrency {
            s.concurrency = v;
        }

        match self.strategy {
            Some(Strategy::Sentence) => {
                if !matches!(s.chunking, ChunkingSettings::SentencePacking { .. }) {
                    s.chunking = ChunkingSettings::default();
                }
            }
            Some(Strategy::Fixed) => {
                let current = match s.chunking {
                    ChunkingSettings::FixedWindow { token_factor } => token_factor,
                    ChunkingSettings::SentencePacking { .. } => DEFAULT_TOKEN_FACTOR,
                };
                s.chunking = ChunkingSettings::FixedWindow {
                    token_factor: self.token_factor.unwrap_or(current),
                };
            }
            None => {
                if let (Some(v), ChunkingSettings::FixedWindow { token_factor }) =
                    (self.token_factor, &mut s.chunking)
                {
                    *token_factor = v;
                }
            }
        }

        if let Some(labels) = &self.labels {
            settings.entities.labels = labels
                .iter()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect();
        }
    }
}

fn load_settings(cli: &Cli) -> Result<PrecisSettings> {
    let mut settings = match &cli.settings {
        Some(path) => precis_settings::load_settings_from_path(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => precis_settings::load_settings().context("Failed to load settings")?,
    };
    cli.apply_overrides(&mut settings);
    precis_settings::validate(&settings).context("Invalid settings after CLI overrides")?;
    Ok(settings)
}

/// Read the document from `path`, or stdin when absent or `-`.
async fn read_document(path: Option<&Path>) -> Result<Document> {
    let text = match path {
        Some(path) if path != Path::new("-") => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => {
            let mut text = String::new();
            let _ = tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read stdin")?;
            text
        }
    };
    Ok(Document::new(text))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    precis_logging::init_logging(&settings.logging).context("Failed to initialize logging")?;

    let document = read_document(cli.file.as_deref()).await?;
    if document.is_blank() {
        warn!("document is blank");
    }
    info!(
        words = document.word_count(),
        summarizer = %settings.models.summarization.base_url,
        "document loaded"
    );

    let model = HttpSummarizationModel::new(HttpModelConfig::from_settings(
        &settings.models.summarization,
        &settings.models.retry,
    ));
    let summarizer =
        IterativeSummarizer::new(Arc::new(model), SummarizerConfig::from(&settings.summarizer));
    let outcome = summarizer.summarize_document(&document).await;
    if let Err(err) = &outcome {
        error!(error = %err, "summarization failed");
        eprintln!("{SUMMARY_FAILED}: {err}");
    }

    let entities = if cli.entities {
        let model = HttpEntityModel::new(HttpModelConfig::from_settings(
            &settings.models.entities,
            &settings.models.retry,
        ));
        let aggregator =
            EntityAggregator::new(Arc::new(model), AggregatorConfig::from(&settings.entities));
        Some(aggregator.extract(document.raw_text()).await)
    } else {
        None
    };

    let report = Report::new(&outcome, entities.as_ref());
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("precis").chain(args.iter().copied()))
    }

    // ── parsing ─────────────────────────────────────────────────────

    #[test]
    fn defaults_read_stdin_as_text() {
        let cli = parse(&[]);
        assert!(cli.file.is_none());
        assert!(!cli.json);
        assert!(!cli.entities);
        assert!(cli.strategy.is_none());
    }

    #[test]
    fn parses_file_and_flags() {
        let cli = parse(&[
            "article.txt",
            "--target-length",
            "80",
            "--strategy",
            "fixed",
            "--labels",
            "company,person",
            "--entities",
            "--json",
        ]);
        assert_eq!(cli.file, Some(PathBuf::from("article.txt")));
        assert_eq!(cli.target_length, Some(80));
        assert_eq!(cli.strategy, Some(Strategy::Fixed));
        assert_eq!(
            cli.labels,
            Some(vec!["company".to_string(), "person".to_string()])
        );
        assert!(cli.entities && cli.json);
    }

    #[test]
    fn rejects_unknown_strategy() {
        assert!(Cli::try_parse_from(["precis", "--strategy", "paragraph"]).is_err());
    }

    // ── overrides ───────────────────────────────────────────────────

    #[test]
    fn overrides_replace_settings() {
        let mut settings = PrecisSettings::default();
        parse(&["--target-length", "60", "--max-iterations", "2", "--concurrency", "4"])
            .apply_overrides(&mut settings);
        assert_eq!(settings.summarizer.target_length, 60);
        assert_eq!(settings.summarizer.max_iterations, 2);
        assert_eq!(settings.summarizer.concurrency, 4);
        assert_eq!(settings.summarizer.max_tokens, 150);
    }

    #[test]
    fn fixed_strategy_uses_token_factor() {
        let mut settings = PrecisSettings::default();
        parse(&["--strategy", "fixed", "--token-factor", "3.5"]).apply_overrides(&mut settings);
        assert_eq!(
            settings.summarizer.chunking,
            ChunkingSettings::FixedWindow { token_factor: 3.5 }
        );

        let mut settings = PrecisSettings::default();
        parse(&["--strategy", "fixed"]).apply_overrides(&mut settings);
        assert_eq!(
            settings.summarizer.chunking,
            ChunkingSettings::FixedWindow {
                token_factor: DEFAULT_TOKEN_FACTOR
            }
        );
    }

    #[test]
    fn token_factor_alone_leaves_sentence_packing() {
        let mut settings = PrecisSettings::default();
        parse(&["--token-factor", "2"]).apply_overrides(&mut settings);
        assert_eq!(settings.summarizer.chunking, ChunkingSettings::default());
    }

    #[test]
    fn sentence_strategy_resets_fixed_window() {
        let mut settings = PrecisSettings::default();
        settings.summarizer.chunking = ChunkingSettings::FixedWindow { token_factor: 2.0 };
        parse(&["--strategy", "sentence"]).apply_overrides(&mut settings);
        assert_eq!(settings.summarizer.chunking, ChunkingSettings::default());
    }

    #[test]
    fn blank_labels_are_dropped() {
        let mut settings = PrecisSettings::default();
        parse(&["--labels", "company, ,person"]).apply_overrides(&mut settings);
        assert_eq!(settings.entities.labels, ["company", "person"]);
    }

    #[test]
    fn settings_file_and_overrides_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"summarizer": {"targetLength": 90}}"#).unwrap();

        let path_arg = path.to_string_lossy().to_string();
        let settings = load_settings(&parse(&["--settings", &path_arg])).unwrap();
        assert_eq!(settings.summarizer.target_length, 90);

        assert!(load_settings(&parse(&["--settings", &path_arg, "--concurrency", "0"])).is_err());
    }

    // ── input ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn reads_document_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "Some article text.").unwrap();
        let document = read_document(Some(&path)).await.unwrap();
        assert_eq!(document.raw_text(), "Some article text.");
        assert_eq!(document.word_count(), 3);
    }

    #[tokio::test]
    async fn blank_file_reads_as_blank_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        std::fs::write(&path, " \n\t\n").unwrap();
        let document = read_document(Some(&path)).await.unwrap();
        assert!(document.is_blank());
        assert_eq!(document.word_count(), 0);
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let err = read_document(Some(Path::new("/nonexistent/precis.txt")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
