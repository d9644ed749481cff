//! Result presentation: plain text or JSON.

use std::fmt::Write as _;

use precis_core::{EntityMap, EntityRecord, InvalidInputError};
use precis_summarizer::{SUMMARY_FAILED, Summary, Termination};
use serde::Serialize;

/// Everything printed for one run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub summary: String,
    pub termination: Option<Termination>,
    pub iterations: usize,
    pub word_count: usize,
    pub compression_percent: Option<f64>,
    pub failed_segments: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<EntityRecord>>,
}

impl Report {
    pub fn new(outcome: &Result<Summary, InvalidInputError>, entities: Option<&EntityMap>) -> Self {
        let entities = entities.map(EntityMap::to_records);
        match outcome {
            Ok(summary) => Self {
                summary: summary.text.clone(),
                termination: Some(summary.termination),
                iterations: summary.iterations,
                word_count: summary.word_count,
                compression_percent: Some(summary.compression_percent()),
                failed_segments: summary.failed_segments,
                entities,
            },
            Err(_) => Self {
                summary: SUMMARY_FAILED.to_string(),
                termination: None,
                iterations: 0,
                word_count: 0,
                compression_percent: None,
                failed_segments: 0,
                entities,
            },
        }
    }

    /// Human-readable rendering.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.summary);
        if let Some(percent) = self.compression_percent {
            let _ = writeln!(out, "\nArticle compression: {percent:.1}%");
        }
        if let Some(entities) = &self.entities {
            let _ = writeln!(out, "\nEntities:");
            if entities.is_empty() {
                let _ = writeln!(out, "  (none)");
            }
            for record in entities {
                let _ = writeln!(
                    out,
                    "  {} ({}, {:.2})",
                    record.entity, record.label, record.score
                );
            }
        }
        out
    }
}
