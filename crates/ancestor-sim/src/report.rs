//! Results table and run summary.

use std::path::Path;

use serde::Serialize;

use ancestor_contracts::{
    citation::{round2, ScoreResult},
    error::{AncestorError, AncestorResult},
};

/// One row of `results.csv`.
///
/// Column order is the field order below.
#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    episode: u32,
    url: &'a str,
    domain: &'a str,
    category: &'a str,
    age_days: u32,
    score: String,
    accepted: u8,
}

impl<'a> From<&'a ScoreResult> for ResultRow<'a> {
    fn from(r: &'a ScoreResult) -> Self {
        Self {
            episode: r.episode,
            url: &r.citation.url,
            domain: &r.citation.domain,
            category: &r.citation.category,
            age_days: r.citation.age_days,
            score: format!("{:.2}", r.rounded_score()),
            accepted: u8::from(r.accepted),
        }
    }
}

/// Render the results table as CSV text, header included.
pub fn results_csv(results: &[ScoreResult]) -> AncestorResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if results.is_empty() {
        writer
            .write_record(["episode", "url", "domain", "category", "age_days", "score", "accepted"])
            .map_err(|e| csv_error("<memory>", e))?;
    }
    for result in results {
        writer
            .serialize(ResultRow::from(result))
            .map_err(|e| csv_error("<memory>", e))?;
    }
    let bytes = writer.into_inner().map_err(|e| AncestorError::OutputWrite {
        path: "<memory>".to_string(),
        reason: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| AncestorError::OutputWrite {
        path: "<memory>".to_string(),
        reason: e.to_string(),
    })
}

/// Write the results table to `path`, replacing any previous file.
pub fn write_results(results: &[ScoreResult], path: &Path) -> AncestorResult<()> {
    let text = results_csv(results)?;
    std::fs::write(path, text).map_err(|e| AncestorError::OutputWrite {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn csv_error(path: &str, e: csv::Error) -> AncestorError {
    AncestorError::OutputWrite {
        path: path.to_string(),
        reason: e.to_string(),
    }
}

/// Aggregate figures for one run, computed over the rounded scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// `accepted / total`, in [0, 1].
    pub acceptance_rate: f64,
    pub average_score: f64,
    pub min_score: f64,
    pub max_score: f64,
}

impl RunSummary {
    /// `None` for an empty run.
    pub fn from_results(results: &[ScoreResult]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }

        let scores: Vec<f64> = results.iter().map(ScoreResult::rounded_score).collect();
        let total = results.len();
        let accepted = results.iter().filter(|r| r.accepted).count();

        Some(Self {
            total,
            accepted,
            rejected: total - accepted,
            acceptance_rate: accepted as f64 / total as f64,
            average_score: round2(scores.iter().sum::<f64>() / total as f64),
            min_score: scores.iter().copied().fold(f64::INFINITY, f64::min),
            max_score: scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }

    /// Multi-line, human-readable rendering.
    pub fn render(&self) -> String {
        format!(
            "Episodes: {}\nAccepted: {} ({:.1}%)\nRejected: {}\nScore: avg {:.2}, min {:.2}, max {:.2}",
            self.total,
            self.accepted,
            self.acceptance_rate * 100.0,
            self.rejected,
            self.average_score,
            self.min_score,
            self.max_score,
        )
    }
}
