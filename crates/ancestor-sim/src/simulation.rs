//! The full Ancestor run: load, simulate, verify, report, log.
//!
//! Every run walks the same steps:
//!
//! 1. Load the citation dataset (failure aborts before any output exists)
//! 2. Build the scorer from the configured rule table or variant
//! 3. Draw and score every episode with one seeded random source
//! 4. Verify the result sequence
//! 5. Write `results.csv`, then render `trust_plot.svg`
//! 6. Seal the audit chain and write the text and JSON build logs
//!
//! Steps 1 to 5 are recorded in the audit chain as they happen.

use std::path::PathBuf;
use std::sync::Arc;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, warn};

use ancestor_audit::InMemoryAuditWriter;
use ancestor_contracts::{
    audit::RunId,
    citation::ScoreResult,
    error::{AncestorError, AncestorResult},
};
use ancestor_core::{traits::AuditWriter, EpisodeRunner, ThresholdGate};
use ancestor_verify::ResultVerifier;

use crate::{
    chart::render_chart,
    config::SimulationConfig,
    dataset::Dataset,
    report::{write_results, RunSummary},
    sampler::UniformSampler,
};

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub run_id: String,
    pub results: Vec<ScoreResult>,
    /// `None` when zero episodes were requested.
    pub summary: Option<RunSummary>,
    pub results_path: PathBuf,
    pub chart_path: PathBuf,
    pub build_log_path: PathBuf,
    pub build_log_json_path: PathBuf,
    /// Hash of the last audit event.
    pub terminal_hash: String,
}

/// Drives one configured run end to end.
pub struct Simulation {
    config: SimulationConfig,
    echo: bool,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config, echo: false }
    }

    /// Print each audit step to stdout as it is recorded.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Execute the run.
    ///
    /// # Errors
    ///
    /// - `ConfigError` for an invalid config or rule table
    /// - `MissingInput`, `MalformedRecord`, `EmptyDataset` from the dataset load
    /// - `VerificationFailed` if the result sequence breaks an invariant
    /// - `OutputWrite` if the output directory or any output file cannot be written
    /// - `Render` if the chart fails; `results.csv` is already on disk by then
    pub fn run(&self) -> AncestorResult<SimulationOutcome> {
        let config = &self.config;
        config.validate()?;

        let dataset = Dataset::load(&config.dataset, config.malformed)?;
        let scorer = config.scorer()?;

        std::fs::create_dir_all(&config.output_dir).map_err(|e| AncestorError::OutputWrite {
            path: config.output_dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let run_id = RunId::new();
        let audit = Arc::new(InMemoryAuditWriter::new(&run_id).with_echo(self.echo));
        info!(run_id = %run_id, dataset = %dataset.source_name, "simulation starting");

        audit.record(&load_message(&dataset))?;
        audit.record(&format!(
            "Defined Ancestor scoring function '{}' with {} rules, base score {} and age penalty {} per day",
            scorer.table().name,
            scorer.table().rules.len(),
            scorer.table().base_score,
            scorer.table().age_penalty_per_day,
        ))?;

        let runner = EpisodeRunner::new(
            Box::new(UniformSampler::new(config.age)),
            Box::new(scorer),
            Box::new(ThresholdGate::new(config.threshold)),
            Box::new(audit.clone()),
        );
        let mut rng = StdRng::seed_from_u64(config.seed);
        let results = runner.run(&dataset.records, config.episodes, &mut rng)?;

        ResultVerifier::new(config.episodes, config.threshold).ensure(&results)?;

        let results_path = config.results_path();
        audit.record(&format!(
            "Saving simulation results to {}",
            results_path.display()
        ))?;
        write_results(&results, &results_path)?;
        audit.record(&format!("Results saved with {} episodes logged", results.len()))?;

        let chart_path = config.chart_path();
        audit.record("Creating visualization of trust scores and acceptance decisions")?;
        if let Err(e) = render_chart(&results, config.threshold, &chart_path) {
            warn!(error = %e, path = %chart_path.display(), "chart rendering failed");
            return Err(e);
        }
        audit.record(&format!("Visualization saved as {}", chart_path.display()))?;

        audit.finalize()?;
        let log = audit.export_log()?;
        let build_log_path = config.build_log_path();
        let build_log_json_path = config.build_log_json_path();
        log.write_text(&build_log_path)?;
        log.write_json(&build_log_json_path)?;

        let summary = RunSummary::from_results(&results);
        info!(
            run_id = %run_id,
            episodes = results.len(),
            accepted = summary.as_ref().map_or(0, |s| s.accepted),
            "simulation complete"
        );

        Ok(SimulationOutcome {
            run_id: run_id.to_string(),
            results,
            summary,
            results_path,
            chart_path,
            build_log_path,
            build_log_json_path,
            terminal_hash: log.terminal_hash,
        })
    }
}

fn load_message(dataset: &Dataset) -> String {
    let mut message = format!(
        "Loaded citation data from {} - {} entries found",
        dataset.source_name,
        dataset.len()
    );
    if dataset.skipped > 0 {
        message.push_str(&format!(", {} malformed rows skipped", dataset.skipped));
    }
    if dataset.coerced > 0 {
        message.push_str(&format!(", {} malformed rows coerced", dataset.coerced));
    }
    message
}
