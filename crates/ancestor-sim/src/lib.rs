//! # ancestor-sim
//!
//! Reference Ancestor trust simulation.
//!
//! A claimant draws citations at random from a fixed dataset, the Ancestor
//! scorer assigns each a trust score, and a consumer accepts the claim when
//! the score clears the threshold. This crate supplies the pieces around the
//! core pipeline:
//!
//! - [`dataset`]: CSV loading with a configurable malformed-row policy
//! - [`sampler`]: the uniform claimant and its age source
//! - [`config`]: the TOML run configuration
//! - [`report`]: `results.csv` and the run summary
//! - [`chart`]: the two-panel `trust_plot.svg`
//! - [`simulation`]: the end-to-end run, audited step by step
//!
//! ```rust,ignore
//! use ancestor_sim::{Simulation, SimulationConfig};
//!
//! let outcome = Simulation::new(SimulationConfig::default()).run()?;
//! println!("{}", outcome.summary.unwrap().render());
//! ```

pub mod chart;
pub mod config;
pub mod dataset;
pub mod report;
pub mod sampler;
pub mod simulation;

pub use config::SimulationConfig;
pub use dataset::{Dataset, MalformedPolicy};
pub use report::RunSummary;
pub use sampler::{AgeSource, UniformSampler};
pub use simulation::{Simulation, SimulationOutcome};

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use rand::{rngs::StdRng, SeedableRng};

    use ancestor_audit::{verify_chain, AuditLog};
    use ancestor_contracts::{
        citation::{CitationRecord, ScoreResult},
        error::AncestorError,
    };
    use ancestor_core::traits::ClaimSampler;
    use ancestor_policy::Variant;

    use crate::{
        config::{SimulationConfig, RESULTS_FILE},
        dataset::{parse_age, Dataset, MalformedPolicy},
        report::{results_csv, RunSummary},
        sampler::{AgeSource, UniformSampler},
        simulation::Simulation,
    };

    const SAMPLE_CSV: &str = "\
Category,URL,Domain,Age,Trust_Description
Academic Research,https://stanford.edu/a,stanford.edu,10,peer reviewed
Blog,https://worldtruth.biz/b,worldtruth.biz,100,known satirical outlet
News,https://example.com/c,example.com,Ongoing,mainstream outlet
Blog,https://clickbait.net/d,clickbait.net,3,unverified
";

    fn bundled(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data").join(name)
    }

    fn write_sample(dir: &Path) -> PathBuf {
        let path = dir.join("sources.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();
        path
    }

    fn config_in(dir: &Path) -> SimulationConfig {
        SimulationConfig {
            dataset: write_sample(dir),
            output_dir: dir.join("out"),
            ..SimulationConfig::default()
        }
    }

    fn result(episode: u32, citation: CitationRecord, score: f64, accepted: bool) -> ScoreResult {
        ScoreResult { episode, citation, score, accepted }
    }

    fn stanford() -> CitationRecord {
        CitationRecord::new("Academic Research", "https://stanford.edu/a", "stanford.edu", 10, "peer reviewed")
    }

    // ── Dataset ──────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("Ongoing"), Ok(0));
        assert_eq!(parse_age(" 42 "), Ok(42));
        assert!(parse_age("-3").is_err());
        assert!(parse_age("+5").is_err());
        assert!(parse_age("").is_err());
        assert!(parse_age("recent").is_err());
    }

    #[test]
    fn test_dataset_parses_rows_in_order() {
        let dataset = Dataset::from_csv_str("sample", SAMPLE_CSV, MalformedPolicy::Abort).unwrap();

        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.records[0], stanford());
        assert_eq!(dataset.records[2].age_days, 0, "Ongoing maps to 0");
        assert_eq!(dataset.skipped, 0);
        assert_eq!(dataset.coerced, 0);
    }

    /// A title line above the header is skipped, and column lookup ignores
    /// case and order.
    #[test]
    fn test_dataset_title_line_and_column_order() {
        let csv = "\
public_citation_sources
trust_description,domain,url,age,category
peer reviewed,stanford.edu,https://stanford.edu/a,10,Academic Research
";
        let dataset = Dataset::from_csv_str("titled", csv, MalformedPolicy::Abort).unwrap();
        assert_eq!(dataset.records, vec![stanford()]);
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let csv = "Category,URL,Domain,Age\nBlog,https://a.com,a.com,1\n";
        match Dataset::from_csv_str("short", csv, MalformedPolicy::Abort) {
            Err(AncestorError::MalformedRecord { row, reason }) => {
                assert_eq!(row, 0);
                assert!(reason.contains("Trust_Description"), "got: {reason}");
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    const BAD_AGE_CSV: &str = "\
Category,URL,Domain,Age,Trust_Description
Blog,https://a.com,a.com,5,ok
Blog,https://b.com,b.com,-1,negative age
Blog,https://c.com,c.com,soon,not a number
";

    #[test]
    fn test_malformed_abort_names_row() {
        match Dataset::from_csv_str("bad", BAD_AGE_CSV, MalformedPolicy::Abort) {
            Err(AncestorError::MalformedRecord { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_skip_drops_rows() {
        let dataset = Dataset::from_csv_str("bad", BAD_AGE_CSV, MalformedPolicy::Skip).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].domain, "a.com");
        assert_eq!(dataset.skipped, 2);
    }

    #[test]
    fn test_malformed_coerce_zeroes_age() {
        let dataset = Dataset::from_csv_str("bad", BAD_AGE_CSV, MalformedPolicy::Coerce).unwrap();
        let ages: Vec<u32> = dataset.records.iter().map(|r| r.age_days).collect();
        assert_eq!(ages, vec![5, 0, 0]);
        assert_eq!(dataset.coerced, 2);
        assert_eq!(dataset.records[2].trust_description, "not a number");
    }

    /// A row missing trailing columns is filled in rather than dropped.
    #[test]
    fn test_malformed_coerce_fills_short_row() {
        let csv = "\
Category,URL,Domain,Age,Trust_Description
Blog,https://x.com,x.com
";
        let dataset = Dataset::from_csv_str("short", csv, MalformedPolicy::Coerce).unwrap();
        assert_eq!(dataset.coerced, 1);
        assert_eq!(
            dataset.records,
            vec![CitationRecord::new("Blog", "https://x.com", "x.com", 0, "")]
        );

        // The same row aborts a strict load.
        assert!(matches!(
            Dataset::from_csv_str("short", csv, MalformedPolicy::Abort),
            Err(AncestorError::MalformedRecord { row: 1, .. })
        ));
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let csv = "Category,URL,Domain,Age,Trust_Description\n";
        assert!(matches!(
            Dataset::from_csv_str("empty", csv, MalformedPolicy::Abort),
            Err(AncestorError::EmptyDataset { .. })
        ));
        // Skipping every row also leaves nothing to sample.
        let all_bad = "Category,URL,Domain,Age,Trust_Description\nBlog,u,d,x,y\n";
        assert!(matches!(
            Dataset::from_csv_str("empty", all_bad, MalformedPolicy::Skip),
            Err(AncestorError::EmptyDataset { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = Dataset::load(&dir.path().join("nope.csv"), MalformedPolicy::Abort);
        assert!(matches!(result, Err(AncestorError::MissingInput { .. })));
    }

    #[test]
    fn test_bundled_datasets_load() {
        let public = Dataset::load(&bundled("public_citation_sources.csv"), MalformedPolicy::Abort).unwrap();
        assert_eq!(public.len(), 12);

        let mixed = Dataset::load(&bundled("mixed_citation_sources.csv"), MalformedPolicy::Abort).unwrap();
        assert_eq!(mixed.len(), 18);
        assert_eq!(mixed.records[0].domain, "stanford.edu");
        assert!(mixed.records.iter().any(|r| r.domain == "worldtruth.biz"));
    }

    // ── Sampler ──────────────────────────────────────────────────────────────

    fn records() -> Vec<CitationRecord> {
        Dataset::from_csv_str("sample", SAMPLE_CSV, MalformedPolicy::Abort)
            .unwrap()
            .records
    }

    #[test]
    fn test_sampler_is_seed_deterministic() {
        let sampler = UniformSampler::default();
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| sampler.sample(&records(), &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn test_sampler_keeps_dataset_age() {
        let sampler = UniformSampler::new(AgeSource::Dataset);
        let data = records();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let claim = sampler.sample(&data, &mut rng).unwrap();
            assert!(data.contains(&claim));
        }
    }

    #[test]
    fn test_sampler_synthesizes_age_in_range() {
        let sampler = UniformSampler::new(AgeSource::Synthesized { min: 5, max: 7 });
        let data = records();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let claim = sampler.sample(&data, &mut rng).unwrap();
            assert!((5..=7).contains(&claim.age_days), "age {}", claim.age_days);
            assert!(data.iter().any(|r| r.url == claim.url));
        }
    }

    #[test]
    fn test_sampler_empty_dataset() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            UniformSampler::default().sample(&[], &mut rng),
            Err(AncestorError::EmptyDataset { .. })
        ));
    }

    // ── Config ───────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_config_is_default() {
        let config = SimulationConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.episodes, 100);
        assert_eq!(config.seed, 42);
        assert_eq!(config.threshold, 60.0);
        assert_eq!(config.variant, Variant::Baseline);
        assert_eq!(config.malformed, MalformedPolicy::Abort);
        assert_eq!(config.results_path(), PathBuf::from(".").join(RESULTS_FILE));
    }

    #[test]
    fn test_full_config_parses() {
        let config = SimulationConfig::from_toml_str(
            r#"
dataset = "data/mixed_citation_sources.csv"
output_dir = "out"
episodes = 20
seed = 7
threshold = 55.5
variant = "extended-misinformation"
malformed = "skip"
age = { source = "synthesized", min = 1, max = 30 }
"#,
        )
        .unwrap();

        assert_eq!(config.episodes, 20);
        assert_eq!(config.seed, 7);
        assert_eq!(config.threshold, 55.5);
        assert_eq!(config.variant, Variant::ExtendedMisinformation);
        assert_eq!(config.malformed, MalformedPolicy::Skip);
        assert_eq!(config.age, AgeSource::Synthesized { min: 1, max: 30 });
        assert_eq!(config.chart_path(), PathBuf::from("out/trust_plot.svg"));
    }

    #[test]
    fn test_config_rejects_unknown_keys_and_bad_ranges() {
        assert!(matches!(
            SimulationConfig::from_toml_str("episodez = 3"),
            Err(AncestorError::ConfigError { .. })
        ));
        assert!(matches!(
            SimulationConfig::from_toml_str(r#"age = { source = "synthesized", min = 9, max = 1 }"#),
            Err(AncestorError::ConfigError { .. })
        ));

        let config = SimulationConfig { threshold: f64::NAN, ..SimulationConfig::default() };
        assert!(matches!(config.validate(), Err(AncestorError::ConfigError { .. })));
    }

    #[test]
    fn test_config_rules_file_overrides_variant() {
        let dir = tempfile::tempdir().unwrap();
        let rules_path = dir.path().join("rules.toml");
        let mut table = Variant::Baseline.table();
        table.name = "house-rules".to_string();
        std::fs::write(&rules_path, table.to_toml_string().unwrap()).unwrap();

        let config = SimulationConfig {
            variant: Variant::ExtendedMisinformation,
            rules: Some(rules_path),
            ..SimulationConfig::default()
        };
        assert_eq!(config.scorer().unwrap().table().name, "house-rules");
    }

    // ── Report ───────────────────────────────────────────────────────────────

    #[test]
    fn test_results_csv_format() {
        let worldtruth = CitationRecord::new("Blog", "https://worldtruth.biz/b", "worldtruth.biz", 100, "known satirical outlet");
        let results = vec![
            result(1, stanford(), 99.9, true),
            result(2, worldtruth, 59.0, false),
        ];

        let csv = results_csv(&results).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "episode,url,domain,category,age_days,score,accepted",
                "1,https://stanford.edu/a,stanford.edu,Academic Research,10,99.90,1",
                "2,https://worldtruth.biz/b,worldtruth.biz,Blog,100,59.00,0",
            ]
        );
    }

    #[test]
    fn test_results_csv_rounds_half_away_from_zero() {
        let csv = results_csv(&[result(1, stanford(), 72.125, true)]).unwrap();
        assert!(csv.lines().nth(1).unwrap().ends_with(",72.13,1"), "got: {csv}");
    }

    #[test]
    fn test_results_csv_empty_has_header() {
        let csv = results_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "episode,url,domain,category,age_days,score,accepted");
    }

    #[test]
    fn test_run_summary() {
        let results = vec![
            result(1, stanford(), 99.9, true),
            result(2, stanford(), 59.0, false),
            result(3, stanford(), 64.0, true),
        ];
        let summary = RunSummary::from_results(&results).unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.rejected, 1);
        assert!((summary.acceptance_rate - 2.0 / 3.0).abs() < 1e-9);
        assert!((summary.average_score - 74.3).abs() < 1e-9);
        assert_eq!(summary.min_score, 59.0);
        assert_eq!(summary.max_score, 99.9);
        assert!(summary.render().contains("Accepted: 2 (66.7%)"));

        assert!(RunSummary::from_results(&[]).is_none());
    }

    // ── End-to-end ───────────────────────────────────────────────────────────

    #[test]
    fn test_simulation_writes_every_output() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = Simulation::new(config_in(dir.path())).run().unwrap();

        assert_eq!(outcome.results.len(), 100);
        for (idx, r) in outcome.results.iter().enumerate() {
            assert_eq!(r.episode, idx as u32 + 1);
            assert_eq!(r.accepted, r.score >= 60.0);
        }
        assert_eq!(outcome.summary.as_ref().unwrap().total, 100);

        let csv = std::fs::read_to_string(&outcome.results_path).unwrap();
        assert_eq!(csv.lines().count(), 101);

        let svg = std::fs::read_to_string(&outcome.chart_path).unwrap();
        assert!(svg.contains("<svg"));

        let text = std::fs::read_to_string(&outcome.build_log_path).unwrap();
        let steps: Vec<&str> = text.lines().filter(|l| l.starts_with("[STEP ")).collect();
        assert_eq!(steps.len(), 8);
        assert!(steps[0].starts_with("[STEP 1] Loaded citation data from"));
        assert!(steps[0].ends_with("4 entries found"));
        assert!(steps[7].starts_with("[STEP 8] Visualization saved as"));
        assert_eq!(text.lines().last(), Some(AuditLog::DONE_MARKER));

        let log = AuditLog::from_json_file(&outcome.build_log_json_path).unwrap();
        assert!(verify_chain(&log.events));
        assert_eq!(log.terminal_hash, outcome.terminal_hash);
        assert_eq!(log.run_id, outcome.run_id);
    }

    #[test]
    fn test_same_seed_byte_identical_results() {
        let dir = tempfile::tempdir().unwrap();
        let first = config_in(dir.path());
        let second = SimulationConfig { output_dir: dir.path().join("again"), ..first.clone() };
        let other_seed = SimulationConfig {
            output_dir: dir.path().join("other"),
            seed: 7,
            ..first.clone()
        };

        let a = Simulation::new(first).run().unwrap();
        let b = Simulation::new(second).run().unwrap();
        let c = Simulation::new(other_seed).run().unwrap();

        assert_eq!(
            std::fs::read(&a.results_path).unwrap(),
            std::fs::read(&b.results_path).unwrap()
        );
        assert_ne!(a.results, c.results);
        // Each run gets its own chain.
        assert_ne!(a.run_id, b.run_id);
    }

    #[test]
    fn test_missing_dataset_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = SimulationConfig {
            dataset: dir.path().join("absent.csv"),
            output_dir: dir.path().join("out"),
            ..SimulationConfig::default()
        };

        let result = Simulation::new(config).run();
        assert!(matches!(result, Err(AncestorError::MissingInput { .. })));
        assert!(!dir.path().join("out").exists());
    }

    /// A chart failure surfaces as `Render` and leaves the results table intact.
    #[test]
    fn test_render_failure_keeps_results() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        // A directory where the chart file should go makes the SVG write fail.
        std::fs::create_dir_all(config.chart_path()).unwrap();

        let result = Simulation::new(config.clone()).run();
        assert!(matches!(result, Err(AncestorError::Render { .. })), "got {:?}", result);

        let csv = std::fs::read_to_string(config.results_path()).unwrap();
        assert_eq!(csv.lines().count(), 101);
        assert!(!config.build_log_path().exists());
    }

    #[test]
    fn test_extended_run_on_mixed_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let config = SimulationConfig {
            dataset: bundled("mixed_citation_sources.csv"),
            output_dir: dir.path().to_path_buf(),
            episodes: 40,
            variant: Variant::ExtendedMisinformation,
            age: AgeSource::DEFAULT_SYNTHESIZED,
            ..SimulationConfig::default()
        };

        let outcome = Simulation::new(config).run().unwrap();
        assert_eq!(outcome.results.len(), 40);
        assert!(outcome.results.iter().all(|r| r.citation.age_days <= 365));
        assert!(outcome.results.iter().all(|r| (0.0..=100.0).contains(&r.score)));

        let text = std::fs::read_to_string(&outcome.build_log_path).unwrap();
        assert!(text.contains("'extended-misinformation'"));
    }

    #[test]
    fn test_zero_episodes_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = SimulationConfig { episodes: 0, ..config_in(dir.path()) };

        let outcome = Simulation::new(config).run().unwrap();
        assert!(outcome.results.is_empty());
        assert!(outcome.summary.is_none());
        let csv = std::fs::read_to_string(&outcome.results_path).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
