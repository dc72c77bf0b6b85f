//! Ancestor trust simulation CLI.
//!
//! Runs the multi-agent simulation, scores single citations, prints the
//! built-in rule tables, and re-checks exported audit chains.
//!
//! Usage:
//!   cargo run -p ancestor-demo -- run --dataset data/public_citation_sources.csv
//!   cargo run -p ancestor-demo -- run --config ancestor.toml --seed 7
//!   cargo run -p ancestor-demo -- score --domain worldtruth.biz --age-days 100
//!   cargo run -p ancestor-demo -- rules --variant extended-misinformation
//!   cargo run -p ancestor-demo -- verify-log build_log.json

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ancestor_audit::AuditLog;
use ancestor_contracts::{
    citation::{round2, CitationRecord},
    error::{AncestorError, AncestorResult},
};
use ancestor_core::{accept, traits::TrustScorer, DEFAULT_THRESHOLD};
use ancestor_policy::{RuleTableScorer, Variant};
use ancestor_sim::{AgeSource, MalformedPolicy, Simulation, SimulationConfig};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Ancestor: multi-agent citation trust simulation.
#[derive(Parser)]
#[command(
    name = "ancestor",
    about = "Ancestor multi-agent citation trust simulation",
    long_about = "Simulates a claimant citing sources, a verifier scoring them with the\n\
                  Ancestor heuristic, and a consumer accepting claims above a threshold."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation and write results.csv, trust_plot.svg and the build logs.
    Run(RunArgs),
    /// Score a single citation and print the breakdown.
    Score(ScoreArgs),
    /// Print a built-in rule table as TOML.
    Rules {
        #[arg(long, default_value_t = Variant::Baseline)]
        variant: Variant,
    },
    /// Re-check the hash chain of an exported build_log.json.
    VerifyLog { file: PathBuf },
}

#[derive(clap::Args)]
struct RunArgs {
    /// Run configuration TOML. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    dataset: Option<PathBuf>,
    #[arg(long)]
    out_dir: Option<PathBuf>,
    #[arg(long)]
    episodes: Option<u32>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    threshold: Option<f64>,
    #[arg(long)]
    variant: Option<Variant>,
    /// Custom rule-table TOML; takes precedence over --variant.
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Draw each claim's age uniformly from 0..=365 days instead of the dataset.
    #[arg(long)]
    synthesize_age: bool,
    /// abort, coerce or skip.
    #[arg(long)]
    malformed: Option<MalformedPolicy>,
}

#[derive(clap::Args)]
struct ScoreArgs {
    #[arg(long)]
    domain: String,
    #[arg(long, default_value = "")]
    category: String,
    #[arg(long, default_value_t = 0)]
    age_days: u32,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, default_value_t = Variant::Baseline)]
    variant: Variant,
    #[arg(long)]
    rules: Option<PathBuf>,
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug to see every rule match and episode decision.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run(args) => run(args),
        Command::Score(args) => score(args),
        Command::Rules { variant } => rules(variant),
        Command::VerifyLog { file } => verify_log(file),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run(args: RunArgs) -> AncestorResult<()> {
    let config = build_config(args)?;
    debug!(?config, "resolved run configuration");

    print_banner(&config);
    let outcome = Simulation::new(config).with_echo(true).run()?;

    println!();
    if let Some(summary) = &outcome.summary {
        println!("Summary");
        println!("-------");
        println!("{}", summary.render());
        println!();
    }
    println!("Outputs:");
    println!("- Results saved to {}", outcome.results_path.display());
    println!("- Visualization saved as {}", outcome.chart_path.display());
    println!("- Build log saved to {}", outcome.build_log_path.display());
    println!("- Audit chain exported to {}", outcome.build_log_json_path.display());
    println!("Terminal hash: {}", outcome.terminal_hash);
    Ok(())
}

fn build_config(args: RunArgs) -> AncestorResult<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(dataset) = args.dataset {
        config.dataset = dataset;
    }
    if let Some(out_dir) = args.out_dir {
        config.output_dir = out_dir;
    }
    if let Some(episodes) = args.episodes {
        config.episodes = episodes;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(variant) = args.variant {
        config.variant = variant;
    }
    if let Some(rules) = args.rules {
        config.rules = Some(rules);
    }
    if args.synthesize_age && config.age == AgeSource::Dataset {
        config.age = AgeSource::DEFAULT_SYNTHESIZED;
    }
    if let Some(malformed) = args.malformed {
        config.malformed = malformed;
    }

    config.validate()?;
    Ok(config)
}

fn score(args: ScoreArgs) -> AncestorResult<()> {
    if !args.threshold.is_finite() {
        return Err(AncestorError::ConfigError {
            reason: format!("threshold {} must be a finite number", args.threshold),
        });
    }
    let scorer = match &args.rules {
        Some(path) => RuleTableScorer::from_file(path)?,
        None => RuleTableScorer::for_variant(args.variant)?,
    };

    let citation = CitationRecord::new(
        args.category,
        format!("https://{}", args.domain),
        args.domain,
        args.age_days,
        args.description,
    );
    let breakdown = scorer.assess(&citation);
    let accepted = accept(breakdown.score, args.threshold);

    println!("Rule table: {}", scorer.table().name);
    println!("Citation:   {} ({})", citation.domain, citation.category);
    println!("  base score        {:>8.2}", breakdown.base);
    println!(
        "  age ({:>4} days)   {:>8.2}",
        citation.age_days, -breakdown.age_penalty
    );
    for applied in &breakdown.applied {
        println!("  {:<17} {:>8.2}", applied.rule_id, -applied.penalty);
    }
    println!("  score             {:>8.2}", round2(breakdown.score));
    println!(
        "Decision:   {} at threshold {}",
        if accepted { "ACCEPTED" } else { "REJECTED" },
        args.threshold
    );
    Ok(())
}

fn rules(variant: Variant) -> AncestorResult<()> {
    print!("{}", variant.table().to_toml_string()?);
    Ok(())
}

fn verify_log(file: PathBuf) -> AncestorResult<()> {
    let log = AuditLog::from_json_file(&file)?;
    if !log.verify() {
        return Err(AncestorError::VerificationFailed {
            reason: format!("audit chain in '{}' is broken", file.display()),
        });
    }

    println!(
        "Audit chain OK: run {}, {} steps, terminal hash {}",
        log.run_id,
        log.events.len(),
        log.terminal_hash
    );
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner(config: &SimulationConfig) {
    println!();
    println!("Ancestor Multi-Agent Trust Simulation");
    println!("=====================================");
    println!();
    println!("  Claimant  draws a citation from {}", config.dataset.display());
    match &config.rules {
        Some(path) => println!("  Verifier  scores it with rules from {}", path.display()),
        None => println!("  Verifier  scores it with the '{}' rule table", config.variant),
    }
    println!("  Consumer  accepts when score >= {}", config.threshold);
    println!();
    println!("{} episodes, seed {}", config.episodes, config.seed);
    println!();
}
