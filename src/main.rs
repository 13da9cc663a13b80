use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use mapsat::classifier::Classifier;
use mapsat::config::MapSatConfig;
use mapsat::fixtures::{self, Fixture};
use mapsat::pipeline::{run_classifier, summarize};
use mapsat::{report, ClassifierTable};
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace};
use tracing_subscriber::fmt::time::ChronoLocal;

/// Classify groups of strings concurrently and average the per-group counts
#[derive(Parser)]
#[command(name = "mapsat")]
#[command(about = "Concurrent map/reduce classifier over string groups", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv adds thread ids)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one classifier over the given groups and print the mean count
    Run {
        /// Classifier name (see `mapsat list`)
        classifier: String,

        /// A comma-separated group of elements; repeat for several groups
        #[arg(short, long = "group")]
        groups: Vec<String>,

        /// JSON or YAML file holding a list of groups
        #[arg(short = 'f', long, conflicts_with = "groups")]
        groups_file: Option<PathBuf>,

        /// Average per-group fractions instead of raw counts
        #[arg(long)]
        fraction: bool,
    },
    /// Run the fixture suite
    Fixtures {
        /// Fixture file (JSON or YAML); defaults to the built-in suite
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Comparison tolerance, overriding the configuration
        #[arg(short, long)]
        tolerance: Option<f64>,

        /// Print the suite report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the available classifiers
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match MapSatConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(cli.verbose, config.log_level.as_deref());

    debug!("mapsat started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
    trace!("Configuration: {:?}", config);

    let result = match cli.command {
        Commands::Run {
            classifier,
            groups,
            groups_file,
            fraction,
        } => run_once(&classifier, groups, groups_file.as_deref(), fraction).await,
        Commands::Fixtures {
            file,
            tolerance,
            json,
        } => run_fixtures(&config, file, tolerance, json).await,
        Commands::List { json } => list_classifiers(json),
    };

    if let Err(e) = result {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8, configured: Option<&str>) {
    let log_level = match verbose {
        0 => configured.unwrap_or("info"),
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_timer(ChronoLocal::new("%H:%M:%S%.3f".to_string()))
        .with_target(verbose >= 2)
        .with_thread_ids(verbose >= 3)
        .with_line_number(verbose >= 3)
        .init();
}

fn parse_groups(raw: &[String]) -> Vec<Vec<String>> {
    raw.iter()
        .map(|group| {
            if group.is_empty() {
                Vec::new()
            } else {
                group.split(',').map(|word| word.trim().to_string()).collect()
            }
        })
        .collect()
}

async fn run_once(
    classifier: &str,
    raw_groups: Vec<String>,
    groups_file: Option<&Path>,
    fraction: bool,
) -> anyhow::Result<()> {
    let groups = match groups_file {
        Some(path) => fixtures::load_groups(path)
            .with_context(|| format!("Failed to read groups from {}", path.display()))?,
        None => parse_groups(&raw_groups),
    };

    report::run_started(1, classifier, &groups);
    let result = if fraction {
        let tally = summarize(&groups, classifier, ClassifierTable::builtin()).await?;
        for outcome in tally.outcomes() {
            debug!(
                "Group {}: {}/{} satisfy {}",
                outcome.index, outcome.satisfied, outcome.size, classifier
            );
        }
        tally.mean_fraction().unwrap_or_default()
    } else {
        run_classifier(&groups, classifier).await?
    };
    report::run_finished(result);

    println!("{result:.3}");
    Ok(())
}

async fn run_fixtures(
    config: &MapSatConfig,
    file: Option<PathBuf>,
    tolerance: Option<f64>,
    json: bool,
) -> anyhow::Result<()> {
    let tolerance = tolerance.unwrap_or(config.tolerance);
    if !tolerance.is_finite() || tolerance < 0.0 {
        bail!("tolerance must be a finite non-negative number, got {tolerance}");
    }

    let suite: Vec<Fixture> = match file.or_else(|| config.fixtures.clone()) {
        Some(path) => fixtures::load(&path)
            .with_context(|| format!("Failed to load fixtures from {}", path.display()))?,
        None => fixtures::builtin(),
    };

    let report = fixtures::run_suite(&suite, tolerance).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for outcome in &report.outcomes {
            let actual = outcome
                .actual
                .map(|a| format!("{a:.3}"))
                .unwrap_or_else(|| "-".to_string());
            let status = if outcome.passed { "ok" } else { "FAILED" };
            println!(
                "{:>2}. {:<28} expected {:.2}  got {:>6}  {}",
                outcome.index, outcome.name, outcome.expected, actual, status
            );
        }
    }

    if !report.all_passed() {
        bail!("Failed fixtures: {:?}", report.failed());
    }
    Ok(())
}

fn list_classifiers(json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&Classifier::ALL)?);
        return Ok(());
    }

    for classifier in Classifier::ALL {
        let context = if classifier.needs_group_context() {
            " (uses group context)"
        } else {
            ""
        };
        println!("{}{}", classifier.name(), context);
    }
    Ok(())
}
