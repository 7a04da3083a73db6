//! Tomasulo core simulator CLI.
//!
//! This binary provides a single entry point for both simulation modes. It performs:
//! 1. **Core run:** Replay an instruction trace through the Tomasulo core and report cycles.
//! 2. **Branch replay:** Replay a branch trace through one of the direction predictors.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use tomsim_core::config::{BranchPredictorKind, Config};
use tomsim_core::core::units::bru::{self, BranchPredictorWrapper};
use tomsim_core::sim::loader;
use tomsim_core::stats::STATS_SECTIONS;
use tomsim_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "tomsim",
    author,
    version,
    about = "Cycle-by-cycle Tomasulo out-of-order core simulator",
    long_about = "Replay a decoded instruction trace through a Tomasulo core, or a branch trace through a direction predictor.\n\nExamples:\n  tomsim run traces/daxpy.json --timings\n  tomsim run traces/daxpy.json --config wide.json --stats summary pipeline\n  tomsim bpred traces/gcc-branches.json --predictor perceptron"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an instruction trace through the core.
    Run {
        /// Instruction trace (JSON).
        trace: PathBuf,

        /// Configuration file (JSON); missing fields take their defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the per-instruction timing table.
        #[arg(long)]
        timings: bool,

        /// Log every stage transition and a per-cycle pool snapshot.
        #[arg(long)]
        trace_pipeline: bool,

        /// Statistics sections to print (default: all).
        #[arg(long, num_args = 1.., value_parser = clap::builder::PossibleValuesParser::new(STATS_SECTIONS.iter().copied()))]
        stats: Vec<String>,
    },

    /// Replay a branch trace through a direction predictor.
    Bpred {
        /// Branch trace (JSON).
        branches: PathBuf,

        /// Predictor to use (default: the configured one).
        #[arg(short, long, value_enum)]
        predictor: Option<PredictorArg>,

        /// Configuration file (JSON) holding predictor geometry.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PredictorArg {
    TwoBit,
    TwoLevel,
    Perceptron,
}

impl From<PredictorArg> for BranchPredictorKind {
    fn from(p: PredictorArg) -> Self {
        match p {
            PredictorArg::TwoBit => Self::TwoBitSaturating,
            PredictorArg::TwoLevel => Self::TwoLevel,
            PredictorArg::Perceptron => Self::Perceptron,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let trace_pipeline = matches!(
        cli.command,
        Commands::Run {
            trace_pipeline: true,
            ..
        }
    );
    init_logging(trace_pipeline);

    let result = match cli.command {
        Commands::Run {
            trace,
            config,
            timings,
            trace_pipeline,
            stats,
        } => cmd_run(&trace, config.as_deref(), timings, trace_pipeline, &stats),
        Commands::Bpred {
            branches,
            predictor,
            config,
        } => cmd_bpred(&branches, predictor, config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Installs the fmt subscriber. `RUST_LOG` wins; otherwise warnings only, or
/// every core event when `--trace-pipeline` is set.
fn init_logging(trace_pipeline: bool) {
    let default = if trace_pipeline {
        "warn,tomsim_core=trace"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(p) => Config::from_path(p)?,
        None => Config::default(),
    })
}

/// Loads the trace, runs it to completion, and prints the report.
fn cmd_run(
    trace_path: &Path,
    config_path: Option<&Path>,
    timings: bool,
    trace_pipeline: bool,
    sections: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;
    config.general.trace_pipeline |= trace_pipeline;

    let trace = loader::load_trace(trace_path)?;
    let t = &config.tomasulo;
    println!("[*] Trace: {} ({} instructions)", trace_path.display(), trace.iter().count());
    println!(
        "    fetch queue {}  rs int/fp {}/{}  fu int/fp {}/{}  latency int/fp {}/{}",
        t.fetch_queue_size,
        t.int_reservation,
        t.fp_reservation,
        t.int_units,
        t.fp_units,
        t.int_latency,
        t.fp_latency
    );

    let report = Simulator::new(config)?.run(&trace)?;
    println!("\n[*] Total cycles: {}", report.total_cycles);
    if timings {
        println!();
        report.print_timings();
    }
    report.stats.print_sections(sections);
    Ok(())
}

/// Replays a branch trace and prints predictor accuracy.
fn cmd_bpred(
    branches_path: &Path,
    predictor: Option<PredictorArg>,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    config.validate()?;
    let kind = predictor.map_or(config.branch.predictor, BranchPredictorKind::from);

    let branches = loader::load_branches(branches_path)?;
    let mut bp = BranchPredictorWrapper::with_kind(kind, &config.branch);
    let stats = bru::simulate(&mut bp, &branches);

    println!("[*] Branch trace: {} ({kind:?})", branches_path.display());
    println!("{stats}");
    Ok(())
}
