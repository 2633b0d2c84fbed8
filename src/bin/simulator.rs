//! Gacha Headless Simulator
//!
//! Plays the host role for the simulation engine: builds a request from
//! flags or a JSON file, runs it, and prints the result.
//!
//! Usage:
//!   cargo run --release --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --trials N           Trials to run, each ending on a featured drop (default: 1000000)
//!   --radiance a,b,c,d   Radiance chance at loss streak 0..=3 (default: 0,0.25,0.5,1)
//!   --sample-size N      Drops per average-pity sample group (default: 500)
//!   --request FILE       JSON request ({"numTrials", "radianceChances", "sampleSize"}), "-" for stdin
//!   --format FORMAT      text | json | messages (default: text)
//!   --quiet              Only warnings on stderr
//!
//! Logging goes to stderr and honours RUST_LOG.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gacha_sim::{run_request, HostMessage, RngSource, SimReport, SimRequest};
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ── CLI Configuration ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable report
    Text,
    /// Pretty-printed result record
    Json,
    /// One host message per line (progress..., complete)
    Messages,
}

#[derive(Debug, Parser)]
#[command(name = "gacha-simulator", about = "Monte Carlo simulator for gacha pity mechanics")]
struct Cli {
    /// Number of trials, each pulling until a featured drop
    #[arg(long, default_value_t = 1_000_000)]
    trials: u64,

    /// Radiance chance at loss streak 0, 1, 2 and 3
    #[arg(long, value_delimiter = ',')]
    radiance: Option<Vec<f64>>,

    /// Drops averaged into one sample group
    #[arg(long)]
    sample_size: Option<u32>,

    /// JSON request file ("-" reads stdin); replaces the flags above
    #[arg(long)]
    request: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Only log warnings
    #[arg(long)]
    quiet: bool,
}

fn init_tracing(quiet: bool) {
    let default_filter = if quiet {
        "gacha_sim=warn,simulator=warn"
    } else {
        "gacha_sim=info,simulator=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_request(cli: &Cli) -> Result<SimRequest> {
    let Some(path) = &cli.request else {
        return Ok(SimRequest {
            num_trials: cli.trials.into(),
            radiance_chances: cli.radiance.clone(),
            sample_size: cli.sample_size,
        });
    };

    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading request file {}", path.display()))?
    };
    SimRequest::from_json(&json).context("parsing request")
}

// ── Main ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let request = load_request(&cli)?;
    info!(
        num_trials = %request.num_trials,
        format = ?cli.format,
        "running simulation request"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut write_error: Option<std::io::Error> = None;
    let mut report: Option<SimReport> = None;

    run_request(&request, RngSource::thread(), |message| {
        if cli.format == OutputFormat::Messages {
            if write_error.is_none() {
                if let Err(err) = writeln!(out, "{}", message.to_json_line()) {
                    write_error = Some(err);
                }
            }
            return;
        }
        match message {
            HostMessage::Progress { percent } => info!(percent, "progress"),
            HostMessage::Complete { results } => report = Some(*results),
        }
    })
    .context("simulation failed")?;

    if let Some(err) = write_error {
        return Err(err).context("writing host messages");
    }

    if let Some(report) = report {
        match cli.format {
            OutputFormat::Text => write!(out, "{}", report.to_text())?,
            OutputFormat::Json => writeln!(out, "{}", report.to_json())?,
            OutputFormat::Messages => {}
        }
    }
    out.flush()?;
    Ok(())
}
