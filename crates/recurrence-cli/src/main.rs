//! `recur` CLI — expand recurring events and edit occurrence lists from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Expand an event (JSON with an "id") into its occurrences
//! recur expand -i event.json
//!
//! # Unbounded rules need a horizon, from a flag or a TOML config file
//! recur expand -i event.json --horizon 2025-06-30
//! recur expand -i event.json --config recur.toml
//!
//! # Only keep the first occurrence
//! recur expand -i event.json --limit 1
//!
//! # Turn one occurrence into a standalone event
//! recur detach -i occurrence.json
//!
//! # Drop one occurrence, or a whole series, from a list
//! recur remove --id 1-2 -i occurrences.json
//! recur remove-series --series 1 -i occurrences.json
//!
//! # Check a calendar date
//! recur check-date 2024 2 29
//! ```

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recurrence_engine::calendar::parse_date;
use recurrence_engine::{
    create_event, detach_from_series, is_leap_year, is_valid_calendar_date, remove_occurrence,
    remove_series, ExpansionConfig, InMemoryStore, Occurrence, OccurrenceStore, PersistLimit,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "recur",
    version,
    about = "Expand recurring calendar events into concrete occurrences"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand an event into its occurrences
    Expand {
        /// Input event JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// TOML file with `horizon` and `max_attempts`
        #[arg(long)]
        config: Option<String>,
        /// Last date an unbounded rule may produce (YYYY-MM-DD)
        #[arg(long)]
        horizon: Option<String>,
        /// Maximum occurrence indices to try
        #[arg(long)]
        max_attempts: Option<u32>,
        /// Keep at most this many occurrences
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Detach one occurrence from its series
    Detach {
        /// Input occurrence JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Remove one occurrence from a JSON array of occurrences
    Remove {
        /// Id of the occurrence to remove
        #[arg(long)]
        id: String,
        /// Input occurrences JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Remove every occurrence of a series from a JSON array of occurrences
    RemoveSeries {
        /// Series id to remove
        #[arg(long)]
        series: String,
        /// Input occurrences JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Report whether YEAR-MONTH-DAY is a real calendar date
    #[command(allow_negative_numbers = true)]
    CheckDate { year: i32, month: u32, day: u32 },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Expand {
            input,
            output,
            config,
            horizon,
            max_attempts,
            limit,
        } => {
            let config = build_config(config.as_deref(), horizon.as_deref(), max_attempts)?;
            let raw = read_input(input.as_deref())?;
            let base: Occurrence =
                serde_json::from_str(&raw).context("Failed to parse event JSON")?;

            let limit = limit.map_or(PersistLimit::All, PersistLimit::AtMost);
            let mut store = InMemoryStore::new();
            let report = create_event(&mut store, &base.id, &base.event, &config, limit)
                .context("Failed to expand event")?;
            if let Some(truncation) = &report.truncation {
                eprintln!(
                    "warning: expansion truncated after {} occurrences ({})",
                    truncation.produced, truncation.reason
                );
            }

            let occurrences = store.list_all()?;
            write_json(output.as_deref(), &occurrences)?;
        }
        Commands::Detach { input, output } => {
            let raw = read_input(input.as_deref())?;
            let occurrence: Occurrence =
                serde_json::from_str(&raw).context("Failed to parse occurrence JSON")?;
            write_json(output.as_deref(), &detach_from_series(&occurrence))?;
        }
        Commands::Remove { id, input, output } => {
            let occurrences = read_occurrences(input.as_deref())?;
            write_json(output.as_deref(), &remove_occurrence(&occurrences, &id))?;
        }
        Commands::RemoveSeries {
            series,
            input,
            output,
        } => {
            let occurrences = read_occurrences(input.as_deref())?;
            write_json(output.as_deref(), &remove_series(&occurrences, &series))?;
        }
        Commands::CheckDate { year, month, day } => {
            let verdict = if is_valid_calendar_date(year, month, day) {
                "valid"
            } else {
                "invalid"
            };
            println!("{:04}-{:02}-{:02}: {}", year, month, day, verdict);
            println!(
                "leap year: {}",
                if is_leap_year(year) { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Resolve expansion settings: config file first, then flag overrides.
fn build_config(
    path: Option<&str>,
    horizon: Option<&str>,
    max_attempts: Option<u32>,
) -> Result<ExpansionConfig> {
    let mut config = match path {
        Some(path) => load_config(Path::new(path))?,
        None => ExpansionConfig::default(),
    };
    if let Some(raw) = horizon {
        config.horizon = Some(parse_date(raw).context("Invalid --horizon")?);
    }
    if let Some(max_attempts) = max_attempts {
        config.max_attempts = max_attempts;
    }
    debug!(?config, "expansion config");
    Ok(config)
}

fn load_config(path: &Path) -> Result<ExpansionConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Failed to parse config: {}", path.display()))
}

fn read_occurrences(path: Option<&str>) -> Result<Vec<Occurrence>> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse occurrences JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: serde::Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, pretty + "\n")
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", pretty);
        }
    }
    Ok(())
}
