//! `meetslot` CLI: find meeting slots and report availability from free/busy data.
//!
//! ## Usage
//!
//! ```sh
//! # Rank meeting slots for a JSON request (stdin → stdout)
//! cat request.json | meetslot find --availability freebusy.json
//!
//! # Read the request from a file and write the result to a file
//! meetslot find -i request.json -a freebusy.json -o slots.json
//!
//! # Per-attendee availability report at 30-minute resolution
//! meetslot check -a freebusy.json --attendee alice@example.com \
//!     --start 2026-03-16T09:00:00Z --end 2026-03-16T17:00:00Z
//!
//! # Use a config file for default preferences and timezone
//! meetslot --config meetslot.toml find -i request.json -a freebusy.json
//! ```
//!
//! The availability file is a JSON object mapping each attendee to a code
//! string (`'0'` free, `'1'` tentative, `'2'` busy, `'3'` out of office,
//! `'4'` no data), one character per interval from the range start.

mod config;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meeting_scheduler::{AvailabilityQuery, SchedulingRequest, StaticAvailability};
use tracing::{debug, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::CliConfig;

#[derive(Parser)]
#[command(
    name = "meetslot",
    version,
    about = "Find ranked multi-attendee meeting slots from free/busy data"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file (defaults to ./meetslot.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank candidate meeting slots for a scheduling request
    Find {
        /// Request JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Free/busy JSON file: {"attendee": "0022..."}
        #[arg(short, long)]
        availability: String,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Report each attendee's availability over a window
    Check {
        /// Free/busy JSON file: {"attendee": "0022..."}
        #[arg(short, long)]
        availability: String,
        /// Attendee to report on (repeatable)
        #[arg(long = "attendee", required = true)]
        attendees: Vec<String>,
        /// Window start (ISO 8601)
        #[arg(long)]
        start: String,
        /// Window end (ISO 8601)
        #[arg(long)]
        end: String,
        /// Length of one free/busy interval in minutes
        #[arg(long, default_value_t = meeting_scheduler::report::DEFAULT_INTERVAL_MINUTES)]
        interval: u32,
        /// IANA timezone for naive timestamps
        #[arg(long)]
        timezone: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, discovery_error) = match &cli.config {
        Some(path) => (config::load_config(path)?, None),
        None => match config::find_config_file() {
            Some(path) => match config::load_config(&path) {
                Ok(cfg) => (cfg, None),
                Err(e) => (CliConfig::default(), Some(e)),
            },
            None => (CliConfig::default(), None),
        },
    };

    init_tracing(&cli, &config);
    if let Some(e) = discovery_error {
        warn!(error = %e, "failed to load config, using defaults");
    }

    match cli.command {
        Commands::Find {
            input,
            availability,
            output,
        } => {
            let raw = read_input(input.as_deref())?;
            let mut value: serde_json::Value =
                serde_json::from_str(&raw).context("Failed to parse request JSON")?;
            config::apply_request_defaults(&mut value, &config);
            let request: SchedulingRequest =
                serde_json::from_value(value).context("Invalid scheduling request")?;

            let provider = load_availability(&availability)?;
            let result = meeting_scheduler::find_meeting_times(&provider, &request)
                .context("Failed to find meeting times")?;

            write_output(output.as_deref(), &serde_json::to_string_pretty(&result)?)?;
        }
        Commands::Check {
            availability,
            attendees,
            start,
            end,
            interval,
            timezone,
            output,
        } => {
            let query = AvailabilityQuery {
                attendees,
                start,
                end,
                interval_minutes: interval,
                timezone: timezone.or_else(|| config.timezone.clone()),
            };

            let provider = load_availability(&availability)?;
            let report = meeting_scheduler::check_availability(&provider, &query)
                .context("Failed to check availability")?;

            write_output(output.as_deref(), &serde_json::to_string_pretty(&report)?)?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `--log-level`, which
/// wins over the config file.
fn init_tracing(cli: &Cli, config: &CliConfig) {
    let level = cli
        .log_level
        .as_deref()
        .or(config.log_level.as_deref())
        .unwrap_or("warn");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .init();
    }
}

fn load_availability(path: &str) -> Result<StaticAvailability> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read availability file: {}", path))?;
    let provider: StaticAvailability = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse availability file: {}", path))?;
    debug!(path, attendees = provider.len(), "loaded availability");
    Ok(provider)
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

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
