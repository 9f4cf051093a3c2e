//! warroom CLI binary.
//!
//! Reads the latest record of every configured source, evaluates them and
//! reports the per-source breakdown with the final verdict.

mod cmd;
mod report;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use warroom::EngineConfig;
use warroom::store::{DATA_DIR_ENV, JsonFileStore};

#[derive(Parser)]
#[command(name = "warroom")]
#[command(about = "Weighted multi-source signal fusion for a single market", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the latest record of each source
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// JSON engine configuration (defaults to the built-in source table)
    #[arg(short, long, global = true, env = warroom::CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the latest records and print the verdict
    Evaluate {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List configured sources
    Sources {
        /// Show label rules and required fields
        #[arg(long)]
        rules: bool,
    },

    /// Store a record as the latest one of a source
    Record {
        /// Source identifier, e.g. fund_flow
        source: String,

        /// Status label, e.g. BUY
        #[arg(short, long)]
        status: Option<String>,

        /// Payload field as name=value; repeatable
        #[arg(short, long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,

        /// Record timestamp (RFC 3339), defaults to now
        #[arg(long)]
        at: Option<String>,
    },

    /// Print the effective configuration as JSON
    Config {
        /// Only validate the configuration
        #[arg(long)]
        check: bool,
    },
}

/// Output format of `evaluate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Human-readable report
    Text,
    /// Serialized evaluation
    Json,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let store = cli
        .data_dir
        .map_or_else(JsonFileStore::from_env, JsonFileStore::new);

    match cli.command {
        Commands::Evaluate { format } => {
            cmd::evaluate::run_evaluate(config, &store, format).await?;
        }
        Commands::Sources { rules } => {
            cmd::sources::list_sources(&config, rules);
        }
        Commands::Record {
            source,
            status,
            fields,
            at,
        } => {
            cmd::record::store_record(&config, &store, &source, status, &fields, at.as_deref())
                .await?;
        }
        Commands::Config { check } => {
            cmd::config::show_config(&config, cli.config.as_deref(), check)?;
        }
    }

    Ok(())
}
