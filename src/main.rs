//! cep-race: look up a Brazilian postal code (CEP) from whichever provider answers first.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI args + optional TOML config
//!        │
//!        ▼
//!   ┌──────────┐     ┌──────────────────────────────────────────┐
//!   │ startup  │────▶│            race coordinator              │
//!   └──────────┘     │                                          │
//!                    │  ┌────────────┐        ┌────────────┐    │
//!                    │  │ task: src A│  ...   │ task: src N│    │
//!                    │  │ own timeout│        │ own timeout│    │
//!                    │  └─────┬──────┘        └─────┬──────┘    │
//!                    │        └──────┬──────────────┘           │
//!                    │               ▼                          │
//!                    │   first success │ all failed │ deadline  │
//!                    └───────────────┬──────────────────────────┘
//!                                    ▼
//!                         render (stdout) + exit code
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cep_race::config::{load_config, RaceConfig};
use cep_race::lifecycle::{
    apply_timeout_override, build_lookup, exit_status, signals, INTERRUPTED_EXIT_STATUS,
};
use cep_race::observability::logging;
use cep_race::render::{render_json, render_text};
use cep_race::LookupKey;

#[derive(Parser)]
#[command(name = "cep-race")]
#[command(about = "Race postal-code providers and print the first answer", long_about = None)]
struct Cli {
    /// Postal code to look up (8 digits, hyphen optional).
    #[arg(default_value = "22735140")]
    cep: LookupKey,

    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the global deadline in milliseconds (provider timeouts are capped to it).
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    /// Print the outcome as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RaceConfig::default(),
    };
    if let Some(global_ms) = cli.timeout_ms {
        apply_timeout_override(&mut config, global_ms);
    }

    logging::init(&config.observability)?;

    tracing::info!(cep = %cli.cep, "cep-race v{} starting", env!("CARGO_PKG_VERSION"));

    let lookup = build_lookup(&config)?;

    let outcome = tokio::select! {
        outcome = lookup.run(&cli.cep) => outcome,
        _ = signals::interrupted() => {
            tracing::warn!("Lookup interrupted");
            return Ok(ExitCode::from(INTERRUPTED_EXIT_STATUS));
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&render_json(&outcome))?);
    } else {
        println!("{}", render_text(&outcome));
    }

    Ok(ExitCode::from(exit_status(&outcome)))
}
