//! Foul Play CLI
//!
//! Headless matches from the terminal:
//! - `run`: one seeded match, optional JSONL trace
//! - `batch`: many seeds in parallel, summary only
//! - `config`: print a preset or loaded config as YAML / JSON

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fp_cli::{resolve_config, run_with_trace};
use fp_core::api::{run_match, simulate_batch, MatchRequest, RefereeMode};
use fp_core::engine::TeamSide;

#[derive(Parser)]
#[command(name = "fp")]
#[command(about = "Run Foul Play matches without a screen", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum RefereeArg {
    Idle,
    Autopilot,
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Home,
    Away,
}

impl From<SideArg> for TeamSide {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Home => TeamSide::Home,
            SideArg::Away => TeamSide::Away,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Yaml,
    Json,
}

#[derive(clap::Args)]
struct MatchArgs {
    /// Config preset: default, arcade or deterministic
    #[arg(long)]
    preset: Option<String>,

    /// YAML or JSON config file (overrides --preset)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many ticks even without a winner
    #[arg(long, default_value_t = 18_000)]
    max_ticks: u64,

    /// Who holds the whistle
    #[arg(long, value_enum, default_value = "autopilot")]
    referee: RefereeArg,

    /// Team the autopilot referee helps
    #[arg(long, value_enum)]
    favored: Option<SideArg>,
}

impl MatchArgs {
    fn request(&self, seed: u64) -> Result<MatchRequest> {
        let config = resolve_config(self.preset.as_deref(), self.config.as_deref())?;
        let referee = match self.referee {
            RefereeArg::Idle => RefereeMode::Idle,
            RefereeArg::Autopilot => RefereeMode::Autopilot { favored: self.favored.map(TeamSide::from) },
        };
        Ok(MatchRequest { max_ticks: self.max_ticks, referee, config: Some(config), ..MatchRequest::new(seed) })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match and print the result as JSON
    Run {
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[command(flatten)]
        args: MatchArgs,

        /// Write one JSON line per tick (snapshot + events) to this file
        #[arg(long)]
        trace: Option<PathBuf>,
    },

    /// Play many seeded matches in parallel and print a summary
    Batch {
        /// Number of matches
        #[arg(long, default_value_t = 100)]
        count: u64,

        /// First seed; the rest follow consecutively
        #[arg(long, default_value_t = 0)]
        start_seed: u64,

        #[command(flatten)]
        args: MatchArgs,

        /// Include every match result, not just the totals
        #[arg(long, default_value = "false")]
        full: bool,
    },

    /// Print the effective engine config
    Config {
        #[arg(long)]
        preset: Option<String>,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "yaml")]
        format: FormatArg,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { seed, args, trace } => {
            let request = args.request(seed)?;
            let response = match trace {
                Some(path) => {
                    let (response, meta) = run_with_trace(&request, &path)?;
                    info!(path = %path.display(), lines = meta.lines, checksum = %meta.checksum, "trace written");
                    response
                }
                None => run_match(&request).context("Match failed")?,
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::Batch { count, start_seed, args, full } => {
            if count == 0 {
                bail!("--count must be at least 1");
            }
            let request = args.request(start_seed)?;
            let seeds: Vec<u64> = (start_seed..start_seed.saturating_add(count)).collect();
            let mut summary = simulate_batch(&request, &seeds).context("Batch failed")?;
            if !full {
                summary.results.clear();
            }
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Commands::Config { preset, config, format } => {
            let config = resolve_config(preset.as_deref(), config.as_deref())?;
            let text = match format {
                FormatArg::Yaml => config.to_yaml_string()?,
                FormatArg::Json => serde_json::to_string_pretty(&config)?,
            };
            println!("{text}");
        }
    }

    Ok(())
}
