//! lumen - inspect characters against a skill catalog
//!
//! Read-only views over a catalog file and a character record (JSON).
//! Every command prints JSON to stdout.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use lumen_progression::catalog::load_catalog;
use lumen_progression::character::CharacterRecord;
use lumen_progression::core::{CatalogError, ConfigError, ProgressionConfig, ProgressionError};
use lumen_progression::scoring::{mastery_levels, power_level, recommended_purchases, validate_build};
use lumen_progression::{EngineContext, ProgressionLedger};

#[derive(Error, Debug)]
enum CliError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Progression(#[from] ProgressionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Lumen progression engine
#[derive(Parser, Debug)]
#[command(name = "lumen")]
#[command(about = "Plan, score and validate character builds against a skill catalog")]
struct Args {
    /// Skill catalog (TOML or JSON)
    #[arg(long, default_value = "data/catalog.toml")]
    catalog: PathBuf,

    /// Progression tuning (TOML); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Purchase order for reaching a skill
    Plan {
        /// Character record (JSON)
        character: PathBuf,
        /// Target skill id
        target: String,
    },
    /// Aggregated skill bonuses
    Bonuses { character: PathBuf },
    /// Power level and mastery per skill tree
    Score { character: PathBuf },
    /// Advisory build warnings
    Validate { character: PathBuf },
    /// Suggested next purchases
    Recommend {
        character: PathBuf,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Report catalog references to missing skills and upgrade cycles
    CheckCatalog,
}

#[derive(Serialize)]
struct ScoreReport {
    power_level: u32,
    mastery: Vec<lumen_progression::scoring::MasteryLevel>,
}

#[derive(Serialize)]
struct CatalogReport {
    skills: usize,
    dangling: Vec<(String, String)>,
    upgrade_cycles: Vec<String>,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lumen_progression=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ProgressionConfig::load(path)?,
        None => ProgressionConfig::default(),
    };
    config.validate()?;
    let ctx = EngineContext::new(load_catalog(&args.catalog)?, config);

    match args.command {
        Command::Plan { character, target } => {
            let ledger = load_ledger(&character)?;
            print_json(&ledger.plan_path(&ctx, &target)?)
        }
        Command::Bonuses { character } => {
            let ledger = load_ledger(&character)?;
            print_json(&ledger.compute_bonuses(&ctx))
        }
        Command::Score { character } => {
            let record = load_record(&character)?;
            print_json(&ScoreReport {
                power_level: power_level(&ctx, &record),
                mastery: mastery_levels(&ctx, &record),
            })
        }
        Command::Validate { character } => {
            let record = load_record(&character)?;
            print_json(&validate_build(&ctx, &record))
        }
        Command::Recommend { character, limit } => {
            let record = load_record(&character)?;
            print_json(&recommended_purchases(&ctx, &record, limit))
        }
        Command::CheckCatalog => {
            let dangling = ctx
                .dangling_references()
                .into_iter()
                .map(|d| (d.skill.to_string(), d.missing.to_string()))
                .collect();
            let upgrade_cycles = ctx.upgrades().cycles().into_iter().map(|id| id.to_string()).collect();
            print_json(&CatalogReport {
                skills: ctx.catalog().len(),
                dangling,
                upgrade_cycles,
            })
        }
    }
}

fn load_record(path: &Path) -> Result<CharacterRecord, CliError> {
    let content = std::fs::read_to_string(path)?;
    Ok(CharacterRecord::from_json(&content)?)
}

fn load_ledger(path: &Path) -> Result<ProgressionLedger, CliError> {
    Ok(ProgressionLedger::new(load_record(path)?))
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
