mod assembler;
mod catalog;
mod chart;
mod error;
mod selector;
mod types;

use crate::assembler::{assemble_team, random_team};
use crate::catalog::{Catalog, Creature, Filter};
use crate::selector::select_team_types;
use crate::types::{BaseStats, StatWeights};
use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the candidate catalog CSV.
    #[arg(long)]
    catalog: PathBuf,

    /// Number of team slots.
    #[arg(long, default_value_t = 6)]
    size: usize,

    /// Minimum HP (exclusive).
    #[arg(long, default_value_t = 0.0)]
    min_hp: f64,

    /// Minimum attack (exclusive).
    #[arg(long, default_value_t = 0.0)]
    min_attack: f64,

    /// Minimum defense (exclusive).
    #[arg(long, default_value_t = 0.0)]
    min_defense: f64,

    /// Minimum special attack (exclusive).
    #[arg(long, default_value_t = 0.0)]
    min_sp_attack: f64,

    /// Minimum special defense (exclusive).
    #[arg(long, default_value_t = 0.0)]
    min_sp_defense: f64,

    /// Minimum speed (exclusive).
    #[arg(long, default_value_t = 0.0)]
    min_speed: f64,

    /// Comma-separated stat weights (hp,attack,defense,sp_attack,sp_defense,speed).
    #[arg(long)]
    weights: Option<StatWeights>,

    /// Only allow candidates at this evolution stage.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    stage: Option<u8>,

    /// Only allow final evolutions.
    #[arg(long = "final")]
    only_final: bool,

    /// Exclude legendary candidates.
    #[arg(long)]
    no_legendary: bool,

    /// Exclude mythical candidates.
    #[arg(long)]
    no_mythical: bool,

    /// Sample the team uniformly at random instead of optimizing coverage.
    #[arg(long)]
    random: bool,

    /// Seed for the random path; drawn from the OS when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the team as JSON instead of the plain-text summary.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    team: Vec<&'a Creature>,
    mean_total: f64,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = Cli::parse();
    log::info!("{args:#?}");

    let catalog = Catalog::from_csv(&args.catalog).context("failed to load catalog")?;
    log::info!(
        "loaded {} candidates over {} attacking types",
        catalog.len(),
        catalog.columns().len()
    );

    let filter = Filter {
        min_stats: BaseStats {
            hp: args.min_hp,
            attack: args.min_attack,
            defense: args.min_defense,
            sp_attack: args.min_sp_attack,
            sp_defense: args.min_sp_defense,
            speed: args.min_speed,
        },
        stage: args.stage,
        only_final: args.only_final,
        allow_legendary: !args.no_legendary,
        allow_mythical: !args.no_mythical,
    };
    let catalog = catalog.filtered(&filter);
    log::info!("{} candidates after filtering", catalog.len());

    let team = if args.random {
        let mut rng = match args.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::try_from_os_rng()?,
        };
        random_team(&catalog, args.size, &mut rng).context("failed to sample random team")?
    } else {
        let team_types =
            select_team_types(&catalog, args.size).context("failed to select team types")?;
        let coverage: Vec<_> = team_types.iter().map(ToString::to_string).collect();
        log::info!("selected type coverage: [{}]", coverage.join(", "));

        let weights = args.weights.unwrap_or_default();
        assemble_team(&catalog, &team_types, &weights).context("failed to assemble team")?
    };

    let mean_total = team.iter().map(|c| c.stats.total()).sum::<f64>() / team.len() as f64;

    if args.json {
        let report = Report { team, mean_total };
        let stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(stdout, &report).context("failed to serialize report")?;
        println!();
    } else {
        let names: Vec<_> = team.iter().map(|c| c.name.as_str()).collect();
        println!("Team: {names:?}");
        println!("Mean Total: {mean_total:.2}");
    }

    Ok(())
}
