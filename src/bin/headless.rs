//! Headless Runner
//!
//! Runs simulations without a window and prints day results, or sweeps the
//! fixed food count across repeated runs and prints the averaged report.

use clap::Parser;
use forage::simulation::day_log::{self, DayLog};
use forage::simulation::ecosystem::Headless;
use forage::simulation::error::Result;
use forage::simulation::params::{Params, SimulationConfig};
use forage::simulation::policy::PolicyKind;
use forage::simulation::run::{RunSettings, run_once, seed_for_run, sweep_fixed_food};
use std::path::PathBuf;

/// Headless Runner - day-cycle foraging simulations without a window
#[derive(Parser, Debug)]
#[command(name = "headless")]
#[command(about = "Run foraging simulations headless and report day statistics")]
struct Args {
    /// Policy to simulate
    #[arg(long, value_enum, default_value_t = PolicyKind::Basic)]
    policy: PolicyKind,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Number of consecutive runs
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Day ceiling per run (overrides the params file)
    #[arg(long)]
    max_days: Option<u32>,

    /// Disable food scaling with population
    #[arg(long)]
    no_scaling: bool,

    /// Food per day when scaling is disabled
    #[arg(long, allow_hyphen_values = true)]
    fixed_food: Option<i64>,

    /// Elementary steps per batch (no effect on results)
    #[arg(long, default_value_t = 1)]
    speed: u32,

    /// Log a per-day narrative summary
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Directory for day_stats.csv and recent_stats.csv
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// JSON file with world parameters
    #[arg(long)]
    params: Option<PathBuf>,

    /// JSON file with the runtime config (flags above override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sweep these fixed food counts, `--runs` runs each, and print a JSON report
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    sweep: Vec<i64>,
}

fn build_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load_from_file(path)?,
        None => SimulationConfig::default(),
    };
    if args.no_scaling {
        config.food_scaling = false;
    }
    if args.fixed_food.is_some() {
        config.fixed_food_count = args.fixed_food;
    }
    config.speed_multiplier = args.speed;
    config.verbose |= args.verbose;
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    let mut params = match &args.params {
        Some(path) => Params::load_from_file(path)?,
        None => Params::default(),
    };
    if let Some(max_days) = args.max_days {
        params.max_days = max_days;
    }
    let config = build_config(args)?;
    let seed = args.seed.unwrap_or_else(rand::random);

    if !args.sweep.is_empty() {
        let report = sweep_fixed_food(args.policy, &params, &config, &args.sweep, args.runs, seed)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut day_log = args.log_dir.as_ref().map(DayLog::open).transpose()?;

    for sim_id in 1..=args.runs as u32 {
        let settings = RunSettings {
            policy: args.policy,
            params: params.clone(),
            config: config.clone(),
            seed: seed_for_run(seed, sim_id),
            sim_id,
        };
        let summary = run_once(&settings, &mut Headless, day_log.as_mut())?;

        if let Some(dir) = &args.log_dir {
            day_log::write_recent_csv(
                dir.join(day_log::RECENT_STATS_FILE),
                sim_id,
                summary.history.chart_days(params.max_days as usize),
            )?;
        }

        println!(
            "Simulation {} ({}, seed {}) | {} days | final population {} | {:?}",
            summary.sim_id,
            summary.policy,
            summary.seed,
            summary.days_run(),
            summary.final_population,
            summary.stop_reason
        );
        for day in summary.history.days() {
            println!(
                "  Day {:03} | start={} food={} survived={} died={} end={}",
                day.day,
                day.start_creatures,
                day.food_spawned,
                day.survivors,
                day.died,
                day.end_creatures()
            );
        }
    }

    Ok(())
}

fn main() {
    forage::init_tracing("forage=warn");

    let args = Args::parse();
    if let Err(e) = run(&args) {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
