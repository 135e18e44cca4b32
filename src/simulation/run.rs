//! Drives an ecosystem across days and sequences repeated runs.

use chrono::Utc;

use super::day_log::DayLog;
use super::ecosystem::{DayObserver, Ecosystem, Headless};
use super::error::Result;
use super::params::{Params, SimulationConfig};
use super::policy::PolicyKind;
use super::stats::{DayResult, RunHistory, RunSummary, StopReason, SweepPoint, SweepReport};

/// Everything needed to start one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Which rules to simulate.
    pub policy: PolicyKind,
    /// World constants.
    pub params: Params,
    /// Initial runtime knobs.
    pub config: SimulationConfig,
    /// Seed of the run's random generator.
    pub seed: u64,
    /// Sequential id of the run, starting at 1.
    pub sim_id: u32,
}

/// Seed for the `sim_id`-th run of a session started from `base_seed`.
pub fn seed_for_run(base_seed: u64, sim_id: u32) -> u64 {
    base_seed.wrapping_add(u64::from(sim_id))
}

/// Decides whether a run ends after a settled day.
///
/// Checked in order: nobody survived, the day ceiling was reached, the day
/// was stopped by hand.
pub fn stop_reason_after(result: &DayResult, max_days: u32, manual_stop: bool) -> Option<StopReason> {
    if result.survivors == 0 {
        Some(StopReason::Extinct)
    } else if result.day >= max_days {
        Some(StopReason::DayLimit)
    } else if manual_stop {
        Some(StopReason::ManualStop)
    } else {
        None
    }
}

/// Runs days until the population dies out, the day ceiling is hit, a day
/// is stopped by hand, or the observer quits.
///
/// Survivors reproduce after every day that does not end the run.
/// `on_day` sees each result right after the day is settled.
pub fn run_days(
    ecosystem: &mut Ecosystem,
    max_days: u32,
    observer: &mut impl DayObserver,
    mut on_day: impl FnMut(&DayResult, &Ecosystem),
) -> (RunHistory, StopReason) {
    let mut history = RunHistory::new();

    loop {
        if ecosystem.creatures.is_empty() {
            return (history, StopReason::Extinct);
        }

        let Some(result) = ecosystem.simulate_day(observer) else {
            return (history, StopReason::Aborted);
        };
        history.record(result);
        on_day(&result, ecosystem);

        if let Some(reason) = stop_reason_after(&result, max_days, ecosystem.config.manual_stop) {
            return (history, reason);
        }

        ecosystem.reproduce();
    }
}

/// Builds an ecosystem from `settings` and runs it to completion.
///
/// Each settled day is appended to `day_log` when one is given.
pub fn run_once(
    settings: &RunSettings,
    observer: &mut impl DayObserver,
    mut day_log: Option<&mut DayLog>,
) -> Result<RunSummary> {
    let policy = settings.policy.build(&settings.params);
    let policy_name = policy.name().to_string();
    let mut ecosystem = Ecosystem::new(
        policy,
        settings.params.clone(),
        settings.config.clone(),
        settings.seed,
    )?;

    let mut log_error = None;
    let (history, stop_reason) = run_days(
        &mut ecosystem,
        settings.params.max_days,
        observer,
        |result, _| {
            if let Some(log) = day_log.as_deref_mut() {
                if let Err(e) = log.append(result) {
                    log_error.get_or_insert(e);
                }
            }
        },
    );
    if let Some(e) = log_error {
        return Err(e);
    }

    let summary = RunSummary {
        sim_id: settings.sim_id,
        seed: settings.seed,
        policy: policy_name,
        final_population: ecosystem.creatures.len(),
        history,
        stop_reason,
    };

    tracing::info!(
        sim_id = summary.sim_id,
        policy = %summary.policy,
        days = summary.days_run(),
        final_population = summary.final_population,
        stop_reason = ?summary.stop_reason,
        "run finished"
    );

    Ok(summary)
}

/// Repeats headless runs for every fixed food count and averages the
/// population per day.
///
/// Scaling is switched off for every run; the other knobs come from
/// `base_config`. Seeds advance by one per run across the whole sweep, so
/// the report is reproducible from `base_seed`.
pub fn sweep_fixed_food(
    policy: PolicyKind,
    params: &Params,
    base_config: &SimulationConfig,
    food_counts: &[i64],
    runs_per_count: usize,
    base_seed: u64,
) -> Result<SweepReport> {
    let mut points = Vec::with_capacity(food_counts.len());
    let mut sim_id = 0;

    for &fixed_food_count in food_counts {
        let config = SimulationConfig {
            food_scaling: false,
            fixed_food_count: Some(fixed_food_count),
            ..base_config.clone()
        };

        let mut summaries = Vec::with_capacity(runs_per_count);
        for _ in 0..runs_per_count {
            sim_id += 1;
            let settings = RunSettings {
                policy,
                params: params.clone(),
                config: config.clone(),
                seed: seed_for_run(base_seed, sim_id),
                sim_id,
            };
            summaries.push(run_once(&settings, &mut Headless, None)?);
        }

        let point = SweepPoint::from_runs(fixed_food_count, &summaries, params.max_days);
        tracing::info!(
            fixed_food_count,
            runs = point.runs,
            mean_days = point.mean_days,
            "sweep point done"
        );
        points.push(point);
    }

    Ok(SweepReport {
        policy: policy.to_string(),
        generated_at: Utc::now(),
        points,
    })
}
