//! Per-day results and the statistics built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of one simulated day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayResult {
    /// Day index, starting at 1.
    pub day: u32,
    /// Creatures alive when the day began.
    pub start_creatures: usize,
    /// Food items placed for the day.
    pub food_spawned: usize,
    /// Creatures that ate and made it back to a wall.
    pub survivors: usize,
    /// Every creature that did not survive, including any still moving when
    /// the day was stopped by hand.
    pub died: usize,
}

impl DayResult {
    /// The result of a day that began with no creatures.
    pub fn extinct(day: u32) -> Self {
        Self {
            day,
            ..Self::default()
        }
    }

    /// Creatures left at the end of the day.
    pub fn end_creatures(&self) -> usize {
        self.survivors
    }

    /// Checks if the day began with an empty population.
    pub fn is_extinct(&self) -> bool {
        self.start_creatures == 0
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// No creature survived the last day.
    Extinct,
    /// The day ceiling was reached.
    DayLimit,
    /// The last day was ended by hand.
    ManualStop,
    /// The front-end quit in the middle of a day.
    Aborted,
}

/// Day results of a single run, in order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunHistory {
    days: Vec<DayResult>,
}

impl RunHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a day result.
    pub fn record(&mut self, result: DayResult) {
        self.days.push(result);
    }

    /// All recorded days, oldest first.
    pub fn days(&self) -> &[DayResult] {
        &self.days
    }

    /// The first `limit` days, which is what the population chart shows.
    pub fn chart_days(&self, limit: usize) -> &[DayResult] {
        &self.days[..self.days.len().min(limit)]
    }

    /// Start-of-day populations as `(day, population)` points.
    pub fn population_points(&self) -> Vec<(f64, f64)> {
        self.days
            .iter()
            .map(|d| (f64::from(d.day), d.start_creatures as f64))
            .collect()
    }

    /// Largest start-of-day population, at least 1 so it can scale an axis.
    pub fn peak_population(&self) -> usize {
        self.days
            .iter()
            .map(|d| d.start_creatures)
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// Checks if no day has been recorded.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Everything a finished run reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Sequential id of the run within one session, starting at 1.
    pub sim_id: u32,
    /// Seed the run was started with.
    pub seed: u64,
    /// Display name of the policy.
    pub policy: String,
    /// Day results, oldest first.
    pub history: RunHistory,
    /// Creatures left after the last day.
    pub final_population: usize,
    /// Why the run ended.
    pub stop_reason: StopReason,
}

impl RunSummary {
    /// Number of days that were simulated.
    pub fn days_run(&self) -> usize {
        self.history.days().len()
    }
}

/// Averaged population curves for one fixed food count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepPoint {
    /// The fixed food count used for every day of these runs.
    pub fixed_food_count: i64,
    /// Number of runs averaged.
    pub runs: usize,
    /// Mean start-of-day population for each day index (1-based, in order).
    /// Runs that ended early count as zero on later days.
    pub mean_population: Vec<f64>,
    /// Mean number of days a run lasted.
    pub mean_days: f64,
}

/// Result of sweeping the fixed food count across repeated runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    /// Display name of the policy.
    pub policy: String,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// One entry per swept food count, in the order requested.
    pub points: Vec<SweepPoint>,
}

impl SweepPoint {
    /// Averages the start-of-day populations of `summaries` over `max_days` days.
    pub fn from_runs(fixed_food_count: i64, summaries: &[RunSummary], max_days: u32) -> Self {
        let mut totals: BTreeMap<u32, usize> = (1..=max_days).map(|d| (d, 0)).collect();
        for summary in summaries {
            for day in summary.history.days() {
                if let Some(total) = totals.get_mut(&day.day) {
                    *total += day.start_creatures;
                }
            }
        }

        let runs = summaries.len();
        let divisor = runs.max(1) as f64;
        let mean_days =
            summaries.iter().map(RunSummary::days_run).sum::<usize>() as f64 / divisor;

        Self {
            fixed_food_count,
            runs,
            mean_population: totals.values().map(|&t| t as f64 / divisor).collect(),
            mean_days,
        }
    }
}
