use forage::simulation::day_log::{self, DayLog};
use forage::simulation::ecosystem::{DayObserver, Ecosystem};
use forage::simulation::run::{seed_for_run, stop_reason_after};
use forage::simulation::stats::{RunHistory, StopReason};
use macroquad::prelude::*;
use std::ops::ControlFlow;
use std::path::PathBuf;

mod graphics;
mod ui;

/// How long the end-of-run chart stays up at speed x1.
const CHART_DELAY_MS: u32 = 5000;
const MIN_CHART_DELAY_MS: u32 = 500;

/// A run in progress.
struct ActiveRun {
    ecosystem: Ecosystem,
    history: RunHistory,
}

enum Screen {
    Genesis,
    Running(Box<ActiveRun>),
    Chart {
        run: Box<ActiveRun>,
        stop_reason: StopReason,
        until: f64,
    },
}

fn log_dir() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("log")
}

fn start_run(settings: &ui::GenesisSettings, sim_id: u32, speed: u32) -> Option<Box<ActiveRun>> {
    let mut config = settings.run_config();
    config.speed_multiplier = speed;
    let policy = settings.policy.build(&settings.params);
    let seed = seed_for_run(settings.seed, sim_id);

    match Ecosystem::new(policy, settings.params.clone(), config, seed) {
        Ok(ecosystem) => {
            tracing::info!(sim_id, seed, policy = %settings.policy, "starting simulation");
            Some(Box::new(ActiveRun {
                ecosystem,
                history: RunHistory::new(),
            }))
        }
        Err(e) => {
            tracing::error!("cannot start simulation: {e}");
            None
        }
    }
}

/// Advances the run by one frame. Returns why the run ended, if it did.
fn advance(
    run: &mut ActiveRun,
    input: &mut impl DayObserver,
    day_log: Option<&mut DayLog>,
) -> Option<StopReason> {
    let ecosystem = &mut run.ecosystem;

    let result = match ecosystem.advance_batch(input) {
        ControlFlow::Break(()) => return Some(StopReason::Aborted),
        ControlFlow::Continue(None) => return None,
        ControlFlow::Continue(Some(result)) if result.is_extinct() => {
            return Some(StopReason::Extinct);
        }
        ControlFlow::Continue(Some(result)) => result,
    };

    run.history.record(result);
    if let Some(log) = day_log {
        if let Err(e) = log.append(&result) {
            tracing::warn!("failed to write day log: {e}");
        }
    }

    let reason = stop_reason_after(
        &result,
        ecosystem.params().max_days,
        ecosystem.config.manual_stop,
    );
    if reason.is_none() {
        ecosystem.reproduce();
    }
    reason
}

#[macroquad::main("Ecosystem Simulator")]
async fn main() {
    forage::init_tracing("forage=info");

    let mut settings = ui::GenesisSettings::new(::rand::random());
    let mut ui_state = ui::UIState::new();
    let mut keyboard = ui::KeyboardInput;
    let mut screen = Screen::Genesis;
    let mut speed = 1;

    let log_dir = log_dir();
    let mut day_log = match DayLog::open(&log_dir) {
        Ok(log) => Some(log),
        Err(e) => {
            tracing::warn!("day logging disabled: {e}");
            None
        }
    };

    loop {
        screen = match screen {
            Screen::Genesis => {
                let mut quit = false;
                let start = ui::draw_genesis_screen(&mut settings, &mut quit);
                if quit {
                    break;
                }
                speed = settings.config.speed_multiplier;
                match start.then(|| start_run(&settings, ui_state.sim_id, speed)).flatten() {
                    Some(run) => Screen::Running(run),
                    None => Screen::Genesis,
                }
            }
            Screen::Running(mut run) => {
                let stop_reason = advance(&mut run, &mut keyboard, day_log.as_mut());
                if stop_reason == Some(StopReason::Aborted) {
                    break;
                }
                speed = run.ecosystem.config.effective_speed();

                if ui_state.rendering_enabled {
                    graphics::draw_arena(
                        &run.ecosystem.frame(),
                        run.ecosystem.params(),
                        run.ecosystem.policy(),
                    );
                } else {
                    clear_background(BLACK);
                }
                ui::draw_ui(&mut ui_state, &run.ecosystem, &run.history);
                ui::process_egui();

                match stop_reason {
                    Some(stop_reason) => {
                        if let Err(e) = day_log::write_recent_csv(
                            log_dir.join(day_log::RECENT_STATS_FILE),
                            ui_state.sim_id,
                            run.history.chart_days(run.ecosystem.params().max_days as usize),
                        ) {
                            tracing::warn!("failed to write recent stats: {e}");
                        }
                        let delay_ms = (CHART_DELAY_MS / speed.max(1)).max(MIN_CHART_DELAY_MS);
                        Screen::Chart {
                            run,
                            stop_reason,
                            until: get_time() + f64::from(delay_ms) / 1000.0,
                        }
                    }
                    None => Screen::Running(run),
                }
            }
            Screen::Chart {
                run,
                stop_reason,
                until,
            } => {
                if is_key_pressed(KeyCode::Escape) {
                    break;
                }
                graphics::draw_arena(
                    &run.ecosystem.frame(),
                    run.ecosystem.params(),
                    run.ecosystem.policy(),
                );
                ui::draw_population_chart(&run.history, stop_reason, ui_state.sim_id);

                if get_time() >= until {
                    ui_state.sim_id += 1;
                    match start_run(&settings, ui_state.sim_id, speed) {
                        Some(run) => Screen::Running(run),
                        None => Screen::Genesis,
                    }
                } else {
                    Screen::Chart {
                        run,
                        stop_reason,
                        until,
                    }
                }
            }
        };

        next_frame().await
    }
}
