use forage::simulation::ecosystem::{DayPhase, Ecosystem};
use forage::simulation::stats::{RunHistory, StopReason};
use egui_macroquad::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use super::ui::UIState;

pub(super) fn draw_stats_panel(
    egui_ctx: &egui::Context,
    state: &mut UIState,
    ecosystem: &Ecosystem,
    history: &RunHistory,
) {
    egui::SidePanel::right("stats_panel")
        .default_width(state.stats_panel_width)
        .resizable(true)
        .show(egui_ctx, |ui| {
            ui.heading(ecosystem.policy().name());
            ui.label(format!("Simulation {}", state.sim_id));
            ui.separator();

            ui.horizontal(|ui| {
                let button_text = if state.rendering_enabled {
                    "Rendering: ON"
                } else {
                    "Rendering: OFF"
                };
                if ui.button(button_text).clicked() {
                    state.rendering_enabled = !state.rendering_enabled;
                }
            });

            ui.separator();

            ui.label(format!("Day: {} ({})", ecosystem.day, phase_label(ecosystem.phase)));
            ui.label(format!("Speed: x{}", ecosystem.config.effective_speed()));
            ui.label(format!(
                "Creatures: {} ({} alive)",
                ecosystem.creatures.len(),
                ecosystem.living_count()
            ));
            ui.label(format!(
                "Food: {}/{}",
                ecosystem.food.len(),
                ecosystem.food_spawned
            ));
            ui.label(format!(
                "Survivors so far: {}",
                ecosystem.creatures.iter().filter(|c| c.is_survivor).count()
            ));

            ui.separator();

            ui.collapsing("Previous Days", |ui| {
                for day in history.days().iter().rev().take(10) {
                    ui.label(format!(
                        "Day {:03}: start={} food={} survived={} died={}",
                        day.day, day.start_creatures, day.food_spawned, day.survivors, day.died
                    ));
                }
            });

            ui.separator();
            ui.label("Population vs Day (start of day)");
            draw_population_plot(ui, "population_plot", history, 150.0);

            ui.separator();
            ui.label("+/- speed, 1-8 presets, \\ end day, Esc quit");
        });
}

fn phase_label(phase: DayPhase) -> &'static str {
    match phase {
        DayPhase::Spawning => "spawning",
        DayPhase::Ticking => "foraging",
        DayPhase::Settled => "settled",
    }
}

fn draw_population_plot(ui: &mut egui::Ui, id: &str, history: &RunHistory, height: f32) {
    let population: PlotPoints = history
        .population_points()
        .into_iter()
        .map(|(x, y)| [x, y])
        .collect();
    let food: PlotPoints = history
        .days()
        .iter()
        .map(|d| [f64::from(d.day), d.food_spawned as f64])
        .collect();

    Plot::new(id)
        .height(height)
        .show_axes([true, true])
        .legend(Legend::default())
        .include_y(0.0)
        .include_y(history.peak_population() as f64)
        .label_formatter(|name, value| format!("{}: day {:.0}, {:.0}", name, value.x, value.y))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(population)
                    .color(egui::Color32::from_rgb(80, 200, 120))
                    .name("Population"),
            );
            plot_ui.line(
                Line::new(food)
                    .color(egui::Color32::from_rgb(100, 150, 255))
                    .name("Food"),
            );
        });
}

/// Draws the end-of-run chart over the arena.
pub fn draw_population_chart(history: &RunHistory, stop_reason: StopReason, sim_id: u32) {
    egui_macroquad::ui(|egui_ctx| {
        egui::Window::new(format!("Simulation {sim_id} finished"))
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .default_size(egui::vec2(420.0, 300.0))
            .collapsible(false)
            .show(egui_ctx, |ui| {
                let reason = match stop_reason {
                    StopReason::Extinct => "population died out",
                    StopReason::DayLimit => "day limit reached",
                    StopReason::ManualStop => "stopped by hand",
                    StopReason::Aborted => "aborted",
                };
                ui.label(format!("{} days, {}", history.days().len(), reason));
                draw_population_plot(ui, "final_population_plot", history, 240.0);
            });
    });
    egui_macroquad::draw();
}
