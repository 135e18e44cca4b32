use forage::simulation::ecosystem::Ecosystem;
use forage::simulation::stats::RunHistory;
use egui_macroquad::egui;

use super::stats::draw_stats_panel;

/// State that lives for one GUI session, across runs.
pub struct UIState {
    pub stats_panel_width: f32,
    pub sim_id: u32,
    pub rendering_enabled: bool,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            stats_panel_width: 300.0,
            sim_id: 1,
            rendering_enabled: true,
        }
    }
}

pub fn draw_ui(state: &mut UIState, ecosystem: &Ecosystem, history: &RunHistory) {
    egui_macroquad::ui(|egui_ctx| {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        egui_ctx.set_visuals(visuals);

        draw_stats_panel(egui_ctx, state, ecosystem, history);
    });
}

pub fn process_egui() {
    egui_macroquad::draw();
}
