use forage::simulation::params::{Params, SimulationConfig};
use forage::simulation::policy::PolicyKind;
use egui_macroquad::egui;
use macroquad::prelude::*;

/// Choices made on the start screen.
pub struct GenesisSettings {
    pub policy: PolicyKind,
    pub params: Params,
    pub config: SimulationConfig,
    /// Use `fixed_food_count` when scaling is off; otherwise the policy decides.
    pub use_fixed_food: bool,
    pub fixed_food_count: i64,
    pub seed: u64,
}

impl GenesisSettings {
    pub fn new(seed: u64) -> Self {
        Self {
            policy: PolicyKind::Basic,
            params: Params::default(),
            config: SimulationConfig::default(),
            use_fixed_food: false,
            fixed_food_count: 10,
            seed,
        }
    }

    /// The config a run starts with.
    pub fn run_config(&self) -> SimulationConfig {
        SimulationConfig {
            fixed_food_count: self.use_fixed_food.then_some(self.fixed_food_count),
            manual_stop: false,
            ..self.config.clone()
        }
    }
}

/// Draws the configuration screen. Returns `true` once a simulation should start.
///
/// Besides the start button, `1` and `2` start a basic or greedy simulation
/// right away and Escape is reported through `quit`.
pub fn draw_genesis_screen(settings: &mut GenesisSettings, quit: &mut bool) -> bool {
    clear_background(LIGHTGRAY);

    let mut start_simulation = false;

    if is_key_pressed(KeyCode::Escape) {
        *quit = true;
    }
    if is_key_pressed(KeyCode::Key1) {
        settings.policy = PolicyKind::Basic;
        start_simulation = true;
    }
    if is_key_pressed(KeyCode::Key2) {
        settings.policy = PolicyKind::Greedy;
        start_simulation = true;
    }

    egui_macroquad::ui(|egui_ctx| {
        egui::CentralPanel::default().show(egui_ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Ecosystem Simulator - Select Simulation");
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    ui.label("Simulation:");
                    for kind in PolicyKind::ALL {
                        ui.radio_value(&mut settings.policy, kind, kind.to_string());
                    }
                });

                ui.collapsing("Food", |ui| {
                    ui.checkbox(
                        &mut settings.config.food_scaling,
                        "Scale food with population",
                    );
                    ui.add_enabled_ui(!settings.config.food_scaling, |ui| {
                        ui.checkbox(&mut settings.use_fixed_food, "Fixed food count");
                        ui.add_enabled(
                            settings.use_fixed_food,
                            egui::Slider::new(&mut settings.fixed_food_count, 0..=200)
                                .text("Food per day"),
                        );
                    });
                });

                ui.collapsing("Greedy Parameters", |ui| {
                    ui.add(
                        egui::Slider::new(&mut settings.params.food_energy, 1..=500)
                            .text("Food Energy"),
                    );
                    ui.add(
                        egui::Slider::new(&mut settings.params.greedy_constant, 0.5..=3.0)
                            .text("Food per Creature"),
                    );
                    ui.add(
                        egui::Slider::new(&mut settings.params.greedy_uncertainty, 0.0..=1.0)
                            .text("Food Uncertainty"),
                    );
                });

                ui.collapsing("Run", |ui| {
                    ui.add(
                        egui::Slider::new(&mut settings.params.max_days, 1..=100).text("Max Days"),
                    );
                    ui.add(
                        egui::Slider::new(&mut settings.config.speed_multiplier, 1..=128)
                            .text("Speed")
                            .logarithmic(true),
                    );
                    ui.horizontal(|ui| {
                        ui.label("Seed:");
                        ui.add(egui::DragValue::new(&mut settings.seed));
                    });
                    ui.checkbox(&mut settings.config.verbose, "Verbose day summaries");
                });

                ui.add_space(20.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Start Simulation").clicked() {
                        start_simulation = true;
                    }
                    ui.label("1) Basic  2) Greedy | Esc to quit | \\ to show chart early");
                });
            });
        });
    });

    egui_macroquad::draw();

    start_simulation
}
