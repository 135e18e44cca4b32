// UI module - handles all user interface rendering and keyboard input

mod genesis;
mod input;
mod stats;
mod ui;

// Re-export the public interface
pub use genesis::{GenesisSettings, draw_genesis_screen};
pub use input::KeyboardInput;
pub use stats::draw_population_chart;
pub use ui::{UIState, draw_ui, process_egui};
