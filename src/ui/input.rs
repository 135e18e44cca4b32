use forage::simulation::ecosystem::DayObserver;
use forage::simulation::params::{MAX_SPEED_MULTIPLIER, SimulationConfig};
use macroquad::prelude::*;
use std::ops::ControlFlow;

/// Digit keys mapped to fixed speed multipliers 1, 2, 4, ... 128.
const SPEED_KEYS: [KeyCode; 8] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
];

/// Reads the simulation controls from the keyboard.
///
/// `+`/`-` double or halve the speed, digits pick a speed directly, `\`
/// ends the current day and Escape quits.
pub struct KeyboardInput;

impl DayObserver for KeyboardInput {
    fn poll_input(&mut self, config: &mut SimulationConfig) -> ControlFlow<()> {
        if is_key_pressed(KeyCode::Escape) {
            return ControlFlow::Break(());
        }

        if is_key_pressed(KeyCode::Equal) || is_key_pressed(KeyCode::KpAdd) {
            config.speed_up();
        }
        if is_key_pressed(KeyCode::Minus) || is_key_pressed(KeyCode::KpSubtract) {
            config.slow_down();
        }
        for (i, key) in SPEED_KEYS.iter().enumerate() {
            if is_key_pressed(*key) {
                config.speed_multiplier = (1 << i).min(MAX_SPEED_MULTIPLIER);
            }
        }

        if is_key_pressed(KeyCode::Backslash) {
            config.manual_stop = true;
        }

        ControlFlow::Continue(())
    }
}
