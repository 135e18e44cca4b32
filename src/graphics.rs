use forage::simulation::ecosystem::{DayPhase, Frame};
use forage::simulation::params::Params;
use forage::simulation::policy::SimulationPolicy;
use geo::Point;
use macroquad::prelude::*;

const BACKGROUND_COLOR: Color = Color::new(20.0 / 255.0, 20.0 / 255.0, 24.0 / 255.0, 1.0);
const EDGE_COLOR: Color = Color::new(90.0 / 255.0, 90.0 / 255.0, 100.0 / 255.0, 1.0);
const CREATURE_COLOR: Color = Color::new(61.0 / 255.0, 178.0 / 255.0, 1.0, 1.0);
const FOOD_COLOR: Color = Color::new(80.0 / 255.0, 200.0 / 255.0, 120.0 / 255.0, 1.0);
const DEAD_COLOR: Color = Color::new(220.0 / 255.0, 60.0 / 255.0, 60.0 / 255.0, 1.0);

/// Width of the screen area reserved for the arena; the rest holds the stats panel.
pub fn arena_screen_width() -> f32 {
    screen_width() * 0.65
}

trait ToScreen {
    type Output;
    fn to_screen(&self, params: &Params) -> Self::Output;
}

impl ToScreen for Point<f32> {
    type Output = Vec2;
    fn to_screen(&self, params: &Params) -> Vec2 {
        let scale = arena_scale(params);
        vec2(self.x() * scale, self.y() * scale)
    }
}

impl ToScreen for f32 {
    type Output = f32;
    fn to_screen(&self, params: &Params) -> f32 {
        self * arena_scale(params)
    }
}

// uniform scale so circles stay round
fn arena_scale(params: &Params) -> f32 {
    let scale_x = arena_screen_width() / params.box_width;
    let scale_y = screen_height() / params.box_height;
    scale_x.min(scale_y)
}

pub fn draw_arena(
    frame: &Frame<'_>,
    params: &Params,
    policy: &dyn SimulationPolicy,
) {
    clear_background(BACKGROUND_COLOR);

    let corner = Point::new(params.box_width, params.box_height).to_screen(params);
    draw_rectangle_lines(0.0, 0.0, corner.x, corner.y, 2.0, EDGE_COLOR);

    let food_radius = policy.food_radius().to_screen(params);
    for food in frame.food {
        let pos = food.pos.to_screen(params);
        draw_circle(pos.x, pos.y, food_radius, FOOD_COLOR);
    }

    let creature_radius = policy.creature_radius().to_screen(params);
    for creature in frame.creatures {
        let pos = creature.pos.to_screen(params);
        let color = if creature.is_dead() {
            DEAD_COLOR
        } else {
            CREATURE_COLOR
        };
        draw_circle(pos.x, pos.y, creature_radius, color);

        // survivor ring
        if creature.is_survivor {
            draw_circle_lines(pos.x, pos.y, creature_radius + 2.0, 1.5, WHITE);
        }
    }

    let caption = if frame.phase == DayPhase::Settled {
        format!("{} | Day {} over", policy.name(), frame.day)
    } else {
        format!(
            "{} | Day {} | x{}",
            policy.name(),
            frame.day,
            frame.speed_multiplier
        )
    };
    draw_text(&caption, 8.0, screen_height() - 10.0, 18.0, LIGHTGRAY);
}
