// src/ui.rs

use drop_rescue::game::{CrashCause, GameState, GameWorld};

pub fn build_ui(ctx: &egui::Context, world: &GameWorld) {
    egui::Window::new("Drop Rescue")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                let status = match world.state() {
                    GameState::Running => "Running".to_string(),
                    GameState::Paused => "Paused".to_string(),
                    GameState::Crashed => match world.crash().map(|c| c.cause) {
                        Some(CrashCause::Asteroid(i)) => format!("Crashed into asteroid #{i}"),
                        Some(CrashCause::Terrain) => "Crashed into the ground".to_string(),
                        None => "Crashed".to_string(),
                    },
                };
                ui.label(status);

                let ship = world.ship();
                ui.label(format!("Thrust: {}", ship.thrust_level()));
                ui.label(format!("Velocity: {:.2} px/frame", ship.velocity()));
                ui.label(format!("Tick: {}", world.tick_count()));
                ui.separator();

                ui.label("p: pause/resume");
                ui.label("r: reset");
                ui.label("left/right: move sideways");
                ui.label("down: thrust");
                ui.label("Touch or click the left/right half of the window to steer.");
            });
        });
}
