use bevy::prelude::*;
use bevy::window::WindowResolution;

use perigee::rendering::RenderPlugin;
use perigee::simulation::SimulationPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Perigee".into(),
                // Window size == WORLD_WIDTH × WORLD_HEIGHT, so cursor
                // coordinates are simulation coordinates with no conversion.
                resolution: WindowResolution::new(800, 600),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(SimulationPlugin)
        .add_plugins(RenderPlugin)
        .run();
}
