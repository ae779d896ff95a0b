//! Camera setup for 2D rendering.

use bevy::prelude::*;

/// Spawn the 2D camera. The default `Camera2d` at default scale shows the
/// full window area, which is exactly the playfield.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    eprintln!("[SETUP] Camera spawned");
}
