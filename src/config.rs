//! Runtime gameplay configuration loaded from `assets/config.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`]. At startup, [`load_game_config`] reads
//! `assets/config.toml` and overwrites the defaults with any values present
//! in the file. Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about.
//!
//! Loaded values pass through the range checks in [`crate::error`]; a file
//! that fails validation is reported on stderr and ignored wholesale rather
//! than crashing or half-applying.

use crate::constants::*;
use crate::error::{validate_capacity, validate_interval, validate_positive, GameResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`. Override any subset by setting the value in
/// `assets/config.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World ─────────────────────────────────────────────────────────────────
    pub world_width: f32,
    pub world_height: f32,

    // ── Planet / turret ───────────────────────────────────────────────────────
    pub planet_radius: f32,
    pub player_radius: f32,

    // ── Projectiles ───────────────────────────────────────────────────────────
    pub projectile_pool_size: usize,
    pub projectile_radius: f32,
    pub projectile_speed_modifier: f32,

    // ── Enemies ───────────────────────────────────────────────────────────────
    pub enemy_pool_size: usize,
    pub enemy_spawn_interval_secs: f32,
    pub asteroid_radius: f32,
    pub asteroid_max_lives: i32,
    pub asteroid_max_frame: u32,
    pub asteroid_frame_rows: u32,
    pub damage_per_hit: i32,

    // ── Clocks / HUD ──────────────────────────────────────────────────────────
    pub sprite_interval_secs: f32,
    pub hud_font_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            planet_radius: PLANET_RADIUS,
            player_radius: PLAYER_RADIUS,
            projectile_pool_size: PROJECTILE_POOL_SIZE,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_speed_modifier: PROJECTILE_SPEED_MODIFIER,
            enemy_pool_size: ENEMY_POOL_SIZE,
            enemy_spawn_interval_secs: ENEMY_SPAWN_INTERVAL_SECS,
            asteroid_radius: ASTEROID_RADIUS,
            asteroid_max_lives: ASTEROID_MAX_LIVES,
            asteroid_max_frame: ASTEROID_MAX_FRAME,
            asteroid_frame_rows: ASTEROID_FRAME_ROWS,
            damage_per_hit: DAMAGE_PER_HIT,
            sprite_interval_secs: SPRITE_INTERVAL_SECS,
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

impl GameConfig {
    /// Range-check every loaded value. Run before a loaded config replaces
    /// the defaults so a typo in the TOML cannot wedge the simulation.
    pub fn validate(&self) -> GameResult<()> {
        validate_positive("world_width", self.world_width)?;
        validate_positive("world_height", self.world_height)?;
        validate_positive("planet_radius", self.planet_radius)?;
        validate_positive("player_radius", self.player_radius)?;
        validate_positive("projectile_radius", self.projectile_radius)?;
        validate_positive("projectile_speed_modifier", self.projectile_speed_modifier)?;
        validate_positive("asteroid_radius", self.asteroid_radius)?;
        validate_capacity("projectile_pool_size", self.projectile_pool_size)?;
        validate_capacity("enemy_pool_size", self.enemy_pool_size)?;
        validate_interval("enemy_spawn_interval_secs", self.enemy_spawn_interval_secs)?;
        validate_interval("sprite_interval_secs", self.sprite_interval_secs)?;
        Ok(())
    }
}

/// Startup system: attempt to load `assets/config.toml` and overwrite the
/// [`GameConfig`] resource with any values present in the file.
///
/// Missing file → compiled defaults, silently. Parse or validation failure →
/// stderr warning, compiled defaults kept. Never aborts the game.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/config.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => match loaded.validate() {
                Ok(()) => {
                    *config = loaded;
                    println!("✓ Loaded game config from {path}");
                }
                Err(e) => {
                    eprintln!("⚠ Rejected {path}: {e}; using defaults");
                }
            },
            Err(e) => {
                eprintln!("⚠ Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let config = GameConfig::default();
        assert_eq!(config.world_width, WORLD_WIDTH);
        assert_eq!(config.planet_radius, PLANET_RADIUS);
        assert_eq!(config.projectile_pool_size, PROJECTILE_POOL_SIZE);
        assert_eq!(config.asteroid_max_frame, ASTEROID_MAX_FRAME);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config: GameConfig =
            toml::from_str("planet_radius = 100.0\nenemy_pool_size = 8").unwrap();
        assert_eq!(config.planet_radius, 100.0);
        assert_eq!(config.enemy_pool_size, 8);
        assert_eq!(config.world_width, WORLD_WIDTH);
        assert_eq!(config.asteroid_max_lives, ASTEROID_MAX_LIVES);
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let config: GameConfig = toml::from_str("projectile_pool_size = 0").unwrap();
        assert!(config.validate().is_err());

        let config: GameConfig = toml::from_str("enemy_spawn_interval_secs = 0.0").unwrap();
        assert!(config.validate().is_err());
    }
}
