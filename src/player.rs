//! The player turret: orbits the planet rim, tracks the cursor, fires.

use crate::config::GameConfig;
use crate::geometry::{aim, Disc};
use crate::planet::Planet;
use crate::projectile::ProjectilePool;
use bevy::prelude::*;

/// Singleton turret state. Position is fully derived — recomputed every
/// frame from the planet and the cursor — so there is nothing to integrate
/// and nothing to drift.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Unit vector from the planet centre toward the cursor.
    pub aim_dir: Vec2,
    /// Raw planet−cursor delta backing the facing angle.
    pub aim_delta: Vec2,
    /// Facing angle, `atan2(delta.y, delta.x)` of the raw delta. Consumed by
    /// the rendering layer for turret rotation.
    pub angle: f32,
}

impl Player {
    pub fn from_config(config: &GameConfig) -> Self {
        let planet = Planet::from_config(config);
        let mut player = Self {
            pos: Vec2::ZERO,
            radius: config.player_radius,
            aim_dir: Vec2::X,
            aim_delta: Vec2::ZERO,
            angle: 0.0,
        };
        // Start aimed at the default direction, parked on the rim.
        player.update(&planet, planet.pos + Vec2::X);
        player
    }

    pub fn disc(&self) -> Disc {
        Disc::new(self.pos, self.radius)
    }

    /// Re-aim at the cursor and re-derive the rim position: one combined
    /// radius out from the planet surface along the aim direction, always
    /// facing the cursor.
    pub fn update(&mut self, planet: &Planet, cursor: Vec2) {
        let a = aim(planet.pos, cursor);
        self.aim_dir = a.dir;
        self.aim_delta = a.delta;
        self.angle = a.delta.y.atan2(a.delta.x);
        self.pos = planet.pos + (planet.radius + self.radius) * a.dir;
    }

    /// Fire one projectile from the muzzle — one turret radius past the
    /// centre along the current aim. Quietly does nothing when the pool is
    /// exhausted; returns whether a shot actually left.
    pub fn shoot(&self, projectiles: &mut ProjectilePool, modifier: f32) -> bool {
        match projectiles.0.acquire() {
            Some(shot) => {
                shot.start(self.pos + self.radius * self.aim_dir, self.aim_dir, modifier);
                true
            }
            None => false,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
