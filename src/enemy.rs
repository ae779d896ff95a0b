//! Enemies: pooled hazards that spawn just off-screen and seek the planet.
//!
//! There is one `Enemy` type; variant-specific numbers (radius, starting
//! lives, death-animation length, silhouette count) come from an
//! [`EnemyArchetype`] value rather than a type hierarchy. The only archetype
//! today is the asteroid; a new enemy kind that differs in data only is one
//! more constructor here.
//!
//! ## Lifecycle
//!
//! free → `start` → `Alive` (moving, damageable) → `Dying` (moving,
//! invulnerable, death animation playing) → free again. Planet or turret
//! contact reclaims the slot from either phase; the death animation reclaims
//! it once the frame column passes the archetype's last frame.

use crate::config::GameConfig;
use crate::geometry::{aim, overlaps, Disc};
use crate::pool::{Pool, Pooled};
use crate::projectile::Projectile;
use crate::simulation::{SimStats, TickContext};
use bevy::prelude::*;
use rand::Rng;

/// Data-only variant descriptor: everything that distinguishes one enemy
/// kind from another.
#[derive(Debug, Clone, Copy)]
pub struct EnemyArchetype {
    pub radius: f32,
    pub max_lives: i32,
    /// Last valid death-animation frame index.
    pub max_frame: u32,
    /// Number of visual silhouettes to roll between at activation.
    pub frame_rows: u32,
}

impl EnemyArchetype {
    pub fn asteroid(config: &GameConfig) -> Self {
        Self {
            radius: config.asteroid_radius,
            max_lives: config.asteroid_max_lives,
            max_frame: config.asteroid_max_frame,
            frame_rows: config.asteroid_frame_rows.max(1),
        }
    }
}

/// Damage model split: `Alive` takes hits, `Dying` is invulnerable and no
/// longer consumes projectiles while its destruction animation plays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyPhase {
    Alive,
    Dying,
}

/// One slot in the enemy pool.
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub archetype: EnemyArchetype,
    pub pos: Vec2,
    /// Per-frame displacement: the unit aim vector toward the planet, fixed
    /// at spawn. Enemies fly straight.
    pub speed: Vec2,
    pub lives: i32,
    pub phase: EnemyPhase,
    /// Silhouette rolled at activation; visual variety only.
    pub frame_row: u32,
    /// Death-animation progress, advanced by the shared animation pulse.
    pub frame_col: u32,
    free: bool,
}

impl Enemy {
    pub fn new(archetype: EnemyArchetype) -> Self {
        Self {
            archetype,
            pos: Vec2::ZERO,
            speed: Vec2::ZERO,
            lives: 0,
            phase: EnemyPhase::Alive,
            frame_row: 0,
            frame_col: 0,
            free: true,
        }
    }

    pub fn radius(&self) -> f32 {
        self.archetype.radius
    }

    pub fn disc(&self) -> Disc {
        Disc::new(self.pos, self.archetype.radius)
    }

    /// Activate this slot for a new wave.
    ///
    /// Spawn point: a coin flip picks a horizontal or vertical screen edge;
    /// the free axis is uniform across the playfield and the pinned axis
    /// sits one radius outside the visible area, so enemies always enter
    /// from off-screen. Velocity is the unit vector toward the planet — no
    /// speed modifier.
    pub fn start(&mut self, rng: &mut impl Rng, bounds: Vec2, planet_center: Vec2) {
        self.free = false;
        self.phase = EnemyPhase::Alive;
        self.lives = self.archetype.max_lives;
        self.frame_col = 0;
        self.frame_row = rng.gen_range(0..self.archetype.frame_rows);

        let r = self.archetype.radius;
        if rng.gen::<f32>() < 0.5 {
            self.pos.x = rng.gen_range(0.0..bounds.x);
            self.pos.y = if rng.gen::<f32>() < 0.5 {
                -r
            } else {
                bounds.y + r
            };
        } else {
            self.pos.x = if rng.gen::<f32>() < 0.5 {
                -r
            } else {
                bounds.x + r
            };
            self.pos.y = rng.gen_range(0.0..bounds.y);
        }

        self.speed = aim(self.pos, planet_center).dir;
    }

    /// Advance one frame: move, then resolve collisions in fixed order —
    /// planet, turret, projectile scan — then tick the death animation.
    ///
    /// The projectile scan walks the pool in index order. Every overlapping
    /// active projectile is consumed for damage while the enemy is `Alive`;
    /// the instant lives run out the phase flips to `Dying` and the rest of
    /// the scan leaves projectiles untouched, so a full-health asteroid
    /// consumes exactly `max_lives` shots over its lifetime.
    pub fn update(
        &mut self,
        ctx: &TickContext,
        projectiles: &mut Pool<Projectile>,
        stats: &mut SimStats,
    ) {
        if self.free {
            return;
        }

        self.pos += self.speed;

        if overlaps(self.disc(), ctx.planet) {
            stats.planet_impacts += 1;
            self.reset();
            return;
        }
        if overlaps(self.disc(), ctx.player) {
            stats.player_impacts += 1;
            self.reset();
            return;
        }

        for shot in projectiles.iter_mut() {
            if self.phase != EnemyPhase::Alive {
                break;
            }
            if !shot.is_free() && overlaps(self.disc(), shot.disc()) {
                shot.reset();
                self.hit(ctx.damage_per_hit, stats);
            }
        }

        if self.phase == EnemyPhase::Dying && ctx.advance_frame {
            self.frame_col += 1;
            if self.frame_col > self.archetype.max_frame {
                self.reset();
            }
        }
    }

    fn hit(&mut self, damage: i32, stats: &mut SimStats) {
        self.lives -= damage;
        if self.lives < 1 {
            self.phase = EnemyPhase::Dying;
            stats.kills += 1;
        }
    }
}

impl Pooled for Enemy {
    fn is_free(&self) -> bool {
        self.free
    }

    fn reset(&mut self) {
        self.free = true;
    }
}

/// The fixed enemy arena, owned by the Bevy world.
#[derive(Resource, Debug, Clone)]
pub struct EnemyPool(pub Pool<Enemy>);

impl EnemyPool {
    pub fn from_config(config: &GameConfig) -> Self {
        let archetype = EnemyArchetype::asteroid(config);
        Self(Pool::new(config.enemy_pool_size, || Enemy::new(archetype)))
    }
}

impl Default for EnemyPool {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
