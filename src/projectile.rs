//! Player shots: pooled short-lived points that fly along the aim direction.

use crate::config::GameConfig;
use crate::geometry::Disc;
use crate::pool::{Pool, Pooled};
use crate::simulation::TickContext;
use bevy::prelude::*;

/// One slot in the projectile pool.
///
/// Free slots park at the origin with zero velocity and are skipped by
/// movement, rendering, and the enemy hit-scan alike.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub pos: Vec2,
    pub radius: f32,
    /// Per-frame displacement: aim direction × speed modifier, set at launch.
    pub speed: Vec2,
    free: bool,
}

impl Projectile {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            radius,
            speed: Vec2::ZERO,
            free: true,
        }
    }

    /// Launch this slot: free → active at `pos`, moving along the unit
    /// direction `dir` scaled by `modifier`.
    pub fn start(&mut self, pos: Vec2, dir: Vec2, modifier: f32) {
        self.free = false;
        self.pos = pos;
        self.speed = dir * modifier;
    }

    /// Advance one frame. Movement is per-frame, not Δt-scaled; a shot whose
    /// centre leaves the world rectangle on either axis is reclaimed
    /// immediately.
    pub fn update(&mut self, ctx: &TickContext) {
        if self.free {
            return;
        }
        self.pos += self.speed;
        let bounds = ctx.bounds;
        if self.pos.x < 0.0 || self.pos.x > bounds.x || self.pos.y < 0.0 || self.pos.y > bounds.y {
            self.reset();
        }
    }

    pub fn disc(&self) -> Disc {
        Disc::new(self.pos, self.radius)
    }
}

impl Pooled for Projectile {
    fn is_free(&self) -> bool {
        self.free
    }

    fn reset(&mut self) {
        self.free = true;
    }
}

/// The fixed projectile arena, owned by the Bevy world.
#[derive(Resource, Debug, Clone)]
pub struct ProjectilePool(pub Pool<Projectile>);

impl ProjectilePool {
    pub fn from_config(config: &GameConfig) -> Self {
        let radius = config.projectile_radius;
        Self(Pool::new(config.projectile_pool_size, || {
            Projectile::new(radius)
        }))
    }
}

impl Default for ProjectilePool {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    /// Projectile updates only read the bounds; the collision anchors in the
    /// context are inert here.
    fn ctx() -> TickContext {
        TickContext {
            bounds: BOUNDS,
            planet: Disc::new(Vec2::new(400.0, 300.0), 80.0),
            player: Disc::new(Vec2::new(520.0, 300.0), 40.0),
            damage_per_hit: 1,
            advance_frame: false,
        }
    }

    #[test]
    fn start_scales_direction_by_modifier() {
        let mut shot = Projectile::new(5.0);
        shot.start(Vec2::new(100.0, 100.0), Vec2::new(0.6, 0.8), 5.0);
        assert!(!shot.is_free());
        assert_eq!(shot.speed, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn position_after_n_ticks_is_linear_in_n() {
        let mut shot = Projectile::new(5.0);
        let origin = Vec2::new(200.0, 300.0);
        let dir = Vec2::new(0.6, 0.8);
        shot.start(origin, dir, 5.0);
        for n in 1..=20 {
            shot.update(&ctx());
            assert!(!shot.is_free());
            let expected = origin + dir * 5.0 * n as f32;
            assert!((shot.pos - expected).length() < 1e-4);
        }
    }

    #[test]
    fn reclaimed_on_the_tick_x_goes_negative() {
        let mut shot = Projectile::new(5.0);
        shot.start(Vec2::new(10.0, 300.0), Vec2::NEG_X, 6.0);

        shot.update(&ctx());
        assert!(!shot.is_free(), "x = 4 is still inside");
        shot.update(&ctx());
        assert!(shot.is_free(), "x = -2 leaves the world this tick");
    }

    #[test]
    fn free_slot_never_moves() {
        let mut shot = Projectile::new(5.0);
        shot.start(Vec2::new(50.0, 50.0), Vec2::X, 5.0);
        shot.reset();
        let parked = shot.pos;
        shot.update(&ctx());
        assert_eq!(shot.pos, parked);
    }

    #[test]
    fn pool_capacity_comes_from_config() {
        let pool = ProjectilePool::default();
        assert_eq!(pool.0.capacity(), GameConfig::default().projectile_pool_size);
        assert_eq!(pool.0.active(), 0);
    }
}
