//! Simulation plugin: world resources and the fixed-order frame pipeline.
//!
//! ## Pipeline (runs in order every `Update` frame)
//!
//! 1. [`cursor_tracking_system`] — window cursor → [`CursorPos`] (sim coords).
//! 2. [`debug_toggle_system`] — `D` key-up flips the debug overlay.
//! 3. [`player_update_system`] — re-aim and re-position the turret.
//! 4. [`fire_input_system`] — click / `1` key-up → acquire and launch a shot.
//! 5. [`projectile_update_system`] — advance shots, reclaim off-screen ones.
//! 6. [`enemy_update_system`] — advance enemies, resolve all collisions.
//! 7. [`enemy_spawn_system`] — spawn clock; activates one pooled enemy.
//! 8. [`sprite_clock_system`] — animation clock; raises the one-frame pulse.
//!
//! The clocks deliberately tick *after* the entity updates: a pulse raised at
//! the end of frame N is consumed by the enemy updates of frame N+1, then
//! cleared. Entity movement is per-frame; only the two clocks consume Δt.
//!
//! Entities never see the Bevy `World`. Each update receives a [`TickContext`]
//! snapshot — dimensions, collision anchors, the animation pulse — keeping
//! every mutation boundary explicit.

use crate::config::{load_game_config, GameConfig};
use crate::enemy::EnemyPool;
use crate::geometry::Disc;
use crate::planet::Planet;
use crate::player::Player;
use crate::projectile::ProjectilePool;
use crate::rendering::OverlayState;
use bevy::prelude::*;

// ── World resources ───────────────────────────────────────────────────────────

/// Last known cursor position in simulation coordinates. The window is
/// created at the world size, so window coordinates are simulation
/// coordinates.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CursorPos(pub Vec2);

/// Δt accumulator for enemy activation.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct EnemySpawnTimer {
    pub timer_secs: f32,
}

/// Δt accumulator for the shared death-animation clock.
///
/// `advance_frame` is true for exactly one frame per interval — the frame
/// after the accumulator rolled over — and false otherwise. All dying
/// enemies key their frame advance off this single pulse.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SpriteClock {
    pub timer_secs: f32,
    pub advance_frame: bool,
}

/// Session counters, shown in the debug HUD. Gameplay-inert.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SimStats {
    pub shots_fired: u64,
    pub kills: u64,
    pub planet_impacts: u64,
    pub player_impacts: u64,
}

/// Read-only per-frame snapshot handed into entity updates.
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    /// World rectangle extents; entities live in `[0,x] × [0,y]`.
    pub bounds: Vec2,
    pub planet: Disc,
    pub player: Disc,
    pub damage_per_hit: i32,
    /// The shared animation pulse for this frame.
    pub advance_frame: bool,
}

impl TickContext {
    /// Snapshot the shared state entity updates are allowed to read.
    pub fn snapshot(
        config: &GameConfig,
        planet: &Planet,
        player: &Player,
        clock: &SpriteClock,
    ) -> Self {
        Self {
            bounds: Vec2::new(config.world_width, config.world_height),
            planet: planet.disc(),
            player: player.disc(),
            damage_per_hit: config.damage_per_hit,
            advance_frame: clock.advance_frame,
        }
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<CursorPos>()
            .init_resource::<OverlayState>()
            .init_resource::<SimStats>()
            .init_resource::<EnemySpawnTimer>()
            .init_resource::<SpriteClock>()
            .init_resource::<Planet>()
            .init_resource::<Player>()
            .init_resource::<ProjectilePool>()
            .init_resource::<EnemyPool>()
            // Input resources normally come from DefaultPlugins; registering
            // them here too lets headless apps drive the pipeline directly.
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_systems(Startup, (load_game_config, configure_world).chain())
            .add_systems(
                Update,
                (
                    cursor_tracking_system,
                    debug_toggle_system,
                    player_update_system,
                    fire_input_system,
                    projectile_update_system,
                    enemy_update_system,
                    enemy_spawn_system,
                    sprite_clock_system,
                )
                    .chain(),
            );
    }
}

/// Startup: rebuild the planet, turret, and both pools from the final
/// (possibly TOML-overridden) config. Pool capacities are fixed from here on.
pub fn configure_world(
    config: Res<GameConfig>,
    mut planet: ResMut<Planet>,
    mut player: ResMut<Player>,
    mut projectiles: ResMut<ProjectilePool>,
    mut enemies: ResMut<EnemyPool>,
) {
    *planet = Planet::from_config(&config);
    *player = Player::from_config(&config);
    *projectiles = ProjectilePool::from_config(&config);
    *enemies = EnemyPool::from_config(&config);
}

// ── Input routing ─────────────────────────────────────────────────────────────

/// Mirror the window cursor into [`CursorPos`]. Keeps the last known value
/// while the cursor is outside the window (or there is no window at all).
pub fn cursor_tracking_system(windows: Query<&Window>, mut cursor: ResMut<CursorPos>) {
    let Ok(window) = windows.single() else {
        return;
    };
    if let Some(pos) = window.cursor_position() {
        cursor.0 = pos;
    }
}

/// `D` key-up toggles the debug overlay.
pub fn debug_toggle_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut overlay: ResMut<OverlayState>,
) {
    if keys.just_released(KeyCode::KeyD) {
        overlay.debug = !overlay.debug;
    }
}

/// Left click or `1` key-up fires along the current aim. Pool exhaustion is
/// a quiet no-op inside [`Player::shoot`].
pub fn fire_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    config: Res<GameConfig>,
    player: Res<Player>,
    mut projectiles: ResMut<ProjectilePool>,
    mut stats: ResMut<SimStats>,
) {
    let wants_fire =
        buttons.just_pressed(MouseButton::Left) || keys.just_released(KeyCode::Digit1);
    if wants_fire && player.shoot(&mut projectiles, config.projectile_speed_modifier) {
        stats.shots_fired += 1;
    }
}

// ── Entity updates ────────────────────────────────────────────────────────────

pub fn player_update_system(
    planet: Res<Planet>,
    cursor: Res<CursorPos>,
    mut player: ResMut<Player>,
) {
    player.update(&planet, cursor.0);
}

pub fn projectile_update_system(
    config: Res<GameConfig>,
    planet: Res<Planet>,
    player: Res<Player>,
    clock: Res<SpriteClock>,
    mut projectiles: ResMut<ProjectilePool>,
) {
    let ctx = TickContext::snapshot(&config, &planet, &player, &clock);
    for shot in projectiles.0.iter_mut() {
        shot.update(&ctx);
    }
}

pub fn enemy_update_system(
    config: Res<GameConfig>,
    planet: Res<Planet>,
    player: Res<Player>,
    clock: Res<SpriteClock>,
    mut enemies: ResMut<EnemyPool>,
    mut projectiles: ResMut<ProjectilePool>,
    mut stats: ResMut<SimStats>,
) {
    let ctx = TickContext::snapshot(&config, &planet, &player, &clock);
    for enemy in enemies.0.iter_mut() {
        enemy.update(&ctx, &mut projectiles.0, &mut stats);
    }
}

// ── Clocks ────────────────────────────────────────────────────────────────────

/// Accumulate Δt; each time the spawn interval elapses, reset and activate
/// one free enemy. An exhausted pool skips the beat without error.
pub fn enemy_spawn_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    planet: Res<Planet>,
    mut timer: ResMut<EnemySpawnTimer>,
    mut enemies: ResMut<EnemyPool>,
) {
    timer.timer_secs += time.delta_secs();
    if timer.timer_secs < config.enemy_spawn_interval_secs {
        return;
    }
    timer.timer_secs = 0.0;

    let bounds = Vec2::new(config.world_width, config.world_height);
    let planet_center = planet.pos;
    if let Some(enemy) = enemies.0.acquire() {
        let mut rng = rand::thread_rng();
        enemy.start(&mut rng, bounds, planet_center);
    }
}

/// Accumulate Δt; each time the sprite interval elapses, raise
/// [`SpriteClock::advance_frame`] for the one upcoming frame.
pub fn sprite_clock_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut clock: ResMut<SpriteClock>,
) {
    clock.advance_frame = false;
    clock.timer_secs += time.delta_secs();
    if clock.timer_secs >= config.sprite_interval_secs {
        clock.timer_secs = 0.0;
        clock.advance_frame = true;
    }
}
