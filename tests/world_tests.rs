//! Headless end-to-end tests for the frame pipeline.
//!
//! These tests use [`MinimalPlugins`] — no window, no rendering — so they run
//! fast and deterministically in CI. Input is driven by writing the
//! `ButtonInput` resources directly; the cursor is written straight into
//! [`CursorPos`] since there is no window to track.
//!
//! Entity movement is per-frame (not Δt-scaled), so everything except the
//! two clocks is exactly reproducible; clock tests pre-load the accumulators
//! instead of sleeping.

use bevy::prelude::*;

use perigee::config::GameConfig;
use perigee::enemy::EnemyPool;
use perigee::geometry::{aim, distance};
use perigee::planet::Planet;
use perigee::pool::Pooled;
use perigee::projectile::ProjectilePool;
use perigee::rendering::OverlayState;
use perigee::simulation::{
    CursorPos, EnemySpawnTimer, SimStats, SimulationPlugin, SpriteClock,
};

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a headless app with the full simulation pipeline and run one frame
/// so Startup (config load + world configuration) has settled.
fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(SimulationPlugin);
    app.update();
    app
}

/// Same, but with the spawn clock effectively disabled so wall-clock time
/// between updates cannot activate surprise enemies mid-scenario.
fn quiet_app() -> App {
    let mut app = headless_app();
    app.world_mut()
        .resource_mut::<GameConfig>()
        .enemy_spawn_interval_secs = f32::INFINITY;
    app
}

/// Press-and-release in one frame: visible to `just_released` on the next
/// update. The caller clears the input afterwards.
fn tap_key(app: &mut App, key: KeyCode) {
    let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keys.press(key);
    keys.release(key);
}

fn clear_keys(app: &mut App) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .clear();
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// The pipeline boots with both pools idle at their configured capacities.
#[test]
fn boots_with_idle_pools() {
    let mut app = headless_app();
    app.update();

    let config = app.world().resource::<GameConfig>().clone();
    let projectiles = app.world().resource::<ProjectilePool>();
    let enemies = app.world().resource::<EnemyPool>();

    assert_eq!(projectiles.0.capacity(), config.projectile_pool_size);
    assert_eq!(enemies.0.capacity(), config.enemy_pool_size);
    assert_eq!(projectiles.0.active(), 0);
    assert_eq!(enemies.0.active(), 0);
}

/// A spawn clock that reaches its interval activates exactly one enemy and
/// resets.
#[test]
fn spawn_clock_activates_exactly_one_enemy() {
    let mut app = headless_app();
    let interval = app
        .world()
        .resource::<GameConfig>()
        .enemy_spawn_interval_secs;

    app.world_mut()
        .resource_mut::<EnemySpawnTimer>()
        .timer_secs = interval;
    app.update();

    let enemies = app.world().resource::<EnemyPool>();
    assert_eq!(enemies.0.active(), 1);
    let spawned = enemies.0.iter().find(|e| !e.is_free()).unwrap();
    assert!((spawned.speed.length() - 1.0).abs() < 1e-5);

    let timer = app.world().resource::<EnemySpawnTimer>();
    assert!(timer.timer_secs < interval, "clock must reset after firing");

    // The very next frame (Δt ≪ interval) spawns nothing further.
    app.update();
    assert_eq!(app.world().resource::<EnemyPool>().0.active(), 1);
}

/// The animation pulse is raised for exactly one frame per elapsed interval.
#[test]
fn sprite_pulse_lasts_one_frame() {
    let mut app = headless_app();
    let interval = app.world().resource::<GameConfig>().sprite_interval_secs;

    app.world_mut().resource_mut::<SpriteClock>().timer_secs = interval;
    app.update();
    assert!(app.world().resource::<SpriteClock>().advance_frame);

    app.update();
    assert!(!app.world().resource::<SpriteClock>().advance_frame);
}

/// Key-up on `1` fires one shot from the muzzle along the aim: cursor right
/// of the planet means a spawn on the +x ray at planet.r + 2·player.r, flying
/// +x, already advanced one frame by its own update.
#[test]
fn fire_key_launches_one_shot_along_the_aim() {
    let mut app = quiet_app();
    app.world_mut().resource_mut::<CursorPos>().0 = Vec2::new(600.0, 300.0);
    tap_key(&mut app, KeyCode::Digit1);
    app.update();
    clear_keys(&mut app);

    let config = app.world().resource::<GameConfig>().clone();
    let projectiles = app.world().resource::<ProjectilePool>();
    assert_eq!(projectiles.0.active(), 1);

    let shot = projectiles.0.get(0).unwrap();
    assert!(!shot.is_free());
    let modifier = config.projectile_speed_modifier;
    // Muzzle (560, 300), plus one frame of (+modifier, 0).
    assert!((shot.pos - Vec2::new(560.0 + modifier, 300.0)).length() < 1e-3);
    assert!(shot.speed.x > 0.0 && shot.speed.y.abs() < 1e-4);

    assert_eq!(app.world().resource::<SimStats>().shots_fired, 1);

    // No key activity → no further shots.
    app.update();
    assert_eq!(app.world().resource::<ProjectilePool>().0.active(), 1);
}

/// The `D` key toggles the debug overlay on key-up, both directions.
#[test]
fn debug_key_toggles_overlay() {
    let mut app = headless_app();
    assert!(!app.world().resource::<OverlayState>().debug);

    tap_key(&mut app, KeyCode::KeyD);
    app.update();
    clear_keys(&mut app);
    assert!(app.world().resource::<OverlayState>().debug);

    tap_key(&mut app, KeyCode::KeyD);
    app.update();
    clear_keys(&mut app);
    assert!(!app.world().resource::<OverlayState>().debug);
}

/// End-to-end: an enemy dropped at the top edge, aimed at the planet, closes
/// the distance monotonically through the full pipeline and is reclaimed on
/// the tick the overlap first holds.
#[test]
fn enemy_marches_into_the_planet_and_is_reclaimed() {
    let mut app = quiet_app();
    let planet = *app.world().resource::<Planet>();

    {
        let mut enemies = app.world_mut().resource_mut::<EnemyPool>();
        let enemy = enemies.0.acquire().expect("empty pool has a slot");
        let mut rng = StdRng::seed_from_u64(9);
        enemy.start(&mut rng, Vec2::new(800.0, 600.0), planet.pos);
        enemy.pos = Vec2::new(400.0, 0.0);
        enemy.speed = aim(enemy.pos, planet.pos).dir;
    }

    let mut last = f32::INFINITY;
    let mut reclaimed = false;
    for _ in 0..400 {
        app.update();
        let enemies = app.world().resource::<EnemyPool>();
        let enemy = enemies.0.get(0).unwrap();
        if enemy.is_free() {
            reclaimed = true;
            break;
        }
        let now = distance(enemy.disc(), planet.disc());
        assert!(now < last, "planet distance must shrink every frame");
        last = now;
    }

    assert!(reclaimed, "enemy must be reclaimed at the planet");
    // Never reclaimed early: the last active distance was still outside.
    assert!(last >= planet.radius + 40.0 - 1.0);
    assert_eq!(app.world().resource::<SimStats>().planet_impacts, 1);
}

/// Pool capacities never change across a busy session of acquire/release
/// cycles driven through the real systems.
#[test]
fn pool_capacity_is_stable_across_cycles() {
    let mut app = quiet_app();
    let capacity = app.world().resource::<ProjectilePool>().0.capacity();
    app.world_mut().resource_mut::<CursorPos>().0 = Vec2::new(400.0, 0.0);

    // Fire every frame for a while; shots fly off the top edge and recycle.
    for _ in 0..120 {
        tap_key(&mut app, KeyCode::Digit1);
        app.update();
        clear_keys(&mut app);
        let projectiles = app.world().resource::<ProjectilePool>();
        assert_eq!(projectiles.0.capacity(), capacity);
        assert!(projectiles.0.active() <= capacity);
    }

    let stats = app.world().resource::<SimStats>();
    assert!(stats.shots_fired > 0);
}
