//! Centralised gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::GameConfig`] mirrors every value for runtime override via
//! `assets/config.toml`; the constants below remain the authoritative
//! defaults.

// ── World ─────────────────────────────────────────────────────────────────────

/// Playfield width in pixels. The window is created at exactly this size so
/// cursor coordinates and simulation coordinates coincide.
pub const WORLD_WIDTH: f32 = 800.0;

/// Playfield height in pixels.
pub const WORLD_HEIGHT: f32 = 600.0;

// ── Planet ────────────────────────────────────────────────────────────────────

/// Collision radius of the defended planet, centred in the playfield.
///
/// Larger values shorten enemy travel time and shrink the turret's orbit
/// clearance; tested range 40–150.
pub const PLANET_RADIUS: f32 = 80.0;

// ── Player turret ─────────────────────────────────────────────────────────────

/// Collision radius of the turret. Also sets the muzzle offset: shots leave
/// from one radius beyond the turret centre along the aim direction.
pub const PLAYER_RADIUS: f32 = 40.0;

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Slots in the projectile pool. Firing while every slot is busy is a silent
/// no-op, so this value caps the on-screen shot count rather than erroring.
pub const PROJECTILE_POOL_SIZE: usize = 20;

/// Visual + collision radius of one shot.
pub const PROJECTILE_RADIUS: f32 = 5.0;

/// Distance a live shot travels per frame along its aim direction.
///
/// Movement is per-frame rather than Δt-scaled, matching the rest of the
/// simulation; raise with care, fast shots can step over thin targets.
pub const PROJECTILE_SPEED_MODIFIER: f32 = 5.0;

// ── Enemies ───────────────────────────────────────────────────────────────────

/// Slots in the enemy pool. The spawn clock simply skips a beat when every
/// slot is busy.
pub const ENEMY_POOL_SIZE: usize = 20;

/// Seconds between enemy activations.
///
/// Tested range 0.6–3.0. Below ~0.5 the pool saturates and the spawn clock
/// spends most beats skipping.
pub const ENEMY_SPAWN_INTERVAL_SECS: f32 = 1.5;

// ── Asteroid archetype ────────────────────────────────────────────────────────

/// Collision radius of an asteroid.
pub const ASTEROID_RADIUS: f32 = 40.0;

/// Projectile hits an asteroid absorbs before it starts dying.
pub const ASTEROID_MAX_LIVES: i32 = 5;

/// Last frame index of the death animation (8 frames, 0..=7). The slot is
/// reclaimed once the column advances past this index.
pub const ASTEROID_MAX_FRAME: u32 = 7;

/// Distinct asteroid silhouettes; one is rolled per activation. Purely
/// visual variety.
pub const ASTEROID_FRAME_ROWS: u32 = 4;

/// Damage dealt by one projectile hit.
pub const DAMAGE_PER_HIT: i32 = 1;

// ── Animation clock ───────────────────────────────────────────────────────────

/// Seconds between death-animation frame advances. All dying enemies share
/// one clock so their animations tick in lockstep.
pub const SPRITE_INTERVAL_SECS: f32 = 0.15;

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Font size for the debug HUD line.
pub const HUD_FONT_SIZE: f32 = 14.0;
