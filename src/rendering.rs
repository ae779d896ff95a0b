//! Rendering: retained `Mesh2d` mirrors of the simulation state, the gizmo
//! debug overlay, and the debug HUD.
//!
//! ## Layer model
//!
//! | Layer                  | Technology | Default | Controlled by      |
//! |------------------------|------------|---------|--------------------|
//! | Planet disc            | `Mesh2d`   | ON      | —                  |
//! | Turret polygon         | `Mesh2d`   | ON      | —                  |
//! | Projectile discs       | `Mesh2d`   | ON      | slot occupancy     |
//! | Asteroid rocks         | `Mesh2d`   | ON      | slot occupancy     |
//! | Collision circles      | Gizmos     | OFF     | `OverlayState`     |
//! | Planet→cursor aim line | Gizmos     | OFF     | `OverlayState`     |
//! | Per-asteroid lives     | `Text2d`   | OFF     | `OverlayState`     |
//! | Stats HUD line         | Bevy UI    | OFF     | `OverlayState`     |
//!
//! Every pool slot owns one pre-spawned mesh entity, tagged with its slot
//! index; the sync systems mirror position and occupancy each frame instead
//! of spawning or despawning anything. The whole mirror pass is ordered
//! *before* the simulation chain, so visuals always show the previous
//! frame's state — the same one-frame lag as a draw-then-update loop.
//!
//! Simulation space is top-left-origin, y-down; [`to_render`] is the single
//! place that flips into Bevy's centred, y-up space.

use crate::config::GameConfig;
use crate::enemy::{EnemyPhase, EnemyPool};
use crate::planet::Planet;
use crate::player::Player;
use crate::pool::Pooled;
use crate::projectile::ProjectilePool;
use crate::simulation::{self, CursorPos, SimStats};
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

// ── Overlay state resource ────────────────────────────────────────────────────

/// The debug-overlay flag, flipped by the `D` key. One flag drives every
/// diagnostic layer; none of them affect gameplay.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct OverlayState {
    pub debug: bool,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Marker for the planet mesh entity.
#[derive(Component)]
pub struct PlanetVisual;

/// Marker for the turret mesh entity.
#[derive(Component)]
pub struct TurretVisual;

/// Tags a projectile mesh with its pool slot index.
#[derive(Component)]
pub struct ProjectileVisual(pub usize);

/// Tags an asteroid mesh with its pool slot index.
#[derive(Component)]
pub struct EnemyVisual(pub usize);

/// Tags a lives label with its enemy pool slot index.
#[derive(Component)]
pub struct EnemyLivesLabel(pub usize);

/// Marker for the HUD text root node.
#[derive(Component)]
pub struct HudTextDisplay;

/// One rock mesh per asteroid silhouette row; the enemy sync system swaps
/// handles as slots are re-activated with a different roll.
#[derive(Resource)]
pub struct RockMeshes(pub Vec<Handle<Mesh>>);

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (
                crate::graphics::setup_camera,
                setup_scene.after(simulation::configure_world),
                setup_debug_hud.after(simulation::configure_world),
            ),
        )
        .add_systems(
            Update,
            (
                sync_turret_visual,
                sync_projectile_visuals,
                sync_enemy_visuals,
                sync_enemy_labels,
                overlay_gizmo_system,
                hud_display_system,
            )
                .chain()
                .before(simulation::cursor_tracking_system),
        );
    }
}

// ── Coordinate mapping ────────────────────────────────────────────────────────

/// Simulation (top-left origin, y down) → render (centred origin, y up).
fn to_render(pos: Vec2, config: &GameConfig) -> Vec2 {
    Vec2::new(
        pos.x - config.world_width / 2.0,
        config.world_height / 2.0 - pos.y,
    )
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Fan-triangulate a polygon into a renderable [`Mesh`].
///
/// Triangle fan from vertex 0: triangles `(0, i, i+1)` for `i ∈ 1..n-2`.
fn filled_polygon_mesh(vertices: &[Vec2]) -> Mesh {
    let n = vertices.len();
    debug_assert!(n >= 3, "polygon must have ≥ 3 vertices");

    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| [v.x, v.y, 0.0]).collect();
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; n];
    let uvs: Vec<[f32; 2]> = vertices
        .iter()
        .map(|v| [(v.x / 100.0) + 0.5, (v.y / 100.0) + 0.5])
        .collect();

    let mut indices: Vec<u32> = Vec::with_capacity((n - 2) * 3);
    for i in 1..(n as u32 - 1) {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Approximate a disc as a regular N-gon.
fn disc_mesh(radius: f32, segments: usize) -> Mesh {
    let verts: Vec<Vec2> = (0..segments)
        .map(|i| {
            let angle = (i as f32) * std::f32::consts::TAU / (segments as f32);
            Vec2::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect();
    filled_polygon_mesh(&verts)
}

/// Local-space vertices of the turret polygon (dart / arrowhead shape).
///
/// The nose points along local +X, matching the rotation applied by
/// [`sync_turret_visual`].
fn turret_vertices(radius: f32) -> Vec<Vec2> {
    let s = radius / 40.0;
    vec![
        Vec2::new(40.0, 0.0) * s,   // nose
        Vec2::new(-16.0, 20.0) * s, // left fin
        Vec2::new(-24.0, 0.0) * s,  // tail
        Vec2::new(-16.0, -20.0) * s, // right fin
    ]
}

/// Jagged rock silhouette for one asteroid row.
///
/// Vertex count and the per-vertex radius jitter are seeded from the row via
/// a multiplicative hash, so each row gets a deterministic, visually
/// distinct shape without an external noise library.
fn rock_vertices(row: u32, radius: f32) -> Vec<Vec2> {
    let n = 7 + row as usize;
    (0..n)
        .map(|i| {
            let angle = (i as f32) * std::f32::consts::TAU / (n as f32);
            let h = row
                .wrapping_mul(31)
                .wrapping_add(i as u32)
                .wrapping_mul(2_654_435_761);
            let t = (h & 0xFFFF) as f32 / 65_535.0;
            let r = radius * (0.80 + 0.20 * t);
            Vec2::new(angle.cos() * r, angle.sin() * r)
        })
        .collect()
}

/// Rocky grey-brown fill seeded by the slot index: deterministic but
/// visually distinct tones. Luminance 0.18–0.36 with a slight warm tint.
fn rock_color(seed: u32) -> Color {
    let h = seed.wrapping_mul(2_654_435_761).wrapping_add(0xDEAD_BEEF);
    let t = (h & 0xFFFF) as f32 / 65_535.0;

    let lum = 0.18 + t * 0.18;
    let r = (lum + t * 0.06).min(1.0);
    let g = (lum + t * 0.02).min(1.0);
    let b = (lum.max(0.14) - t * 0.03).max(0.0);
    Color::srgb(r, g, b)
}

// ── Startup: scene ────────────────────────────────────────────────────────────

/// Spawn one retained mesh entity per drawable thing: the planet, the
/// turret, and one slot-tagged entity per pool slot. Nothing is spawned or
/// despawned after this.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<GameConfig>,
    planet: Res<Planet>,
    projectiles: Res<ProjectilePool>,
    enemies: Res<EnemyPool>,
) {
    // Planet: filled disc at the world centre.
    let planet_mesh = meshes.add(disc_mesh(planet.radius, 48));
    let planet_mat = materials.add(ColorMaterial::from_color(Color::srgb(0.13, 0.35, 0.55)));
    commands.spawn((
        PlanetVisual,
        Mesh2d(planet_mesh),
        MeshMaterial2d(planet_mat),
        Transform::from_translation(to_render(planet.pos, &config).extend(0.0)),
    ));

    // Turret: dart polygon, re-posed every frame.
    let turret_mesh = meshes.add(filled_polygon_mesh(&turret_vertices(config.player_radius)));
    let turret_mat = materials.add(ColorMaterial::from_color(Color::srgb(0.08, 0.30, 0.32)));
    commands.spawn((
        TurretVisual,
        Mesh2d(turret_mesh),
        MeshMaterial2d(turret_mat),
        Transform::from_translation(Vec3::new(0.0, 0.0, 0.5)),
    ));

    // Projectiles: one small disc per slot, hidden until the slot goes live.
    let shot_mesh = meshes.add(disc_mesh(config.projectile_radius, 12));
    let shot_mat = materials.add(ColorMaterial::from_color(Color::srgb(1.0, 0.85, 0.1)));
    for i in 0..projectiles.0.capacity() {
        commands.spawn((
            ProjectileVisual(i),
            Mesh2d(shot_mesh.clone()),
            MeshMaterial2d(shot_mat.clone()),
            Transform::from_translation(Vec3::new(0.0, 0.0, 0.75)),
            Visibility::Hidden,
        ));
    }

    // Asteroids: one rock per slot plus its debug lives label. The mesh
    // handle is swapped at activation to match the rolled silhouette row.
    let rock_handles: Vec<Handle<Mesh>> = (0..config.asteroid_frame_rows.max(1))
        .map(|row| meshes.add(filled_polygon_mesh(&rock_vertices(row, config.asteroid_radius))))
        .collect();
    for i in 0..enemies.0.capacity() {
        commands.spawn((
            EnemyVisual(i),
            Mesh2d(rock_handles[0].clone()),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(rock_color(i as u32)))),
            Transform::from_translation(Vec3::new(0.0, 0.0, 0.25)),
            Visibility::Hidden,
        ));
        commands.spawn((
            EnemyLivesLabel(i),
            Text2d::new("0"),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(Color::WHITE),
            Transform::from_translation(Vec3::new(0.0, 0.0, 0.9)),
            Visibility::Hidden,
        ));
    }
    commands.insert_resource(RockMeshes(rock_handles));
}

// ── Startup: debug HUD ────────────────────────────────────────────────────────

/// Spawn the top-left stats line (hidden until the overlay is toggled on).
pub fn setup_debug_hud(mut commands: Commands, config: Res<GameConfig>) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                ..default()
            },
            HudTextDisplay,
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Enemies: 0 | Shots: 0 | Fired: 0 | Kills: 0 | Impacts: 0"),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::srgb(0.0, 1.0, 1.0)),
            ));
        });
}

// ── Update: state mirrors ─────────────────────────────────────────────────────

/// Re-pose the turret mesh from the derived player state.
///
/// Simulation angles are measured in y-down space, so the z-rotation is
/// `π − angle`: the π turns the raw planet−cursor delta back into the facing
/// direction, the sign flip accounts for the y-axis mirror.
pub fn sync_turret_visual(
    player: Res<Player>,
    config: Res<GameConfig>,
    mut query: Query<&mut Transform, With<TurretVisual>>,
) {
    for mut transform in query.iter_mut() {
        transform.translation = to_render(player.pos, &config).extend(0.5);
        transform.rotation = Quat::from_rotation_z(std::f32::consts::PI - player.angle);
    }
}

/// Mirror projectile slots: free slots are hidden, live ones follow their
/// simulation position.
pub fn sync_projectile_visuals(
    projectiles: Res<ProjectilePool>,
    config: Res<GameConfig>,
    mut query: Query<(&ProjectileVisual, &mut Transform, &mut Visibility)>,
) {
    for (slot, mut transform, mut visibility) in query.iter_mut() {
        match projectiles.0.get(slot.0) {
            Some(shot) if !shot.is_free() => {
                transform.translation = to_render(shot.pos, &config).extend(0.75);
                *visibility = Visibility::Visible;
            }
            _ => *visibility = Visibility::Hidden,
        }
    }
}

/// Mirror enemy slots: swap in the rolled silhouette, follow the position,
/// and shrink through the death animation columns.
pub fn sync_enemy_visuals(
    enemies: Res<EnemyPool>,
    config: Res<GameConfig>,
    rocks: Res<RockMeshes>,
    mut query: Query<(&EnemyVisual, &mut Mesh2d, &mut Transform, &mut Visibility)>,
) {
    for (slot, mut mesh, mut transform, mut visibility) in query.iter_mut() {
        let Some(enemy) = enemies.0.get(slot.0) else {
            *visibility = Visibility::Hidden;
            continue;
        };
        if enemy.is_free() {
            *visibility = Visibility::Hidden;
            continue;
        }

        let row = (enemy.frame_row as usize).min(rocks.0.len().saturating_sub(1));
        mesh.0 = rocks.0[row].clone();
        transform.translation = to_render(enemy.pos, &config).extend(0.25);
        let scale = match enemy.phase {
            EnemyPhase::Alive => 1.0,
            EnemyPhase::Dying => {
                1.0 - enemy.frame_col as f32 / (enemy.archetype.max_frame + 1) as f32
            }
        };
        transform.scale = Vec3::splat(scale.max(0.0));
        *visibility = Visibility::Visible;
    }
}

/// Mirror the per-enemy lives labels; visible only with the overlay on.
pub fn sync_enemy_labels(
    enemies: Res<EnemyPool>,
    overlay: Res<OverlayState>,
    config: Res<GameConfig>,
    mut query: Query<(&EnemyLivesLabel, &mut Text2d, &mut Transform, &mut Visibility)>,
) {
    for (slot, mut text, mut transform, mut visibility) in query.iter_mut() {
        let shown = overlay.debug
            && enemies
                .0
                .get(slot.0)
                .map(|enemy| !enemy.is_free())
                .unwrap_or(false);
        if !shown {
            *visibility = Visibility::Hidden;
            continue;
        }
        let enemy = enemies.0.get(slot.0).unwrap();
        *text = Text2d::new(enemy.lives.to_string());
        transform.translation = to_render(enemy.pos, &config).extend(0.9);
        *visibility = Visibility::Visible;
    }
}

// ── Update: debug overlay ─────────────────────────────────────────────────────

/// Immediate-mode diagnostic strokes: collision circles for the planet, the
/// turret and every live enemy, plus the planet→cursor aim line.
pub fn overlay_gizmo_system(
    overlay: Res<OverlayState>,
    planet: Res<Planet>,
    player: Res<Player>,
    cursor: Res<CursorPos>,
    enemies: Res<EnemyPool>,
    config: Res<GameConfig>,
    mut gizmos: Gizmos,
) {
    if !overlay.debug {
        return;
    }

    let white = Color::srgba(1.0, 1.0, 1.0, 0.8);
    gizmos.circle_2d(to_render(planet.pos, &config), planet.radius, white);
    gizmos.circle_2d(to_render(player.pos, &config), player.radius, white);
    for enemy in enemies.0.iter().filter(|e| !e.is_free()) {
        gizmos.circle_2d(to_render(enemy.pos, &config), enemy.radius(), white);
    }
    gizmos.line_2d(
        to_render(planet.pos, &config),
        to_render(cursor.0, &config),
        Color::srgba(1.0, 1.0, 1.0, 0.4),
    );
}

/// Refresh the HUD line and slave its visibility to the overlay flag.
pub fn hud_display_system(
    overlay: Res<OverlayState>,
    stats: Res<SimStats>,
    projectiles: Res<ProjectilePool>,
    enemies: Res<EnemyPool>,
    mut parent_query: Query<(&mut Visibility, &Children), With<HudTextDisplay>>,
    mut text_query: Query<&mut Text>,
) {
    for (mut visibility, children) in parent_query.iter_mut() {
        *visibility = if overlay.debug {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        if !overlay.debug {
            continue;
        }
        for child in children.iter() {
            if let Ok(mut text) = text_query.get_mut(child) {
                *text = Text::new(format!(
                    "Enemies: {}/{} | Shots: {}/{} | Fired: {} | Kills: {} | Impacts: {}",
                    enemies.0.active(),
                    enemies.0.capacity(),
                    projectiles.0.active(),
                    projectiles.0.capacity(),
                    stats.shots_fired,
                    stats.kills,
                    stats.planet_impacts + stats.player_impacts,
                ));
            }
        }
    }
}
