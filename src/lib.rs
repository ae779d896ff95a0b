//! Perigee — a planet-defense arcade game.
//!
//! A defender planet sits at the centre of the playfield; the player turret
//! rides its rim, aims at the cursor, and fires pooled projectiles at the
//! asteroids drifting in from the screen edges. The simulation is a
//! fixed-order frame pipeline over pre-allocated entity pools; rendering,
//! input, and the frame clock are supplied by Bevy around it.

pub mod config;
pub mod constants;
pub mod enemy;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod planet;
pub mod player;
pub mod pool;
pub mod projectile;
pub mod rendering;
pub mod simulation;
