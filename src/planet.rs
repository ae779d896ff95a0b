//! The defended planet: a static collision anchor at the world centre.

use crate::config::GameConfig;
use crate::geometry::Disc;
use bevy::prelude::*;

/// Fixed position and radius for the whole session. Everything aims at,
/// orbits, or crashes into this.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Planet {
    pub pos: Vec2,
    pub radius: f32,
}

impl Planet {
    /// Centre the planet in the configured playfield.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.world_width / 2.0, config.world_height / 2.0),
            radius: config.planet_radius,
        }
    }

    pub fn disc(&self) -> Disc {
        Disc::new(self.pos, self.radius)
    }
}

impl Default for Planet {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planet_sits_at_world_centre() {
        let planet = Planet::default();
        assert_eq!(planet.pos, Vec2::new(400.0, 300.0));
        assert_eq!(planet.radius, 80.0);
    }
}
