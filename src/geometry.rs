//! Aim-vector and circle-overlap math shared by every entity.
//!
//! Simulation space is the canvas-style rectangle `[0, width] × [0, height]`
//! with the origin at the top-left and y growing downward, so cursor
//! coordinates need no conversion. The rendering layer is the only place that
//! maps into Bevy's centred, y-up space.

use bevy::prelude::*;

/// A positioned, radius-bearing circle — the one shape all collision in the
/// game operates on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Vec2,
    pub radius: f32,
}

impl Disc {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Result of [`aim`]: the unit direction from the reference point toward the
/// target, plus the raw (non-normalised) delta kept for facing-angle math via
/// `delta.y.atan2(delta.x)`.
#[derive(Debug, Clone, Copy)]
pub struct Aim {
    /// Unit vector pointing from `from` toward `to`.
    pub dir: Vec2,
    /// Raw delta `from - to`.
    pub delta: Vec2,
}

/// Fallback direction when an aim is requested between coincident points.
/// Keeps NaN out of the simulation; the turret parks on the planet's +x rim.
const DEGENERATE_AIM_DIR: Vec2 = Vec2::X;

/// Compute the unit aim vector from `from` toward `to`.
///
/// `delta = from - to`, `dir = -delta / |delta|`. Coincident points have no
/// defined direction; that case returns [`DEGENERATE_AIM_DIR`] with a zero
/// delta rather than dividing by zero.
pub fn aim(from: Vec2, to: Vec2) -> Aim {
    let delta = from - to;
    let dist = delta.length();
    if dist <= f32::EPSILON {
        return Aim {
            dir: DEGENERATE_AIM_DIR,
            delta: Vec2::ZERO,
        };
    }
    Aim {
        dir: -delta / dist,
        delta,
    }
}

/// Euclidean distance between two disc centres.
pub fn distance(a: Disc, b: Disc) -> f32 {
    a.center.distance(b.center)
}

/// Strict circle-circle overlap test. Tangent discs do not collide.
pub fn overlaps(a: Disc, b: Disc) -> bool {
    distance(a, b) < a.radius + b.radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aim_points_from_reference_toward_target() {
        let a = aim(Vec2::new(400.0, 300.0), Vec2::new(600.0, 300.0));
        assert!((a.dir - Vec2::X).length() < 1e-6);
        assert_eq!(a.delta, Vec2::new(-200.0, 0.0));
    }

    #[test]
    fn aim_direction_is_unit_length() {
        let a = aim(Vec2::new(10.0, 20.0), Vec2::new(-35.0, 7.5));
        assert!((a.dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn coincident_points_fall_back_instead_of_nan() {
        let p = Vec2::new(123.0, 456.0);
        let a = aim(p, p);
        assert_eq!(a.dir, Vec2::X);
        assert_eq!(a.delta, Vec2::ZERO);
        assert!(a.dir.x.is_finite() && a.dir.y.is_finite());
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = Disc::new(Vec2::new(0.0, 0.0), 30.0);
        let b = Disc::new(Vec2::new(40.0, 0.0), 20.0);
        assert!(overlaps(a, b));
        assert!(overlaps(b, a));
    }

    #[test]
    fn tangent_discs_do_not_collide() {
        // Centre distance exactly equals the radius sum.
        let a = Disc::new(Vec2::new(0.0, 0.0), 30.0);
        let b = Disc::new(Vec2::new(50.0, 0.0), 20.0);
        assert!(!overlaps(a, b));
        assert!(!overlaps(b, a));
    }

    #[test]
    fn distance_matches_hypot() {
        let a = Disc::new(Vec2::new(0.0, 0.0), 1.0);
        let b = Disc::new(Vec2::new(3.0, 4.0), 1.0);
        assert!((distance(a, b) - 5.0).abs() < 1e-6);
    }
}
