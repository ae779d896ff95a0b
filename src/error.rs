//! Game-specific error types.
//!
//! The simulation itself degrades silently by design (pool exhaustion,
//! off-screen reclamation and collisions are normal control flow), so these
//! types exist for the configuration boundary: rejecting out-of-range values
//! loaded from `assets/config.toml` without aborting the game.

use std::fmt;

/// Top-level error enum for the perigee game.
#[derive(Debug)]
pub enum GameError {
    /// A tunable is outside its safe operating range.
    /// Returned by the validation helpers below; config loading reports it
    /// and falls back to compiled defaults.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// A pool capacity is outside its safe operating range.
    UnsafeCapacity {
        /// Name of the pool (for logging).
        name: &'static str,
        /// The capacity that was rejected.
        value: usize,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            GameError::UnsafeCapacity { name, value } => write!(
                f,
                "pool '{}' capacity {} is outside safe range [1, 1024]",
                name, value
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if a length-like tunable (radius, dimension, speed) is
/// not strictly positive and finite.
pub fn validate_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error if a timer interval is outside its validated range.
///
/// Intervals below 0.01 s fire on nearly every frame and starve the pools;
/// there is no meaningful upper bound worth enforcing.
pub fn validate_interval(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value >= 0.01 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.01, ∞)",
        })
    }
}

/// Returns an error if a pool capacity is zero or absurdly large.
pub fn validate_capacity(name: &'static str, value: usize) -> GameResult<()> {
    if (1..=1024).contains(&value) {
        Ok(())
    } else {
        Err(GameError::UnsafeCapacity { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(validate_positive("r", 1.0).is_ok());
        assert!(validate_positive("r", 0.0).is_err());
        assert!(validate_positive("r", f32::NAN).is_err());
    }

    #[test]
    fn capacity_bounds() {
        assert!(validate_capacity("pool", 1).is_ok());
        assert!(validate_capacity("pool", 1024).is_ok());
        assert!(validate_capacity("pool", 0).is_err());
        assert!(validate_capacity("pool", 4096).is_err());
    }
}
