//! Game-specific error types.
//!
//! Nothing in the core loop should panic over bad data: config problems fall
//! back to defaults, stale round commands are dropped, and unknown collision
//! partners are simply ignored.  These types carry the cases we do want to
//! name and log.

// Public API surface; dead_code stays off so variants can exist before every
// caller is wired up.
#![allow(dead_code)]
use std::fmt;

/// Top-level error enum for the arena game.
#[derive(Debug)]
pub enum GameError {
    /// A config value is outside its safe operating range.  Returned by the
    /// validation helpers below; the loader logs it and keeps the default.
    UnsafeConfig {
        /// Name of the offending field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// A round index points outside the round table.  Usually a stale UI
    /// command arriving after a restart.
    RoundIndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// Number of rounds in the table.
        table_len: usize,
    },

    /// The round table itself is unusable (empty).  Nothing can start.
    EmptyRoundTable,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::UnsafeConfig {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "config field '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            GameError::RoundIndexOutOfRange { index, table_len } => write!(
                f,
                "round index {} out of range for a {}-round table",
                index, table_len
            ),
            GameError::EmptyRoundTable => {
                write!(f, "round table is empty; no round can be started")
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive.
///
/// Covers the speeds, radii, masses and timer durations; none of them make
/// sense at zero or below, and several would divide by zero downstream.
pub fn validate_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::UnsafeConfig {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless gravity points downward.
///
/// An upward or zero gravity leaves the ball floating and the grounded ray
/// never passing, which soft-locks jumping.
pub fn validate_gravity_y(value: f32) -> GameResult<()> {
    if value < 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::UnsafeConfig {
            name: "gravity_y",
            value,
            safe_range: "(-∞, 0.0)",
        })
    }
}

/// Returns an error if the spawn-ring bounds are inverted or touch.
///
/// `min < max` keeps `gen_range(min..max)` panic-free.
pub fn validate_spawn_ring(min: f32, max: f32) -> GameResult<()> {
    if min > 0.0 && min < max {
        Ok(())
    } else {
        Err(GameError::UnsafeConfig {
            name: "hostile_spawn_min_radius",
            value: min,
            safe_range: "(0.0, hostile_spawn_max_radius)",
        })
    }
}

/// Bounds-checks a round index against a table length.
pub fn validate_round_index(index: usize, table_len: usize) -> GameResult<usize> {
    if table_len == 0 {
        Err(GameError::EmptyRoundTable)
    } else if index < table_len {
        Ok(index)
    } else {
        Err(GameError::RoundIndexOutOfRange { index, table_len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_accepts_normal_values() {
        assert!(validate_positive("max_speed", 18.0).is_ok());
    }

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(validate_positive("max_speed", 0.0).is_err());
        assert!(validate_positive("max_speed", f32::NAN).is_err());
    }

    #[test]
    fn gravity_must_point_down() {
        assert!(validate_gravity_y(-30.0).is_ok());
        assert!(validate_gravity_y(0.0).is_err());
        assert!(validate_gravity_y(9.81).is_err());
    }

    #[test]
    fn spawn_ring_must_be_ordered() {
        assert!(validate_spawn_ring(50.0, 100.0).is_ok());
        assert!(validate_spawn_ring(100.0, 50.0).is_err());
        assert!(validate_spawn_ring(50.0, 50.0).is_err());
    }

    #[test]
    fn round_index_bounds() {
        assert_eq!(validate_round_index(0, 4).ok(), Some(0));
        assert_eq!(validate_round_index(3, 4).ok(), Some(3));
        assert!(validate_round_index(4, 4).is_err());
        assert!(matches!(
            validate_round_index(0, 0),
            Err(GameError::EmptyRoundTable)
        ));
    }

    #[test]
    fn display_messages_name_the_field() {
        let err = GameError::UnsafeConfig {
            name: "pursuit_speed",
            value: -1.0,
            safe_range: "(0.0, ∞)",
        };
        let text = format!("{err}");
        assert!(text.contains("pursuit_speed"), "got: {text}");
        assert!(text.contains("-1"), "got: {text}");
    }
}
