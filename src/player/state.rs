//! Player components and resources.
//!
//! All ECS components and Bevy resources that describe player state live here.
//! Systems that mutate this state are in the sibling modules:
//! - [`super::control`]: input + the velocity controller
//! - [`super`] (mod.rs): entity spawn
//!
//! The player is a single dynamic ball.  Its horizontal motion is not driven
//! by forces: [`Mobility`] keeps its own controller velocity, stepped once per
//! fixed tick and written into the body's horizontal components, leaving the
//! vertical component to gravity.

use crate::constants::{
    PLAYER_ACCELERATION, PLAYER_DECELERATION, PLAYER_MAX_HEALTH, PLAYER_MAX_SPEED,
};
use bevy::prelude::*;

// ── Components ─────────────────────────────────────────────────────────────────

/// Marker component for the player ball entity.
#[derive(Component)]
pub struct Player;

/// Health and coin counters for the player.
///
/// `health` is signed on purpose: overkill damage drives it below zero and the
/// death check is `<= 0`, not `== 0`.  `coins` counts pickups collected in the
/// current round; both are reset when a round starts.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerVitals {
    pub health: i32,
    pub coins: u32,
}

impl Default for PlayerVitals {
    fn default() -> Self {
        Self {
            health: PLAYER_MAX_HEALTH,
            coins: 0,
        }
    }
}

/// Velocity controller state for the input-driven ball.
///
/// `velocity` is the controller's own horizontal vector (`x` = world X,
/// `y` = world Z).  It persists across ticks instead of being re-read from the
/// body, so the accelerate/decelerate law is unaffected by whatever the
/// solver did to the body in between.
///
/// `acceleration` and `deceleration` are linear steps applied once per fixed
/// tick, not per second.
#[derive(Component, Debug, Clone, Copy)]
pub struct Mobility {
    pub velocity: Vec2,
    pub acceleration: f32,
    pub deceleration: f32,
    pub max_speed: f32,
    /// Cleared during round transitions and on death.  While false, input is
    /// ignored but deceleration keeps draining the controller velocity.
    pub enabled: bool,
}

impl Default for Mobility {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            acceleration: PLAYER_ACCELERATION,
            deceleration: PLAYER_DECELERATION,
            max_speed: PLAYER_MAX_SPEED,
            enabled: false,
        }
    }
}

// ── Resources ──────────────────────────────────────────────────────────────────

/// Key-state map for movement, refreshed from the keyboard every frame.
///
/// Axis mapping matches the chase camera (behind and above, looking toward
/// -Z): `forward` drives -Z, `back` +Z, `left` -X, `right` +X.
///
/// `jump` is a latch: set on key press in `Update`, consumed (and cleared) by
/// the jump system on the next fixed tick, so a tap between ticks is never
/// lost.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct MoveIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}
