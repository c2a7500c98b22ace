//! Player module: ball entity, input handling, and the velocity controller.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | ECS components (`Player`, `PlayerVitals`, `Mobility`) and the [`state::MoveIntent`] input resource |
//! | [`control`] | Input systems: WASD key map, the per-tick velocity controller, the grounded jump probe |
//!
//! All public items are re-exported at this level so the rest of the crate can
//! use flat `crate::player::*` imports without knowing the sub-module layout.

pub mod control;
pub mod state;

// ── Flat re-exports ───────────────────────────────────────────────────────────

pub use control::{apply_move_intent, keyboard_to_intent_system, player_jump_system};
pub use state::{Mobility, MoveIntent, Player, PlayerVitals};

// ── Ball spawn ────────────────────────────────────────────────────────────────

use crate::config::GameConfig;
use crate::constants::PLAYER_START;
use crate::shape::{adopt_instance, BodyRole, ShapeAssets};
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Spawn the player ball at its start position.
///
/// The ball is assembled here rather than through the generic prop factory
/// because it carries controller state the factory knows nothing about; the
/// assembled entity is then adopted into the tracked instance set, which
/// attaches the player collision category.
///
/// `ActiveEvents::COLLISION_EVENTS` sits on this body only: every contact the
/// game reacts to involves the player, so the player is the one collision
/// listener.
pub fn spawn_player(mut commands: Commands, assets: Res<ShapeAssets>, config: Res<GameConfig>) {
    let entity = commands
        .spawn((
            Player,
            PlayerVitals {
                health: config.player_max_health,
                coins: 0,
            },
            Mobility {
                velocity: Vec2::ZERO,
                acceleration: config.player_acceleration,
                deceleration: config.player_deceleration,
                max_speed: config.player_max_speed,
                // Movement stays off until the first round's grace period ends.
                enabled: false,
            },
            // Physics
            RigidBody::Dynamic,
            Collider::ball(config.player_radius),
            ColliderMassProperties::Mass(config.player_mass),
            Velocity::zero(),
            Damping {
                linear_damping: 0.0,
                angular_damping: config.player_angular_damping,
            },
            Restitution::coefficient(config.player_restitution),
            Friction::coefficient(config.player_friction),
            ActiveEvents::COLLISION_EVENTS,
            // Transform / visibility
            Transform::from_translation(PLAYER_START),
            Visibility::default(),
            Mesh3d(assets.player_mesh.clone()),
            MeshMaterial3d(assets.player_material.clone()),
        ))
        .id();
    adopt_instance(&mut commands, entity, BodyRole::Player);

    eprintln!("[SETUP] Player ball spawned at start position");
}
