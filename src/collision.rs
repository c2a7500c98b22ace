//! Contact routing: turning physics collision events into game effects.
//!
//! The player body is the only collision listener in the game
//! (`ActiveEvents::COLLISION_EVENTS` sits on it alone), so every event seen
//! here involves the player.  The other entity's [`BodyRole`] decides the
//! effect: hostiles deal fixed contact damage, coins credit the collector and
//! queue themselves for removal.  Everything else (ground, props) is contact
//! noise and is ignored.
//!
//! Effects only mutate counters and the removal queue; despawns happen later
//! in the cleanup flush, never while the physics world is mid-step.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::config::GameConfig;
use crate::core::FixedSet;
use crate::menu::GameState;
use crate::player::{Player, PlayerVitals};
use crate::shape::{BodyRole, RemovalQueue};

pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            route_player_collisions
                .in_set(FixedSet::Resolve)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// Map each started contact against the player to its game effect.
pub fn route_player_collisions(
    mut collisions: MessageReader<CollisionEvent>,
    mut queue: ResMut<RemovalQueue>,
    config: Res<GameConfig>,
    mut q_player: Query<(Entity, &mut PlayerVitals), With<Player>>,
    q_roles: Query<&BodyRole>,
) {
    let Ok((player, mut vitals)) = q_player.single_mut() else {
        return;
    };

    for event in collisions.read() {
        let CollisionEvent::Started(e1, e2, _) = event else {
            continue;
        };

        // Orient the pair: we only care which entity is the *other* one.
        let other = if *e1 == player {
            *e2
        } else if *e2 == player {
            *e1
        } else {
            continue;
        };

        match q_roles.get(other) {
            Ok(BodyRole::Hostile) => {
                vitals.health -= config.hostile_contact_damage;
            }
            Ok(BodyRole::Pickup) => {
                // The queue doubles as the already-collected set: a coin that
                // produces two contact events before the flush credits once.
                if !queue.contains(other) {
                    vitals.coins += 1;
                    queue.request(other);
                }
            }
            _ => {}
        }
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
