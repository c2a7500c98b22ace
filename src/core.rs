//! Fixed-step scheduling, physics pacing, and startup configuration.
//!
//! Gameplay runs entirely in `FixedUpdate`, bracketing the Rapier step:
//! [`FixedSet::Simulate`] feeds the upcoming step (velocity writes, steering,
//! spin), [`FixedSet::Resolve`] consumes its outcome (collision routing,
//! round rules), and [`FixedSet::Cleanup`] applies structural changes
//! (deferred despawns) strictly between steps.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{PhysicsSet, RapierConfiguration, TimestepMode};

use crate::config::{load_game_config, GameConfig};
use crate::constants::{PHYSICS_DT, PHYSICS_SUBSTEPS};
use crate::shape::{setup_shape_assets, RemovalQueue};

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub enum FixedSet {
    /// Before the physics step: anything that writes velocities or intents.
    Simulate,
    /// After the step has written poses back: contact routing, round rules.
    Resolve,
    /// Last: despawn queued instances and spawn replacements between steps.
    Cleanup,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<RemovalQueue>()
            .insert_resource(ClearColor(Color::srgb(0.10, 0.12, 0.18)))
            .insert_resource(Time::<Fixed>::from_seconds(PHYSICS_DT as f64))
            .insert_resource(TimestepMode::Fixed {
                dt: PHYSICS_DT,
                substeps: PHYSICS_SUBSTEPS,
            })
            .configure_sets(
                FixedUpdate,
                (FixedSet::Simulate, FixedSet::Resolve, FixedSet::Cleanup).chain(),
            )
            .configure_sets(
                FixedUpdate,
                FixedSet::Simulate.before(PhysicsSet::SyncBackend),
            )
            .configure_sets(FixedUpdate, FixedSet::Resolve.after(PhysicsSet::Writeback))
            .add_systems(
                Startup,
                (load_game_config, setup_shape_assets, configure_rapier_gravity).chain(),
            )
            .add_systems(
                FixedUpdate,
                crate::shape::flush_removals.in_set(FixedSet::Cleanup),
            );
    }
}

fn configure_rapier_gravity(
    config: Res<GameConfig>,
    mut q_config: Query<&mut RapierConfiguration>,
) {
    for mut cfg in &mut q_config {
        cfg.gravity = Vec3::new(0.0, config.gravity_y, 0.0);
    }
}
