//! Coins: sensor pickups scattered around the arena centre.
//!
//! A coin is a kinematic sensor cylinder stood on edge.  It never exerts
//! forces; it exists to produce a contact event against the player, after
//! which the collision router queues it for removal and credits the coin.
//! The spin is purely cosmetic, reasserted every tick so nothing the solver
//! does can slow it down.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;
use std::f32::consts::FRAC_PI_2;

use crate::config::GameConfig;
use crate::menu::GameState;
use crate::shape::{spawn_prop, BodyRole, ShapeAssets, SpawnMode};

/// Marker component for coins.
#[derive(Component, Debug, Clone, Copy)]
pub struct Pickup;

pub struct PickupPlugin;

impl Plugin for PickupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            pickup_spin
                .in_set(crate::core::FixedSet::Simulate)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

/// One scatter position: both horizontal coordinates uniform in
/// `[-spread, spread)`, fixed height.
fn scatter_position<R: Rng>(rng: &mut R, spread: f32, height: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-spread..spread),
        height,
        rng.gen_range(-spread..spread),
    )
}

/// Spawn `count` coins at random positions.  Called by the round
/// orchestration when a round starts.
pub fn spawn_pickups(
    commands: &mut Commands,
    assets: &ShapeAssets,
    config: &GameConfig,
    count: u32,
) {
    let mut rng = rand::thread_rng();
    for _ in 0..count {
        let position = scatter_position(&mut rng, config.pickup_spread, config.pickup_height);
        let entity = spawn_prop(
            commands,
            assets.pickup_mesh.clone(),
            assets.pickup_material.clone(),
            Collider::cylinder(config.pickup_half_height, config.pickup_radius),
            SpawnMode::Sensor,
            BodyRole::Pickup,
            position,
        );
        // Stand the cylinder on edge like a coin; the spin system then turns
        // it about the world Y axis.
        commands.entity(entity).insert((
            Pickup,
            Transform {
                translation: position,
                rotation: Quat::from_rotation_z(FRAC_PI_2),
                ..default()
            },
        ));
    }
    info!("Spawned {count} pickups");
}

/// Reassert the cosmetic spin on every coin, every tick.
pub fn pickup_spin(config: Res<GameConfig>, mut q: Query<&mut Velocity, With<Pickup>>) {
    for mut velocity in &mut q {
        velocity.angvel = Vec3::new(0.0, config.pickup_spin_rate, 0.0);
    }
}
