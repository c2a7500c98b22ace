//! Arena bootstrap: ground slab, scenery crates, and lighting.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::config::GameConfig;
use crate::constants::{GROUND_DEPTH, GROUND_THICKNESS, GROUND_WIDTH, GROUND_Y, PROP_EDGE};
use crate::shape::{setup_shape_assets, spawn_prop, BodyRole, ShapeAssets, SpawnMode};

/// Fixed crate placements, kept well clear of the player start and the
/// hostile spawn ring's inner edge.
const PROP_POSITIONS: [Vec3; 4] = [
    Vec3::new(30.0, PROP_EDGE / 2.0, -20.0),
    Vec3::new(-40.0, PROP_EDGE / 2.0, 25.0),
    Vec3::new(18.0, PROP_EDGE / 2.0, 38.0),
    Vec3::new(-22.0, PROP_EDGE / 2.0, -42.0),
];

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (setup_arena, setup_lighting).after(setup_shape_assets),
        );
    }
}

/// Spawns the ground slab and the static crates.
///
/// The slab is a real box rather than a half-space so the arena has edges;
/// its top face sits at y = 0 and everything above it falls onto it.
fn setup_arena(mut commands: Commands, assets: Res<ShapeAssets>, config: Res<GameConfig>) {
    let ground = spawn_prop(
        &mut commands,
        assets.ground_mesh.clone(),
        assets.ground_material.clone(),
        Collider::cuboid(
            GROUND_WIDTH / 2.0,
            GROUND_THICKNESS / 2.0,
            GROUND_DEPTH / 2.0,
        ),
        SpawnMode::Fixed,
        BodyRole::Ground,
        Vec3::new(0.0, GROUND_Y, 0.0),
    );
    commands.entity(ground).insert((
        Friction::coefficient(config.ground_friction),
        Restitution::coefficient(config.ground_restitution),
    ));

    for position in PROP_POSITIONS {
        spawn_prop(
            &mut commands,
            assets.prop_mesh.clone(),
            assets.prop_material.clone(),
            Collider::cuboid(PROP_EDGE / 2.0, PROP_EDGE / 2.0, PROP_EDGE / 2.0),
            SpawnMode::Fixed,
            BodyRole::StaticProp,
            position,
        );
    }

    eprintln!("[SETUP] Arena ground and props spawned");
}

fn setup_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.4, 0.0)),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });
    eprintln!("[SETUP] Lighting spawned");
}
