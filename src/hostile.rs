//! Hostile cubes: wave spawning and pursuit steering.
//!
//! Hostiles are heavy dynamic cubes that chase the player by velocity
//! matching: every fixed tick each cube computes the velocity it would need
//! to fly straight at the player at pursuit speed and applies the difference
//! to its current velocity.  Gravity, collisions and pile-ups perturb that
//! between ticks, which is what gives a wave its loose, shoving character
//! instead of a rigid formation.
//!
//! A wave spawns in a square ring around the arena centre: both horizontal
//! coordinates are magnitude-sampled from the ring bounds and sign-flipped
//! independently, so cubes arrive from all four quadrants but never closer
//! than the inner radius.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::config::GameConfig;
use crate::menu::GameState;
use crate::player::Player;
use crate::shape::{spawn_prop, BodyRole, ShapeAssets, SpawnMode};

// ── Components and resources ──────────────────────────────────────────────────

/// Marker component for hostile cubes.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hostile;

/// Group-wide movement switch, flipped by round transitions and the debug
/// toggle.  While off, cubes coast under physics alone.
#[derive(Resource, Debug, Default)]
pub struct HostilePursuit {
    pub enabled: bool,
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct HostilePlugin;

impl Plugin for HostilePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HostilePursuit>()
            .add_systems(
                FixedUpdate,
                hostile_seek
                    .in_set(crate::core::FixedSet::Simulate)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                toggle_hostile_pursuit.run_if(in_state(GameState::Playing)),
            );
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

/// One horizontal spawn coordinate: magnitude in `[min, max)`, sign flipped
/// with probability one half.
fn sample_spawn_coordinate<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    let magnitude = rng.gen_range(min..max);
    if rng.gen_bool(0.5) {
        -magnitude
    } else {
        magnitude
    }
}

/// Positions for a wave of `count` cubes at the configured spawn height.
fn wave_positions<R: Rng>(rng: &mut R, count: u32, min: f32, max: f32, height: f32) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            Vec3::new(
                sample_spawn_coordinate(rng, min, max),
                height,
                sample_spawn_coordinate(rng, min, max),
            )
        })
        .collect()
}

/// Spawn exactly `count` hostile cubes in the ring.  Called by the round
/// orchestration when a round starts.
pub fn spawn_wave(commands: &mut Commands, assets: &ShapeAssets, config: &GameConfig, count: u32) {
    let mut rng = rand::thread_rng();
    let half_edge = config.hostile_edge / 2.0;
    for position in wave_positions(
        &mut rng,
        count,
        config.hostile_spawn_min_radius,
        config.hostile_spawn_max_radius,
        config.hostile_spawn_height,
    ) {
        let entity = spawn_prop(
            commands,
            assets.hostile_mesh.clone(),
            assets.hostile_material.clone(),
            Collider::cuboid(half_edge, half_edge, half_edge),
            SpawnMode::Dynamic {
                mass: config.hostile_mass,
            },
            BodyRole::Hostile,
            position,
        );
        commands.entity(entity).insert(Hostile);
    }
    info!("Spawned {count} hostiles");
}

// ── Steering ──────────────────────────────────────────────────────────────────

/// Velocity-matching pursuit: apply `desired − current` to each cube, where
/// desired is the unit direction to the player scaled by pursuit speed.
pub fn hostile_seek(
    pursuit: Res<HostilePursuit>,
    config: Res<GameConfig>,
    q_player: Query<&Transform, With<Player>>,
    mut q_hostiles: Query<(&Transform, &mut Velocity), (With<Hostile>, Without<Player>)>,
) {
    if !pursuit.enabled {
        return;
    }
    let Ok(player_transform) = q_player.single() else {
        return;
    };
    let target = player_transform.translation;

    for (transform, mut velocity) in &mut q_hostiles {
        let direction = (target - transform.translation).normalize_or_zero();
        let desired = direction * config.hostile_pursuit_speed;
        let delta = desired - velocity.linvel;
        velocity.linvel += delta;
    }
}

/// Debug toggle: `1` flips pursuit for the whole group.
pub fn toggle_hostile_pursuit(
    keys: Res<ButtonInput<KeyCode>>,
    mut pursuit: ResMut<HostilePursuit>,
) {
    if keys.just_pressed(KeyCode::Digit1) {
        pursuit.enabled = !pursuit.enabled;
        info!(
            "Hostile pursuit {}",
            if pursuit.enabled { "enabled" } else { "disabled" }
        );
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
