//! Shape instances: paired visual + physics entities and their lifecycle.
//!
//! Every simulated object in the arena (ground slab, scenery crates, hostile
//! cubes, coins, the player ball) is ONE entity carrying both representations
//! at once: a render half (`Mesh3d` + `MeshMaterial3d`) and a physics half
//! (`RigidBody` + `Collider`).  Spawning through [`spawn_prop`]
//! (or adopting an externally built body via [`adopt_instance`]) is the only
//! way an object enters the world, so the two halves can never drift apart.
//!
//! Pose synchronisation is owned by the Rapier plugin's schedule sets:
//! `SyncBackend` pushes `Transform` → body for fixed/kinematic bodies and
//! `Writeback` pushes body → `Transform` for dynamic ones, each exactly once
//! per fixed tick.  Game systems are ordered around those sets (see
//! [`crate::core`]) and never touch a simulated `Transform` mid-step.
//!
//! Removal is deferred.  Systems request it through [`RemovalQueue`]; the
//! actual despawn happens in [`flush_removals`], which runs after `Writeback`,
//! strictly between physics steps.  An instance queued during a step still
//! simulates and synchronises normally on that step.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use std::collections::HashSet;

use crate::config::GameConfig;

// ── Collision categories ──────────────────────────────────────────────────────

/// What a body *is*, as far as collision routing is concerned.
///
/// This replaces raw collision-group bits everywhere outside this module:
/// the router resolves game effects by looking this component up on the other
/// entity of a contact pair, never by inspecting group masks.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyRole {
    Player,
    Pickup,
    Ground,
    Hostile,
    StaticProp,
}

impl BodyRole {
    /// The Rapier group this role belongs to.
    fn membership(self) -> Group {
        match self {
            BodyRole::Player => Group::GROUP_1,
            BodyRole::Pickup => Group::GROUP_2,
            BodyRole::Ground => Group::GROUP_3,
            BodyRole::StaticProp => Group::GROUP_4,
            BodyRole::Hostile => Group::GROUP_5,
        }
    }

    /// Membership + filter pair for this role.
    ///
    /// Everything collides with everything, with one exception: coins are
    /// sensors that only ever need to notice the player, so filtering them
    /// down keeps hostile-vs-coin and ground-vs-coin noise out of the event
    /// stream.
    pub fn collision_groups(self) -> CollisionGroups {
        let filter = match self {
            BodyRole::Pickup => Group::GROUP_1,
            _ => Group::ALL,
        };
        CollisionGroups::new(self.membership(), filter)
    }
}

// ── Instances ─────────────────────────────────────────────────────────────────

/// Marker for every entity managed by this module's lifecycle.
///
/// [`flush_removals`] refuses to despawn anything that does not carry this,
/// which makes a removal request for a foreign or already-gone entity a
/// silent no-op.
#[derive(Component, Debug, Clone, Copy)]
pub struct ShapeInstance;

/// How the physics half of a new instance behaves.
#[derive(Debug, Clone, Copy)]
pub enum SpawnMode {
    /// Fully simulated body with an explicit mass.
    Dynamic { mass: f32 },
    /// Immovable scenery; its pose is authored via `Transform`.
    Fixed,
    /// Kinematic trigger volume: produces contact events, never forces.
    Sensor,
}

/// Shared mesh and material handles for every primitive the game spawns.
///
/// Built once at startup; instances clone handles instead of allocating
/// geometry per spawn, so despawning an instance releases everything it held.
#[derive(Resource)]
pub struct ShapeAssets {
    pub player_mesh: Handle<Mesh>,
    pub player_material: Handle<StandardMaterial>,
    pub hostile_mesh: Handle<Mesh>,
    pub hostile_material: Handle<StandardMaterial>,
    pub pickup_mesh: Handle<Mesh>,
    pub pickup_material: Handle<StandardMaterial>,
    pub ground_mesh: Handle<Mesh>,
    pub ground_material: Handle<StandardMaterial>,
    pub prop_mesh: Handle<Mesh>,
    pub prop_material: Handle<StandardMaterial>,
}

/// Startup system: build the shared primitive geometry from the loaded config.
pub fn setup_shape_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<GameConfig>,
) {
    use crate::constants::{GROUND_DEPTH, GROUND_THICKNESS, GROUND_WIDTH, PROP_EDGE};

    let assets = ShapeAssets {
        player_mesh: meshes.add(Sphere::new(config.player_radius)),
        player_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.85, 0.45, 0.15),
            perceptual_roughness: 0.6,
            ..default()
        }),
        hostile_mesh: meshes.add(Cuboid::new(
            config.hostile_edge,
            config.hostile_edge,
            config.hostile_edge,
        )),
        hostile_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.75, 0.18, 0.22),
            perceptual_roughness: 0.8,
            ..default()
        }),
        pickup_mesh: meshes.add(Cylinder::new(
            config.pickup_radius,
            config.pickup_half_height * 2.0,
        )),
        pickup_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.95, 0.80, 0.20),
            metallic: 0.8,
            perceptual_roughness: 0.3,
            ..default()
        }),
        ground_mesh: meshes.add(Cuboid::new(GROUND_WIDTH, GROUND_THICKNESS, GROUND_DEPTH)),
        ground_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.33, 0.37, 0.33),
            perceptual_roughness: 0.95,
            ..default()
        }),
        prop_mesh: meshes.add(Cuboid::new(PROP_EDGE, PROP_EDGE, PROP_EDGE)),
        prop_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.50, 0.38, 0.24),
            perceptual_roughness: 0.9,
            ..default()
        }),
    };
    commands.insert_resource(assets);
}

/// Spawns one paired visual + physics instance and returns its entity.
///
/// The caller picks geometry, collider, role and mode; role-specific extras
/// (friction, damping, event flags) are inserted by the call site on the
/// returned entity, mirroring how each game module owns its own tuning.
pub fn spawn_prop(
    commands: &mut Commands,
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
    collider: Collider,
    mode: SpawnMode,
    role: BodyRole,
    position: Vec3,
) -> Entity {
    let entity = commands
        .spawn((
            ShapeInstance,
            role,
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_translation(position),
            Visibility::default(),
            collider,
            role.collision_groups(),
        ))
        .id();

    match mode {
        SpawnMode::Dynamic { mass } => {
            commands.entity(entity).insert((
                RigidBody::Dynamic,
                ColliderMassProperties::Mass(mass),
                Velocity::zero(),
            ));
        }
        SpawnMode::Fixed => {
            commands.entity(entity).insert(RigidBody::Fixed);
        }
        SpawnMode::Sensor => {
            commands.entity(entity).insert((
                RigidBody::KinematicVelocityBased,
                Velocity::zero(),
                Sensor,
                ActiveCollisionTypes::DYNAMIC_KINEMATIC,
            ));
        }
    }

    entity
}

/// Adopts an externally assembled body into the tracked set.
///
/// Used for the player, whose entity is put together by its own module with
/// controller state the generic factory knows nothing about.
pub fn adopt_instance(commands: &mut Commands, entity: Entity, role: BodyRole) {
    commands
        .entity(entity)
        .insert((ShapeInstance, role, role.collision_groups()));
}

// ── Deferred removal ──────────────────────────────────────────────────────────

/// Entities awaiting despawn at the next between-steps flush.
///
/// Backed by a set, so repeated requests for the same entity collapse into
/// one and arrive in no particular order.
#[derive(Resource, Debug, Default)]
pub struct RemovalQueue {
    pending: HashSet<Entity>,
}

impl RemovalQueue {
    /// Marks an entity for removal.  Safe to call any number of times, with
    /// any entity; unknown ones are dropped at flush time.
    pub fn request(&mut self, entity: Entity) {
        self.pending.insert(entity);
    }

    /// True if the entity is already scheduled to go.  The collision router
    /// uses this to avoid double-crediting a coin that is still visible but
    /// already collected.
    pub fn contains(&self, entity: Entity) -> bool {
        self.pending.contains(&entity)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    fn drain(&mut self) -> impl Iterator<Item = Entity> + '_ {
        self.pending.drain()
    }
}

/// Despawns every queued instance.  Runs in [`crate::core::FixedSet::Cleanup`],
/// after the physics step has written back poses, so the world's structure
/// never changes mid-step.
pub fn flush_removals(
    mut commands: Commands,
    mut queue: ResMut<RemovalQueue>,
    q_instances: Query<(), With<ShapeInstance>>,
) {
    if queue.is_empty() {
        return;
    }
    for entity in queue.drain() {
        // Anything not (or no longer) a live instance is silently skipped.
        if q_instances.contains(entity) {
            commands.entity(entity).despawn();
        }
    }
}
