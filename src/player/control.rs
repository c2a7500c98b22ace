//! Player input and movement systems.
//!
//! ## Pipeline
//!
//! 1. [`keyboard_to_intent_system`] (`Update`): refreshes the [`MoveIntent`]
//!    key map from the keyboard and latches jump presses.
//! 2. [`apply_move_intent`] (`FixedUpdate`, before the physics step): steps
//!    the [`Mobility`] controller once and writes the result into the body's
//!    horizontal velocity.
//! 3. [`player_jump_system`] (`FixedUpdate`, before the physics step):
//!    consumes the jump latch; applies the impulse only when a downward ray
//!    probe reports ground within reach.
//!
//! The input abstraction layer (`MoveIntent`) makes the movement law fully
//! testable: tests populate the resource directly and run only the fixed-tick
//! systems.

use super::state::{Mobility, MoveIntent, Player, PlayerVitals};
use crate::config::GameConfig;
use crate::constants::GROUNDED_RAY_EPSILON;
use crate::shape::BodyRole;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

// ── Step 1: Keyboard → Intent ─────────────────────────────────────────────────

/// Refresh the key-state map.  Direction keys are level-read so a key held
/// across several fixed ticks keeps driving; jump is edge-read and latched so
/// a tap between fixed ticks still fires exactly once.
pub fn keyboard_to_intent_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut intent: ResMut<MoveIntent>,
) {
    intent.forward = keys.pressed(KeyCode::KeyW);
    intent.back = keys.pressed(KeyCode::KeyS);
    intent.left = keys.pressed(KeyCode::KeyA);
    intent.right = keys.pressed(KeyCode::KeyD);
    if keys.just_pressed(KeyCode::Space) {
        intent.jump = true;
    }
}

// ── Step 2: Controller tick ───────────────────────────────────────────────────

/// One controller step: acceleration for held keys, deceleration for released
/// ones, then the overall speed cap.
///
/// Axis components accelerate toward the signed bound and clamp there;
/// releasing a key drains that axis linearly toward zero without crossing it.
/// The cap runs after both passes so a diagonal push rescales to exactly
/// `max_speed` instead of √2 times it.
fn step_horizontal_velocity(
    mut v: Vec2,
    keys: &MoveIntent,
    acceleration: f32,
    deceleration: f32,
    max_speed: f32,
) -> Vec2 {
    // Acceleration pass (v.y is world Z).
    if keys.forward {
        v.y = (v.y - acceleration).max(-max_speed);
    }
    if keys.back {
        v.y = (v.y + acceleration).min(max_speed);
    }
    if keys.left {
        v.x = (v.x - acceleration).max(-max_speed);
    }
    if keys.right {
        v.x = (v.x + acceleration).min(max_speed);
    }

    // Deceleration pass: each signed direction drains unless its key holds it.
    if !keys.forward && v.y < 0.0 {
        v.y = (v.y + deceleration).min(0.0);
    }
    if !keys.back && v.y > 0.0 {
        v.y = (v.y - deceleration).max(0.0);
    }
    if !keys.left && v.x < 0.0 {
        v.x = (v.x + deceleration).min(0.0);
    }
    if !keys.right && v.x > 0.0 {
        v.x = (v.x - deceleration).max(0.0);
    }

    // Cap after both passes; preserves direction, lands on exactly max_speed.
    if v.length() > max_speed {
        v = v.normalize() * max_speed;
    }
    v
}

/// Advance the player's velocity controller by one fixed tick and write the
/// horizontal result into the body, leaving the vertical component to gravity.
///
/// A dead player (health ≤ 0) pins the horizontal components to zero every
/// tick; the body still falls.  A disabled controller ignores input but keeps
/// decelerating, so the ball glides to a stop during round transitions rather
/// than halting mid-roll.
pub fn apply_move_intent(
    intent: Res<MoveIntent>,
    mut q: Query<(&PlayerVitals, &mut Mobility, &mut Velocity), With<Player>>,
) {
    let Ok((vitals, mut mobility, mut velocity)) = q.single_mut() else {
        return;
    };

    if vitals.health <= 0 {
        mobility.enabled = false;
        mobility.velocity = Vec2::ZERO;
        velocity.linvel.x = 0.0;
        velocity.linvel.z = 0.0;
        return;
    }

    let released = MoveIntent::default();
    let keys = if mobility.enabled { &*intent } else { &released };

    let next = step_horizontal_velocity(
        mobility.velocity,
        keys,
        mobility.acceleration,
        mobility.deceleration,
        mobility.max_speed,
    );
    mobility.velocity = next;
    velocity.linvel.x = next.x;
    velocity.linvel.z = next.y;
}

// ── Step 3: Jump ──────────────────────────────────────────────────────────────

/// Consume the jump latch and, if the player is grounded, kick the body's
/// vertical velocity.
///
/// Grounded means: a downward ray from the body center, of length
/// `radius + GROUNDED_RAY_EPSILON`, hits a ground-category collider.  The
/// probe runs against the physics world every time; nothing is cached, so
/// walking off a ledge can never leave a stale "grounded" answer behind.
pub fn player_jump_system(
    mut intent: ResMut<MoveIntent>,
    rapier: ReadRapierContext,
    config: Res<GameConfig>,
    mut q: Query<(Entity, &Transform, &mut Velocity), With<Player>>,
) {
    if !intent.jump {
        return;
    }
    intent.jump = false;

    let Ok((entity, transform, mut velocity)) = q.single_mut() else {
        return;
    };
    let Ok(context) = rapier.single() else {
        return;
    };

    let ground_only = QueryFilter::default()
        .exclude_collider(entity)
        .groups(CollisionGroups::new(
            Group::ALL,
            BodyRole::Ground.collision_groups().memberships,
        ));
    let ray_len = config.player_radius + GROUNDED_RAY_EPSILON;
    let grounded = context
        .cast_ray(transform.translation, Vec3::NEG_Y, ray_len, true, ground_only)
        .is_some();

    if grounded {
        velocity.linvel.y += config.player_jump_impulse / config.player_mass;
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PLAYER_ACCELERATION, PLAYER_MAX_SPEED};

    // ── helpers ───────────────────────────────────────────────────────────────

    /// Minimal app for the controller: no window, no renderer, no physics.
    fn build_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<MoveIntent>();
        app.add_systems(Update, apply_move_intent);
        app
    }

    /// Spawn a player carrying the components the controller queries.
    fn spawn_test_player(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((
                Player,
                PlayerVitals::default(),
                Mobility {
                    enabled: true,
                    ..Default::default()
                },
                Transform::default(),
                Velocity::zero(),
            ))
            .id()
    }

    fn set_keys(app: &mut App, f: impl FnOnce(&mut MoveIntent)) {
        f(&mut app.world_mut().resource_mut::<MoveIntent>());
    }

    fn controller_velocity(app: &App, entity: Entity) -> Vec2 {
        app.world().get::<Mobility>(entity).unwrap().velocity
    }

    // ── controller law ────────────────────────────────────────────────────────

    #[test]
    fn speed_cap_holds_under_diagonal_input() {
        let mut app = build_test_app();
        let player = spawn_test_player(&mut app);

        set_keys(&mut app, |keys| {
            keys.forward = true;
            keys.right = true;
        });
        for _ in 0..60 {
            app.update();
            let speed = controller_velocity(&app, player).length();
            assert!(
                speed <= PLAYER_MAX_SPEED + 1e-3,
                "speed {speed} exceeded the cap"
            );
        }

        // At steady state the diagonal is rescaled to exactly the cap.
        let speed = controller_velocity(&app, player).length();
        assert!(
            (speed - PLAYER_MAX_SPEED).abs() < 1e-3,
            "expected steady diagonal speed == {PLAYER_MAX_SPEED}, got {speed}"
        );
    }

    #[test]
    fn acceleration_clamps_each_axis_at_max_speed() {
        let mut app = build_test_app();
        let player = spawn_test_player(&mut app);

        set_keys(&mut app, |keys| keys.right = true);
        for _ in 0..30 {
            app.update();
        }

        let v = controller_velocity(&app, player);
        assert!(
            (v.x - PLAYER_MAX_SPEED).abs() < 1e-5,
            "expected +X axis pinned at {PLAYER_MAX_SPEED}, got {}",
            v.x
        );
        assert_eq!(v.y, 0.0, "unused axis must stay at rest");
    }

    #[test]
    fn released_keys_decelerate_to_exactly_zero_in_expected_ticks() {
        let mut app = build_test_app();
        let player = spawn_test_player(&mut app);

        // 0.5 is exactly representable, so the tick count is exact: 5.0 / 0.5 = 10.
        {
            let mut mobility = app.world_mut().get_mut::<Mobility>(player).unwrap();
            mobility.velocity = Vec2::new(5.0, 0.0);
            mobility.deceleration = 0.5;
        }

        for _ in 0..9 {
            app.update();
        }
        let v = controller_velocity(&app, player);
        assert!(v.x > 0.0, "velocity must still be draining after 9 ticks");

        app.update();
        let v = controller_velocity(&app, player);
        assert_eq!(v.x, 0.0, "velocity must be exactly zero on tick 10");
    }

    #[test]
    fn deceleration_never_overshoots_sign() {
        let mut app = build_test_app();
        let player = spawn_test_player(&mut app);

        {
            let mut mobility = app.world_mut().get_mut::<Mobility>(player).unwrap();
            mobility.velocity = Vec2::new(-1.3, 0.0);
            mobility.deceleration = 0.5;
        }

        for _ in 0..10 {
            app.update();
            let v = controller_velocity(&app, player);
            assert!(
                v.x <= 0.0,
                "draining a negative axis must never flip it positive, got {}",
                v.x
            );
        }
        assert_eq!(controller_velocity(&app, player).x, 0.0);
    }

    #[test]
    fn disabled_controller_ignores_input_but_still_decelerates() {
        let mut app = build_test_app();
        let player = spawn_test_player(&mut app);

        {
            let mut mobility = app.world_mut().get_mut::<Mobility>(player).unwrap();
            mobility.enabled = false;
            mobility.velocity = Vec2::new(6.0, 0.0);
            mobility.deceleration = 0.5;
        }
        set_keys(&mut app, |keys| keys.right = true);
        app.update();

        let v = controller_velocity(&app, player);
        assert!(
            (v.x - 5.5).abs() < 1e-5,
            "expected one deceleration step (6.0 → 5.5), got {}",
            v.x
        );
    }

    #[test]
    fn vertical_velocity_is_preserved() {
        let mut app = build_test_app();
        let player = spawn_test_player(&mut app);

        app.world_mut().get_mut::<Velocity>(player).unwrap().linvel = Vec3::new(0.0, -7.25, 0.0);
        set_keys(&mut app, |keys| keys.forward = true);
        app.update();

        let linvel = app.world().get::<Velocity>(player).unwrap().linvel;
        assert_eq!(linvel.y, -7.25, "controller must never touch vertical velocity");
        assert!(
            (linvel.z + PLAYER_ACCELERATION).abs() < 1e-5,
            "forward key must drive -Z, got {}",
            linvel.z
        );
    }

    #[test]
    fn dead_player_freezes_horizontal_motion_only() {
        let mut app = build_test_app();
        let player = spawn_test_player(&mut app);

        {
            let mut vitals = app.world_mut().get_mut::<PlayerVitals>(player).unwrap();
            vitals.health = -5;
        }
        {
            let mut mobility = app.world_mut().get_mut::<Mobility>(player).unwrap();
            mobility.velocity = Vec2::new(5.0, 4.0);
        }
        app.world_mut().get_mut::<Velocity>(player).unwrap().linvel = Vec3::new(5.0, -3.0, 4.0);
        set_keys(&mut app, |keys| keys.forward = true);
        app.update();

        let linvel = app.world().get::<Velocity>(player).unwrap().linvel;
        assert_eq!(linvel.x, 0.0);
        assert_eq!(linvel.z, 0.0);
        assert_eq!(linvel.y, -3.0, "a dead ball still falls");
        let mobility = app.world().get::<Mobility>(player).unwrap();
        assert!(!mobility.enabled, "death must disable the controller");
        assert_eq!(mobility.velocity, Vec2::ZERO);
    }

    #[test]
    fn opposing_keys_cancel_out_from_rest() {
        let mut app = build_test_app();
        let player = spawn_test_player(&mut app);

        set_keys(&mut app, |keys| {
            keys.forward = true;
            keys.back = true;
        });
        app.update();

        assert_eq!(
            controller_velocity(&app, player).y,
            0.0,
            "opposing keys from rest must not drift"
        );
    }

    // ── jump ──────────────────────────────────────────────────────────────────

    #[test]
    fn jump_latch_is_consumed_even_without_a_physics_world() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<MoveIntent>();
        app.insert_resource(GameConfig::default());
        app.add_systems(Update, player_jump_system);
        let player = app
            .world_mut()
            .spawn((Player, Transform::default(), Velocity::zero()))
            .id();

        app.world_mut().resource_mut::<MoveIntent>().jump = true;
        app.update();

        assert!(
            !app.world().resource::<MoveIntent>().jump,
            "latch must be cleared even when no physics context exists"
        );
        assert_eq!(app.world().get::<Velocity>(player).unwrap().linvel.y, 0.0);
    }

    /// Boot a real (headless) Rapier pipeline to exercise the ray probe: a
    /// ball resting on the ground slab may jump, the same ball teleported
    /// into the air may not.
    #[test]
    fn jump_applies_impulse_only_when_grounded() {
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            bevy::transform::TransformPlugin,
            RapierPhysicsPlugin::<NoUserData>::default(),
        ));
        app.init_resource::<MoveIntent>();
        app.insert_resource(GameConfig::default());
        app.add_systems(Update, player_jump_system);

        let config = GameConfig::default();
        // Slab top face at y = 0.
        app.world_mut().spawn((
            RigidBody::Fixed,
            Collider::cuboid(50.0, 0.5, 50.0),
            BodyRole::Ground.collision_groups(),
            Transform::from_xyz(0.0, -0.5, 0.0),
        ));
        let player = app
            .world_mut()
            .spawn((
                Player,
                RigidBody::Dynamic,
                Collider::ball(config.player_radius),
                BodyRole::Player.collision_groups(),
                Velocity::zero(),
                Transform::from_xyz(0.0, config.player_radius, 0.0),
            ))
            .id();

        // Let Rapier ingest the colliders before probing.
        app.update();
        app.update();

        app.world_mut().resource_mut::<MoveIntent>().jump = true;
        app.update();
        let vy = app.world().get::<Velocity>(player).unwrap().linvel.y;
        assert!(
            vy > 15.0,
            "grounded jump must kick vertical velocity upward, got {vy}"
        );

        // Teleport well above the probe length and try again.
        app.world_mut().get_mut::<Velocity>(player).unwrap().linvel = Vec3::ZERO;
        app.world_mut()
            .get_mut::<Transform>(player)
            .unwrap()
            .translation
            .y = 30.0;
        app.update();
        app.update();
        app.world_mut().get_mut::<Velocity>(player).unwrap().linvel = Vec3::ZERO;

        app.world_mut().resource_mut::<MoveIntent>().jump = true;
        app.update();
        let vy = app.world().get::<Velocity>(player).unwrap().linvel.y;
        assert!(
            vy.abs() < 1.0,
            "airborne jump must be a no-op, got vertical velocity {vy}"
        );
    }
}
