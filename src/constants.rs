//! Centralised physics and gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! Most of them are mirrored by [`crate::config::GameConfig`] and can be
//! overridden at startup via `assets/game.toml`.

use bevy::prelude::Vec3;

// ── Physics Step ──────────────────────────────────────────────────────────────

/// Fixed physics timestep (seconds).  The whole simulation advances in
/// 60 Hz increments; rendering interpolates between them.
pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Rapier solver substeps per fixed step.  One is enough at this scale;
/// the fastest body (the player at max speed) moves 0.3 u per step.
pub const PHYSICS_SUBSTEPS: usize = 1;

/// Global gravity (u/s²).  Stronger than Earth scale so the ball and the
/// hostile cubes feel weighty and jumps resolve quickly.
pub const GRAVITY_Y: f32 = -30.0;

// ── Arena ─────────────────────────────────────────────────────────────────────

/// Ground slab dimensions (world units).  A wide shallow box rather than an
/// infinite plane so falling off the edge is possible and visible.
pub const GROUND_WIDTH: f32 = 600.0;
pub const GROUND_THICKNESS: f32 = 1.0;
pub const GROUND_DEPTH: f32 = 300.0;

/// The slab is sunk half its thickness so its top face sits at y = 0.
pub const GROUND_Y: f32 = -0.5;

/// Friction for the ground surface.  High so the rolling ball grips instead
/// of skating; cut this and the game turns into ice hockey.
pub const GROUND_FRICTION: f32 = 1.0;

/// Ground restitution.  Zero, so landings do not bounce.
pub const GROUND_RESTITUTION: f32 = 0.0;

/// Edge length (u) of the scenery crates scattered around the arena.
pub const PROP_EDGE: f32 = 4.0;

// ── Player ────────────────────────────────────────────────────────────────────

/// Radius (u) of the player sphere collider and mesh.
pub const PLAYER_RADIUS: f32 = 2.0;

/// Player body mass.  Jump Δv = `PLAYER_JUMP_IMPULSE / PLAYER_MASS`.
pub const PLAYER_MASS: f32 = 1.0;

/// Where the player materialises at round start, resting on the ground with
/// a small drop (sphere radius 2.0, centre at 2.4).
pub const PLAYER_START: Vec3 = Vec3::new(-14.0, 2.4, 0.0);

/// Horizontal speed gained per fixed tick while a movement key is held.
///
/// This is a per-tick step, not an acceleration in u/s²: eight ticks from
/// standstill reach a 64 u/s axis speed before the cap trims it to
/// `PLAYER_MAX_SPEED`.
pub const PLAYER_ACCELERATION: f32 = 8.0;

/// Horizontal speed lost per fixed tick on each axis whose key is released.
///
/// Much smaller than the acceleration step, so the ball coasts to a stop
/// over ~90 ticks from full speed instead of braking instantly.
pub const PLAYER_DECELERATION: f32 = 0.2;

/// Cap on the horizontal speed magnitude (u/s), applied after both the
/// accelerate and decelerate passes so diagonals cannot exceed it.
pub const PLAYER_MAX_SPEED: f32 = 18.0;

/// Upward impulse applied by a grounded jump.
pub const PLAYER_JUMP_IMPULSE: f32 = 20.0;

/// Extra ray length past the sphere radius for the grounded test.  Large
/// enough to tolerate solver jitter, small enough that mid-air jumps stay
/// impossible.
pub const GROUNDED_RAY_EPSILON: f32 = 0.1;

/// Angular damping on the player body.  The ball spins from contact
/// friction and this stops it revving forever.
pub const PLAYER_ANGULAR_DAMPING: f32 = 0.5;

/// Player contact friction and bounciness.
pub const PLAYER_FRICTION: f32 = 1.0;
pub const PLAYER_RESTITUTION: f32 = 0.3;

/// Starting and maximum player health.  Signed: lethal overkill is allowed
/// to push it below zero and the HUD shows whatever it lands on.
pub const PLAYER_MAX_HEALTH: i32 = 10;

// ── Hostiles ──────────────────────────────────────────────────────────────────

/// Edge length (u) of the hostile cube mesh and collider.
pub const HOSTILE_EDGE: f32 = 6.0;

/// Hostile body mass.  Heavy enough that a cube at pursuit speed shoves
/// the mass-1 player around rather than the reverse.
pub const HOSTILE_MASS: f32 = 100.0;

/// Pursuit speed (u/s) hostiles steer toward.  Slower than the player's cap
/// so an alert player can always outrun the pack.
pub const HOSTILE_PURSUIT_SPEED: f32 = 10.0;

/// Spawn-ring bounds: each horizontal coordinate of a spawn point has its
/// magnitude drawn from `[MIN, MAX)` and its sign flipped at random, keeping
/// every spawn outside a safety ring around the arena centre.
pub const HOSTILE_SPAWN_MIN_RADIUS: f32 = 50.0;
pub const HOSTILE_SPAWN_MAX_RADIUS: f32 = 100.0;

/// Spawn height: half the cube edge, so cubes start resting on the ground.
pub const HOSTILE_SPAWN_HEIGHT: f32 = 3.0;

/// Health removed from the player per hostile contact.
pub const HOSTILE_CONTACT_DAMAGE: i32 = 5;

// ── Pickups ───────────────────────────────────────────────────────────────────

/// Coin cylinder dimensions (u).
pub const PICKUP_RADIUS: f32 = 1.0;
pub const PICKUP_HALF_HEIGHT: f32 = 0.2;

/// Coins land anywhere on the ±`PICKUP_SPREAD` square around the centre,
/// independent of each other; overlap is acceptable.
pub const PICKUP_SPREAD: f32 = 10.0;

/// Hover height of a coin's centre.
pub const PICKUP_HEIGHT: f32 = 3.0;

/// Constant display spin (rad/s) about +y.
pub const PICKUP_SPIN_RATE: f32 = 2.0;

// ── Rounds ────────────────────────────────────────────────────────────────────

/// Ready-countdown between round setup and movement activation (seconds).
/// The wave is visible but frozen for this long.
pub const ROUND_START_GRACE_SECS: f32 = 3.0;

/// Seconds the ROUND banner stays fully opaque before fading.
pub const BANNER_HOLD_SECS: f32 = 5.0;

/// Seconds the ROUND banner takes to fade from opaque to gone.
pub const BANNER_FADE_SECS: f32 = 5.0;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Follow-camera offset from the player position.
pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 16.0, 16.0);

/// Per-frame lerp factor toward the follow target.  0.5 closes half the
/// remaining distance each frame.
pub const CAMERA_FOLLOW_LERP: f32 = 0.5;

/// Fixed vantage for overview mode: high above the arena centre, far enough
/// back to frame the whole hostile spawn ring.
pub const CAMERA_OVERVIEW_POS: Vec3 = Vec3::new(0.0, 110.0, 110.0);

// ── UI ────────────────────────────────────────────────────────────────────────

/// Font size for the HUD lines (health / coins / round).
pub const HUD_FONT_SIZE: f32 = 20.0;

/// Font size for the centred ROUND banner.
pub const BANNER_FONT_SIZE: f32 = 72.0;

/// Font size for popup titles (round won / lost / game complete).
pub const POPUP_TITLE_FONT_SIZE: f32 = 48.0;
