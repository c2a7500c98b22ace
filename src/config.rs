//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors the tuneable constants
//! in [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.player_max_speed`, `config.hostile_pursuit_speed`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{
    validate_gravity_y, validate_positive, validate_spawn_ring, GameResult,
};
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/game.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Physics ──────────────────────────────────────────────────────────────
    pub gravity_y: f32,
    pub ground_friction: f32,
    pub ground_restitution: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_radius: f32,
    pub player_mass: f32,
    pub player_acceleration: f32,
    pub player_deceleration: f32,
    pub player_max_speed: f32,
    pub player_jump_impulse: f32,
    pub player_angular_damping: f32,
    pub player_friction: f32,
    pub player_restitution: f32,
    pub player_max_health: i32,

    // ── Hostiles ─────────────────────────────────────────────────────────────
    pub hostile_edge: f32,
    pub hostile_mass: f32,
    pub hostile_pursuit_speed: f32,
    pub hostile_spawn_min_radius: f32,
    pub hostile_spawn_max_radius: f32,
    pub hostile_spawn_height: f32,
    pub hostile_contact_damage: i32,

    // ── Pickups ──────────────────────────────────────────────────────────────
    pub pickup_radius: f32,
    pub pickup_half_height: f32,
    pub pickup_spread: f32,
    pub pickup_height: f32,
    pub pickup_spin_rate: f32,

    // ── Rounds ───────────────────────────────────────────────────────────────
    pub round_start_grace_secs: f32,
    pub banner_hold_secs: f32,
    pub banner_fade_secs: f32,

    // ── Camera / UI ──────────────────────────────────────────────────────────
    pub camera_follow_lerp: f32,
    pub hud_font_size: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Physics
            gravity_y: GRAVITY_Y,
            ground_friction: GROUND_FRICTION,
            ground_restitution: GROUND_RESTITUTION,
            // Player
            player_radius: PLAYER_RADIUS,
            player_mass: PLAYER_MASS,
            player_acceleration: PLAYER_ACCELERATION,
            player_deceleration: PLAYER_DECELERATION,
            player_max_speed: PLAYER_MAX_SPEED,
            player_jump_impulse: PLAYER_JUMP_IMPULSE,
            player_angular_damping: PLAYER_ANGULAR_DAMPING,
            player_friction: PLAYER_FRICTION,
            player_restitution: PLAYER_RESTITUTION,
            player_max_health: PLAYER_MAX_HEALTH,
            // Hostiles
            hostile_edge: HOSTILE_EDGE,
            hostile_mass: HOSTILE_MASS,
            hostile_pursuit_speed: HOSTILE_PURSUIT_SPEED,
            hostile_spawn_min_radius: HOSTILE_SPAWN_MIN_RADIUS,
            hostile_spawn_max_radius: HOSTILE_SPAWN_MAX_RADIUS,
            hostile_spawn_height: HOSTILE_SPAWN_HEIGHT,
            hostile_contact_damage: HOSTILE_CONTACT_DAMAGE,
            // Pickups
            pickup_radius: PICKUP_RADIUS,
            pickup_half_height: PICKUP_HALF_HEIGHT,
            pickup_spread: PICKUP_SPREAD,
            pickup_height: PICKUP_HEIGHT,
            pickup_spin_rate: PICKUP_SPIN_RATE,
            // Rounds
            round_start_grace_secs: ROUND_START_GRACE_SECS,
            banner_hold_secs: BANNER_HOLD_SECS,
            banner_fade_secs: BANNER_FADE_SECS,
            // Camera / UI
            camera_follow_lerp: CAMERA_FOLLOW_LERP,
            hud_font_size: HUD_FONT_SIZE,
        }
    }
}

impl GameConfig {
    /// Rejects value combinations the game cannot run on.  Returns the first
    /// offending field; the loader logs it and keeps the compiled defaults.
    pub fn validate(&self) -> GameResult<()> {
        validate_gravity_y(self.gravity_y)?;
        validate_positive("player_radius", self.player_radius)?;
        validate_positive("player_mass", self.player_mass)?;
        validate_positive("player_acceleration", self.player_acceleration)?;
        validate_positive("player_deceleration", self.player_deceleration)?;
        validate_positive("player_max_speed", self.player_max_speed)?;
        validate_positive("player_max_health", self.player_max_health as f32)?;
        validate_positive("hostile_edge", self.hostile_edge)?;
        validate_positive("hostile_mass", self.hostile_mass)?;
        validate_positive("hostile_pursuit_speed", self.hostile_pursuit_speed)?;
        validate_spawn_ring(self.hostile_spawn_min_radius, self.hostile_spawn_max_radius)?;
        validate_positive("hostile_contact_damage", self.hostile_contact_damage as f32)?;
        validate_positive("pickup_radius", self.pickup_radius)?;
        validate_positive("pickup_spread", self.pickup_spread)?;
        validate_positive("round_start_grace_secs", self.round_start_grace_secs)?;
        validate_positive("banner_hold_secs", self.banner_hold_secs)?;
        validate_positive("banner_fade_secs", self.banner_fade_secs)?;
        Ok(())
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse errors and invalid
/// values are reported to stderr but never abort the game; it falls back to
/// the compiled defaults.  A missing file is not an error.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/game.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => match loaded.validate() {
                Ok(()) => {
                    *config = loaded;
                    println!("✓ Loaded game config from {path}");
                }
                Err(e) => {
                    eprintln!("⚠ Rejected {path}: {e}; using defaults");
                }
            },
            Err(e) => {
                eprintln!("⚠ Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present; the compiled defaults are already in place.
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
}
