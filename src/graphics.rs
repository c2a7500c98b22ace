//! Camera rig and render-debug toggles.
//!
//! One perspective camera with two modes: a chase camera glued to the player
//! ball, and a fixed overview vantage for watching the whole arena.  `V`
//! flips between them; backquote flips the rapier collider overlay.

use bevy::prelude::*;
use bevy_rapier3d::render::DebugRenderContext;

use crate::config::GameConfig;
use crate::constants::{CAMERA_OFFSET, CAMERA_OVERVIEW_POS};
use crate::player::Player;

/// Marks the one game camera so the follow system can find it.
#[derive(Component)]
pub struct GameCamera;

/// Active camera behaviour, toggled with `V`.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// Trail the player from behind and above.
    #[default]
    Follow,
    /// Park at a fixed vantage overlooking the arena.
    Overview,
}

/// Spawn the perspective camera at its follow offset, aimed at the arena
/// centre.  Runs once at startup; the follow system takes over from there.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(CAMERA_OFFSET).looking_at(Vec3::ZERO, Vec3::Y),
        GameCamera,
    ));
    eprintln!("[SETUP] Camera spawned");
}

/// Ease the camera toward its target each frame.
///
/// Follow mode lerps toward `player + offset` and re-aims at the player, so
/// the ball sits in the same part of the frame no matter how it moves.
/// Overview mode eases to the fixed vantage and watches the arena centre.
pub fn camera_follow(
    mode: Res<CameraMode>,
    config: Res<GameConfig>,
    q_player: Query<&Transform, (With<Player>, Without<GameCamera>)>,
    mut q_camera: Query<&mut Transform, With<GameCamera>>,
) {
    let Ok(mut camera) = q_camera.single_mut() else {
        return;
    };

    match *mode {
        CameraMode::Follow => {
            let Ok(player) = q_player.single() else {
                return;
            };
            let target = player.translation + CAMERA_OFFSET;
            camera.translation = camera.translation.lerp(target, config.camera_follow_lerp);
            let focus = player.translation;
            camera.look_at(focus, Vec3::Y);
        }
        CameraMode::Overview => {
            camera.translation = camera
                .translation
                .lerp(CAMERA_OVERVIEW_POS, config.camera_follow_lerp);
            camera.look_at(Vec3::ZERO, Vec3::Y);
        }
    }
}

/// `V` flips between the chase camera and the overview vantage.
pub fn toggle_camera_mode(keys: Res<ButtonInput<KeyCode>>, mut mode: ResMut<CameraMode>) {
    if keys.just_pressed(KeyCode::KeyV) {
        *mode = match *mode {
            CameraMode::Follow => CameraMode::Overview,
            CameraMode::Overview => CameraMode::Follow,
        };
        info!("Camera mode: {:?}", *mode);
    }
}

/// Backquote toggles the rapier wireframe overlay.  Off by default; handy
/// for checking collider placement against the meshes.
pub fn toggle_debug_render(
    keys: Res<ButtonInput<KeyCode>>,
    mut debug_context: ResMut<DebugRenderContext>,
) {
    if keys.just_pressed(KeyCode::Backquote) {
        debug_context.enabled = !debug_context.enabled;
    }
}
