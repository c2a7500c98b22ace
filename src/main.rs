use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier3d::prelude::*;
use std::env;

use gauntlet::arena::ArenaPlugin;
use gauntlet::collision::CollisionPlugin;
use gauntlet::core::{CorePlugin, FixedSet};
use gauntlet::graphics::{
    self, camera_follow, setup_camera, toggle_camera_mode, toggle_debug_render,
};
use gauntlet::hostile::HostilePlugin;
use gauntlet::hud::HudPlugin;
use gauntlet::menu::{GameState, MainMenuPlugin};
use gauntlet::pickup::PickupPlugin;
use gauntlet::player::{
    apply_move_intent, keyboard_to_intent_system, player_jump_system, spawn_player, MoveIntent,
};
use gauntlet::round::RoundPlugin;
use gauntlet::shape::setup_shape_assets;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Gauntlet".into(),
            resolution: WindowResolution::new(1200, 680),
            ..Default::default()
        }),
        ..Default::default()
    }))
    .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
    // Collider wireframes, off until toggled with backquote.
    .add_plugins(RapierDebugRenderPlugin {
        enabled: false,
        ..Default::default()
    })
    .add_plugins((
        CorePlugin,
        ArenaPlugin,
        MainMenuPlugin,
        RoundPlugin,
        CollisionPlugin,
        HostilePlugin,
        PickupPlugin,
        HudPlugin,
    ))
    .init_resource::<MoveIntent>()
    .init_resource::<graphics::CameraMode>()
    .add_systems(
        Startup,
        (
            // The player needs the shared mesh and material handles, which the
            // core plugin creates earlier in this same schedule.
            spawn_player.after(setup_shape_assets),
            setup_camera,
        ),
    )
    .add_systems(
        Update,
        (
            keyboard_to_intent_system,
            camera_follow,
            toggle_camera_mode,
            toggle_debug_render,
        )
            .run_if(in_state(GameState::Playing)),
    )
    .add_systems(
        FixedUpdate,
        (apply_move_intent, player_jump_system)
            .chain()
            .in_set(FixedSet::Simulate)
            .run_if(in_state(GameState::Playing)),
    );

    // Skip the menu and drop straight into the arena, for headless runs and
    // quick playtesting.
    if env::var("GAUNTLET_SKIP_MENU").is_ok() {
        app.insert_state(GameState::Playing);
        println!("Skipping main menu (GAUNTLET_SKIP_MENU set)");
    }

    app.run();
}
