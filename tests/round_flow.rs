//! Headless integration tests for the full round loop.
//!
//! These compose the real plugins (rounds, collision routing, hostiles,
//! pickups, HUD) on [`MinimalPlugins`]; no window, no rendering, no physics
//! engine.  Contacts are injected as collision messages and the fixed
//! schedule is driven by hand, so every scenario is deterministic.
//!
//! Covered scenarios:
//! 1. Entering `Playing` spawns round one and resets the player.
//! 2. The grace countdown hands `Starting` over to live play.
//! 3. Collecting the coin quota wins the round.
//! 4. Advancing swaps the arena to exactly the next row's populations.
//! 5. Lethal contact damage loses the round; restart rewinds to row zero.
//! 6. The win popup's button drives the advance end to end.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy_rapier3d::prelude::{CollisionEvent, Velocity};
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

use gauntlet::collision::CollisionPlugin;
use gauntlet::config::GameConfig;
use gauntlet::constants::PLAYER_START;
use gauntlet::hostile::{Hostile, HostilePlugin, HostilePursuit};
use gauntlet::hud::{HudPlugin, NextRoundButton, PopupRoot};
use gauntlet::menu::GameState;
use gauntlet::pickup::{Pickup, PickupPlugin};
use gauntlet::player::{Mobility, Player, PlayerVitals};
use gauntlet::round::{GameRound, RoundCommand, RoundPhase, RoundPlugin, RoundStatus};
use gauntlet::shape::{flush_removals, RemovalQueue, ShapeAssets};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Placeholder handles; nothing renders, so the geometry never loads.
fn stub_assets() -> ShapeAssets {
    ShapeAssets {
        player_mesh: Handle::default(),
        player_material: Handle::default(),
        hostile_mesh: Handle::default(),
        hostile_material: Handle::default(),
        pickup_mesh: Handle::default(),
        pickup_material: Handle::default(),
        ground_mesh: Handle::default(),
        ground_material: Handle::default(),
        prop_mesh: Handle::default(),
        prop_material: Handle::default(),
    }
}

/// Build the composed app already in `Playing`, with a zero-length grace
/// countdown so tests reach live play in a fixed number of frames, and a
/// player carrying deliberately dirty state so round resets are observable.
///
/// The removal queue flush normally runs between physics steps; here it runs
/// in `Update`, which preserves its "after teardown, before assertions"
/// position without a physics engine in the loop.
fn arena_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_state(GameState::Playing);
    app.insert_resource(GameConfig {
        round_start_grace_secs: 0.0,
        ..Default::default()
    });
    app.init_resource::<RemovalQueue>();
    app.init_resource::<ButtonInput<KeyCode>>();
    app.insert_resource(stub_assets());
    app.add_message::<CollisionEvent>();
    app.add_plugins((
        RoundPlugin,
        CollisionPlugin,
        HostilePlugin,
        PickupPlugin,
        HudPlugin,
    ));
    app.add_systems(Update, flush_removals);

    app.world_mut().spawn((
        Player,
        PlayerVitals {
            health: 3,
            coins: 7,
        },
        Mobility {
            enabled: true,
            ..Default::default()
        },
        Transform::from_xyz(40.0, 9.0, -25.0),
        Velocity {
            linvel: Vec3::new(5.0, 1.0, -2.0),
            angvel: Vec3::ZERO,
        },
    ));

    app
}

fn phase(app: &App) -> RoundPhase {
    *app.world().resource::<State<RoundPhase>>().get()
}

fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), With<C>>()
        .iter(app.world())
        .count()
}

fn single<C: Component>(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<C>>()
        .single(app.world())
        .expect("exactly one match expected")
}

/// Frame 1 enters `Playing` and requests `Starting`; frame 2 applies it and
/// builds the round; frame 3 applies `Ongoing` (the zero-length countdown
/// finished during frame 2).
fn drive_to_ongoing(app: &mut App) {
    for _ in 0..3 {
        app.update();
    }
    assert_eq!(
        phase(app),
        RoundPhase::Ongoing,
        "zero grace must reach live play in three frames"
    );
}

/// Collect round one's single coin and settle into `Won`.
fn win_first_round(app: &mut App) {
    drive_to_ongoing(app);
    let player = single::<Player>(app);
    let coin = single::<Pickup>(app);
    app.world_mut().write_message(CollisionEvent::Started(
        player,
        coin,
        CollisionEventFlags::empty(),
    ));
    app.world_mut().run_schedule(FixedUpdate);
    app.update();
    assert_eq!(phase(app), RoundPhase::Won, "meeting the quota must win");
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// Entering `Playing` kicks off row zero: the arena holds exactly its
/// populations and the player is back at the start in a clean state.
#[test]
fn entering_playing_spawns_the_first_round() {
    let mut app = arena_app();
    app.update(); // enter Playing, request Starting
    app.update(); // apply Starting, build the round

    assert_eq!(phase(&app), RoundPhase::Starting);
    assert_eq!(
        app.world().resource::<RoundStatus>().goal,
        GameRound {
            hostiles: 3,
            coins: 1
        }
    );
    assert_eq!(count::<Hostile>(&mut app), 3, "row zero spawns 3 hostiles");
    assert_eq!(count::<Pickup>(&mut app), 1, "row zero spawns 1 coin");

    let player = single::<Player>(&mut app);
    let vitals = app.world().get::<PlayerVitals>(player).unwrap();
    assert_eq!(vitals.health, 10, "health must reset to the maximum");
    assert_eq!(vitals.coins, 0, "coin count must reset");
    let transform = app.world().get::<Transform>(player).unwrap();
    assert_eq!(transform.translation, PLAYER_START);
    let mobility = app.world().get::<Mobility>(player).unwrap();
    assert!(!mobility.enabled, "the controller is frozen during grace");
}

/// When the countdown lands, the controller and the pursuit group unfreeze.
#[test]
fn grace_countdown_hands_over_to_live_play() {
    let mut app = arena_app();
    drive_to_ongoing(&mut app);

    let player = single::<Player>(&mut app);
    let mobility = app.world().get::<Mobility>(player).unwrap();
    assert!(mobility.enabled, "live play must unfreeze the controller");
    assert!(
        app.world().resource::<HostilePursuit>().enabled,
        "live play must unleash the pursuit group"
    );
}

/// A player-coin contact credits the coin, removes it, and wins the round
/// once the quota is met.  The win popup comes up with its advance button.
#[test]
fn collecting_the_quota_wins_the_round() {
    let mut app = arena_app();
    win_first_round(&mut app);

    let player = single::<Player>(&mut app);
    let vitals = app.world().get::<PlayerVitals>(player).unwrap();
    assert_eq!(vitals.coins, 1);
    assert_eq!(count::<Pickup>(&mut app), 0, "the collected coin must go away");
    assert_eq!(
        count::<NextRoundButton>(&mut app),
        1,
        "the win popup must offer an advance button"
    );
}

/// Advancing from `Won` replaces the previous wave wholesale: the old
/// hostiles despawn and exactly the next row's populations appear.
#[test]
fn advancing_replaces_the_wave_with_the_next_rows() {
    let mut app = arena_app();
    win_first_round(&mut app);

    let old_hostiles: Vec<Entity> = app
        .world_mut()
        .query_filtered::<Entity, With<Hostile>>()
        .iter(app.world())
        .collect();
    assert_eq!(old_hostiles.len(), 3);

    app.world_mut().write_message(RoundCommand::Advance);
    app.update(); // command honored, Starting requested
    app.update(); // Starting applies, round two builds, leftovers flush

    let status = app.world().resource::<RoundStatus>();
    assert_eq!(status.round_index, 1);
    assert_eq!(
        status.goal,
        GameRound {
            hostiles: 4,
            coins: 2
        }
    );
    for old in old_hostiles {
        assert!(
            app.world().get_entity(old).is_err(),
            "round one's hostiles must not survive into round two"
        );
    }
    assert_eq!(count::<Hostile>(&mut app), 4, "row one spawns 4 hostiles");
    assert_eq!(count::<Pickup>(&mut app), 2, "row one spawns 2 coins");

    let player = single::<Player>(&mut app);
    let vitals = app.world().get::<PlayerVitals>(player).unwrap();
    assert_eq!(vitals.coins, 0, "the coin count starts over each round");
}

/// Two hostile contacts drain the full health bar; the round is lost, and a
/// restart command rewinds the session to a fresh row zero.
#[test]
fn lethal_contact_damage_loses_the_round_and_restart_rewinds() {
    let mut app = arena_app();
    drive_to_ongoing(&mut app);

    let player = single::<Player>(&mut app);
    let hostiles: Vec<Entity> = app
        .world_mut()
        .query_filtered::<Entity, With<Hostile>>()
        .iter(app.world())
        .collect();
    for hostile in hostiles.iter().take(2) {
        app.world_mut().write_message(CollisionEvent::Started(
            player,
            *hostile,
            CollisionEventFlags::empty(),
        ));
    }
    app.world_mut().run_schedule(FixedUpdate);
    app.update();

    assert_eq!(phase(&app), RoundPhase::Lost);
    assert_eq!(
        app.world().get::<PlayerVitals>(player).unwrap().health,
        0,
        "two hits at 5 damage empty the 10-point bar"
    );

    app.world_mut().write_message(RoundCommand::Restart);
    app.update();
    app.update();

    assert_eq!(phase(&app), RoundPhase::Starting);
    assert_eq!(app.world().resource::<RoundStatus>().round_index, 0);
    for hostile in hostiles {
        assert!(
            app.world().get_entity(hostile).is_err(),
            "the lost round's wave must be cleared on restart"
        );
    }
    assert_eq!(count::<Hostile>(&mut app), 3, "restart rebuilds row zero");
    assert_eq!(
        app.world().get::<PlayerVitals>(player).unwrap().health,
        10,
        "restart must heal the player back to full"
    );
}

/// Pressing the win popup's button performs the whole advance: command,
/// phase change, popup teardown, and the next round's wave.
#[test]
fn win_popup_button_advances_the_round() {
    let mut app = arena_app();
    win_first_round(&mut app);

    let button = single::<NextRoundButton>(&mut app);
    app.world_mut()
        .entity_mut(button)
        .insert(Interaction::Pressed);
    for _ in 0..4 {
        app.update();
    }

    assert_eq!(app.world().resource::<RoundStatus>().round_index, 1);
    assert_eq!(
        count::<PopupRoot>(&mut app),
        0,
        "starting the next round must tear the popup down"
    );
    assert_eq!(count::<Hostile>(&mut app), 4, "row one's wave must be up");
}
