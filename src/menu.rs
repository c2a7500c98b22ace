//! Main-menu splash screen: `GameState` definition and `MainMenuPlugin`.
//!
//! ## States
//!
//! | State      | Description                                 |
//! |------------|---------------------------------------------|
//! | `MainMenu` | Initial state; splash screen shown          |
//! | `Playing`  | Arena running; all gameplay systems active  |
//!
//! ## Systems (registered by `MainMenuPlugin`)
//!
//! | System               | Schedule               | Purpose                   |
//! |----------------------|------------------------|---------------------------|
//! | `setup_main_menu`    | `OnEnter(MainMenu)`    | Spawn full-screen menu UI |
//! | `cleanup_main_menu`  | `OnExit(MainMenu)`     | Despawn menu UI entities  |
//! | `menu_button_system` | `Update / in MainMenu` | Handle Start / Quit clicks|

use bevy::prelude::*;

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level application state machine.
///
/// Every gameplay system runs under `.run_if(in_state(GameState::Playing))`,
/// so the arena is fully inert while the menu is displayed.  The round phase
/// machine in [`crate::round`] only engages once this reaches `Playing`.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Main-menu splash screen; shown on startup.
    #[default]
    MainMenu,
    /// Active gameplay.
    Playing,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the main-menu UI; the entire tree is despawned on
/// `OnExit(MainMenu)`.
#[derive(Component)]
pub struct MainMenuRoot;

/// Tags the "Start Game" button.
#[derive(Component)]
pub struct MenuStartButton;

/// Tags the "Quit" button.
#[derive(Component)]
pub struct MenuQuitButton;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState`, the menu UI setup/teardown, and the button handler.
///
/// Add this before any plugin that calls
/// `.run_if(in_state(GameState::Playing))`, so the state is always registered
/// first.
pub struct MainMenuPlugin;

impl Plugin for MainMenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(OnExit(GameState::MainMenu), cleanup_main_menu)
            .add_systems(
                Update,
                menu_button_system.run_if(in_state(GameState::MainMenu)),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn start_bg() -> Color {
    Color::srgb(0.09, 0.30, 0.16)
}
fn start_border() -> Color {
    Color::srgb(0.20, 0.65, 0.32)
}
fn start_text() -> Color {
    Color::srgb(0.78, 1.0, 0.82)
}
fn quit_bg() -> Color {
    Color::srgb(0.26, 0.07, 0.07)
}
fn quit_border() -> Color {
    Color::srgb(0.58, 0.14, 0.14)
}
fn quit_text() -> Color {
    Color::srgb(1.0, 0.68, 0.68)
}
fn title_color() -> Color {
    Color::srgb(0.95, 0.82, 0.30)
}
fn subtitle_color() -> Color {
    Color::srgb(0.60, 0.60, 0.68)
}
fn hint_color() -> Color {
    Color::srgb(0.32, 0.32, 0.38)
}

// ── OnEnter(MainMenu): spawn UI ───────────────────────────────────────────────

/// Spawn the full-screen main-menu overlay.
///
/// Layout:
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │                GAUNTLET                     │
/// │    Collect the coins. Outrun the cubes.     │
/// │                                             │
/// │             [ START GAME ]                  │
/// │                [ QUIT ]                     │
/// │                                             │
/// │  WASD · Space · V camera · 1 toggle pursuit │
/// └─────────────────────────────────────────────┘
/// ```
pub fn setup_main_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::BLACK),
            MainMenuRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("GAUNTLET"),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 10.0);

            root.spawn((
                Text::new("Collect the coins. Outrun the cubes."),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(subtitle_color()),
            ));

            spacer(root, 48.0);

            // ── Start Game button ─────────────────────────────────────────────
            root.spawn((
                Button,
                Node {
                    width: Val::Px(220.0),
                    height: Val::Px(50.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(start_bg()),
                BorderColor::all(start_border()),
                MenuStartButton,
            ))
            .with_children(|btn| {
                btn.spawn((
                    Text::new("START GAME"),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(start_text()),
                ));
            });

            spacer(root, 14.0);

            // ── Quit button ───────────────────────────────────────────────────
            root.spawn((
                Button,
                Node {
                    width: Val::Px(220.0),
                    height: Val::Px(50.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(quit_bg()),
                BorderColor::all(quit_border()),
                MenuQuitButton,
            ))
            .with_children(|btn| {
                btn.spawn((
                    Text::new("QUIT"),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(quit_text()),
                ));
            });

            spacer(root, 48.0);

            root.spawn((
                Text::new("WASD move  ·  Space jump  ·  V camera  ·  1 toggle pursuit"),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
}

/// Spawn a fixed-height invisible spacer node.
fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

// ── OnExit(MainMenu): despawn UI ──────────────────────────────────────────────

/// Recursively despawn all main-menu entities.
pub fn cleanup_main_menu(mut commands: Commands, query: Query<Entity, With<MainMenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Update (MainMenu only): button interaction ────────────────────────────────

/// Handle Start Game and Quit button presses.
///
/// - **Start Game** → transitions to [`GameState::Playing`]; the round
///   machine's kickoff system takes it from there.
/// - **Quit** → sends [`bevy::app::AppExit`] to gracefully shut down.
#[allow(clippy::type_complexity)]
pub fn menu_button_system(
    start_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuStartButton>)>,
    quit_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuQuitButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
) {
    for (interaction, children) in start_query.iter() {
        match interaction {
            Interaction::Pressed => {
                next_state.set(GameState::Playing);
            }
            Interaction::Hovered => {
                tint_children(children, &mut btn_text, Color::WHITE);
            }
            Interaction::None => {
                tint_children(children, &mut btn_text, start_text());
            }
        }
    }

    for (interaction, children) in quit_query.iter() {
        match interaction {
            Interaction::Pressed => {
                exit.write(bevy::app::AppExit::Success);
            }
            Interaction::Hovered => {
                tint_children(children, &mut btn_text, Color::WHITE);
            }
            Interaction::None => {
                tint_children(children, &mut btn_text, quit_text());
            }
        }
    }
}

fn tint_children(children: &Children, texts: &mut Query<&mut TextColor>, color: Color) {
    for child in children.iter() {
        if let Ok(mut text_color) = texts.get_mut(child) {
            *text_color = TextColor(color);
        }
    }
}
