//! In-game presentation: HUD readouts, the round banner, and outcome popups.
//!
//! Everything here is a consumer of round-phase transitions and player state;
//! nothing here mutates gameplay except by writing [`RoundCommand`] messages
//! from the popup buttons.  The round machine stays UI-free and this module
//! stays rule-free.

use bevy::prelude::*;

use crate::menu::GameState;
use crate::player::{Player, PlayerVitals};
use crate::round::{RoundCommand, RoundPhase, RoundStatus};

// ── Component markers ─────────────────────────────────────────────────────────

/// Root of the persistent HUD column (top-left).
#[derive(Component)]
pub struct HudRoot;

/// "Health: N" line.
#[derive(Component)]
pub struct HealthText;

/// "Coins: X / Y" line.
#[derive(Component)]
pub struct CoinText;

/// "Round N" line.
#[derive(Component)]
pub struct RoundText;

/// The big "ROUND N" banner shown while a round starts.
#[derive(Component)]
pub struct RoundBanner;

/// Banner lifecycle: hold at full opacity, then fade out, then despawn.
#[derive(Component)]
pub struct BannerFade {
    pub hold: Timer,
    pub fade: Timer,
}

/// Root of whichever outcome popup is currently up.
#[derive(Component)]
pub struct PopupRoot;

/// Tags the round-win "NEXT ROUND" button.
#[derive(Component)]
pub struct NextRoundButton;

/// Tags the "TRY AGAIN" / "PLAY AGAIN" buttons.
#[derive(Component)]
pub struct RestartButton;

// ── Colour helpers ────────────────────────────────────────────────────────────

fn hud_text_color() -> Color {
    Color::srgb(0.92, 0.92, 0.95)
}
fn banner_color() -> Color {
    Color::srgb(0.95, 0.82, 0.30)
}
fn win_color() -> Color {
    Color::srgb(0.55, 0.95, 0.55)
}
fn loss_color() -> Color {
    Color::srgb(0.95, 0.40, 0.40)
}
fn button_bg() -> Color {
    Color::srgb(0.12, 0.12, 0.16)
}
fn button_border() -> Color {
    Color::srgb(0.45, 0.45, 0.55)
}
fn button_text() -> Color {
    Color::srgb(0.92, 0.92, 0.95)
}
fn popup_panel_bg() -> Color {
    Color::srgba(0.05, 0.05, 0.08, 0.92)
}
fn overlay_bg() -> Color {
    Color::srgba(0.0, 0.0, 0.0, 0.55)
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), setup_hud)
            .add_systems(
                OnEnter(RoundPhase::Starting),
                (cleanup_popups, spawn_round_banner),
            )
            .add_systems(OnEnter(RoundPhase::Won), spawn_round_win_popup)
            .add_systems(OnEnter(RoundPhase::Lost), spawn_loss_popup)
            .add_systems(OnEnter(RoundPhase::Complete), spawn_completion_popup)
            .add_systems(
                Update,
                (
                    hud_health_text,
                    hud_coin_text,
                    hud_round_text,
                    banner_fade_system,
                    popup_button_system,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Spawn the persistent top-left readout column.
fn setup_hud(mut commands: Commands, config: Res<crate::config::GameConfig>) {
    let font = TextFont {
        font_size: config.hud_font_size,
        ..default()
    };

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|hud| {
            hud.spawn((
                Text::new("Health: -"),
                font.clone(),
                TextColor(hud_text_color()),
                HealthText,
            ));
            hud.spawn((
                Text::new("Coins: - / -"),
                font.clone(),
                TextColor(hud_text_color()),
                CoinText,
            ));
            hud.spawn((
                Text::new("Round -"),
                font.clone(),
                TextColor(hud_text_color()),
                RoundText,
            ));
        });
}

/// Refresh the health line when the player's vitals change.
fn hud_health_text(
    q_vitals: Query<&PlayerVitals, (With<Player>, Changed<PlayerVitals>)>,
    mut q_text: Query<&mut Text, With<HealthText>>,
) {
    let Ok(vitals) = q_vitals.single() else {
        return;
    };
    for mut text in &mut q_text {
        text.0 = format!("Health: {}", vitals.health);
    }
}

/// Refresh the coin line when the vitals or the active quota change.
fn hud_coin_text(
    status: Res<RoundStatus>,
    q_changed: Query<(), (With<Player>, Changed<PlayerVitals>)>,
    q_vitals: Query<&PlayerVitals, With<Player>>,
    mut q_text: Query<&mut Text, With<CoinText>>,
) {
    if !status.is_changed() && q_changed.is_empty() {
        return;
    }
    let Ok(vitals) = q_vitals.single() else {
        return;
    };
    for mut text in &mut q_text {
        text.0 = format!("Coins: {} / {}", vitals.coins, status.goal.coins);
    }
}

/// Refresh the round line when the active round changes.
fn hud_round_text(status: Res<RoundStatus>, mut q_text: Query<&mut Text, With<RoundText>>) {
    if !status.is_changed() {
        return;
    }
    for mut text in &mut q_text {
        text.0 = format!("Round {}", status.round_index + 1);
    }
}

// ── Round banner ──────────────────────────────────────────────────────────────

/// Show the "ROUND N" banner.  Any banner still fading from the previous
/// round is despawned first, so its timers can never bleed into this one.
fn spawn_round_banner(
    mut commands: Commands,
    status: Res<RoundStatus>,
    config: Res<crate::config::GameConfig>,
    q_old: Query<Entity, With<RoundBanner>>,
) {
    for entity in &q_old {
        commands.entity(entity).despawn();
    }

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Percent(18.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            RoundBanner,
            BannerFade {
                hold: Timer::from_seconds(config.banner_hold_secs, TimerMode::Once),
                fade: Timer::from_seconds(config.banner_fade_secs, TimerMode::Once),
            },
        ))
        .with_children(|banner| {
            banner.spawn((
                Text::new(format!("ROUND {}", status.round_index + 1)),
                TextFont {
                    font_size: crate::constants::BANNER_FONT_SIZE,
                    ..default()
                },
                TextColor(banner_color()),
            ));
        });
}

/// Hold the banner at full opacity, then ramp its text alpha down to zero
/// and despawn it.
fn banner_fade_system(
    mut commands: Commands,
    time: Res<Time>,
    mut q_banner: Query<(Entity, &mut BannerFade, &Children), With<RoundBanner>>,
    mut q_text: Query<&mut TextColor>,
) {
    for (entity, mut lifecycle, children) in &mut q_banner {
        lifecycle.hold.tick(time.delta());
        if !lifecycle.hold.finished() {
            continue;
        }

        lifecycle.fade.tick(time.delta());
        let alpha = 1.0 - lifecycle.fade.fraction();
        for child in children.iter() {
            if let Ok(mut color) = q_text.get_mut(child) {
                *color = TextColor(banner_color().with_alpha(alpha));
            }
        }

        if lifecycle.fade.finished() {
            commands.entity(entity).despawn();
        }
    }
}

// ── Outcome popups ────────────────────────────────────────────────────────────

/// Despawn whatever popup is up.  Runs when a round starts, which is the only
/// way out of the popup phases.
fn cleanup_popups(mut commands: Commands, q_popups: Query<Entity, With<PopupRoot>>) {
    for entity in &q_popups {
        commands.entity(entity).despawn();
    }
}

fn spawn_round_win_popup(mut commands: Commands, status: Res<RoundStatus>) {
    spawn_popup(
        &mut commands,
        &format!("ROUND {} CLEAR", status.round_index + 1),
        win_color(),
        "NEXT ROUND",
        PopupButton::Next,
    );
}

fn spawn_loss_popup(mut commands: Commands) {
    spawn_popup(
        &mut commands,
        "YOU DIED",
        loss_color(),
        "TRY AGAIN",
        PopupButton::Restart,
    );
}

fn spawn_completion_popup(mut commands: Commands) {
    spawn_popup(
        &mut commands,
        "ALL ROUNDS CLEAR",
        win_color(),
        "PLAY AGAIN",
        PopupButton::Restart,
    );
}

enum PopupButton {
    Next,
    Restart,
}

/// Shared popup layout: dimmed overlay, titled panel, one action button.
fn spawn_popup(
    commands: &mut Commands,
    title: &str,
    title_color: Color,
    button_label: &str,
    button_kind: PopupButton,
) {
    let title = title.to_owned();
    let button_label = button_label.to_owned();

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(overlay_bg()),
            PopupRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(32.0)),
                        row_gap: Val::Px(24.0),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(popup_panel_bg()),
                    BorderColor::all(button_border()),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(title),
                        TextFont {
                            font_size: crate::constants::POPUP_TITLE_FONT_SIZE,
                            ..default()
                        },
                        TextColor(title_color),
                    ));

                    let mut button = panel.spawn((
                        Button,
                        Node {
                            width: Val::Px(200.0),
                            height: Val::Px(46.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(button_bg()),
                        BorderColor::all(button_border()),
                    ));
                    match button_kind {
                        PopupButton::Next => {
                            button.insert(NextRoundButton);
                        }
                        PopupButton::Restart => {
                            button.insert(RestartButton);
                        }
                    }
                    button.with_children(|btn| {
                        btn.spawn((
                            Text::new(button_label),
                            TextFont {
                                font_size: 18.0,
                                ..default()
                            },
                            TextColor(button_text()),
                        ));
                    });
                });
        });
}

/// Translate popup button presses into round commands.
#[allow(clippy::type_complexity)]
pub fn popup_button_system(
    next_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<NextRoundButton>)>,
    restart_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<RestartButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut commands_out: MessageWriter<RoundCommand>,
) {
    for (interaction, children) in next_query.iter() {
        match interaction {
            Interaction::Pressed => {
                commands_out.write(RoundCommand::Advance);
            }
            Interaction::Hovered => tint_children(children, &mut btn_text, Color::WHITE),
            Interaction::None => tint_children(children, &mut btn_text, button_text()),
        }
    }

    for (interaction, children) in restart_query.iter() {
        match interaction {
            Interaction::Pressed => {
                commands_out.write(RoundCommand::Restart);
            }
            Interaction::Hovered => tint_children(children, &mut btn_text, Color::WHITE),
            Interaction::None => tint_children(children, &mut btn_text, button_text()),
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
