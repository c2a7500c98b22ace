//! Round orchestration: the state machine that drives a play session.
//!
//! Phases: `Idle → Starting → Ongoing → (Won | Lost | Complete)`, with
//! `Won → Starting` (next row) and `Lost/Complete → Starting` (row zero)
//! driven by [`RoundCommand`] messages from the UI.
//!
//! Entering `Starting` tears down the previous round (through the deferred
//! removal queue), resets the player, spawns the row's hostiles and coins,
//! and arms the grace countdown.  The countdown always runs its full length:
//! win/lose arbitration only happens in `Ongoing`, so nothing can skip the
//! breather.  Presentation (banner, HUD, popups) subscribes to these phase
//! transitions; this module never touches UI.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use crate::collision::route_player_collisions;
use crate::config::GameConfig;
use crate::constants::PLAYER_START;
use crate::core::FixedSet;
use crate::error::{validate_round_index, GameResult};
use crate::hostile::{spawn_wave, Hostile, HostilePursuit};
use crate::menu::GameState;
use crate::pickup::{spawn_pickups, Pickup};
use crate::player::{Mobility, Player, PlayerVitals};
use crate::shape::{RemovalQueue, ShapeAssets};

// ── Round table ───────────────────────────────────────────────────────────────

/// One row of the round table: how many hostiles to spawn and how many coins
/// the player must collect to win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameRound {
    pub hostiles: u32,
    pub coins: u32,
}

/// The immutable round progression.  The default table ramps from a gentle
/// opener to a ten-cube finale.
#[derive(Resource, Debug, Clone)]
pub struct RoundTable {
    rows: Vec<GameRound>,
}

impl Default for RoundTable {
    fn default() -> Self {
        Self {
            rows: vec![
                GameRound { hostiles: 3, coins: 1 },
                GameRound { hostiles: 4, coins: 2 },
                GameRound { hostiles: 7, coins: 3 },
                GameRound { hostiles: 10, coins: 5 },
            ],
        }
    }
}

impl RoundTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the final row; winning it ends the game instead of advancing.
    pub fn last_index(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Bounds-checked row lookup.
    pub fn row(&self, index: usize) -> GameResult<GameRound> {
        validate_round_index(index, self.rows.len()).map(|i| self.rows[i])
    }
}

// ── Phase machine ─────────────────────────────────────────────────────────────

/// Where the session currently is.  `Idle` until the main menu hands over.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundPhase {
    #[default]
    Idle,
    /// Teardown + spawn + grace countdown; actors are frozen.
    Starting,
    /// Live play; win/lose arbitration runs each fixed tick.
    Ongoing,
    /// Round won with more rows left; waiting for an `Advance` command.
    Won,
    /// Player died; waiting for a `Restart` command.
    Lost,
    /// Final row won; terminal except for a full restart.
    Complete,
}

/// Which row is active and what its goal is.  `goal` caches the table row so
/// per-tick arbitration never re-indexes the table.
#[derive(Resource, Debug, Default)]
pub struct RoundStatus {
    pub round_index: usize,
    pub goal: GameRound,
}

/// Grace timer between `Starting` and `Ongoing`.  Re-armed from scratch every
/// time a round starts, so a leftover timer from an earlier round can never
/// fire into this one.
#[derive(Resource, Debug)]
pub struct RoundCountdown(pub Timer);

impl Default for RoundCountdown {
    fn default() -> Self {
        Self(Timer::from_seconds(
            crate::constants::ROUND_START_GRACE_SECS,
            TimerMode::Once,
        ))
    }
}

/// UI → round requests.  Each is only honored in the phase it belongs to;
/// anything else is logged and dropped.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundCommand {
    /// From the round-win popup: advance to the next row.
    Advance,
    /// From the loss and completion popups: back to row zero.
    Restart,
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct RoundPlugin;

impl Plugin for RoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<RoundPhase>()
            .init_resource::<RoundTable>()
            .init_resource::<RoundStatus>()
            .init_resource::<RoundCountdown>()
            .add_message::<RoundCommand>()
            .add_systems(OnEnter(GameState::Playing), kickoff_rounds)
            .add_systems(OnEnter(RoundPhase::Starting), begin_round)
            .add_systems(OnEnter(RoundPhase::Ongoing), enable_round_actors)
            .add_systems(OnEnter(RoundPhase::Won), freeze_round_actors)
            .add_systems(OnEnter(RoundPhase::Lost), freeze_round_actors)
            .add_systems(OnEnter(RoundPhase::Complete), freeze_round_actors)
            .add_systems(
                Update,
                (
                    round_countdown.run_if(in_state(RoundPhase::Starting)),
                    apply_round_commands,
                )
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                FixedUpdate,
                round_update
                    .in_set(FixedSet::Resolve)
                    .after(route_player_collisions)
                    .run_if(in_state(RoundPhase::Ongoing)),
            );
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

/// Entering `Playing` from the menu starts the session at row zero.
pub fn kickoff_rounds(
    mut status: ResMut<RoundStatus>,
    mut next: ResMut<NextState<RoundPhase>>,
) {
    status.round_index = 0;
    next.set(RoundPhase::Starting);
}

/// Tear down the previous round and build this one.
///
/// All leftovers (hostiles *and* uncollected coins) go through the deferred
/// removal queue, so whatever the previous round left behind, the arena holds
/// exactly the new row's populations once the queue flushes.
#[allow(clippy::too_many_arguments)]
pub fn begin_round(
    mut commands: Commands,
    assets: Res<ShapeAssets>,
    config: Res<GameConfig>,
    table: Res<RoundTable>,
    mut status: ResMut<RoundStatus>,
    mut countdown: ResMut<RoundCountdown>,
    mut queue: ResMut<RemovalQueue>,
    mut pursuit: ResMut<HostilePursuit>,
    mut q_player: Query<
        (&mut Transform, &mut Velocity, &mut PlayerVitals, &mut Mobility),
        With<Player>,
    >,
    q_hostiles: Query<Entity, With<Hostile>>,
    q_pickups: Query<Entity, With<Pickup>>,
) {
    let goal = match table.row(status.round_index) {
        Ok(row) => row,
        Err(e) => {
            warn!("{e}; falling back to the first round");
            status.round_index = 0;
            table.row(0).unwrap_or_default()
        }
    };
    status.goal = goal;

    for entity in &q_hostiles {
        queue.request(entity);
    }
    for entity in &q_pickups {
        queue.request(entity);
    }

    if let Ok((mut transform, mut velocity, mut vitals, mut mobility)) = q_player.single_mut() {
        transform.translation = PLAYER_START;
        *velocity = Velocity::zero();
        vitals.health = config.player_max_health;
        vitals.coins = 0;
        mobility.velocity = Vec2::ZERO;
        mobility.enabled = false;
    }
    pursuit.enabled = false;

    spawn_wave(&mut commands, &assets, &config, goal.hostiles);
    spawn_pickups(&mut commands, &assets, &config, goal.coins);

    // Full re-arm, not just a reset: the grace length itself is configurable.
    countdown.0 = Timer::from_seconds(config.round_start_grace_secs, TimerMode::Once);

    info!(
        "Round {} starting: {} hostiles, {} coins to collect",
        status.round_index + 1,
        goal.hostiles,
        goal.coins
    );
}

/// Tick the grace timer; when it lands, play begins.
pub fn round_countdown(
    time: Res<Time>,
    mut countdown: ResMut<RoundCountdown>,
    mut next: ResMut<NextState<RoundPhase>>,
) {
    countdown.0.tick(time.delta());
    if countdown.0.finished() {
        next.set(RoundPhase::Ongoing);
    }
}

/// Grace is over: unfreeze the player controller and the pursuit group.
pub fn enable_round_actors(
    mut pursuit: ResMut<HostilePursuit>,
    mut q_player: Query<&mut Mobility, With<Player>>,
) {
    pursuit.enabled = true;
    if let Ok(mut mobility) = q_player.single_mut() {
        mobility.enabled = true;
    }
    info!("Round ongoing");
}

/// Round settled (won, lost, or game complete): freeze both actor groups
/// while the popup waits for input.
pub fn freeze_round_actors(
    mut pursuit: ResMut<HostilePursuit>,
    mut q_player: Query<&mut Mobility, With<Player>>,
) {
    pursuit.enabled = false;
    if let Ok(mut mobility) = q_player.single_mut() {
        mobility.enabled = false;
    }
}

/// Win/lose arbitration, once per fixed tick while `Ongoing`.
///
/// The win check runs first and returns: collecting the final coin on the
/// same tick as a lethal hit still wins the round.  The coin check is exact
/// equality; collection increments by one, so the count cannot jump past the
/// quota.
pub fn round_update(
    status: Res<RoundStatus>,
    table: Res<RoundTable>,
    q_player: Query<&PlayerVitals, With<Player>>,
    mut next: ResMut<NextState<RoundPhase>>,
) {
    let Ok(vitals) = q_player.single() else {
        return;
    };

    if vitals.coins == status.goal.coins {
        if status.round_index == table.last_index() {
            info!("Final round won; game complete");
            next.set(RoundPhase::Complete);
        } else {
            info!("Round {} won", status.round_index + 1);
            next.set(RoundPhase::Won);
        }
        return;
    }

    if vitals.health <= 0 {
        info!("Round {} lost", status.round_index + 1);
        next.set(RoundPhase::Lost);
    }
}

/// Consume UI commands, honoring each only in the phase it belongs to.
pub fn apply_round_commands(
    mut reader: MessageReader<RoundCommand>,
    phase: Res<State<RoundPhase>>,
    mut status: ResMut<RoundStatus>,
    mut next: ResMut<NextState<RoundPhase>>,
) {
    for command in reader.read() {
        match (*command, *phase.get()) {
            (RoundCommand::Advance, RoundPhase::Won) => {
                status.round_index += 1;
                next.set(RoundPhase::Starting);
            }
            (RoundCommand::Restart, RoundPhase::Lost)
            | (RoundCommand::Restart, RoundPhase::Complete) => {
                status.round_index = 0;
                next.set(RoundPhase::Starting);
            }
            (command, phase) => {
                warn!("Ignoring {command:?} while {phase:?}");
            }
        }
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
