//! A single game shared across connections.
//!
//! [`Game`] owns one [`GameState`] behind a mutex; every operation locks,
//! computes, and unlocks. State-changing operations publish a fresh
//! [`GameSnapshot`] through the game's [`Notifier`].

use crate::board::Coord;
use crate::config::{ConfigError, GameConfig};
use crate::error::{GameError, PlacementError};
use crate::letter::Letter;
use crate::notifier::Notifier;
use crate::oracle::WordOracle;
use crate::state::{GameSnapshot, GameState, MoveScore, StartStatus};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Externally assigned game identifier.
pub type GameId = i64;

/// Externally assigned player identifier.
pub type PlayerId = i64;

/// Index of a player's slot within a game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("Seat {}", _0)]
#[serde(transparent)]
pub struct Seat(pub usize);

/// One game: locked state, word oracle, and update notifier.
pub struct Game {
    id: GameId,
    state: Mutex<GameState>,
    oracle: Arc<dyn WordOracle>,
    notifier: Notifier<GameSnapshot>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("id", &self.id)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Creates a not-started game.
    #[instrument(skip(config, oracle))]
    pub fn new(
        id: GameId,
        config: &GameConfig,
        oracle: Arc<dyn WordOracle>,
    ) -> Result<Self, ConfigError> {
        let state = GameState::new(config)?;
        info!(
            game_id = id,
            seats = *config.players(),
            tiles = state.tile_total(),
            "Creating game"
        );
        Ok(Self::from_state(id, state, oracle))
    }

    /// Wraps an already built state.
    pub fn from_state(id: GameId, state: GameState, oracle: Arc<dyn WordOracle>) -> Self {
        Self {
            id,
            state: Mutex::new(state),
            oracle,
            notifier: Notifier::new(),
        }
    }

    /// Returns the game id.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Validates and scores an anonymous move.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn try_place(
        &self,
        coords: &[Coord],
        letters: &[Letter],
    ) -> Result<MoveScore, PlacementError> {
        self.lock().try_place(coords, letters, self.oracle.as_ref())
    }

    /// Validates and scores a move played from a seat's hand.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn try_place_as(
        &self,
        seat: Seat,
        coords: &[Coord],
        letters: &[Letter],
    ) -> Result<MoveScore, GameError> {
        self.lock()
            .try_place_as(seat, coords, letters, self.oracle.as_ref())
    }

    /// Commits the pending move and publishes on success.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn submit(&self) -> MoveScore {
        let mut state = self.lock();
        let score = state.submit();
        if score.is_valid() {
            self.publish(&state);
        }
        score
    }

    /// Commits the pending move and refills the hand it was played from.
    ///
    /// The refilled seat is the move's owner, not whoever asked for the
    /// commit. Commit, refill, and publish happen under one lock.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn submit_and_refill(&self) -> Result<MoveScore, GameError> {
        let mut state = self.lock();
        let (score, owner) = state.commit();
        if !score.is_valid() {
            return Ok(score);
        }
        if let Some(seat) = owner {
            let drawn = state.fill_hand(seat)?;
            debug!(%seat, drawn, "Refilled move owner");
        }
        self.publish(&state);
        Ok(score)
    }

    /// Refills a seat's hand from the bag.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn fill_hand(&self, seat: Seat) -> Result<usize, GameError> {
        let mut state = self.lock();
        let drawn = state.fill_hand(seat)?;
        if drawn > 0 {
            self.publish(&state);
        }
        Ok(drawn)
    }

    /// Replaces the roster.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn set_players(&self, roster: Vec<PlayerId>) -> Result<(), GameError> {
        let mut state = self.lock();
        state.set_players(roster)?;
        self.publish(&state);
        Ok(())
    }

    /// Starts the game.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn start(&self) -> StartStatus {
        let mut state = self.lock();
        let status = state.start();
        if status == StartStatus::Started {
            self.publish(&state);
        }
        status
    }

    /// Sets the roster, starts the game, and deals each rostered seat a full
    /// hand.
    ///
    /// Seats beyond the roster stay empty. Does nothing beyond reporting
    /// [`StartStatus::AlreadyOngoing`] when the game is already running. The
    /// three steps happen under one lock.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn start_with(&self, roster: Vec<PlayerId>) -> Result<StartStatus, GameError> {
        let mut state = self.lock();
        if state.is_ongoing() {
            debug!("Game already ongoing");
            return Ok(StartStatus::AlreadyOngoing);
        }
        let seated = roster.len();
        state.set_players(roster)?;
        let status = state.start();
        for seat in (0..seated).map(Seat) {
            state.fill_hand(seat)?;
        }
        self.publish(&state);
        Ok(status)
    }

    /// Copies the current state.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn get_state(&self) -> GameSnapshot {
        let snapshot = self.lock().snapshot();
        debug!(version = *snapshot.version(), "Read state");
        snapshot
    }

    /// Seat of a participant, or `None` if they have not joined.
    #[instrument(skip(self), fields(game_id = self.id))]
    pub fn check_if_player_joined(&self, player: PlayerId) -> Option<Seat> {
        let seat = self.lock().seat_of(player);
        if seat.is_none() {
            debug!(player_id = player, "Player not on roster");
        }
        seat
    }

    /// Waits until a snapshot has been published and returns it.
    pub async fn wait_for_update(&self) -> GameSnapshot {
        self.notifier.wait_for_update().await
    }

    /// Waits for a snapshot published after the given notifier sequence.
    pub async fn wait_past(&self, seen: u64) -> (u64, GameSnapshot) {
        self.notifier.wait_past(seen).await
    }

    /// Number of snapshots published so far.
    pub fn update_sequence(&self) -> u64 {
        self.notifier.sequence()
    }

    fn publish(&self, state: &GameState) {
        self.notifier.update(state.snapshot());
    }

    fn lock(&self) -> MutexGuard<'_, GameState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!(game_id = self.id, "Recovering poisoned game lock");
            PoisonError::into_inner(poisoned)
        })
    }
}
