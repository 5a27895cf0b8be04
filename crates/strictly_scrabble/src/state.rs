//! Game state and the two-phase move protocol.
//!
//! A move is first validated with [`GameState::try_place`], which scores it
//! against the committed board and records it as the pending move, then
//! committed with [`GameState::submit`]. The last validation always wins;
//! committing consumes the pending move.

use crate::bag::TileBag;
use crate::board::{Board, Coord};
use crate::config::{ConfigError, GameConfig};
use crate::error::{GameError, PlacementError};
use crate::game::{PlayerId, Seat};
use crate::letter::{Letter, word_to_string};
use crate::oracle::WordOracle;
use crate::scoring::score_word;
use crate::words::extract_words;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};

/// One seat's hand and running score.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct PlayerSlot {
    /// Tiles held, order irrelevant.
    hand: Vec<Letter>,
    /// Points from committed moves.
    score: u32,
}

impl PlayerSlot {
    fn holds(&self, letters: &[Letter]) -> bool {
        let mut remaining = self.hand.clone();
        letters.iter().all(|letter| {
            match remaining.iter().position(|held| held == letter) {
                Some(idx) => {
                    remaining.swap_remove(idx);
                    true
                }
                None => false,
            }
        })
    }

    fn spend(&mut self, letters: &[Letter]) {
        for letter in letters {
            if let Some(idx) = self.hand.iter().position(|held| held == letter) {
                self.hand.swap_remove(idx);
            }
        }
    }
}

/// Outcome of validating a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveScore {
    /// Every formed word is legal; total points.
    Valid(u32),
    /// A formed word was rejected, or no word was formed.
    Invalid,
}

impl MoveScore {
    /// Wire value: the points, or `-1` when invalid.
    pub fn value(self) -> i32 {
        match self {
            MoveScore::Valid(points) => i32::try_from(points).unwrap_or(i32::MAX),
            MoveScore::Invalid => -1,
        }
    }

    /// Returns true for a scoring move.
    pub fn is_valid(self) -> bool {
        matches!(self, MoveScore::Valid(_))
    }
}

/// A validated move waiting for commit.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PendingMove {
    /// Placed tiles in submission order.
    tiles: Vec<(Coord, Letter)>,
    /// Validation outcome.
    score: MoveScore,
    /// Seat whose hand the tiles come from, if any.
    seat: Option<Seat>,
}

/// Result of starting a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StartStatus {
    /// The game moved to ongoing.
    Started,
    /// The game was already ongoing; nothing changed.
    AlreadyOngoing,
}

/// Read-only copy of a game, as published to waiters.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameSnapshot {
    /// Increases with every state change.
    version: u64,
    /// Committed board.
    board: Board,
    /// Hands and scores per seat.
    players: Vec<PlayerSlot>,
    /// Participants, seat order.
    roster: Vec<PlayerId>,
    /// Whether the game has started.
    ongoing: bool,
    /// Undrawn tile count.
    bag_remaining: usize,
}

impl GameSnapshot {
    /// The slot of one seat.
    pub fn player(&self, seat: Seat) -> Option<&PlayerSlot> {
        self.players.get(seat.0)
    }
}

/// Complete state of one game.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    bag: TileBag,
    players: Vec<PlayerSlot>,
    pending: Option<PendingMove>,
    ongoing: bool,
    roster: Vec<PlayerId>,
    tile_total: usize,
    version: u64,
}

impl GameState {
    /// Creates a not-started game with a freshly filled bag.
    #[instrument(skip(config))]
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bag = TileBag::from_config(config)?;
        Self::with_bag(config, bag)
    }

    /// Creates a not-started game around an existing bag.
    pub fn with_bag(config: &GameConfig, bag: TileBag) -> Result<Self, ConfigError> {
        config.validate()?;
        let tile_total = bag.remaining();
        Ok(Self {
            config: config.clone(),
            board: Board::new(),
            bag,
            players: vec![PlayerSlot::default(); *config.players()],
            pending: None,
            ongoing: false,
            roster: Vec::new(),
            tile_total,
            version: 0,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the committed board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the bag.
    pub fn bag(&self) -> &TileBag {
        &self.bag
    }

    /// Returns every seat's slot.
    pub fn players(&self) -> &[PlayerSlot] {
        &self.players
    }

    /// Returns one seat's slot.
    pub fn player(&self, seat: Seat) -> Option<&PlayerSlot> {
        self.players.get(seat.0)
    }

    /// Returns the pending move, if one is recorded.
    pub fn pending(&self) -> Option<&PendingMove> {
        self.pending.as_ref()
    }

    /// Returns true once the game has started.
    pub fn is_ongoing(&self) -> bool {
        self.ongoing
    }

    /// Returns the participants in seat order.
    pub fn roster(&self) -> &[PlayerId] {
        &self.roster
    }

    /// Tiles the game was created with.
    pub fn tile_total(&self) -> usize {
        self.tile_total
    }

    /// Tiles currently in the bag, in hands, and on the board.
    ///
    /// Equal to [`tile_total`](Self::tile_total) as long as every committed
    /// move was played from a hand.
    pub fn tiles_accounted(&self) -> usize {
        self.bag.remaining()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
            + self.board.occupied_count()
    }

    /// Returns the current version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Validates and scores a move, recording it as the pending move.
    ///
    /// Structural faults are errors and clear the pending move. A move whose
    /// words the oracle rejects is recorded with [`MoveScore::Invalid`].
    #[instrument(skip(self, oracle))]
    pub fn try_place(
        &mut self,
        coords: &[Coord],
        letters: &[Letter],
        oracle: &dyn WordOracle,
    ) -> Result<MoveScore, PlacementError> {
        self.evaluate(None, coords, letters, oracle)
    }

    /// Validates a move played from a seat's hand.
    ///
    /// As [`try_place`](Self::try_place), and the seat must hold the letters.
    /// Committing the move later takes the letters out of that hand and
    /// credits the seat with the points.
    #[instrument(skip(self, oracle))]
    pub fn try_place_as(
        &mut self,
        seat: Seat,
        coords: &[Coord],
        letters: &[Letter],
        oracle: &dyn WordOracle,
    ) -> Result<MoveScore, GameError> {
        self.pending = None;
        self.slot(seat)?;
        Ok(self.evaluate(Some(seat), coords, letters, oracle)?)
    }

    fn evaluate(
        &mut self,
        seat: Option<Seat>,
        coords: &[Coord],
        letters: &[Letter],
        oracle: &dyn WordOracle,
    ) -> Result<MoveScore, PlacementError> {
        self.pending = None;

        let placement = self
            .board
            .validate_placement(coords, letters, *self.config.placement())
            .inspect_err(|e| warn!(error = %e, "Placement rejected"))?;

        if let Some(seat) = seat {
            if !self.players[seat.0].holds(letters) {
                warn!(%seat, "Seat does not hold the placed tiles");
                return Err(PlacementError::TilesNotInHand(seat));
            }
        }

        let words = extract_words(placement.board(), &placement.coords(), *placement.alignment());
        let score = score_words(&words, oracle);
        debug!(words = words.len(), score = score.value(), "Move evaluated");

        self.pending = Some(PendingMove {
            tiles: placement.tiles().clone(),
            score,
            seat,
        });
        Ok(score)
    }

    /// Commits the pending move.
    ///
    /// Returns [`MoveScore::Invalid`] without any change when there is no
    /// pending move or it was rejected. Otherwise writes the tiles to the
    /// board and consumes the pending move. Hands are refilled separately
    /// with [`fill_hand`](Self::fill_hand).
    pub fn submit(&mut self) -> MoveScore {
        self.commit().0
    }

    /// Commits the pending move, also reporting the seat it was played from.
    ///
    /// The seat is `None` for anonymous moves and whenever nothing was
    /// committed. Whoever triggers the commit, that seat is the one whose
    /// hand was spent.
    #[instrument(skip(self))]
    pub fn commit(&mut self) -> (MoveScore, Option<Seat>) {
        let points = match &self.pending {
            Some(PendingMove {
                score: MoveScore::Valid(points),
                ..
            }) => *points,
            _ => {
                debug!("Nothing valid to commit");
                return (MoveScore::Invalid, None);
            }
        };

        let Some(pending) = self.pending.take() else {
            return (MoveScore::Invalid, None);
        };

        let mut board = self.board.clone();
        for &(coord, letter) in &pending.tiles {
            if let Err(e) = board.place(coord, letter) {
                warn!(error = %e, "Pending move no longer fits the board");
                return (MoveScore::Invalid, None);
            }
        }
        self.board = board;

        if let Some(seat) = pending.seat {
            let letters: Vec<Letter> = pending.tiles.iter().map(|(_, l)| *l).collect();
            let slot = &mut self.players[seat.0];
            slot.spend(&letters);
            slot.score += points;
        }
        self.version += 1;

        info!(points, tiles = pending.tiles.len(), "Move committed");
        trace!(board = %self.board.display(), "Board after commit");
        (MoveScore::Valid(points), pending.seat)
    }

    /// Draws tiles into a seat's hand until it is full or the bag runs out.
    ///
    /// Returns the number of tiles drawn. An exhausted bag is not an error.
    #[instrument(skip(self))]
    pub fn fill_hand(&mut self, seat: Seat) -> Result<usize, GameError> {
        let hand_size = *self.config.hand_size();
        let seats = self.players.len();
        let slot = self
            .players
            .get_mut(seat.0)
            .ok_or(GameError::SeatOutOfRange { seat, seats })?;

        let mut drawn = 0;
        while slot.hand.len() < hand_size {
            let Some(tile) = self.bag.draw() else {
                debug!("Bag exhausted");
                break;
            };
            slot.hand.push(tile);
            drawn += 1;
        }

        if drawn > 0 {
            self.version += 1;
        }
        debug!(drawn, remaining = self.bag.remaining(), "Hand filled");
        Ok(drawn)
    }

    /// Replaces the roster.
    #[instrument(skip(self))]
    pub fn set_players(&mut self, roster: Vec<PlayerId>) -> Result<(), GameError> {
        if roster.len() > self.players.len() {
            return Err(GameError::TooManyPlayers {
                players: roster.len(),
                seats: self.players.len(),
            });
        }
        info!(players = roster.len(), "Roster set");
        self.roster = roster;
        self.version += 1;
        Ok(())
    }

    /// Moves the game to ongoing. Starting twice is a no-op.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> StartStatus {
        if self.ongoing {
            debug!("Game already ongoing");
            return StartStatus::AlreadyOngoing;
        }
        self.ongoing = true;
        self.version += 1;
        info!("Game started");
        StartStatus::Started
    }

    /// Seat of a participant, if they are on the roster.
    pub fn seat_of(&self, player: PlayerId) -> Option<Seat> {
        self.roster.iter().position(|&p| p == player).map(Seat)
    }

    /// Copies the shareable parts of the state.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            version: self.version,
            board: self.board.clone(),
            players: self.players.clone(),
            roster: self.roster.clone(),
            ongoing: self.ongoing,
            bag_remaining: self.bag.remaining(),
        }
    }

    fn slot(&self, seat: Seat) -> Result<&PlayerSlot, GameError> {
        self.players.get(seat.0).ok_or(GameError::SeatOutOfRange {
            seat,
            seats: self.players.len(),
        })
    }
}

/// Sums the words' points, or `Invalid` if any word is rejected.
fn score_words(words: &[Vec<Letter>], oracle: &dyn WordOracle) -> MoveScore {
    if words.is_empty() {
        return MoveScore::Invalid;
    }
    let mut total = 0;
    for word in words {
        if !oracle.is_word(word) {
            warn!(word = %word_to_string(word), "Word rejected");
            return MoveScore::Invalid;
        }
        total += score_word(word);
    }
    MoveScore::Valid(total)
}
