//! Player actions against registered games.
//!
//! The handler is transport-agnostic: a connection layer hands it the
//! authenticated player id and the decoded request, and sends back whatever
//! it returns.

use crate::board::Coord;
use crate::error::GameError;
use crate::game::{Game, GameId, PlayerId, Seat};
use crate::letter::letters_from_str;
use crate::registry::GameRegistry;
use crate::view::GameView;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Actions a player can request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum PlayerAction {
    /// Start the game and deal hands.
    Start,
    /// Validate and score a move.
    Place,
    /// Commit the last validated move.
    Submit,
    /// Fetch the current view.
    State,
}

/// A decoded player request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Action name, see [`PlayerAction`].
    pub action: String,
    /// Target game.
    pub game_id: GameId,
    /// Placed cells as `[row, col]` pairs.
    #[serde(default)]
    pub coordinates: Vec<Coord>,
    /// Placed letters, one per coordinate.
    #[serde(default)]
    pub letters: String,
    /// Participants in seat order, host first. Used by `start`.
    #[serde(default)]
    pub players: Vec<PlayerId>,
}

impl ActionRequest {
    /// A request carrying only an action and a game.
    pub fn new(action: PlayerAction, game_id: GameId) -> Self {
        Self {
            action: action.to_string(),
            game_id,
            coordinates: Vec::new(),
            letters: String::new(),
            players: Vec::new(),
        }
    }
}

/// What the handler sends back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionResponse {
    /// Move score, `-1` when rejected by the dictionary.
    Score {
        /// Points or `-1`.
        score: i32,
    },
    /// The requester's view of the game.
    State(GameView),
}

/// Dispatches player actions to games in a registry.
#[derive(Debug, Clone)]
pub struct ActionHandler {
    registry: GameRegistry,
}

impl ActionHandler {
    /// Creates a handler over a registry.
    pub fn new(registry: GameRegistry) -> Self {
        Self { registry }
    }

    /// Returns the registry.
    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    /// Runs one request on behalf of a player.
    #[instrument(skip(self, request), fields(action = %request.action, game_id = request.game_id))]
    pub fn handle(
        &self,
        player: PlayerId,
        request: &ActionRequest,
    ) -> Result<ActionResponse, GameError> {
        let action: PlayerAction = request.action.parse().map_err(|_| {
            warn!(action = %request.action, "Unsupported action");
            GameError::UnsupportedAction(request.action.clone())
        })?;
        let game = self.registry.get(request.game_id)?;

        match action {
            PlayerAction::Start => self.start(&game, player, request),
            PlayerAction::Place => {
                let seat = joined(&game, player)?;
                let letters = letters_from_str(&request.letters);
                let score = game.try_place_as(seat, &request.coordinates, &letters)?;
                Ok(ActionResponse::Score { score: score.value() })
            }
            PlayerAction::Submit => {
                joined(&game, player)?;
                let score = game.submit_and_refill()?;
                Ok(ActionResponse::Score { score: score.value() })
            }
            PlayerAction::State => {
                let seat = joined(&game, player)?;
                Ok(ActionResponse::State(GameView::for_seat(&game.get_state(), Some(seat))))
            }
        }
    }

    /// Parses a JSON request, runs it, and serialises the response.
    #[instrument(skip(self, text))]
    pub fn handle_json(&self, player: PlayerId, text: &str) -> Result<String, GameError> {
        let request: ActionRequest = serde_json::from_str(text).map_err(|e| {
            warn!(error = %e, "Malformed request");
            GameError::MalformedRequest(e.to_string())
        })?;
        let response = self.handle(player, &request)?;
        serde_json::to_string(&response).map_err(|e| GameError::MalformedRequest(e.to_string()))
    }

    /// Waits for the next change to a game and renders it for the player.
    #[instrument(skip(self))]
    pub async fn wait_for_update(
        &self,
        player: PlayerId,
        game_id: GameId,
    ) -> Result<GameView, GameError> {
        let game = self.registry.get(game_id)?;
        let seat = joined(&game, player)?;
        let seen = game.update_sequence();
        let (sequence, snapshot) = game.wait_past(seen).await;
        debug!(sequence, "Update received");
        Ok(GameView::for_seat(&snapshot, Some(seat)))
    }

    fn start(
        &self,
        game: &Arc<Game>,
        player: PlayerId,
        request: &ActionRequest,
    ) -> Result<ActionResponse, GameError> {
        let roster = if request.players.is_empty() {
            vec![player]
        } else {
            request.players.clone()
        };
        let status = game.start_with(roster)?;
        info!(?status, player_id = player, "Start requested");

        let snapshot = game.get_state();
        let seat = snapshot
            .roster()
            .iter()
            .position(|&p| p == player)
            .map(Seat);
        Ok(ActionResponse::State(GameView::for_seat(&snapshot, seat)))
    }
}

fn joined(game: &Game, player: PlayerId) -> Result<Seat, GameError> {
    game.check_if_player_joined(player).ok_or_else(|| {
        warn!(player_id = player, game_id = game.id(), "Player has not joined");
        GameError::NotJoined(player)
    })
}
