//! Registry of live games, shared by every connection.

use crate::config::{ConfigError, GameConfig};
use crate::error::GameError;
use crate::game::{Game, GameId};
use crate::oracle::WordOracle;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, instrument, warn};

/// Concurrent map from game id to game.
///
/// Cloning yields another handle to the same map. Lookups take a shared
/// lock; only registration takes the exclusive one.
#[derive(Debug, Clone, Default)]
pub struct GameRegistry {
    games: Arc<RwLock<HashMap<GameId, Arc<Game>>>>,
}

impl GameRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game registry");
        Self::default()
    }

    /// Inserts a game, returning the one it replaced.
    #[instrument(skip(self, game), fields(game_id = game.id()))]
    pub fn add(&self, game: Game) -> Option<Arc<Game>> {
        self.insert(Arc::new(game))
    }

    /// Builds a game from a configuration and registers it.
    #[instrument(skip(self, config, oracle))]
    pub fn create(
        &self,
        id: GameId,
        config: &GameConfig,
        oracle: Arc<dyn WordOracle>,
    ) -> Result<Arc<Game>, ConfigError> {
        let game = Arc::new(Game::new(id, config, oracle)?);
        self.insert(Arc::clone(&game));
        Ok(game)
    }

    /// Looks up a game.
    #[instrument(skip(self))]
    pub fn get(&self, id: GameId) -> Result<Arc<Game>, GameError> {
        let game = self
            .games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned();
        game.ok_or_else(|| {
            debug!(game_id = id, "Game not found");
            GameError::GameNotFound(id)
        })
    }

    /// Number of registered games.
    pub fn len(&self) -> usize {
        self.games.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true when no game is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered ids, ascending.
    pub fn ids(&self) -> Vec<GameId> {
        let mut ids: Vec<GameId> = self
            .games
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        ids.sort_unstable();
        ids
    }

    fn insert(&self, game: Arc<Game>) -> Option<Arc<Game>> {
        let id = game.id();
        let replaced = self
            .games
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, game);
        if replaced.is_some() {
            warn!(game_id = id, "Replaced existing game");
        } else {
            info!(game_id = id, "Registered game");
        }
        replaced
    }
}
