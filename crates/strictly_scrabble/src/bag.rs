//! The tile bag: uniform random draws without replacement.
//!
//! Tiles live in a `Vec` whose length is the live count. A draw picks a
//! uniformly random index below that count, swaps the tile there with the
//! last live tile, and shrinks the count by one, so every draw is O(1).

use crate::config::{ConfigError, GameConfig};
use crate::letter::{CANONICAL_BAG_SIZE, CANONICAL_WILDCARDS, Letter, canonical_deck};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

/// Undrawn tiles of one game.
#[derive(Debug, Clone)]
pub struct TileBag {
    tiles: Vec<Letter>,
    rng: ChaCha8Rng,
}

impl TileBag {
    /// Fills a bag according to the configuration.
    ///
    /// The canonical size (131 tiles, 3 wildcards) reproduces the canonical
    /// deck exactly. Any other size samples its lettered tiles from the
    /// canonical deck, so letter counts follow the canonical frequencies
    /// only approximately.
    #[instrument(
        skip(config),
        fields(bag_size = *config.bag_size(), wildcards = *config.wildcards())
    )]
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed() {
            Some(seed) => ChaCha8Rng::seed_from_u64(*seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::fill(*config.bag_size(), *config.wildcards(), rng)
    }

    /// Fills a bag of `size` tiles, `wildcards` of which are wildcards.
    pub fn fill(size: usize, wildcards: usize, mut rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        if wildcards > size {
            return Err(ConfigError::new(format!(
                "{} wildcards do not fit in a bag of {}",
                wildcards, size
            )));
        }

        let deck = canonical_deck();
        let mut tiles = if size == CANONICAL_BAG_SIZE && wildcards == CANONICAL_WILDCARDS {
            deck
        } else {
            (0..size - wildcards)
                .map(|_| deck[rng.gen_range(0..deck.len())])
                .collect()
        };
        tiles.extend(std::iter::repeat_n(Letter::Wildcard, wildcards));

        debug!(tiles = tiles.len(), "Bag filled");
        Ok(Self { tiles, rng })
    }

    /// Builds a bag holding exactly the given tiles.
    pub fn from_tiles(tiles: Vec<Letter>, rng: ChaCha8Rng) -> Self {
        Self { tiles, rng }
    }

    /// Draws a uniformly random tile, or `None` once the bag is exhausted.
    pub fn draw(&mut self) -> Option<Letter> {
        if self.tiles.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..self.tiles.len());
        Some(self.tiles.swap_remove(idx))
    }

    /// Number of undrawn tiles.
    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true once every tile has been drawn.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The undrawn tiles, in no particular order.
    pub fn tiles(&self) -> &[Letter] {
        &self.tiles
    }
}
