//! Strictly Scrabble - rules engine for a multiplayer word-placement game
//!
//! Games are played on a 15×15 board with a Cyrillic alphabet. This crate is
//! the in-memory core: the tile bag, placement checking, word extraction,
//! scoring, and the locking that lets many connections share one game.
//!
//! # Architecture
//!
//! - **State**: [`GameState`] with its two-phase move protocol
//!   ([`GameState::try_place`] then [`GameState::submit`])
//! - **Game**: [`Game`] wraps one state behind a lock and publishes
//!   [`GameSnapshot`]s through a [`Notifier`]
//! - **Registry**: [`GameRegistry`] shares games between connections
//! - **Session**: [`ActionHandler`] turns player requests into game calls
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use strictly_scrabble::{AcceptAll, Coord, Game, GameConfig, letters_from_str};
//!
//! let game = Game::new(1, &GameConfig::default(), Arc::new(AcceptAll))?;
//! let coords = [Coord::new(2, 2), Coord::new(2, 3)];
//! let score = game.try_place(&coords, &letters_from_str("АБ"))?;
//! assert_eq!(score.value(), 4);
//! assert_eq!(game.submit().value(), 4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod bag;
mod board;
mod config;
mod error;
mod game;
mod letter;
mod notifier;
mod oracle;
mod registry;
mod scoring;
mod session;
mod state;
mod view;
mod words;

// Crate-level exports - Tiles and letters
pub use bag::TileBag;
pub use letter::{
    CANONICAL_BAG_SIZE, CANONICAL_FREQUENCIES, CANONICAL_WILDCARDS, Letter, WILDCARD_SYMBOL,
    canonical_deck, letters_from_str, word_to_string,
};

// Crate-level exports - Board and words
pub use board::{Alignment, BOARD_SIZE, Board, Cell, Coord, Placement};
pub use scoring::{letter_value, score_word};
pub use words::extract_words;

// Crate-level exports - Configuration and errors
pub use config::{ConfigError, GameConfig, PlacementPolicy};
pub use error::{GameError, PlacementError};

// Crate-level exports - Game state
pub use oracle::{AcceptAll, WordOracle};
pub use state::{GameSnapshot, GameState, MoveScore, PendingMove, PlayerSlot, StartStatus};

// Crate-level exports - Sharing
pub use game::{Game, GameId, PlayerId, Seat};
pub use notifier::Notifier;
pub use registry::GameRegistry;

// Crate-level exports - Player actions
pub use session::{ActionHandler, ActionRequest, ActionResponse, PlayerAction};
pub use view::{GameView, UNSET_PRICE};
