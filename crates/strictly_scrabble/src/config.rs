//! Game configuration.

use crate::letter::{CANONICAL_BAG_SIZE, CANONICAL_WILDCARDS};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// How strictly tile placements are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementPolicy {
    /// Tiles must share a row or a column; gaps and islands are allowed.
    #[default]
    Permissive,
    /// Tiles must also form a gap-free span touching existing tiles.
    Connected,
}

/// Parameters of a single game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Maximum number of tiles in a hand.
    #[serde(default = "default_hand_size")]
    hand_size: usize,

    /// Number of seats.
    #[serde(default = "default_players")]
    players: usize,

    /// Total number of tiles in the bag, wildcards included.
    #[serde(default = "default_bag_size")]
    bag_size: usize,

    /// Number of wildcards in the bag.
    #[serde(default = "default_wildcards")]
    wildcards: usize,

    /// Placement checking policy.
    #[serde(default)]
    placement: PlacementPolicy,

    /// Seed for the bag's random draws; entropy when absent.
    #[serde(default)]
    #[setters(strip_option)]
    seed: Option<u64>,
}

fn default_hand_size() -> usize {
    7
}

fn default_players() -> usize {
    2
}

fn default_bag_size() -> usize {
    CANONICAL_BAG_SIZE
}

fn default_wildcards() -> usize {
    CANONICAL_WILDCARDS
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: default_hand_size(),
            players: default_players(),
            bag_size: default_bag_size(),
            wildcards: default_wildcards(),
            placement: PlacementPolicy::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Returns true when the bag matches the canonical deck size.
    pub fn is_canonical_bag(&self) -> bool {
        self.bag_size == CANONICAL_BAG_SIZE && self.wildcards == CANONICAL_WILDCARDS
    }

    /// Checks the configuration for values no game can be built from.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players == 0 {
            return Err(ConfigError::new("A game needs at least one seat"));
        }
        if self.hand_size == 0 {
            return Err(ConfigError::new("Hand size must be positive"));
        }
        if self.bag_size == 0 {
            return Err(ConfigError::new("Bag must hold at least one tile"));
        }
        if self.wildcards > self.bag_size {
            return Err(ConfigError::new(format!(
                "{} wildcards do not fit in a bag of {}",
                self.wildcards, self.bag_size
            )));
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    #[instrument(skip(text))]
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(
            players = config.players,
            bag_size = config.bag_size,
            "Config loaded successfully"
        );
        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(*config.hand_size(), 7);
        assert_eq!(*config.players(), 2);
        assert_eq!(*config.bag_size(), 131);
        assert_eq!(*config.wildcards(), 3);
        assert_eq!(*config.placement(), PlacementPolicy::Permissive);
        assert!(config.is_canonical_bag());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = GameConfig::default()
            .with_players(4)
            .with_bag_size(60)
            .with_seed(9);
        assert_eq!(*config.players(), 4);
        assert_eq!(*config.seed(), Some(9));
        assert!(!config.is_canonical_bag());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GameConfig::from_toml_str("players = 3\nplacement = \"connected\"\n")
            .expect("valid config");
        assert_eq!(*config.players(), 3);
        assert_eq!(*config.hand_size(), 7);
        assert_eq!(*config.placement(), PlacementPolicy::Connected);
        assert_eq!(*config.seed(), None);
    }

    #[test]
    fn test_rejects_too_many_wildcards() {
        let err = GameConfig::from_toml_str("bag_size = 2\nwildcards = 3\n").unwrap_err();
        assert!(err.message.contains("wildcards"));
    }

    #[test]
    fn test_rejects_zero_players() {
        assert!(GameConfig::default().with_players(0).validate().is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(GameConfig::from_toml_str("players = \"many\"").is_err());
    }
}
