//! Tests for loading game configuration from TOML files.

use std::io::Write;
use std::sync::Arc;

use strictly_scrabble::{AcceptAll, Game, GameConfig, PlacementPolicy};
use tempfile::NamedTempFile;

fn write_config(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(body.as_bytes()).expect("Failed to write config");
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
hand_size = 8
players = 4
bag_size = 100
wildcards = 2
placement = "connected"
seed = 1234
"#,
    );
    let config = GameConfig::from_file(file.path()).expect("valid config");
    assert_eq!(*config.hand_size(), 8);
    assert_eq!(*config.players(), 4);
    assert_eq!(*config.bag_size(), 100);
    assert_eq!(*config.wildcards(), 2);
    assert_eq!(*config.placement(), PlacementPolicy::Connected);
    assert_eq!(*config.seed(), Some(1234));

    let game = Game::new(3, &config, Arc::new(AcceptAll)).expect("game");
    let snapshot = game.get_state();
    assert_eq!(snapshot.players().len(), 4);
    assert_eq!(*snapshot.bag_remaining(), 100);
}

#[test]
fn test_empty_file_is_default() {
    let file = write_config("");
    let config = GameConfig::from_file(file.path()).expect("valid config");
    assert_eq!(config, GameConfig::default());
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = GameConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_invalid_values_are_rejected() {
    let file = write_config("players = 0\n");
    let err = GameConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_same_seed_same_game() {
    let file = write_config("seed = 99\n");
    let config = GameConfig::from_file(file.path()).unwrap();
    let a = Game::new(1, &config, Arc::new(AcceptAll)).unwrap();
    let b = Game::new(2, &config, Arc::new(AcceptAll)).unwrap();
    a.start_with(vec![1, 2]).unwrap();
    b.start_with(vec![1, 2]).unwrap();
    assert_eq!(a.get_state().players(), b.get_state().players());
}
