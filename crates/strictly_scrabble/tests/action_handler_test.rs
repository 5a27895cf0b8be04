//! Tests for the JSON action handler and update waiting.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use strictly_scrabble::{
    AcceptAll, ActionHandler, ActionRequest, ActionResponse, Coord, GameConfig, GameError,
    GameRegistry, PlayerAction, Seat,
};

const HOST: i64 = 100;
const GUEST: i64 = 200;

fn handler() -> ActionHandler {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let registry = GameRegistry::new();
    registry
        .create(7, &GameConfig::default().with_seed(77), Arc::new(AcceptAll))
        .expect("game");
    ActionHandler::new(registry)
}

fn call(handler: &ActionHandler, player: i64, body: Value) -> Value {
    let text = handler
        .handle_json(player, &body.to_string())
        .expect("request handled");
    serde_json::from_str(&text).expect("valid json")
}

fn start(handler: &ActionHandler) -> Value {
    call(
        handler,
        HOST,
        json!({"action": "start", "game_id": 7, "players": [HOST, GUEST]}),
    )
}

#[test]
fn test_start_returns_the_hosts_view() {
    let handler = handler();
    let view = start(&handler);
    assert_eq!(view["letters"].as_array().map(Vec::len), Some(15));
    assert_eq!(view["letters"][7][7], " ");
    assert_eq!(view["prices"][0][0], -1);
    assert_eq!(view["tiles"].as_array().map(Vec::len), Some(7));
    assert_eq!(view["score"], 0);
}

#[test]
fn test_place_and_submit_from_hand() {
    let handler = handler();
    let view = start(&handler);
    let tiles: Vec<String> = view["tiles"]
        .as_array()
        .expect("hand")
        .iter()
        .take(2)
        .map(|t| t.as_str().expect("letter").to_string())
        .collect();

    let placed = call(
        &handler,
        HOST,
        json!({
            "action": "place",
            "game_id": 7,
            "coordinates": [[7, 7], [7, 8]],
            "letters": tiles.concat(),
        }),
    );
    let score = placed["score"].as_i64().expect("score");
    assert!(score >= 0);

    let submitted = call(&handler, HOST, json!({"action": "submit", "game_id": 7}));
    assert_eq!(submitted["score"].as_i64(), Some(score));

    // The committing seat is refilled.
    let state = call(&handler, HOST, json!({"action": "state", "game_id": 7}));
    assert_eq!(state["tiles"].as_array().map(Vec::len), Some(7));
    assert_eq!(state["score"].as_i64(), Some(score));
    assert_eq!(state["letters"][7][7], tiles[0]);

    // The guest sees the board but not the host's tiles.
    let guest = call(&handler, GUEST, json!({"action": "state", "game_id": 7}));
    assert_eq!(guest["letters"][7][8], tiles[1]);
    assert_eq!(guest["score"], 0);
}

#[test]
fn test_submit_by_another_player_refills_the_move_owner() {
    let handler = handler();
    let view = start(&handler);
    let tiles: Vec<String> = view["tiles"]
        .as_array()
        .expect("hand")
        .iter()
        .take(2)
        .map(|t| t.as_str().expect("letter").to_string())
        .collect();

    call(
        &handler,
        HOST,
        json!({
            "action": "place",
            "game_id": 7,
            "coordinates": [[7, 7], [7, 8]],
            "letters": tiles.concat(),
        }),
    );
    let submitted = call(&handler, GUEST, json!({"action": "submit", "game_id": 7}));
    let score = submitted["score"].as_i64().expect("score");
    assert!(score >= 0);

    let host = call(&handler, HOST, json!({"action": "state", "game_id": 7}));
    assert_eq!(host["tiles"].as_array().map(Vec::len), Some(7));
    assert_eq!(host["score"].as_i64(), Some(score));

    let guest = call(&handler, GUEST, json!({"action": "state", "game_id": 7}));
    assert_eq!(guest["tiles"].as_array().map(Vec::len), Some(7));
    assert_eq!(guest["score"], 0);

    let game = handler.registry().get(7).unwrap();
    assert_eq!(*game.get_state().bag_remaining(), 131 - 16);
}

#[test]
fn test_start_deals_only_rostered_seats() {
    let handler = handler();
    handler
        .handle(HOST, &ActionRequest::new(PlayerAction::Start, 7))
        .unwrap();
    let snapshot = handler.registry().get(7).unwrap().get_state();
    assert_eq!(snapshot.roster(), &vec![HOST]);
    assert_eq!(snapshot.player(Seat(0)).unwrap().hand().len(), 7);
    assert!(snapshot.player(Seat(1)).unwrap().hand().is_empty());
    assert_eq!(*snapshot.bag_remaining(), 131 - 7);
}

#[test]
fn test_placing_tiles_not_in_hand() {
    let handler = handler();
    start(&handler);
    let game = handler.registry().get(7).unwrap();
    let hand = game.get_state().player(Seat(0)).unwrap().hand().clone();
    // Eight copies of one letter cannot all be in a seven-tile hand.
    let letter = hand[0].to_string().repeat(8);
    let coordinates: Vec<[usize; 2]> = (0..8).map(|c| [3, c]).collect();

    let body = json!({
        "action": "place",
        "game_id": 7,
        "coordinates": coordinates,
        "letters": letter,
    });
    let err = handler.handle_json(HOST, &body.to_string()).unwrap_err();
    assert!(matches!(err, GameError::Placement(_)));
}

#[test]
fn test_submit_without_place() {
    let handler = handler();
    start(&handler);
    let response = handler
        .handle(GUEST, &ActionRequest::new(PlayerAction::Submit, 7))
        .unwrap();
    assert_eq!(response, ActionResponse::Score { score: -1 });
}

#[test]
fn test_strangers_are_refused() {
    let handler = handler();
    start(&handler);
    let err = handler
        .handle_json(300, &json!({"action": "state", "game_id": 7}).to_string())
        .unwrap_err();
    assert_eq!(err, GameError::NotJoined(300));
}

#[tokio::test]
async fn test_waiter_sees_the_other_players_move() {
    let handler = handler();
    start(&handler);

    let waiter = {
        let handler = handler.clone();
        tokio::spawn(async move { handler.wait_for_update(GUEST, 7).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    let game = handler.registry().get(7).unwrap();
    let hand = game.get_state().player(Seat(0)).unwrap().hand().clone();
    let coords = [Coord::new(4, 4), Coord::new(4, 5)];
    game.try_place_as(Seat(0), &coords, &hand[..2]).unwrap();
    assert!(game.submit_and_refill().unwrap().is_valid());

    let view = tokio::time::timeout(Duration::from_secs(1), waiter)
        .await
        .expect("waiter woke")
        .expect("task finished")
        .expect("guest joined");
    assert_eq!(view.letters[4][4], hand[0].to_string());
    assert_eq!(view.score, Some(0));
}

#[tokio::test]
async fn test_waiting_on_missing_game() {
    let handler = handler();
    assert_eq!(
        handler.wait_for_update(GUEST, 8).await,
        Err(GameError::GameNotFound(8))
    );
}
