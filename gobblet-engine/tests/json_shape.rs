//! JSON shape of what a presentation layer receives.

use gobblet_engine::{FirstLegalPolicy, GameEngine, Owner, Piece, Pos};
use serde_json::json;

#[test]
fn test_event_json() {
    let mut engine = GameEngine::new(FirstLegalPolicy);
    engine.start(Owner::Player).unwrap();

    let piece = Piece::new(Owner::Player, 4).unwrap();
    let event = engine.select(piece);
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(
        value,
        json!({
            "state": { "state": "player_selecting", "value": { "owner": "player", "id": 4 } },
            "status": null,
            "outcome": null,
            "applied": [],
            "rejection": null,
        })
    );

    let event = engine.act_on_cell(4).unwrap();
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["state"], json!({ "state": "player_idle" }));
    assert_eq!(value["status"], json!("PlayerTurn"));
    assert_eq!(
        value["applied"],
        json!([
            ["player", { "kind": "place", "piece": { "owner": "player", "id": 4 }, "to": 4 }],
            ["opponent", { "kind": "place", "piece": { "owner": "opponent", "id": 0 }, "to": 0 }],
        ])
    );
}

#[test]
fn test_board_snapshot_json() {
    let mut engine = GameEngine::new(FirstLegalPolicy);
    engine.start(Owner::Opponent).unwrap();

    let board = engine.current_board_snapshot();
    let value = serde_json::to_value(board).unwrap();
    let cells = value["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 9);
    // Cell 0: opponent small in slot 0, slots 1 and 2 empty
    assert_eq!(cells[0], json!([{ "owner": "opponent", "id": 0 }, null, null]));
    assert_eq!(cells[Pos::new(8).unwrap().index()], json!([null, null, null]));
}

#[test]
fn test_rejection_json() {
    let mut engine = GameEngine::new(FirstLegalPolicy);
    engine.start(Owner::Player).unwrap();

    let event = engine.act_on_cell(3).unwrap();
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["rejection"], json!({ "NothingToSelect": 3 }));
    assert_eq!(event.rejection.unwrap().to_string(), "no piece of yours to select at cell 3");
}
