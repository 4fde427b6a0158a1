//! Test utilities for building wire-format StartGG payloads.
//!
//! Used by the unit tests and the integration suite to stock mock servers
//! with realistic GraphQL response bodies.

use serde_json::{Value, json};

/// A fully valid raw set node with two seeded slots.
pub fn set_node(id: &str, round: i64) -> Value {
    json!({
        "id": id,
        "round": round,
        "wPlacement": 1,
        "winnerId": null,
        "phaseGroup": {"id": "pg-1", "phase": {"phaseOrder": 1}},
        "slots": [
            {
                "prereqId": "10",
                "prereqType": "seed",
                "seed": {"seedNum": 1},
                "entrant": {"name": "Player One"},
                "standing": {"score": {"value": 0}}
            },
            {
                "prereqId": "11",
                "prereqType": "seed",
                "seed": {"seedNum": 2},
                "entrant": {"name": "Player Two"},
                "standing": {"score": {"value": null}}
            }
        ]
    })
}

/// A raw set node whose slots are both byes. Never materializes as a
/// [`crate::sync::MatchSet`].
pub fn bye_only_set_node(id: &str) -> Value {
    json!({
        "id": id,
        "round": 1,
        "wPlacement": 1,
        "winnerId": null,
        "phaseGroup": {"id": "pg-1", "phase": {"phaseOrder": 1}},
        "slots": [
            {"prereqId": null, "prereqType": "bye"},
            {"prereqId": null, "prereqType": "bye"}
        ]
    })
}

/// One page of the set-page query response.
pub fn sets_page_body(total_pages: u64, nodes: Vec<Value>) -> Value {
    json!({
        "data": {
            "event": {
                "sets": {
                    "pageInfo": {"totalPages": total_pages},
                    "nodes": nodes
                }
            }
        }
    })
}

/// The current-user tournaments response, one node per name.
pub fn tournaments_body(names: &[&str]) -> Value {
    let nodes: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| json!({"id": 1000 + i, "name": name}))
        .collect();
    json!({
        "data": {
            "currentUser": {
                "id": 77,
                "slug": "user/tester",
                "name": "Test User",
                "tournaments": {"nodes": nodes}
            }
        }
    })
}

/// The tournament events response, one event per name.
pub fn events_body(names: &[&str]) -> Value {
    let events: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| json!({"id": 2000 + i, "name": name}))
        .collect();
    json!({"data": {"tournament": {"events": events}}})
}
