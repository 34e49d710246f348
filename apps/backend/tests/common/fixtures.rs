//! Request bodies used across the API tests.

use serde_json::json;

pub fn create_deck_request(name: &str) -> serde_json::Value {
    json!({ "name": name, "description": "test deck" })
}

pub fn create_item_request(front: &str, back: &str, tags: &[&str]) -> serde_json::Value {
    json!({ "front_text": front, "back_text": back, "tags": tags })
}

pub fn review_request(item_id: i64, correct: bool) -> serde_json::Value {
    json!({ "item_id": item_id, "correct": correct })
}

pub fn start_session_request(deck_id: i64, direction: &str) -> serde_json::Value {
    json!({ "deck_id": deck_id, "direction": direction })
}

pub fn result_request(correct: bool) -> serde_json::Value {
    json!({ "correct": correct })
}
