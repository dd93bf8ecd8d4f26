use crate::{RoomId, UpdateEvent};

use serde_json::json;

#[test]
fn test_update_event_serializes_camel_case() {
    let event = UpdateEvent::new(RoomId(3), 2, "kim");

    let value = serde_json::to_value(&event).unwrap();

    assert_eq!(
        value,
        json!({ "roomId": 3, "currentOccupancy": 2, "actorUsername": "kim" })
    );
}

#[test]
fn test_system_event_has_empty_actor() {
    let event = UpdateEvent::system(RoomId(3), 0);
    assert!(event.actor_username.is_empty());
}

#[test]
fn test_update_event_missing_actor_defaults_to_empty() {
    let event: UpdateEvent =
        serde_json::from_value(json!({ "roomId": 9, "currentOccupancy": 1 })).unwrap();
    assert_eq!(event.room_id, RoomId(9));
    assert_eq!(event.actor_username, "");
}
