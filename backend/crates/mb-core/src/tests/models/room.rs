use crate::{BoardId, CoreError, Room, RoomId};

use chrono::Utc;

fn room_with(capacity: u32, member_count: u32) -> Room {
    let now = Utc::now();
    Room {
        id: RoomId(1),
        board_id: BoardId(7),
        name: Room::default_name(BoardId(7)),
        capacity,
        member_count,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn test_validate_capacity_accepts_positive() {
    assert_eq!(Room::validate_capacity(1).unwrap(), 1);
    assert_eq!(Room::validate_capacity(30).unwrap(), 30);
}

#[test]
fn test_validate_capacity_rejects_zero_and_negative() {
    assert!(matches!(
        Room::validate_capacity(0),
        Err(CoreError::InvalidCapacity { value: 0, .. })
    ));
    assert!(Room::validate_capacity(-3).is_err());
    assert!(Room::validate_capacity(i64::from(u32::MAX) + 1).is_err());
}

#[test]
fn test_room_is_full_at_capacity() {
    assert!(!room_with(2, 1).is_full());
    assert!(room_with(2, 2).is_full());
}

#[test]
fn test_room_remaining_never_underflows() {
    assert_eq!(room_with(3, 1).remaining(), 2);
    assert_eq!(room_with(3, 5).remaining(), 0);
}

#[test]
fn test_default_name_mentions_board() {
    assert_eq!(Room::default_name(BoardId(42)), "Board 42 chat room");
}
