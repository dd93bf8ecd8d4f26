use crate::ApiError;

use mb_core::{BoardId, RoomId, UserId};
use mb_db::DbError;
use mb_live::LiveError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

fn location() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

#[tokio::test]
async fn test_room_not_found_returns_404_with_code() {
    let error: ApiError = LiveError::room_not_found("room#9").into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "ROOM_NOT_FOUND");
    assert_eq!(json["error"]["message"], "Room not found: room#9");
}

#[tokio::test]
async fn test_capacity_exceeded_returns_409() {
    let error: ApiError = LiveError::CapacityExceeded {
        room_id: RoomId(1),
        capacity: 4,
        location: location(),
    }
    .into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "CAPACITY_EXCEEDED");
    assert_eq!(json["error"]["message"], "Room is full (capacity 4)");
    assert!(json["error"].get("retryable").is_none());
}

#[tokio::test]
async fn test_duplicate_join_and_not_member_return_409() {
    let duplicate: ApiError = LiveError::DuplicateJoin {
        room_id: RoomId(1),
        user_id: UserId(2),
        location: location(),
    }
    .into();
    let not_member: ApiError = LiveError::NotMember {
        room_id: RoomId(1),
        user_id: UserId(2),
        location: location(),
    }
    .into();

    let (duplicate_status, duplicate_json) = body_json(duplicate).await;
    let (not_member_status, not_member_json) = body_json(not_member).await;

    assert_eq!(duplicate_status, StatusCode::CONFLICT);
    assert_eq!(duplicate_json["error"]["code"], "DUPLICATE_JOIN");
    assert_eq!(not_member_status, StatusCode::CONFLICT);
    assert_eq!(not_member_json["error"]["code"], "NOT_MEMBER");
}

#[tokio::test]
async fn test_room_already_exists_returns_409() {
    let error: ApiError = LiveError::RoomAlreadyExists {
        board_id: BoardId(3),
        location: location(),
    }
    .into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "ROOM_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_invalid_capacity_returns_400_with_field() {
    let error: ApiError = LiveError::InvalidCapacity {
        value: 0,
        location: location(),
    }
    .into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "INVALID_CAPACITY");
    assert_eq!(json["error"]["field"], "capacity");
}

#[tokio::test]
async fn test_persistence_failure_returns_503_and_is_retryable() {
    let error: ApiError = LiveError::PersistenceFailure {
        source: DbError::Timeout {
            timeout_ms: 5000,
            location: location(),
        },
        location: location(),
    }
    .into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], "PERSISTENCE_FAILURE");
    assert_eq!(json["error"]["retryable"], true);
}

#[tokio::test]
async fn test_broadcast_unavailable_returns_503_not_retryable() {
    let error: ApiError = LiveError::BroadcastUnavailable {
        room_id: RoomId(1),
        location: location(),
    }
    .into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], "BROADCAST_UNAVAILABLE");
    assert!(json["error"].get("retryable").is_none());
}

#[tokio::test]
async fn test_unauthorized_returns_401() {
    let error = ApiError::Unauthorized {
        message: "Missing X-User-Id header".into(),
        location: location(),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let error = ApiError::Internal {
        message: "Database operation failed".into(),
        location: location(),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert!(json["error"].get("field").is_none());
}

#[test]
fn test_client_message_hides_error_location() {
    let error: ApiError = LiveError::room_not_found("board#5").into();

    match error {
        ApiError::NotFound { message, .. } => {
            assert_eq!(message, "Room not found: board#5");
            assert!(!message.contains(".rs"));
        }
        _ => panic!("Expected NotFound error"),
    }
}
