use crate::{ApiError, CurrentUser};

use mb_core::UserId;

use axum::{body::Body, extract::FromRequestParts, http::Request};

async fn extract(request: Request<Body>) -> Result<CurrentUser, ApiError> {
    let (mut parts, _body) = request.into_parts();
    CurrentUser::from_request_parts(&mut parts, &()).await
}

#[tokio::test]
async fn test_extractor_with_valid_header() {
    let request = Request::builder()
        .header("X-User-Id", "42")
        .body(Body::empty())
        .unwrap();

    let result = extract(request).await;

    assert_eq!(result.unwrap().0, UserId(42));
}

#[tokio::test]
async fn test_extractor_trims_whitespace() {
    let request = Request::builder()
        .header("X-User-Id", " 7 ")
        .body(Body::empty())
        .unwrap();

    let result = extract(request).await;

    assert_eq!(result.unwrap().0, UserId(7));
}

#[tokio::test]
async fn test_extractor_missing_header_is_unauthorized() {
    let request = Request::builder().body(Body::empty()).unwrap();

    let result = extract(request).await;

    match result {
        Err(ApiError::Unauthorized { message, .. }) => assert!(message.contains("Missing")),
        other => panic!("Expected Unauthorized, got {:?}", other),
    }
}

#[tokio::test]
async fn test_extractor_non_numeric_header_is_unauthorized() {
    let request = Request::builder()
        .header("X-User-Id", "alice")
        .body(Body::empty())
        .unwrap();

    let result = extract(request).await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_extractor_rejects_non_positive_id() {
    for raw in ["0", "-3"] {
        let request = Request::builder()
            .header("X-User-Id", raw)
            .body(Body::empty())
            .unwrap();

        let result = extract(request).await;

        assert!(
            matches!(result, Err(ApiError::Unauthorized { .. })),
            "{} should be rejected",
            raw
        );
    }
}
