//! Axum extractor for the caller's identity

use crate::ApiError;

use mb_core::UserId;

use std::future::Future;
use std::panic::Location;

use axum::{extract::FromRequestParts, http::request::Parts};
use error_location::ErrorLocation;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// The authenticated caller.
///
/// Identity is established upstream; this only reads the integer user id
/// the identity layer forwards in the `X-User-Id` header.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let location = ErrorLocation::from(Location::caller());
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .map(|value| value.to_str().map(str::trim));

        async move {
            let raw = match header {
                Some(Ok(raw)) => raw,
                Some(Err(_)) => {
                    return Err(ApiError::Unauthorized {
                        message: format!("{} header is not valid text", USER_ID_HEADER),
                        location,
                    });
                }
                None => {
                    return Err(ApiError::Unauthorized {
                        message: format!("Missing {} header", USER_ID_HEADER),
                        location,
                    });
                }
            };

            match raw.parse::<i64>() {
                Ok(id) if id > 0 => {
                    log::debug!("Request made by user {}", id);
                    Ok(CurrentUser(UserId(id)))
                }
                _ => {
                    log::warn!("Invalid user id in {} header: {}", USER_ID_HEADER, raw);
                    Err(ApiError::Unauthorized {
                        message: format!("Invalid {} header", USER_ID_HEADER),
                        location,
                    })
                }
            }
        }
    }
}
