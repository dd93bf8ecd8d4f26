pub mod membership_repository;
pub mod room_repository;
pub mod user_repository;

use crate::{DbError, Result as DbErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;

#[track_caller]
pub(crate) fn timestamp(value: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(value, 0).ok_or_else(|| DbError::Initialization {
        message: format!("Invalid timestamp in {}", column),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[track_caller]
pub(crate) fn non_negative(value: i64, column: &str) -> DbErrorResult<u32> {
    u32::try_from(value).map_err(|_| DbError::Initialization {
        message: format!("Out of range value {} in {}", value, column),
        location: ErrorLocation::from(Location::caller()),
    })
}
