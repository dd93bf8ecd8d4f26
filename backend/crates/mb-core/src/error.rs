use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid room capacity: {value} {location}")]
    InvalidCapacity {
        value: i64,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
