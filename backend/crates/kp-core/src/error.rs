use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid token kind: {value} {location}")]
    InvalidTokenKind {
        value: String,
        location: ErrorLocation,
    },

    #[error("Token store backend error: {message} {location}")]
    Store {
        message: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Create a store backend error from any underlying driver failure
    #[track_caller]
    pub fn store<S: Into<String>>(message: S) -> Self {
        CoreError::Store {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
