//! Error handling for the Fashion Advisor client
//!
//! Upload failures all end up as a [`RequestFailure`] whose text is shown in
//! the error panel. Location and probe errors never reach the user.

use shared::{RequestFailure, NO_FILE_ALERT};
use thiserror::Error;

/// Result of a call to the analysis service
pub type ServiceResult<T> = Result<T, RequestFailure>;

/// Sort a transport error into the user-facing taxonomy
///
/// Only errors raised while building the request count as setup errors;
/// anything after dispatch (connect, timeout, reset, body) means no usable
/// response came back.
pub fn classify_transport_error(err: &reqwest::Error) -> RequestFailure {
    if err.is_builder() {
        return RequestFailure::RequestSetup(err.to_string());
    }

    tracing::debug!(
        timeout = err.is_timeout(),
        connect = err.is_connect(),
        "No response received: {}",
        err
    );
    RequestFailure::NoResponse
}

/// Why a submit was refused before anything happened
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("{}", NO_FILE_ALERT)]
    NoFileSelected,
}

/// Why a location lookup produced nothing
#[derive(Error, Debug)]
pub enum LocationError {
    #[error("Location lookup is not supported")]
    Unsupported,

    #[error("Location permission denied")]
    Denied,

    #[error("Invalid coordinates: {0}")]
    Invalid(&'static str),

    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for LocationError {
    fn from(err: reqwest::Error) -> Self {
        LocationError::Unavailable(err.to_string())
    }
}
