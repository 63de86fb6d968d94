//! Ways an upload can fail, and the message each one shows the user

use serde::Deserialize;
use thiserror::Error;

/// Shown when the server gave a non-2xx status without an `error` field
pub const GENERIC_SERVER_ERROR: &str = "Something went wrong";

/// Shown when a request went out and nothing came back
pub const NO_RESPONSE_MESSAGE: &str =
    "Error: No response received from the server. It might be down or overloaded. Please try again later.";

/// Failure of a request to the analysis service
///
/// The `Display` output is the exact text of the error panel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// The server answered with a status outside 2xx
    #[error("Error: {status} - {}", .message.as_deref().unwrap_or(GENERIC_SERVER_ERROR))]
    ServerResponded {
        status: u16,
        message: Option<String>,
    },

    /// The request was sent but no response arrived (unreachable, reset, timed out)
    #[error("{}", NO_RESPONSE_MESSAGE)]
    NoResponse,

    /// The request could not be built or dispatched at all
    #[error("Error: {0}")]
    RequestSetup(String),
}

/// Error body sent with a non-2xx status
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl RequestFailure {
    /// Build a server failure from a status and raw body
    ///
    /// The message comes from the body's `error` field; an empty field,
    /// a missing field or a body that is not JSON all use the generic text.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .unwrap_or_default()
            .error
            .filter(|m| !m.is_empty());

        RequestFailure::ServerResponded { status, message }
    }

    /// The text shown in the error panel
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Short machine-readable name for logs
    pub fn code(&self) -> &'static str {
        match self {
            RequestFailure::ServerResponded { .. } => "SERVER_RESPONDED",
            RequestFailure::NoResponse => "NO_RESPONSE",
            RequestFailure::RequestSetup(_) => "REQUEST_SETUP",
        }
    }
}
