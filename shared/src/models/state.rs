//! The upload screen's state machine

use serde::{Deserialize, Serialize};

use super::analysis::AnalysisResult;
use super::failure::RequestFailure;

/// Everything the upload screen can be showing
///
/// `Idle → Loading → Success | Failed`, and any submit goes back to
/// `Loading`, dropping the previous outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success(AnalysisResult),
    Failed(String),
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            UiState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UiState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Final state for a finished request
    pub fn settle(outcome: Result<AnalysisResult, RequestFailure>) -> Self {
        match outcome {
            Ok(result) => UiState::Success(result),
            Err(failure) => UiState::Failed(failure.user_message()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::Loading => "loading",
            UiState::Success(_) => "success",
            UiState::Failed(_) => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(UiState::default(), UiState::Idle);
        assert!(!UiState::default().is_loading());
    }

    #[test]
    fn test_settle_failure() {
        let state = UiState::settle(Err(RequestFailure::NoResponse));
        assert!(state.error_message().is_some());
        assert!(state.result().is_none());
        assert_eq!(state.name(), "failed");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(UiState::Failed("Error: x".into())).unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["data"], "Error: x");

        let json = serde_json::to_value(UiState::Loading).unwrap();
        assert_eq!(json["state"], "loading");
    }
}
