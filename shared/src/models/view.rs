//! Projection of the UI state onto what is drawn on screen
//!
//! Rendering is a pure function of [`UiState`] and whether a file has been
//! picked, so every frontend (terminal, browser) shows the same thing.

use serde::Serialize;

use super::state::UiState;

pub const APP_TITLE: &str = "AI Fashion Advisor";
pub const APP_TAGLINE: &str = "Upload your outfit and get personalized feedback!";
pub const SUBMIT_LABEL: &str = "Get Feedback";
pub const SUBMIT_LABEL_BUSY: &str = "Processing...";
pub const LOADING_TEXT: &str = "Analyzing your outfit...";
pub const NO_FILE_ALERT: &str = "Please upload a file first!";

/// Kinds of result panel, in display order
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Error,
    Feedback,
    Recommendations,
    RemixingSuggestions,
}

impl PanelKind {
    pub fn title(&self) -> &'static str {
        match self {
            PanelKind::Error => "Error",
            PanelKind::Feedback => "Feedback",
            PanelKind::Recommendations => "You might also like",
            PanelKind::RemixingSuggestions => "Outfit Remixing",
        }
    }
}

/// One titled block of text below the upload controls
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Panel {
    pub kind: PanelKind,
    pub title: &'static str,
    pub body: String,
}

impl Panel {
    fn new(kind: PanelKind, body: &str) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Panel {
            kind,
            title: kind.title(),
            body: body.to_string(),
        })
    }
}

/// Everything a frontend needs to draw the upload screen
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ViewModel {
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub loading_indicator: Option<&'static str>,
    pub panels: Vec<Panel>,
}

impl ViewModel {
    pub fn project(state: &UiState, file_selected: bool) -> Self {
        let loading = state.is_loading();

        let panels = match state {
            UiState::Idle | UiState::Loading => Vec::new(),
            UiState::Failed(message) => Panel::new(PanelKind::Error, message).into_iter().collect(),
            UiState::Success(result) => [
                Panel::new(PanelKind::Feedback, &result.feedback),
                Panel::new(PanelKind::Recommendations, &result.recommendations),
                Panel::new(PanelKind::RemixingSuggestions, &result.remixing_suggestions),
            ]
            .into_iter()
            .flatten()
            .collect(),
        };

        ViewModel {
            submit_label: if loading { SUBMIT_LABEL_BUSY } else { SUBMIT_LABEL },
            submit_enabled: file_selected && !loading,
            loading_indicator: loading.then_some(LOADING_TEXT),
            panels,
        }
    }

    pub fn panel(&self, kind: PanelKind) -> Option<&Panel> {
        self.panels.iter().find(|p| p.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisResult;

    fn result(feedback: &str, recommendations: &str, remixing: &str) -> AnalysisResult {
        AnalysisResult {
            feedback: feedback.to_string(),
            recommendations: recommendations.to_string(),
            remixing_suggestions: remixing.to_string(),
        }
    }

    #[test]
    fn test_idle_without_file() {
        let view = ViewModel::project(&UiState::Idle, false);
        assert_eq!(view.submit_label, "Get Feedback");
        assert!(!view.submit_enabled);
        assert!(view.loading_indicator.is_none());
        assert!(view.panels.is_empty());
    }

    #[test]
    fn test_idle_with_file() {
        assert!(ViewModel::project(&UiState::Idle, true).submit_enabled);
    }

    #[test]
    fn test_loading() {
        let view = ViewModel::project(&UiState::Loading, true);
        assert_eq!(view.submit_label, "Processing...");
        assert!(!view.submit_enabled);
        assert_eq!(view.loading_indicator, Some("Analyzing your outfit..."));
        assert!(view.panels.is_empty());
    }

    #[test]
    fn test_failed_shows_only_error() {
        let view = ViewModel::project(&UiState::Failed("Error: 500 - boom".into()), true);
        assert_eq!(view.panels.len(), 1);
        assert_eq!(view.panels[0].kind, PanelKind::Error);
        assert_eq!(view.panels[0].title, "Error");
        assert!(view.submit_enabled);
    }

    #[test]
    fn test_success_panels_in_order() {
        let state = UiState::Success(result("Nice.", "Add a belt.", "Swap shoes."));
        let view = ViewModel::project(&state, true);
        let kinds: Vec<_> = view.panels.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PanelKind::Feedback,
                PanelKind::Recommendations,
                PanelKind::RemixingSuggestions
            ]
        );
        assert_eq!(
            view.panel(PanelKind::Recommendations).map(|p| p.title),
            Some("You might also like")
        );
    }

    #[test]
    fn test_success_skips_empty_panels() {
        let state = UiState::Success(result("Nice.", "", "Swap shoes."));
        let view = ViewModel::project(&state, true);
        assert_eq!(view.panels.len(), 2);
        assert!(view.panel(PanelKind::Recommendations).is_none());
    }
}
