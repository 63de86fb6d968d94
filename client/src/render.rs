//! Terminal rendering of the upload screen

use std::fmt::Write;

use shared::{UiState, ViewModel, APP_TAGLINE, APP_TITLE};

pub fn header() -> String {
    format!("{}\n{}\n", APP_TITLE, APP_TAGLINE)
}

/// What a submit prints before it starts waiting on the service
pub fn loading() -> String {
    render(&ViewModel::project(&UiState::Loading, true))
}

/// Render a view as plain text, one block per panel
///
/// Panel bodies keep their line breaks, so the blank line between outfit
/// and weather recommendations survives.
pub fn render(view: &ViewModel) -> String {
    let mut out = String::new();

    if let Some(indicator) = view.loading_indicator {
        let _ = writeln!(out, "{}", indicator);
    }

    for panel in &view.panels {
        let _ = writeln!(out, "\n== {} ==", panel.title);
        let _ = writeln!(out, "{}", panel.body);
    }

    out
}
