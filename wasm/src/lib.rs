//! WebAssembly module for the Fashion Advisor client
//!
//! Lets the browser page reuse the same contract as the native client:
//! - Mapping an `/upload` response into panel text
//! - Error panel messages
//! - Projecting UI state onto the screen
//! - The file picker's image filter

use shared::{AnalysisResponse, AnalysisResult, RequestFailure, UiState, ViewModel};
use wasm_bindgen::prelude::*;
use web_sys::console;

/// Join outfit and weather recommendations for the recommendations panel
#[wasm_bindgen(js_name = combineRecommendations)]
pub fn combine_recommendations(recommendations: Option<String>, weather: Option<String>) -> String {
    shared::combine_recommendations(recommendations.as_deref(), weather.as_deref())
}

/// Map a successful `/upload` body into the three panel texts (as JSON)
#[wasm_bindgen(js_name = analysisResult)]
pub fn analysis_result(body: &str) -> Result<String, JsValue> {
    let result = AnalysisResult::from(AnalysisResponse::from_body(body));
    serde_json::to_string(&result).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Error panel text for a non-2xx response
#[wasm_bindgen(js_name = serverErrorMessage)]
pub fn server_error_message(status: u16, body: &str) -> String {
    RequestFailure::from_status(status, body).user_message()
}

/// Error panel text when the request got no response
#[wasm_bindgen(js_name = noResponseMessage)]
pub fn no_response_message() -> String {
    RequestFailure::NoResponse.user_message()
}

/// Error panel text when the request could not be sent
#[wasm_bindgen(js_name = setupErrorMessage)]
pub fn setup_error_message(message: &str) -> String {
    RequestFailure::RequestSetup(message.to_string()).user_message()
}

/// Project a serialized `UiState` onto a serialized `ViewModel`
#[wasm_bindgen(js_name = renderView)]
pub fn render_view(state_json: &str, file_selected: bool) -> Result<String, JsValue> {
    let state: UiState = serde_json::from_str(state_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid state JSON: {}", e)))?;

    let view = ViewModel::project(&state, file_selected);
    serde_json::to_string(&view).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Whether the picker's `image/*` filter accepts this file name
#[wasm_bindgen(js_name = isImageFile)]
pub fn is_image_file(file_name: &str) -> bool {
    shared::is_image_file(file_name)
}

/// Log the outcome of the liveness probe to the browser console
#[wasm_bindgen(js_name = logBackendStatus)]
pub fn log_backend_status(ok: bool, detail: &str) {
    if ok {
        console::log_1(&format!("Backend status: {}", detail).into());
    } else {
        console::warn_1(&format!("Backend check failed, but this is not critical: {}", detail).into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_recommendations() {
        assert_eq!(
            combine_recommendations(Some("Wear boots.".into()), Some("It's snowing.".into())),
            "Wear boots.\n\nIt's snowing."
        );
        assert_eq!(
            combine_recommendations(None, None),
            "No recommendations received"
        );
    }

    #[test]
    fn test_analysis_result() {
        let json = analysis_result(r#"{"feedback":"Bold."}"#).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["feedback"], "Bold.");
        assert_eq!(value["remixing_suggestions"], "No remixing suggestions received");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            server_error_message(422, r#"{"error":"bad image"}"#),
            "Error: 422 - bad image"
        );
        assert!(no_response_message().contains("No response received from the server"));
        assert_eq!(setup_error_message("Network Error"), "Error: Network Error");
    }

    #[test]
    fn test_render_view() {
        let json = render_view(r#"{"state":"loading"}"#, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["submit_label"], "Processing...");
        assert_eq!(value["submit_enabled"], false);
        assert_eq!(value["panels"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_render_view_failed() {
        let json = render_view(r#"{"state":"failed","data":"Error: 500 - x"}"#, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["panels"][0]["kind"], "error");
        assert_eq!(value["panels"][0]["body"], "Error: 500 - x");
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file("me.jpeg"));
        assert!(!is_image_file("me.txt"));
    }
}
