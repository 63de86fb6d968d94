//! Analysis results returned by the remote service

use serde::{Deserialize, Deserializer, Serialize};

pub const NO_FEEDBACK: &str = "No feedback received";
pub const NO_RECOMMENDATIONS: &str = "No recommendations received";
pub const NO_REMIXING_SUGGESTIONS: &str = "No remixing suggestions received";

/// Body of a successful `POST /upload`
///
/// Every field is optional; the service leaves out whatever it could not
/// produce and sends an empty `weather_recommendations` when no location
/// was attached. A field of the wrong type counts as absent without
/// affecting the others.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub feedback: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub recommendations: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub weather_recommendations: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub remixing_suggestions: Option<String>,
}

impl AnalysisResponse {
    /// Parse a response body, treating anything that is not the expected
    /// JSON object as a response with every field absent
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}

/// What the user sees after a successful analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResult {
    pub feedback: String,
    pub recommendations: String,
    pub remixing_suggestions: String,
}

impl From<AnalysisResponse> for AnalysisResult {
    fn from(r: AnalysisResponse) -> Self {
        let recommendations = combine_recommendations(
            r.recommendations.as_deref(),
            r.weather_recommendations.as_deref(),
        );

        AnalysisResult {
            feedback: or_placeholder(r.feedback, NO_FEEDBACK),
            recommendations,
            remixing_suggestions: or_placeholder(r.remixing_suggestions, NO_REMIXING_SUGGESTIONS),
        }
    }
}

/// Merge outfit and weather recommendations into one panel body
///
/// Weather text, when present, follows the outfit text after a blank line.
/// Without weather text the outfit text is shown as-is, or the placeholder
/// when there is none. Empty strings count as absent.
pub fn combine_recommendations(recommendations: Option<&str>, weather: Option<&str>) -> String {
    let recommendations = recommendations.filter(|s| !s.is_empty());

    match weather.filter(|s| !s.is_empty()) {
        Some(weather) => format!("{}\n\n{}", recommendations.unwrap_or(""), weather),
        None => recommendations.unwrap_or(NO_RECOMMENDATIONS).to_string(),
    }
}

/// Read a string field, mapping any other JSON type to `None`
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    value
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}
