//! Analysis Service Client
//!
//! Client for the remote outfit analysis API: a liveness probe on `/`, the
//! multipart `/upload` endpoint, and the auxiliary `/weather` lookup.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use shared::{AnalysisResponse, Coordinates, RequestFailure, UploadRequest};

use crate::config::ServiceConfig;
use crate::error::{classify_transport_error, ServiceResult};

/// The calls the upload controller makes to the analysis service
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Hit the service root and return its body
    async fn check_status(&self) -> ServiceResult<String>;

    /// Send an outfit photo for analysis
    async fn upload(&self, request: &UploadRequest) -> ServiceResult<AnalysisResponse>;
}

/// HTTP client for the analysis service
#[derive(Clone)]
pub struct AnalysisServiceClient {
    base_url: String,
    http_client: Client,
    upload_timeout: Duration,
    probe_timeout: Duration,
}

impl AnalysisServiceClient {
    /// Create a new analysis service client
    pub fn new(config: &ServiceConfig) -> ServiceResult<Self> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| RequestFailure::RequestSetup(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
            upload_timeout: config.upload_timeout(),
            probe_timeout: config.probe_timeout(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build the multipart body: the `file` part, then the coordinate
    /// fields when a location is known
    fn build_form(request: &UploadRequest) -> ServiceResult<Form> {
        let part = Part::bytes(request.image.bytes.clone())
            .file_name(request.image.file_name.clone())
            .mime_str(&request.image.mime_type)
            .map_err(|e| RequestFailure::RequestSetup(e.to_string()))?;

        let form = request
            .form_fields()
            .into_iter()
            .fold(Form::new().part("file", part), |form, (name, value)| {
                form.text(name, value)
            });

        Ok(form)
    }

    /// Fetch current weather for a position from the service's `/weather`
    /// endpoint, returned as raw JSON
    pub async fn weather(&self, coords: Coordinates) -> ServiceResult<serde_json::Value> {
        let response = self
            .http_client
            .get(self.url("/weather"))
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ])
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(RequestFailure::from_status(status.as_u16(), &body));
        }

        // A non-JSON body is passed through as a plain string
        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }
}

#[async_trait]
impl AnalysisApi for AnalysisServiceClient {
    async fn check_status(&self) -> ServiceResult<String> {
        let response = self
            .http_client
            .get(self.url("/"))
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(RequestFailure::from_status(status.as_u16(), &body));
        }

        Ok(body)
    }

    async fn upload(&self, request: &UploadRequest) -> ServiceResult<AnalysisResponse> {
        let form = Self::build_form(request)?;

        tracing::debug!(
            file_name = %request.image.file_name,
            bytes = request.image.len(),
            with_location = request.location.is_some(),
            "POST {}/upload",
            self.base_url
        );

        let response = self
            .http_client
            .post(self.url("/upload"))
            .timeout(self.upload_timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Analysis service returned an error");
            return Err(RequestFailure::from_status(status.as_u16(), &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        Ok(AnalysisResponse::from_body(&body))
    }
}
