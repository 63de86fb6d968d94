//! Upload controller
//!
//! Owns the upload screen's state: the picked file and the [`UiState`]
//! machine. Each submit attaches a best-effort location, posts the photo to
//! the analysis service and settles into `Success` or `Failed`.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use shared::{AnalysisResult, ImageFile, RequestFailure, UiState, UploadRequest, ViewModel};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{ServiceResult, SubmitRejected};
use crate::external::{AnalysisApi, AnalysisServiceClient};
use crate::services::geolocation::{locate_best_effort, provider_from_config, LocationProvider};

/// Controller behind the upload screen
pub struct UploadController {
    api: Arc<dyn AnalysisApi>,
    location: Arc<dyn LocationProvider>,
    location_timeout: Duration,
    file: Option<ImageFile>,
    state: watch::Sender<UiState>,
}

impl UploadController {
    pub fn new(
        api: Arc<dyn AnalysisApi>,
        location: Arc<dyn LocationProvider>,
        location_timeout: Duration,
    ) -> Self {
        let (state, _) = watch::channel(UiState::Idle);

        Self {
            api,
            location,
            location_timeout,
            file: None,
            state,
        }
    }

    /// Wire the controller to the configured service and location provider
    pub fn from_config(config: &Config) -> ServiceResult<Self> {
        let api = AnalysisServiceClient::new(&config.service)?;
        let location = provider_from_config(&config.location);

        Ok(Self::new(Arc::new(api), location, config.location.timeout()))
    }

    /// Remember the picked image; nothing is sent until [`submit`](Self::submit)
    pub fn select_file(&mut self, image: ImageFile) {
        tracing::debug!(
            file_name = %image.file_name,
            mime_type = %image.mime_type,
            bytes = image.len(),
            "File selected"
        );
        self.file = Some(image);
    }

    pub fn selected_file(&self) -> Option<&ImageFile> {
        self.file.as_ref()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Follow state transitions, including `Loading` while a submit runs
    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    pub fn view(&self) -> ViewModel {
        ViewModel::project(&self.state.borrow(), self.file.is_some())
    }

    /// Analyse the selected image
    ///
    /// Refused without touching state when no file is selected. Otherwise
    /// the previous outcome is cleared, and the returned state is the one the
    /// submit settled into.
    pub async fn submit(&mut self) -> Result<UiState, SubmitRejected> {
        let image = match &self.file {
            Some(image) => image.clone(),
            None => {
                tracing::warn!("Submit without a selected file");
                return Err(SubmitRejected::NoFileSelected);
            }
        };

        let submission_id = Uuid::new_v4();
        let span = tracing::info_span!("submit", %submission_id, file_name = %image.file_name);

        let guard = LoadingGuard::enter(&self.state);
        let outcome = self.analyze(image).instrument(span).await;

        if let Err(failure) = &outcome {
            tracing::error!(%submission_id, code = failure.code(), "Upload failed: {}", failure);
        }

        let settled = UiState::settle(outcome);
        guard.settle(settled.clone());

        Ok(settled)
    }

    async fn analyze(&self, image: ImageFile) -> ServiceResult<AnalysisResult> {
        let location = locate_best_effort(self.location.as_ref(), self.location_timeout).await;
        let request = UploadRequest::new(image, location);

        let response = self.api.upload(&request).await?;
        tracing::info!("Analysis received");

        Ok(response.into())
    }

    /// Probe the service root once; the outcome is only logged
    pub async fn check_backend_status(&self) {
        log_backend_status(self.api.as_ref()).await;
    }

    /// Run [`check_backend_status`](Self::check_backend_status) in the background
    pub fn spawn_status_check(&self) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        tokio::spawn(async move { log_backend_status(api.as_ref()).await })
    }
}

async fn log_backend_status(api: &dyn AnalysisApi) {
    match api.check_status().await {
        Ok(body) => tracing::info!("Backend status: {}", body.trim()),
        Err(e) => tracing::warn!("Backend check failed, but this is not critical: {}", e),
    }
}

/// Holds the state at `Loading` for the length of one submit
///
/// Settling replaces `Loading` with the outcome. If the submit is dropped
/// before it settles, the state goes back to `Idle`.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<UiState>,
    settled: bool,
}

impl<'a> LoadingGuard<'a> {
    fn enter(state: &'a watch::Sender<UiState>) -> Self {
        state.send_replace(UiState::Loading);
        Self {
            state,
            settled: false,
        }
    }

    fn settle(mut self, next: UiState) {
        self.state.send_replace(next);
        self.settled = true;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.state.send_replace(UiState::Idle);
        }
    }
}

/// Read an image from disk for [`UploadController::select_file`]
pub async fn read_image(path: &Path) -> ServiceResult<ImageFile> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        RequestFailure::RequestSetup(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Ok(ImageFile::new(file_name, bytes))
}
