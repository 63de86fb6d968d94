//! Fashion Advisor client
//!
//! Uploads an outfit photo to the remote analysis service and renders the
//! feedback, recommendations and remixing suggestions it returns.

pub mod config;
pub mod error;
pub mod external;
pub mod render;
pub mod services;

pub use config::Config;
pub use error::{LocationError, ServiceResult, SubmitRejected};
pub use external::{AnalysisApi, AnalysisServiceClient};
pub use services::UploadController;
