//! External API integrations

pub mod analysis_service;
pub mod ip_location;

pub use analysis_service::{AnalysisApi, AnalysisServiceClient};
pub use ip_location::IpLocationClient;
