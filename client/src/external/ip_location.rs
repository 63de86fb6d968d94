//! IP geolocation client
//!
//! Approximate position lookup for machines with no positioning hardware.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use shared::Coordinates;

use crate::error::LocationError;

/// Client for an IP geolocation endpoint
#[derive(Clone)]
pub struct IpLocationClient {
    endpoint: String,
    http_client: Client,
}

/// Position as reported by the lookup service
///
/// Accepts both the `latitude`/`longitude` and the `lat`/`lon` spellings.
#[derive(Debug, Deserialize)]
struct IpLocationResponse {
    #[serde(alias = "lat")]
    latitude: Option<f64>,
    #[serde(alias = "lon")]
    longitude: Option<f64>,
}

impl IpLocationClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, LocationError> {
        let http_client = Client::builder().build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            http_client,
        })
    }

    /// Look up the caller's approximate position
    ///
    /// A 401 or 403 from the endpoint means the lookup was refused.
    pub async fn locate(&self) -> Result<Coordinates, LocationError> {
        let response = self.http_client.get(&self.endpoint).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LocationError::Denied);
        }
        if !status.is_success() {
            return Err(LocationError::Unavailable(format!(
                "lookup returned {}",
                status
            )));
        }

        let body: IpLocationResponse = response.json().await?;
        match (body.latitude, body.longitude) {
            (Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(LocationError::Unavailable(
                "lookup response had no coordinates".into(),
            )),
        }
    }
}
