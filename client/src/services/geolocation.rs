//! Best-effort location lookup
//!
//! A submit never waits on location for longer than its timeout and never
//! fails because of it: every error path collapses to "no location".

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use shared::Coordinates;

use crate::config::{LocationConfig, LocationSource};
use crate::error::LocationError;
use crate::external::IpLocationClient;

/// Source of the user's current position
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, LocationError>;
    fn name(&self) -> &'static str;
}

/// Provider for environments with no way to get a position
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Provider that always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

#[async_trait]
impl LocationProvider for IpLocationClient {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        IpLocationClient::locate(self).await
    }

    fn name(&self) -> &'static str {
        "ip"
    }
}

/// Build the provider selected in configuration
///
/// A provider that cannot be set up degrades to [`NoLocation`].
pub fn provider_from_config(config: &LocationConfig) -> Arc<dyn LocationProvider> {
    match config.provider {
        LocationSource::None => Arc::new(NoLocation),
        LocationSource::Fixed => match config.fixed() {
            Some(coords) => Arc::new(FixedLocation(coords)),
            None => {
                tracing::warn!("Fixed location provider without coordinates, using none");
                Arc::new(NoLocation)
            }
        },
        LocationSource::Ip => match IpLocationClient::new(config.endpoint.clone()) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                tracing::warn!("IP location provider unavailable, using none: {}", e);
                Arc::new(NoLocation)
            }
        },
    }
}

/// Ask the provider for a position, giving up after `timeout`
///
/// Returns `None` on any error, on timeout, and for coordinates that are
/// not on the globe.
pub async fn locate_best_effort(
    provider: &dyn LocationProvider,
    timeout: Duration,
) -> Option<Coordinates> {
    let result = match tokio::time::timeout(timeout, provider.locate()).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                provider = provider.name(),
                timeout_ms = timeout.as_millis() as u64,
                "Location lookup timed out, continuing without location"
            );
            return None;
        }
    };

    match result.and_then(|coords| {
        coords.validate().map_err(LocationError::Invalid)?;
        Ok(coords)
    }) {
        Ok(coords) => {
            tracing::debug!(
                provider = provider.name(),
                latitude = coords.latitude,
                longitude = coords.longitude,
                "Location acquired"
            );
            Some(coords)
        }
        Err(e) => {
            tracing::warn!(
                provider = provider.name(),
                "Location error, continuing without location: {}",
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Denied;

    #[async_trait]
    impl LocationProvider for Denied {
        async fn locate(&self) -> Result<Coordinates, LocationError> {
            Err(LocationError::Denied)
        }

        fn name(&self) -> &'static str {
            "denied"
        }
    }

    struct Stalled;

    #[async_trait]
    impl LocationProvider for Stalled {
        async fn locate(&self) -> Result<Coordinates, LocationError> {
            std::future::pending::<Result<Coordinates, LocationError>>().await
        }

        fn name(&self) -> &'static str {
            "stalled"
        }
    }

    #[tokio::test]
    async fn test_fixed_location() {
        let coords = Coordinates::new(18.7883, 98.9853);
        let found = locate_best_effort(&FixedLocation(coords), Duration::from_secs(1)).await;
        assert_eq!(found, Some(coords));
    }

    #[tokio::test]
    async fn test_unsupported_gives_none() {
        assert_eq!(locate_best_effort(&NoLocation, Duration::from_secs(1)).await, None);
    }

    #[tokio::test]
    async fn test_denied_gives_none() {
        assert_eq!(locate_best_effort(&Denied, Duration::from_secs(1)).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_gives_none() {
        assert_eq!(locate_best_effort(&Stalled, Duration::from_secs(10)).await, None);
    }

    #[tokio::test]
    async fn test_off_globe_coordinates_dropped() {
        let provider = FixedLocation(Coordinates::new(123.0, 0.0));
        assert_eq!(locate_best_effort(&provider, Duration::from_secs(1)).await, None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_only_on_globe_positions_attach(
            lat in -200.0f64..200.0,
            lon in -400.0f64..400.0,
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .unwrap();
            let coords = Coordinates::new(lat, lon);

            let found = runtime.block_on(locate_best_effort(
                &FixedLocation(coords),
                Duration::from_secs(1),
            ));

            prop_assert_eq!(found.is_some(), coords.validate().is_ok());
            if let Some(found) = found {
                prop_assert_eq!(found, coords);
            }
        }
    }

    #[test]
    fn test_provider_from_config() {
        let mut config = LocationConfig::default();
        assert_eq!(provider_from_config(&config).name(), "none");

        config.provider = LocationSource::Fixed;
        assert_eq!(provider_from_config(&config).name(), "none");

        config.latitude = Some(1.0);
        config.longitude = Some(2.0);
        assert_eq!(provider_from_config(&config).name(), "fixed");
    }
}
