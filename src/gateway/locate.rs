//! Device geolocation behind a small trait, with timeout and cached-position handling.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::Gateway;
use crate::errors::LocationError;
use crate::models::{Coordinate, Position};

/// Something that can report where the user is.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn current_position(&self) -> Result<Position, LocationError>;
}

/// Reports a configured coordinate, or `Unsupported` when there is none.
#[derive(Debug, Clone, Default)]
pub struct FixedLocator {
    coordinate: Option<Coordinate>,
}

impl FixedLocator {
    pub fn new(coordinate: Option<Coordinate>) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl Locator for FixedLocator {
    async fn current_position(&self) -> Result<Position, LocationError> {
        self.coordinate
            .map(Position::now)
            .ok_or(LocationError::Unsupported)
    }
}

#[derive(Deserialize)]
struct IpLocateResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Approximates the position from the public IP address.
#[derive(Clone)]
pub struct IpLocator {
    client: Client,
    url: String,
}

impl IpLocator {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Locator for IpLocator {
    async fn current_position(&self) -> Result<Position, LocationError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            tracing::warn!("IP geolocation request failed: {}", e);
            LocationError::PositionUnavailable
        })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(LocationError::PermissionDenied)
            }
            status if !status.is_success() => {
                tracing::warn!("IP geolocation returned {}", status);
                return Err(LocationError::PositionUnavailable);
            }
            _ => {}
        }

        let body: IpLocateResponse = response.json().await.map_err(|e| {
            tracing::warn!("IP geolocation response unreadable: {}", e);
            LocationError::PositionUnavailable
        })?;

        match (body.latitude, body.longitude) {
            (Some(lat), Some(lon)) => Ok(Position::now(Coordinate::new(lat, lon))),
            _ => Err(LocationError::PositionUnavailable),
        }
    }
}

/// Serves the last good position while it is younger than `max_age`.
pub struct CachedLocator {
    inner: Box<dyn Locator>,
    max_age: Duration,
    cached: Mutex<Option<Position>>,
}

impl CachedLocator {
    pub fn new(inner: Box<dyn Locator>, max_age: Duration) -> Self {
        Self {
            inner,
            max_age,
            cached: Mutex::new(None),
        }
    }

    fn fresh_cached(&self) -> Option<Position> {
        let cached = self.cached.lock().ok()?;
        (*cached).filter(|p| !p.is_stale(Utc::now(), self.max_age))
    }

    fn remember(&self, position: Position) {
        if let Ok(mut cached) = self.cached.lock() {
            *cached = Some(position);
        }
    }
}

#[async_trait]
impl Locator for CachedLocator {
    async fn current_position(&self) -> Result<Position, LocationError> {
        if let Some(position) = self.fresh_cached() {
            tracing::debug!("Using cached position from {}", position.timestamp);
            return Ok(position);
        }
        let position = self.inner.current_position().await?;
        self.remember(position);
        Ok(position)
    }
}

impl Gateway {
    /// Ask `locator` for the position, giving up after the configured timeout.
    pub async fn locate(&self, locator: &dyn Locator) -> Result<Position, LocationError> {
        locate_within(locator, self.config.locate_timeout).await
    }
}

/// Bounded wait around a single geolocation attempt.
pub async fn locate_within(
    locator: &dyn Locator,
    timeout: Duration,
) -> Result<Position, LocationError> {
    match tokio::time::timeout(timeout, locator.current_position()).await {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingLocator {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Locator for CountingLocator {
        async fn current_position(&self) -> Result<Position, LocationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Position::now(Coordinate::new(40.0, -74.0)))
        }
    }

    struct HangingLocator;

    #[async_trait]
    impl Locator for HangingLocator {
        async fn current_position(&self) -> Result<Position, LocationError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(LocationError::PositionUnavailable)
        }
    }

    #[tokio::test]
    async fn test_fixed_locator_without_position_is_unsupported() {
        let result = FixedLocator::default().current_position().await;
        assert_eq!(result.unwrap_err(), LocationError::Unsupported);
    }

    #[tokio::test]
    async fn test_cached_locator_reuses_fresh_position() {
        let calls = Arc::new(AtomicUsize::new(0));
        let locator = CachedLocator::new(
            Box::new(CountingLocator {
                calls: calls.clone(),
            }),
            Duration::from_secs(300),
        );

        locator.current_position().await.unwrap();
        locator.current_position().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cached_locator_with_zero_age_always_asks() {
        let calls = Arc::new(AtomicUsize::new(0));
        let locator = CachedLocator::new(
            Box::new(CountingLocator {
                calls: calls.clone(),
            }),
            Duration::ZERO,
        );

        locator.current_position().await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        locator.current_position().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_locate_times_out() {
        let result = locate_within(&HangingLocator, Duration::from_secs(10)).await;
        assert_eq!(result.unwrap_err(), LocationError::Timeout);
    }
}
