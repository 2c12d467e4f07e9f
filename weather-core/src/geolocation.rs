use async_trait::async_trait;

use crate::{error::WeatherError, model::Coordinates};

/// Source of the user's current position.
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, WeatherError>;
}

/// Reports a position known up front (configured home, or coordinates from the command line).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedGeolocator {
    position: Option<Coordinates>,
}

impl FixedGeolocator {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinates, WeatherError> {
        self.position.ok_or_else(|| {
            WeatherError::geolocation_denied("no position configured; set [home] or pass --lat/--lon")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_position_is_reported() {
        let pos = Coordinates { latitude: 1.5, longitude: -2.0 };
        assert_eq!(FixedGeolocator::new(Some(pos)).locate().await, Ok(pos));
    }

    #[tokio::test]
    async fn missing_position_is_denied() {
        let err = FixedGeolocator::default().locate().await.unwrap_err();
        assert!(matches!(err, WeatherError::GeolocationDenied { .. }));
    }
}
