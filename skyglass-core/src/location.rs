use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::Coordinates;

/// Host geolocation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Position unavailable")]
    PositionUnavailable,
}

/// Source of the device's current position.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Geolocator backed by a fixed, user-configured position.
#[derive(Debug, Clone)]
pub struct ConfiguredLocation {
    enabled: bool,
    position: Option<Coordinates>,
}

impl ConfiguredLocation {
    pub fn new(enabled: bool, position: Option<Coordinates>) -> Self {
        Self { enabled, position }
    }

    /// A geolocator that always reports the capability as denied.
    pub fn disabled() -> Self {
        Self::new(false, None)
    }
}

#[async_trait]
impl Geolocator for ConfiguredLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        if !self.enabled {
            return Err(LocationError::PermissionDenied);
        }

        self.position
            .filter(Coordinates::is_valid)
            .ok_or(LocationError::PositionUnavailable)
    }
}
