//! Device location. There is no portable OS API for this, so the coordinates
//! come from configuration; a missing section behaves like a platform
//! without location support.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{WeatherError, config::DeviceLocationConfig, model::Coordinates};

/// Display name used for coordinates that came from the device.
pub const MY_LOCATION: &str = "My Location";

#[async_trait]
pub trait DeviceLocator: Send + Sync + Debug {
    /// Fails with `PermissionDenied` or `Unsupported`.
    async fn locate(&self) -> Result<Coordinates, WeatherError>;
}

#[derive(Debug, Clone, Default)]
pub struct UnsupportedLocator;

#[async_trait]
impl DeviceLocator for UnsupportedLocator {
    async fn locate(&self) -> Result<Coordinates, WeatherError> {
        Err(WeatherError::Unsupported)
    }
}

#[derive(Debug, Clone)]
pub struct ConfiguredLocator {
    config: Option<DeviceLocationConfig>,
}

impl ConfiguredLocator {
    pub fn new(config: Option<DeviceLocationConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl DeviceLocator for ConfiguredLocator {
    async fn locate(&self) -> Result<Coordinates, WeatherError> {
        match &self.config {
            None => Err(WeatherError::Unsupported),
            Some(cfg) if !cfg.allowed => Err(WeatherError::PermissionDenied),
            Some(cfg) => Ok(Coordinates { latitude: cfg.latitude, longitude: cfg.longitude }),
        }
    }
}
