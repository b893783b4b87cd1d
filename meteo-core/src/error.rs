use thiserror::Error;

/// Suggestion shown under every rendered error message.
pub const ERROR_HINT: &str = "Please try again or check your connection";

/// Remote service a network failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Geocoding,
    Forecast,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Geocoding => "geocoding",
            Service::Forecast => "forecast",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Service::Geocoding => "Error fetching location data",
            Service::Forecast => "Failed to fetch weather data",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that can end a lookup. `Display` is the message shown to the user.
///
/// Transport causes are logged where they happen and then dropped: none of
/// these are retried, so callers only ever need the kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("Location not found")]
    NotFound,

    #[error("{}", .0.failure_message())]
    Network(Service),

    #[error("Location access denied")]
    PermissionDenied,

    #[error("Geolocation not supported")]
    Unsupported,
}

impl WeatherError {
    pub fn hint(&self) -> &'static str {
        ERROR_HINT
    }
}
