use crate::{
    Config, WeatherError,
    model::{GeocodingResult, WeatherSnapshot},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Free-text place lookup.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Returns at most the top match; an empty vector means no match.
    async fn search(&self, query: &str) -> Result<Vec<GeocodingResult>, WeatherError>;
}

/// Current, hourly and daily data for a point.
#[async_trait]
pub trait ForecastFetcher: Send + Sync + Debug {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the Open-Meteo client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenMeteoClient> {
    OpenMeteoClient::new(
        config.geocoding_url.clone(),
        config.forecast_url.clone(),
        config.request_timeout(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_from_default_config_builds() {
        let client = client_from_config(&Config::default()).expect("client should build");
        assert_eq!(client.forecast_url(), crate::config::DEFAULT_FORECAST_URL);
    }
}
