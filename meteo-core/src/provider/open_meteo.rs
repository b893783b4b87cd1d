use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    error::{Service, WeatherError},
    model::{GeocodingResult, WeatherSnapshot},
};

use super::{ForecastFetcher, Geocoder};

const HOURLY_VARIABLES: &str =
    "temperature_2m,relativehumidity_2m,windspeed_10m,precipitation_probability";
const DAILY_VARIABLES: &str = "weathercode,temperature_2m_max,temperature_2m_min";

/// Client for the Open-Meteo geocoding and forecast endpoints. No API key needed.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    // The service omits the key entirely when nothing matched.
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

impl OpenMeteoClient {
    pub fn new(geocoding_url: String, forecast_url: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { geocoding_url, forecast_url, http })
    }

    pub fn forecast_url(&self) -> &str {
        &self.forecast_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        service: Service,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let res = self.http.get(url).query(query).send().await.map_err(|e| {
            tracing::debug!(%service, error = %e, "request failed");
            WeatherError::Network(service)
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            tracing::debug!(%service, error = %e, "failed to read response body");
            WeatherError::Network(service)
        })?;

        if !status.is_success() {
            tracing::debug!(%service, %status, body = %truncate_body(&body), "request rejected");
            return Err(WeatherError::Network(service));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(%service, error = %e, body = %truncate_body(&body), "unparseable response");
            WeatherError::Network(service)
        })
    }
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    async fn search(&self, query: &str) -> Result<Vec<GeocodingResult>, WeatherError> {
        tracing::debug!(query, "geocoding");

        let parsed: GeocodingResponse = self
            .get_json(
                Service::Geocoding,
                &self.geocoding_url,
                &[
                    ("name", query.to_string()),
                    ("count", "1".to_string()),
                    ("language", "en".to_string()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        Ok(parsed.results)
    }
}

#[async_trait]
impl ForecastFetcher for OpenMeteoClient {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherSnapshot, WeatherError> {
        tracing::debug!(latitude, longitude, "fetching forecast");

        self.get_json(
            Service::Forecast,
            &self.forecast_url,
            &[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("hourly", HOURLY_VARIABLES.to_string()),
                ("daily", DAILY_VARIABLES.to_string()),
                ("timezone", "auto".to_string()),
            ],
        )
        .await
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body;
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
