//! Turns a free-text query into coordinates and a display name.
//!
//! Queries shaped like `<number>,<number>` are taken literally and never reach
//! the network; everything else goes to the geocoder for its top match.

use regex::Regex;
use std::sync::{Arc, OnceLock};

use crate::{
    WeatherError,
    model::{GeocodingResult, ResolvedLocation},
    provider::Geocoder,
};

pub const CUSTOM_LOCATION: &str = "Custom Location";
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

#[derive(Debug, Clone)]
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    pub async fn resolve(&self, query: &str) -> Result<ResolvedLocation, WeatherError> {
        let query = query.trim();

        if let Some((latitude, longitude)) = parse_coordinates(query) {
            tracing::debug!(latitude, longitude, "query is a coordinate literal");
            return Ok(ResolvedLocation {
                latitude,
                longitude,
                display_name: CUSTOM_LOCATION.to_string(),
            });
        }

        let top = self
            .geocoder
            .search(query)
            .await?
            .into_iter()
            .next()
            .ok_or(WeatherError::NotFound)?;

        let location = ResolvedLocation {
            latitude: top.latitude,
            longitude: top.longitude,
            display_name: display_name(&top),
        };

        tracing::debug!(
            "Resolved {:?} to {} at ({}, {})",
            query,
            location.display_name,
            location.latitude,
            location.longitude
        );

        Ok(location)
    }
}

static COORDINATES_RE: OnceLock<Regex> = OnceLock::new();

/// `<number>,<number>`, each with optional `-` and decimal part, nothing else.
pub fn parse_coordinates(query: &str) -> Option<(f64, f64)> {
    let re = COORDINATES_RE.get_or_init(|| {
        Regex::new(r"^(-?[0-9]+(?:\.[0-9]+)?),(-?[0-9]+(?:\.[0-9]+)?)$")
            .expect("coordinate pattern is valid")
    });

    let caps = re.captures(query)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

/// `"<name>, <country>"`, dropping whichever part is missing.
fn display_name(result: &GeocodingResult) -> String {
    let parts: Vec<&str> = [result.name.as_deref(), result.country.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        UNKNOWN_LOCATION.to_string()
    } else {
        parts.join(", ")
    }
}
