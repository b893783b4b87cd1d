//! Lookup table from WMO condition codes to a description and a symbol.
//! See: https://open-meteo.com/en/docs#weathervariables

/// Description and pictographic symbol for one condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCodeEntry {
    pub description: &'static str,
    pub symbol: &'static str,
}

impl WeatherCodeEntry {
    const fn new(description: &'static str, symbol: &'static str) -> Self {
        Self { description, symbol }
    }
}

/// Returned for any code not in the table.
pub const UNKNOWN: WeatherCodeEntry = WeatherCodeEntry::new("Unknown", "❓");

const TABLE: &[(i32, WeatherCodeEntry)] = &[
    (0, WeatherCodeEntry::new("Clear sky", "☀️")),
    (1, WeatherCodeEntry::new("Mainly clear", "🌤️")),
    (2, WeatherCodeEntry::new("Partly cloudy", "⛅")),
    (3, WeatherCodeEntry::new("Overcast", "☁️")),
    (45, WeatherCodeEntry::new("Foggy", "🌫️")),
    (51, WeatherCodeEntry::new("Light drizzle", "🌦️")),
    (61, WeatherCodeEntry::new("Slight rain", "🌧️")),
    (63, WeatherCodeEntry::new("Moderate rain", "🌧️")),
    (65, WeatherCodeEntry::new("Heavy rain", "⛈️")),
    (71, WeatherCodeEntry::new("Slight snow", "❄️")),
    (95, WeatherCodeEntry::new("Thunderstorm", "⛈️")),
];

pub fn lookup(code: i32) -> WeatherCodeEntry {
    TABLE
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, entry)| *entry)
        .unwrap_or(UNKNOWN)
}
