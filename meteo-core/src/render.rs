//! Pure transformations from a forecast snapshot into view values.

use chrono::NaiveDate;

use crate::{WeatherError, codes, model::WeatherSnapshot};

/// Days shown in the forecast strip, starting from tomorrow.
pub const FORECAST_DAYS: usize = 7;

pub const NOT_AVAILABLE: &str = "N/A";
pub const PRESSURE_PLACEHOLDER: &str = NOT_AVAILABLE;
pub const UV_PLACEHOLDER: &str = "Moderate";

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub location_name: String,
    pub date: String,
    pub temperature: String,
    pub description: &'static str,
    pub symbol: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub date: NaiveDate,
    pub weekday: String,
    pub symbol: &'static str,
    pub max_temperature: String,
    pub min_temperature: String,
}

/// Values shown alongside the current conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsView {
    pub humidity: String,
    pub wind: String,
    /// Not requested from the service; always a placeholder.
    pub pressure: &'static str,
    /// Not requested from the service; always a constant.
    pub uv_index: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorView {
    pub message: String,
    pub hint: &'static str,
}

pub fn render_current(
    snapshot: &WeatherSnapshot,
    location_name: &str,
    today: NaiveDate,
) -> CurrentView {
    let current = &snapshot.current_weather;
    let entry = codes::lookup(current.weathercode);

    CurrentView {
        location_name: location_name.to_string(),
        date: today.format("%A, %B %-d, %Y").to_string(),
        temperature: celsius(current.temperature),
        description: entry.description,
        symbol: entry.symbol,
    }
}

/// Cards for daily indices 1..=7. Stops early if the service sent fewer days.
pub fn render_forecast(snapshot: &WeatherSnapshot) -> Vec<ForecastCard> {
    let daily = &snapshot.daily;

    (1..=FORECAST_DAYS)
        .map_while(|day| {
            let date = *daily.time.get(day)?;
            let max = (*daily.temperature_2m_max.get(day)?)?;
            let min = (*daily.temperature_2m_min.get(day)?)?;
            let symbol = daily
                .weathercode
                .get(day)
                .copied()
                .flatten()
                .map_or(codes::UNKNOWN.symbol, |code| codes::lookup(code).symbol);

            Some(ForecastCard {
                date,
                weekday: date.format("%a").to_string(),
                symbol,
                max_temperature: celsius(max),
                min_temperature: celsius(min),
            })
        })
        .collect()
}

pub fn render_details(snapshot: &WeatherSnapshot) -> DetailsView {
    let humidity = snapshot
        .hourly
        .relativehumidity_2m
        .first()
        .copied()
        .flatten()
        .map_or_else(|| NOT_AVAILABLE.to_string(), |h| format!("{h}%"));

    DetailsView {
        humidity,
        wind: format!("{} km/h", snapshot.current_weather.windspeed),
        pressure: PRESSURE_PLACEHOLDER,
        uv_index: UV_PLACEHOLDER,
    }
}

pub fn render_error(error: &WeatherError) -> ErrorView {
    ErrorView { message: error.to_string(), hint: error.hint() }
}

fn celsius(value: f64) -> String {
    format!("{value}°C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CurrentConditions, DailySeries, HourlySeries};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    fn snapshot(code: i32, days: usize) -> WeatherSnapshot {
        WeatherSnapshot {
            current_weather: CurrentConditions { temperature: 21.5, windspeed: 14.0, weathercode: code },
            hourly: HourlySeries {
                relativehumidity_2m: vec![Some(72.0), Some(70.0)],
                ..HourlySeries::default()
            },
            daily: DailySeries {
                time: (0..days).map(|i| date(17 + i as u32)).collect(),
                weathercode: (0..days).map(|i| Some([0, 3, 61, 999][i % 4])).collect(),
                temperature_2m_max: (0..days).map(|i| Some(20.0 + i as f64)).collect(),
                temperature_2m_min: (0..days).map(|i| Some(10.0 + i as f64)).collect(),
            },
        }
    }

    #[test]
    fn current_view_for_clear_sky() {
        let view = render_current(&snapshot(0, 8), "Berlin, Germany", date(17));

        assert_eq!(view.location_name, "Berlin, Germany");
        assert_eq!(view.date, "Saturday, October 17, 2026");
        assert_eq!(view.temperature, "21.5°C");
        assert_eq!(view.description, "Clear sky");
        assert_eq!(view.symbol, "☀️");
    }

    #[test]
    fn current_view_for_unknown_code() {
        let view = render_current(&snapshot(999, 8), "Somewhere", date(17));

        assert_eq!(view.description, "Unknown");
        assert_eq!(view.symbol, "❓");
    }

    #[test]
    fn forecast_skips_today_and_shows_seven_days() {
        let cards = render_forecast(&snapshot(0, 10));

        assert_eq!(cards.len(), 7);
        let dates: Vec<NaiveDate> = cards.iter().map(|c| c.date).collect();
        assert_eq!(dates, (18..=24).map(date).collect::<Vec<_>>());

        assert_eq!(cards[0].weekday, "Sun");
        assert_eq!(cards[0].symbol, "☁️");
        assert_eq!(cards[0].max_temperature, "21°C");
        assert_eq!(cards[0].min_temperature, "11°C");
        assert_eq!(cards[1].symbol, "🌧️");
        assert_eq!(cards[2].symbol, "❓");
    }

    #[test]
    fn short_series_yields_fewer_cards() {
        assert_eq!(render_forecast(&snapshot(0, 5)).len(), 4);
        assert_eq!(render_forecast(&snapshot(0, 1)).len(), 0);
        assert!(render_forecast(&snapshot(0, 0)).is_empty());
    }

    #[test]
    fn ragged_series_stops_at_first_gap() {
        let mut snap = snapshot(0, 8);
        snap.daily.temperature_2m_min.truncate(4);

        assert_eq!(render_forecast(&snap).len(), 3);
    }

    #[test]
    fn missing_daily_code_renders_fallback_symbol() {
        let mut snap = snapshot(0, 3);
        snap.daily.weathercode[1] = None;

        assert_eq!(render_forecast(&snap)[0].symbol, "❓");
    }

    #[test]
    fn details_use_first_hour_and_placeholders() {
        let details = render_details(&snapshot(0, 1));

        assert_eq!(details.humidity, "72%");
        assert_eq!(details.wind, "14 km/h");
        assert_eq!(details.pressure, "N/A");
        assert_eq!(details.uv_index, "Moderate");
    }

    #[test]
    fn details_without_hourly_data() {
        let mut snap = snapshot(0, 1);
        snap.hourly = HourlySeries::default();

        assert_eq!(render_details(&snap).humidity, "N/A");
    }

    #[test]
    fn error_view_carries_message_and_hint() {
        let view = render_error(&WeatherError::PermissionDenied);

        assert_eq!(view.message, "Location access denied");
        assert_eq!(view.hint, "Please try again or check your connection");
    }
}
