//! Wires user actions to resolve, fetch and render.

use anyhow::Context;
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    Config, WeatherError,
    config::{AppSettings, Theme, ThemeStore},
    location::{ConfiguredLocator, DeviceLocator, MY_LOCATION},
    model::WeatherSnapshot,
    ports::{CurrentPanel, PresentationPorts},
    provider::{self, ForecastFetcher, Geocoder},
    render,
    resolver::LocationResolver,
};

/// How a user action ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// Nothing to do (blank query).
    Skipped,
    Rendered,
    /// The error was rendered into the current-conditions area.
    Failed(WeatherError),
    /// A newer action started before this one finished; its result was dropped.
    Superseded,
}

pub struct AppController<P> {
    resolver: LocationResolver,
    fetcher: Arc<dyn ForecastFetcher>,
    locator: Arc<dyn DeviceLocator>,
    themes: Box<dyn ThemeStore>,
    settings: Mutex<AppSettings>,
    ports: P,
    generation: AtomicU64,
}

impl<P: PresentationPorts> AppController<P> {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        fetcher: Arc<dyn ForecastFetcher>,
        locator: Arc<dyn DeviceLocator>,
        themes: Box<dyn ThemeStore>,
        ports: P,
    ) -> Self {
        Self {
            resolver: LocationResolver::new(geocoder),
            fetcher,
            locator,
            themes,
            settings: Mutex::new(AppSettings::default()),
            ports,
            generation: AtomicU64::new(0),
        }
    }

    /// Open-Meteo for both services, device location from the config file.
    pub fn from_config(
        config: &Config,
        themes: Box<dyn ThemeStore>,
        ports: P,
    ) -> anyhow::Result<Self> {
        let client = Arc::new(provider::client_from_config(config)?);
        let locator = Arc::new(ConfiguredLocator::new(config.device_location.clone()));

        Ok(Self::new(client.clone(), client, locator, themes, ports))
    }

    pub fn ports(&self) -> &P {
        &self.ports
    }

    pub fn settings(&self) -> AppSettings {
        *self.settings.lock()
    }

    /// Load the stored theme and apply it. Unset or unreadable means light.
    pub fn init(&self) {
        let theme = match self.themes.load_theme() {
            Ok(stored) => stored.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read theme preference, using light");
                Theme::Light
            }
        };

        self.settings.lock().theme = theme;
        self.apply_theme(theme);
    }

    pub fn toggle_theme(&self) -> anyhow::Result<Theme> {
        let theme = {
            let mut settings = self.settings.lock();
            settings.theme = settings.theme.toggled();
            settings.theme
        };

        self.apply_theme(theme);
        self.themes
            .save_theme(theme)
            .context("Failed to persist theme preference")?;

        tracing::debug!(%theme, "theme toggled");
        Ok(theme)
    }

    pub async fn search(&self, query: &str) -> FlowOutcome {
        let query = query.trim();
        if query.is_empty() {
            return FlowOutcome::Skipped;
        }

        let ticket = self.begin();
        let outcome = async {
            let location = self.resolver.resolve(query).await?;
            let snapshot = self.fetcher.fetch(location.latitude, location.longitude).await?;
            Ok::<_, WeatherError>((location.display_name, snapshot))
        }
        .await;

        self.finish(ticket, outcome)
    }

    pub async fn use_my_location(&self) -> FlowOutcome {
        let ticket = self.begin();
        let outcome = async {
            let coords = self.locator.locate().await?;
            let snapshot = self.fetcher.fetch(coords.latitude, coords.longitude).await?;
            Ok::<_, WeatherError>((MY_LOCATION.to_string(), snapshot))
        }
        .await;

        self.finish(ticket, outcome)
    }

    fn apply_theme(&self, theme: Theme) {
        self.ports.set_theme_mode(theme);
        self.ports.set_theme_label(theme.toggle_label());
    }

    /// Clear both display areas, show the overlay, and claim the display.
    fn begin(&self) -> u64 {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.ports.set_current_view(CurrentPanel::Empty);
        self.ports.set_forecast_view(Vec::new());
        self.ports.set_busy(true);

        ticket
    }

    fn finish(
        &self,
        ticket: u64,
        outcome: Result<(String, WeatherSnapshot), WeatherError>,
    ) -> FlowOutcome {
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "dropping result of superseded lookup");
            return FlowOutcome::Superseded;
        }

        self.ports.set_busy(false);

        match outcome {
            Ok((location_name, snapshot)) => {
                let today = chrono::Local::now().date_naive();
                self.ports.set_current_view(CurrentPanel::Conditions(render::render_current(
                    &snapshot,
                    &location_name,
                    today,
                )));
                self.ports.set_forecast_view(render::render_forecast(&snapshot));
                self.ports.set_details(render::render_details(&snapshot));
                FlowOutcome::Rendered
            }
            Err(e) => {
                tracing::debug!(error = %e, "lookup failed");
                // Forecast area is left as the loading transition cleared it.
                self.ports.set_current_view(CurrentPanel::Error(render::render_error(&e)));
                FlowOutcome::Failed(e)
            }
        }
    }
}
