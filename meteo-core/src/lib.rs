//! Core library for the `meteo` weather lookup tool.
//!
//! This crate defines:
//! - Configuration and the persisted theme preference
//! - The Open-Meteo geocoding and forecast client
//! - Location resolution, rendering to view values, and the controller that
//!   drives them through abstract presentation slots
//!
//! It is used by `meteo-cli`, but any front end implementing
//! [`PresentationPorts`] can drive it.

pub mod app;
pub mod codes;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod ports;
pub mod provider;
pub mod render;
pub mod resolver;

pub use app::{AppController, FlowOutcome};
pub use config::{AppSettings, Config, FileThemeStore, Theme, ThemeStore};
pub use error::{Service, WeatherError};
pub use model::{ResolvedLocation, WeatherSnapshot};
pub use ports::{CurrentPanel, PresentationPorts, RecordingPorts};
pub use provider::{ForecastFetcher, Geocoder, OpenMeteoClient};
pub use resolver::LocationResolver;
