use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Page-wide visual mode. Persisted as the literal `"light"` or `"dark"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Label for the toggle control: always names the mode a click switches to.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Light => "🌙 Dark Mode",
            Theme::Dark => "☀️ Light Mode",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Theme {
    fn from(value: &str) -> Self {
        if value == "dark" { Theme::Dark } else { Theme::Light }
    }
}

impl From<String> for Theme {
    fn from(value: String) -> Self {
        Theme::from(value.as_str())
    }
}

impl From<Theme> for &'static str {
    fn from(theme: Theme) -> Self {
        theme.as_str()
    }
}

/// Settings owned by the controller for the lifetime of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppSettings {
    pub theme: Theme,
}

/// Coordinates the device locator reports, and whether access is granted.
///
/// Example TOML:
/// [device_location]
/// latitude = 52.52
/// longitude = 13.41
/// allowed = true
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceLocationConfig {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_allowed")]
    pub allowed: bool,
}

fn default_allowed() -> bool {
    true
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    pub geocoding_url: String,
    pub forecast_url: String,
    pub request_timeout_secs: u64,
    pub device_location: Option<DeviceLocationConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            device_location: None,
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Load config from the platform path, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "meteo", "meteo")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Where the theme preference lives between sessions.
pub trait ThemeStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    fn load_theme(&self) -> Result<Option<Theme>>;
    fn save_theme(&self, theme: Theme) -> Result<()>;
}

/// Keeps the theme in the `theme` key of the config file, leaving other keys untouched.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ThemeStore for FileThemeStore {
    fn load_theme(&self) -> Result<Option<Theme>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(Config::load_from(&self.path)?.theme))
    }

    fn save_theme(&self, theme: Theme) -> Result<()> {
        let mut cfg = Config::load_from(&self.path)?;
        cfg.theme = theme;
        cfg.save_to(&self.path)
    }
}

#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    theme: Mutex<Option<Theme>>,
}

impl MemoryThemeStore {
    pub fn new(initial: Option<Theme>) -> Self {
        Self { theme: Mutex::new(initial) }
    }

    pub fn stored(&self) -> Option<Theme> {
        *self.theme.lock()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load_theme(&self) -> Result<Option<Theme>> {
        Ok(self.stored())
    }

    fn save_theme(&self, theme: Theme) -> Result<()> {
        *self.theme.lock() = Some(theme);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_open_meteo() {
        let cfg = Config::default();

        assert_eq!(cfg.theme, Theme::Light);
        assert_eq!(cfg.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(cfg.forecast_url, DEFAULT_FORECAST_URL);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(10));
        assert!(cfg.device_location.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let cfg: Config = toml::from_str("theme = \"dark\"\n").expect("valid toml");

        assert_eq!(cfg.theme, Theme::Dark);
        assert_eq!(cfg.forecast_url, DEFAULT_FORECAST_URL);
    }

    #[test]
    fn unrecognised_theme_means_light() {
        let cfg: Config = toml::from_str("theme = \"sepia\"\n").expect("valid toml");
        assert_eq!(cfg.theme, Theme::Light);
    }

    #[test]
    fn device_location_defaults_to_allowed() {
        let cfg: Config =
            toml::from_str("[device_location]\nlatitude = 1.5\nlongitude = -2.0\n").unwrap();

        let loc = cfg.device_location.expect("section present");
        assert!(loc.allowed);
        assert_eq!(loc.longitude, -2.0);
    }

    #[test]
    fn toggle_label_names_the_other_mode() {
        assert_eq!(Theme::Light.toggle_label(), "🌙 Dark Mode");
        assert_eq!(Theme::Dark.toggle_label(), "☀️ Light Mode");
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn load_from_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn file_store_round_trips_theme_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.request_timeout_secs = 3;
        cfg.save_to(&path).unwrap();

        let store = FileThemeStore::new(&path);
        assert_eq!(store.load_theme().unwrap(), Some(Theme::Light));

        store.save_theme(Theme::Dark).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.theme, Theme::Dark);
        assert_eq!(reloaded.request_timeout_secs, 3);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("theme = \"dark\""), "{raw}");
    }

    #[test]
    fn file_store_reports_nothing_stored_before_first_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileThemeStore::new(dir.path().join("config.toml"));
        assert_eq!(store.load_theme().unwrap(), None);
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
