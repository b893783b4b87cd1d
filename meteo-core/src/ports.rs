use parking_lot::Mutex;

use crate::{
    config::Theme,
    render::{CurrentView, DetailsView, ErrorView, ForecastCard},
};

/// What occupies the primary display area.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CurrentPanel {
    #[default]
    Empty,
    Conditions(CurrentView),
    Error(ErrorView),
}

/// Named output slots the controller writes to.
///
/// Each call replaces whatever the slot held before.
pub trait PresentationPorts: Send + Sync {
    fn set_current_view(&self, panel: CurrentPanel);
    fn set_forecast_view(&self, cards: Vec<ForecastCard>);
    fn set_details(&self, details: DetailsView);
    fn set_busy(&self, busy: bool);
    fn set_theme_mode(&self, theme: Theme);
    fn set_theme_label(&self, label: &str);
}

#[derive(Debug, Default)]
struct Slots {
    current: CurrentPanel,
    forecast: Vec<ForecastCard>,
    details: Option<DetailsView>,
    busy: bool,
    busy_log: Vec<bool>,
    theme: Option<Theme>,
    theme_label: Option<String>,
}

/// Remembers the last value written to each slot.
#[derive(Debug, Default)]
pub struct RecordingPorts {
    slots: Mutex<Slots>,
}

impl RecordingPorts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> CurrentPanel {
        self.slots.lock().current.clone()
    }

    pub fn forecast(&self) -> Vec<ForecastCard> {
        self.slots.lock().forecast.clone()
    }

    pub fn details(&self) -> Option<DetailsView> {
        self.slots.lock().details.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.slots.lock().busy
    }

    /// Every `set_busy` call in order.
    pub fn busy_log(&self) -> Vec<bool> {
        self.slots.lock().busy_log.clone()
    }

    pub fn theme(&self) -> Option<Theme> {
        self.slots.lock().theme
    }

    pub fn theme_label(&self) -> Option<String> {
        self.slots.lock().theme_label.clone()
    }
}

impl PresentationPorts for RecordingPorts {
    fn set_current_view(&self, panel: CurrentPanel) {
        self.slots.lock().current = panel;
    }

    fn set_forecast_view(&self, cards: Vec<ForecastCard>) {
        self.slots.lock().forecast = cards;
    }

    fn set_details(&self, details: DetailsView) {
        self.slots.lock().details = Some(details);
    }

    fn set_busy(&self, busy: bool) {
        let mut slots = self.slots.lock();
        slots.busy = busy;
        slots.busy_log.push(busy);
    }

    fn set_theme_mode(&self, theme: Theme) {
        self.slots.lock().theme = Some(theme);
    }

    fn set_theme_label(&self, label: &str) {
        self.slots.lock().theme_label = Some(label.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_ports_keep_last_write() {
        let ports = RecordingPorts::new();
        assert_eq!(ports.current(), CurrentPanel::Empty);

        ports.set_busy(true);
        ports.set_busy(false);
        ports.set_theme_label("first");
        ports.set_theme_label("second");

        assert!(!ports.is_busy());
        assert_eq!(ports.busy_log(), vec![true, false]);
        assert_eq!(ports.theme_label().as_deref(), Some("second"));
    }
}
