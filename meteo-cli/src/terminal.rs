//! Presentation slots printed to the terminal as they are written.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, Stylize},
    terminal::{Clear, ClearType},
};
use meteo_core::{
    CurrentPanel, PresentationPorts, Theme,
    render::{CurrentView, DetailsView, ErrorView, ForecastCard},
};
use parking_lot::Mutex;

const BUSY_MESSAGE: &str = "⏳ Loading...";

#[derive(Debug)]
struct State {
    theme: Theme,
    theme_label: String,
}

#[derive(Debug)]
pub struct TerminalPorts {
    state: Mutex<State>,
}

impl TerminalPorts {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                theme: Theme::default(),
                theme_label: Theme::default().toggle_label().to_string(),
            }),
        }
    }

    pub fn theme_label(&self) -> String {
        self.state.lock().theme_label.clone()
    }

    fn theme(&self) -> Theme {
        self.state.lock().theme
    }
}

impl Default for TerminalPorts {
    fn default() -> Self {
        Self::new()
    }
}

fn accent_color(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Blue,
        Theme::Dark => Color::White,
    }
}

fn accent(text: String, theme: Theme) -> String {
    text.bold().with(accent_color(theme)).to_string()
}

fn format_current(view: &CurrentView, theme: Theme) -> String {
    format!(
        "\n{}\n{}\n\n  {}  {} {}\n",
        accent(view.location_name.clone(), theme),
        view.date,
        view.temperature,
        view.symbol,
        view.description
    )
}

fn format_error(view: &ErrorView) -> String {
    format!("\n🚨 {}\n   {}\n", view.message, view.hint)
}

fn format_forecast(cards: &[ForecastCard], theme: Theme) -> String {
    let mut out = format!("\n{}\n", accent(format!("Next {} days", cards.len()), theme));
    for card in cards {
        out.push_str(&format!(
            "  {:<4} {}  {} / {}\n",
            card.weekday, card.symbol, card.max_temperature, card.min_temperature
        ));
    }
    out
}

fn format_details(details: &DetailsView) -> String {
    format!(
        "\n  Humidity {}   Wind {}   Pressure {}   UV {}\n",
        details.humidity, details.wind, details.pressure, details.uv_index
    )
}

/// Shows the busy line, or wipes it so the next output starts on a clean line.
fn write_busy(out: &mut impl Write, busy: bool) -> io::Result<()> {
    if busy {
        queue!(out, Print(BUSY_MESSAGE))?;
    } else {
        queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    }
    out.flush()
}

impl PresentationPorts for TerminalPorts {
    fn set_current_view(&self, panel: CurrentPanel) {
        match panel {
            CurrentPanel::Empty => {}
            CurrentPanel::Conditions(view) => print!("{}", format_current(&view, self.theme())),
            CurrentPanel::Error(view) => print!("{}", format_error(&view)),
        }
    }

    fn set_forecast_view(&self, cards: Vec<ForecastCard>) {
        if !cards.is_empty() {
            print!("{}", format_forecast(&cards, self.theme()));
        }
    }

    fn set_details(&self, details: DetailsView) {
        println!("{}", format_details(&details));
    }

    fn set_busy(&self, busy: bool) {
        if let Err(e) = write_busy(&mut io::stderr().lock(), busy) {
            tracing::debug!(error = %e, busy, "could not update busy indicator");
        }
    }

    fn set_theme_mode(&self, theme: Theme) {
        self.state.lock().theme = theme;
    }

    fn set_theme_label(&self, label: &str) {
        self.state.lock().theme_label = label.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(weekday: &str) -> ForecastCard {
        ForecastCard {
            date: "2026-10-18".parse().unwrap(),
            weekday: weekday.to_string(),
            symbol: "☁️",
            max_temperature: "14°C".to_string(),
            min_temperature: "6°C".to_string(),
        }
    }

    #[test]
    fn forecast_lines_show_range() {
        let out = format_forecast(&[card("Sun"), card("Mon")], Theme::Light);

        assert!(out.contains("Next 2 days"));
        assert!(out.contains("Sun  ☁️  14°C / 6°C"));
        assert!(out.contains("Mon"));
    }

    #[test]
    fn error_shows_message_and_hint() {
        let out = format_error(&ErrorView {
            message: "Location access denied".to_string(),
            hint: "Please try again or check your connection",
        });

        assert!(out.contains("🚨 Location access denied"));
        assert!(out.contains("Please try again"));
    }

    #[test]
    fn theme_changes_accent_and_label() {
        let ports = TerminalPorts::new();
        assert_eq!(ports.theme_label(), "🌙 Dark Mode");

        ports.set_theme_mode(Theme::Dark);
        ports.set_theme_label(Theme::Dark.toggle_label());

        assert_eq!(ports.theme(), Theme::Dark);
        assert_eq!(ports.theme_label(), "☀️ Light Mode");
        assert_ne!(accent_color(Theme::Light), accent_color(Theme::Dark));
    }

    #[test]
    fn accent_keeps_the_text() {
        let out = accent("Lisbon, Portugal".to_string(), Theme::Dark);
        assert!(out.contains("Lisbon, Portugal"));
    }

    #[test]
    fn busy_line_is_written_then_cleared() {
        let mut shown = Vec::new();
        write_busy(&mut shown, true).unwrap();
        assert_eq!(String::from_utf8(shown).unwrap(), BUSY_MESSAGE);

        let mut cleared = Vec::new();
        write_busy(&mut cleared, false).unwrap();
        let cleared = String::from_utf8(cleared).unwrap();
        assert!(!cleared.is_empty());
        assert!(!cleared.contains("Loading"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn busy_write_failure_is_reported() {
        let err = write_busy(&mut BrokenPipe, true).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
