use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use meteo_core::{AppController, Config, FileThemeStore};
use std::path::PathBuf;

use crate::terminal::TerminalPorts;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Current weather and a 7-day forecast")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather for a place name or a `lat,lon` pair.
    Search {
        /// e.g. "Lisbon" or "40.7,-74.0".
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        query: Vec<String>,
    },

    /// Show weather for the device location.
    Here,

    /// Switch between light and dark mode and remember the choice.
    Theme,

    /// Prompt for searches until `:quit`.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };
        tracing::debug!(path = %path.display(), "using config file");

        let config = Config::load_from(&path)?;
        let app = AppController::from_config(
            &config,
            Box::new(FileThemeStore::new(&path)),
            TerminalPorts::new(),
        )?;
        app.init();

        match self.command.unwrap_or(Command::Interactive) {
            Command::Search { query } => {
                app.search(&query.join(" ")).await;
            }
            Command::Here => {
                app.use_my_location().await;
            }
            Command::Theme => {
                let theme = app.toggle_theme()?;
                println!("Theme: {theme}");
            }
            Command::Interactive => interactive(&app).await?,
        }

        Ok(())
    }
}

async fn interactive(app: &AppController<TerminalPorts>) -> anyhow::Result<()> {
    loop {
        let help = format!(
            ":here for device location, :theme for {}, :quit to exit",
            app.ports().theme_label()
        );

        let input = match Text::new("City or lat,lon:").with_help_message(&help).prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read search input"),
        };

        match input.trim() {
            ":quit" | ":q" => break,
            ":here" => {
                app.use_my_location().await;
            }
            ":theme" => match app.toggle_theme() {
                Ok(theme) => println!("Theme: {theme}"),
                Err(e) => eprintln!("{e:#}"),
            },
            query => {
                app.search(query).await;
            }
        }
    }

    Ok(())
}
