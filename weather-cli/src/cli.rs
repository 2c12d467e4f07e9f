use std::{path::Path, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use weather_core::{
    AppController, Config, ConfigThemeStore, Coordinates, FixedGeolocator, Outcome, Screen,
    WeatherApiClient, toggle_stored,
};

use crate::view;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather, 3-day forecast and air quality")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and the default city.
    Configure,

    /// Show weather for a place.
    Show {
        /// City name or "lat,lon". Defaults to the configured city.
        location: Option<String>,
    },

    /// Show weather for your position (configured home, or --lat/--lon).
    Locate {
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Switch between the light and dark theme.
    Theme,
}

type Controller = AppController<WeatherApiClient, Screen, ConfigThemeStore, FixedGeolocator>;

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        let path = Config::config_file_path()?;
        let config = Config::load_from(&path)?;
        tracing::debug!(path = %path.display(), "loaded configuration");

        match self.command {
            Command::Configure => {
                configure(config)?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { location } => {
                let controller = build_controller(&config, &path, config.home)?;
                let city = location.unwrap_or_else(|| config.default_city.clone());
                let outcome = controller.initialize(&city).await;
                Ok(finish(&controller, outcome))
            }
            Command::Locate { lat, lon } => {
                let position = match (lat, lon) {
                    (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
                    _ => config.home,
                };
                let controller = build_controller(&config, &path, position)?;
                controller.apply_stored_theme();
                let outcome = controller.locate().await;
                Ok(finish(&controller, outcome))
            }
            Command::Theme => {
                // No controller here: toggling must work before an API key is configured.
                let next = toggle_stored(&ConfigThemeStore::new(path))?;
                tracing::info!(theme = %next, "theme toggled");
                println!("Theme: {next}");
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn build_controller(
    config: &Config,
    path: &Path,
    position: Option<Coordinates>,
) -> Result<Controller> {
    let client = WeatherApiClient::from_config(config)?;
    let themes = ConfigThemeStore::new(path.to_path_buf());

    Ok(AppController::new(client, Screen::default(), themes, FixedGeolocator::new(position)))
}

fn finish(controller: &Controller, outcome: Outcome) -> ExitCode {
    controller.with_view(|screen| print!("{}", view::draw(screen)));

    match outcome {
        Outcome::Rendered | Outcome::Skipped => ExitCode::SUCCESS,
        Outcome::Failed(err) => {
            tracing::debug!(error = %err, detail = err.detail(), "query failed");
            ExitCode::FAILURE
        }
        Outcome::Stale => ExitCode::FAILURE,
    }
}

fn configure(mut config: Config) -> Result<()> {
    let api_key = Password::new("WeatherAPI.com key:")
        .without_confirmation()
        .with_help_message("Get one at https://www.weatherapi.com/my/")
        .prompt()
        .context("Failed to read API key")?;

    let city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;

    config.api_key = Some(api_key.trim().to_string());
    config.default_city = city.trim().to_string();
    config.save()?;

    let path = Config::config_file_path()?;
    tracing::info!(path = %path.display(), "saved configuration");
    println!("Saved configuration to {}", path.display());
    Ok(())
}
