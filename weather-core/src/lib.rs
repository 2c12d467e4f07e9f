//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & persisted preferences
//! - The weatherapi.com client that fetches a [`WeatherBundle`] in one go
//! - Pure classifiers (AQI tiers and colors, icon URLs)
//! - A renderer that writes into abstract [`ViewBindings`]
//! - The [`AppController`] tying user actions to the above
//!
//! It is used by `weather-cli`, but the view abstraction lets other front ends reuse it.

pub mod classify;
pub mod config;
pub mod controller;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod provider;
pub mod render;
pub mod theme;

pub use classify::{AqiClassification, AqiLevel, classify_aqi, color_for_aqi, normalize_icon_url};
pub use config::Config;
pub use controller::{AppController, Outcome};
pub use error::WeatherError;
pub use geolocation::{FixedGeolocator, Geolocator};
pub use model::{
    AirQualitySample, Coordinates, CurrentConditions, ForecastDay, ForecastSet, LocationQuery,
    WeatherBundle,
};
pub use provider::{WeatherApiClient, WeatherProvider};
pub use render::{Panel, Renderer, Screen, Slot, ViewBindings};
pub use theme::{ConfigThemeStore, MemoryThemeStore, Theme, ThemeStore, toggle_stored};
