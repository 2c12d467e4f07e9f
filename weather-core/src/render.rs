//! Turns a [`WeatherBundle`] into writes against a fixed set of output slots.
//!
//! The slots are behind [`ViewBindings`] so the same renderer can drive a
//! terminal, a test fake, or anything else that can show text.

use chrono::{Locale, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::{
    classify::{classify_aqi, color_for_aqi, normalize_icon_url},
    error::WeatherError,
    model::{AirQualitySample, CurrentConditions, ForecastSet, WeatherBundle},
    theme::Theme,
};

/// Placeholder shown in the AQI slot when there is no reading.
pub const AQI_PLACEHOLDER: &str = "--";
pub const RETRY_PROMPT: &str = "Попробуйте другой город";

/// Single-value text slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    FeelsLike,
    Humidity,
    Pressure,
    Wind,
    AqiValue,
    AqiLevel,
    AqiDescription,
    LastUpdated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentPanel {
    /// "City, Country"
    pub heading: String,
    pub icon_url: String,
    pub temperature: String,
    pub condition: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPanel {
    pub message: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Weather(CurrentPanel),
    Error(ErrorPanel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub day_name: String,
    pub icon_url: String,
    pub condition: String,
    pub avg_temp: String,
    pub max_temp: String,
    pub min_temp: String,
}

/// The output surface the renderer writes to.
pub trait ViewBindings: Send {
    fn set_panel(&mut self, panel: Panel);
    fn clear_forecast(&mut self);
    fn push_forecast(&mut self, card: ForecastCard);
    fn set_text(&mut self, slot: Slot, text: String);
    fn set_aqi_color(&mut self, color_hex: &'static str);
    fn set_loading(&mut self, visible: bool);
    fn set_theme(&mut self, theme: Theme);
}

/// In-memory view: holds whatever was rendered last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Screen {
    pub panel: Option<Panel>,
    pub forecast: Vec<ForecastCard>,
    pub feels_like: String,
    pub humidity: String,
    pub pressure: String,
    pub wind: String,
    pub aqi_value: String,
    pub aqi_level: String,
    pub aqi_description: String,
    pub aqi_color: Option<&'static str>,
    pub last_updated: String,
    pub loading: bool,
    pub theme: Theme,
}

impl Screen {
    pub fn text(&self, slot: Slot) -> &str {
        match slot {
            Slot::FeelsLike => &self.feels_like,
            Slot::Humidity => &self.humidity,
            Slot::Pressure => &self.pressure,
            Slot::Wind => &self.wind,
            Slot::AqiValue => &self.aqi_value,
            Slot::AqiLevel => &self.aqi_level,
            Slot::AqiDescription => &self.aqi_description,
            Slot::LastUpdated => &self.last_updated,
        }
    }
}

impl ViewBindings for Screen {
    fn set_panel(&mut self, panel: Panel) {
        self.panel = Some(panel);
    }

    fn clear_forecast(&mut self) {
        self.forecast.clear();
    }

    fn push_forecast(&mut self, card: ForecastCard) {
        self.forecast.push(card);
    }

    fn set_text(&mut self, slot: Slot, text: String) {
        let target = match slot {
            Slot::FeelsLike => &mut self.feels_like,
            Slot::Humidity => &mut self.humidity,
            Slot::Pressure => &mut self.pressure,
            Slot::Wind => &mut self.wind,
            Slot::AqiValue => &mut self.aqi_value,
            Slot::AqiLevel => &mut self.aqi_level,
            Slot::AqiDescription => &mut self.aqi_description,
            Slot::LastUpdated => &mut self.last_updated,
        };
        *target = text;
    }

    fn set_aqi_color(&mut self, color_hex: &'static str) {
        self.aqi_color = Some(color_hex);
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

pub struct Renderer<V> {
    view: V,
    locale: Locale,
}

impl<V: ViewBindings> Renderer<V> {
    pub fn new(view: V) -> Self {
        Self { view, locale: Locale::ru_RU }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Redraw every region from a freshly fetched bundle.
    pub fn render_bundle(&mut self, bundle: &WeatherBundle, updated_at: NaiveTime) {
        self.render_current(&bundle.current);
        self.render_forecast(&bundle.forecast);
        self.render_air_quality(&bundle.air_quality);
        self.view.set_text(Slot::LastUpdated, updated_at.format("%H:%M").to_string());
    }

    /// Replace the current panel with the error and empty the forecast list.
    ///
    /// Air quality slots keep whatever they showed before.
    pub fn render_error(&mut self, error: &WeatherError) {
        self.view.set_panel(Panel::Error(ErrorPanel {
            message: format!("Ошибка: {error}"),
            prompt: RETRY_PROMPT.to_string(),
        }));
        self.view.clear_forecast();
    }

    fn render_current(&mut self, current: &CurrentConditions) {
        self.view.set_panel(Panel::Weather(CurrentPanel {
            heading: format!("{}, {}", current.location_name, current.country_name),
            icon_url: normalize_icon_url(&current.condition_icon_path),
            temperature: celsius(current.temperature_c),
            condition: current.condition_text.clone(),
        }));

        self.view.set_text(Slot::FeelsLike, celsius(current.feels_like_c));
        self.view.set_text(Slot::Humidity, format!("{}%", current.humidity_pct));
        self.view.set_text(Slot::Pressure, format!("{} hPa", current.pressure_mb));
        self.view.set_text(
            Slot::Wind,
            format!("{} км/ч, {}", current.wind_kph, current.wind_direction),
        );
    }

    fn render_forecast(&mut self, forecast: &ForecastSet) {
        self.view.clear_forecast();

        for day in forecast.days() {
            let card = ForecastCard {
                day_name: self.day_name(day.date),
                icon_url: normalize_icon_url(&day.condition_icon_path),
                condition: day.condition_text.clone(),
                avg_temp: celsius(day.avg_temp_c),
                max_temp: format!("↑ {}", celsius(day.max_temp_c)),
                min_temp: format!("↓ {}", celsius(day.min_temp_c)),
            };
            self.view.push_forecast(card);
        }
    }

    fn render_air_quality(&mut self, sample: &AirQualitySample) {
        match sample.us_epa_index {
            Some(index) => {
                let info = classify_aqi(Some(index));
                self.view.set_text(Slot::AqiValue, index.to_string());
                self.view.set_text(Slot::AqiLevel, info.level.label().to_string());
                self.view.set_text(Slot::AqiDescription, info.description.to_string());
                self.view.set_aqi_color(color_for_aqi(index));
            }
            None => {
                self.view.set_text(Slot::AqiValue, AQI_PLACEHOLDER.to_string());
                self.view.set_text(Slot::AqiLevel, "Нет данных".to_string());
                self.view.set_text(
                    Slot::AqiDescription,
                    "Информация о качестве воздуха недоступна".to_string(),
                );
            }
        }
    }

    fn day_name(&self, date: NaiveDate) -> String {
        weekday_abbrev(date, self.locale)
    }
}

/// Short weekday name of `date` in `locale`, e.g. "Пн".
pub fn weekday_abbrev(date: NaiveDate, locale: Locale) -> String {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
        .format_localized("%a", locale)
        .to_string()
}

fn celsius(value: f64) -> String {
    format!("{value}°C")
}
