use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A geographic point, as produced by geolocation or typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What to look weather up for.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    Place(String),
    Coordinates(Coordinates),
}

impl LocationQuery {
    /// Build a query from raw user input.
    ///
    /// Returns `None` for blank input. A `"lat,lon"` pair of numbers becomes
    /// [`LocationQuery::Coordinates`], anything else is a place name.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some((lat, lon)) = trimmed.split_once(',') {
            if let (Ok(latitude), Ok(longitude)) =
                (lat.trim().parse::<f64>(), lon.trim().parse::<f64>())
            {
                return Some(Self::Coordinates(Coordinates { latitude, longitude }));
            }
        }

        Some(Self::Place(trimmed.to_string()))
    }

    /// Value for the `q` parameter of the weather API.
    pub fn as_param(&self) -> String {
        match self {
            Self::Place(name) => name.clone(),
            Self::Coordinates(c) => format!("{},{}", c.latitude, c.longitude),
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_param())
    }
}

impl From<Coordinates> for LocationQuery {
    fn from(value: Coordinates) -> Self {
        Self::Coordinates(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub country_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_mb: f64,
    pub wind_kph: f64,
    pub wind_direction: String,
    pub condition_text: String,
    pub condition_icon_path: String,
    pub last_updated_epoch: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub avg_temp_c: f64,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub condition_text: String,
    pub condition_icon_path: String,
}

/// Forecast days in the order the API returned them (chronological).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSet(Vec<ForecastDay>);

impl ForecastSet {
    pub fn new(days: Vec<ForecastDay>) -> Self {
        Self(days)
    }

    pub fn days(&self) -> &[ForecastDay] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQualitySample {
    /// US EPA index as reported by the API, absent when the provider has no data.
    pub us_epa_index: Option<i32>,
}

/// Everything fetched for one query. Built only when all three requests succeed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherBundle {
    pub current: CurrentConditions,
    pub forecast: ForecastSet,
    pub air_quality: AirQualitySample,
}
