use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::{Config, DEFAULT_BASE_URL},
    error::WeatherError,
    model::{
        AirQualitySample, CurrentConditions, ForecastDay, ForecastSet, LocationQuery,
        WeatherBundle,
    },
};

use super::WeatherProvider;

/// Client for weatherapi.com.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    api_key: String,
    base_url: String,
    forecast_days: u8,
    lang: String,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            forecast_days: 3,
            lang: "ru".to_string(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            forecast_days: config.forecast_days,
            lang: config.lang.clone(),
            http,
        })
    }

    async fn fetch_current(&self, q: &str) -> Result<CurrentConditions, WeatherError> {
        let params = [("key", self.api_key.as_str()), ("q", q), ("lang", self.lang.as_str())];
        let parsed: WaCurrentResponse = self.get_json("current.json", &params).await?;

        Ok(parsed.into())
    }

    async fn fetch_forecast(&self, q: &str) -> Result<ForecastSet, WeatherError> {
        let days = self.forecast_days.to_string();
        let params = [
            ("key", self.api_key.as_str()),
            ("q", q),
            ("days", days.as_str()),
            ("lang", self.lang.as_str()),
        ];
        let parsed: WaForecastResponse = self.get_json("forecast.json", &params).await?;

        Ok(ForecastSet::new(parsed.forecast.forecastday.into_iter().map(Into::into).collect()))
    }

    async fn fetch_air_quality(&self, q: &str) -> Result<AirQualitySample, WeatherError> {
        let params = [("key", self.api_key.as_str()), ("q", q), ("aqi", "yes")];
        let parsed: WaAqiResponse = self.get_json("current.json", &params).await?;

        Ok(AirQualitySample {
            us_epa_index: parsed.current.air_quality.and_then(|aq| aq.us_epa_index),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url.trim_end_matches('/'));
        let q = params.iter().find(|(k, _)| *k == "q").map_or("", |(_, v)| *v);
        tracing::debug!(%endpoint, q, "requesting WeatherAPI");

        let res = self.http.get(&url).query(params).send().await.map_err(|err| {
            WeatherError::server(format!("failed to send request to {endpoint}: {err}"))
        })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            WeatherError::server(format!("failed to read {endpoint} response body: {err}"))
        })?;

        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::NotFound);
        }
        if !status.is_success() {
            return Err(WeatherError::server(format!(
                "{endpoint} request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        serde_json::from_str(&body).map_err(|err| {
            WeatherError::server(format!("failed to parse {endpoint} JSON: {err}"))
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn fetch_bundle(&self, query: &LocationQuery) -> Result<WeatherBundle, WeatherError> {
        let q = query.as_param();

        let (current, forecast, air_quality) = tokio::try_join!(
            self.fetch_current(&q),
            self.fetch_forecast(&q),
            self.fetch_air_quality(&q)
        )
        .inspect_err(|err| {
            tracing::warn!(query = %q, error = %err, detail = err.detail(), "weather fetch failed")
        })?;

        Ok(WeatherBundle { current, forecast, air_quality })
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    pressure_mb: f64,
    wind_kph: f64,
    wind_dir: String,
    condition: WaCondition,
    last_updated_epoch: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WaCurrentResponse {
    location: WaLocation,
    current: WaCurrent,
}

impl From<WaCurrentResponse> for CurrentConditions {
    fn from(value: WaCurrentResponse) -> Self {
        let WaCurrentResponse { location, current } = value;
        Self {
            location_name: location.name,
            country_name: location.country,
            temperature_c: current.temp_c,
            feels_like_c: current.feelslike_c,
            humidity_pct: current.humidity,
            pressure_mb: current.pressure_mb,
            wind_kph: current.wind_kph,
            wind_direction: current.wind_dir,
            condition_text: current.condition.text,
            condition_icon_path: current.condition.icon,
            last_updated_epoch: current.last_updated_epoch,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WaDay {
    avgtemp_c: f64,
    maxtemp_c: f64,
    mintemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
}

impl From<WaForecastDay> for ForecastDay {
    fn from(value: WaForecastDay) -> Self {
        Self {
            date: value.date,
            avg_temp_c: value.day.avgtemp_c,
            max_temp_c: value.day.maxtemp_c,
            min_temp_c: value.day.mintemp_c,
            condition_text: value.day.condition.text,
            condition_icon_path: value.day.condition.icon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    forecast: WaForecast,
}

#[derive(Debug, Deserialize)]
struct WaAirQuality {
    #[serde(rename = "us-epa-index")]
    us_epa_index: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct WaAqiCurrent {
    air_quality: Option<WaAirQuality>,
}

#[derive(Debug, Deserialize)]
struct WaAqiResponse {
    current: WaAqiCurrent,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
