use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{LocationQuery, WeatherBundle},
};

pub mod weatherapi;

pub use weatherapi::WeatherApiClient;

/// Something that can produce a full [`WeatherBundle`] for a location.
///
/// Either every part of the bundle arrives or the call fails; there is no
/// partial result.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_bundle(&self, query: &LocationQuery) -> Result<WeatherBundle, WeatherError>;
}
