use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::{
    Config,
    model::{Coordinates, ForecastSeries},
    provider::{nominatim::NominatimGeocoder, yandex::YandexForecastProvider},
};

pub mod nominatim;
pub mod yandex;

/// Failure reported by an external gateway.
#[derive(Debug, Error, PartialEq)]
pub enum ProviderError {
    /// The query was understood but matched nothing.
    #[error("nothing found for '{0}'")]
    NotFound(String),

    /// The request itself failed: network, HTTP status or malformed body.
    #[error("{0}")]
    Transient(String),
}

/// Resolves a free-text place name to the best matching coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn geocode(&self, city: &str) -> Result<Coordinates, ProviderError>;
}

/// Daily forecasts starting from the current date.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(
        &self,
        coords: Coordinates,
        days: u8,
    ) -> Result<ForecastSeries, ProviderError>;
}

/// Construct the geocoder described by the config.
pub fn geocoder_from_config(config: &Config) -> anyhow::Result<Box<dyn Geocoder>> {
    Ok(Box::new(NominatimGeocoder::new(config.geocoder.clone())?))
}

/// Construct the forecast provider described by the config.
pub fn forecast_provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let api_key = config.yandex_api_key()?;

    Ok(Box::new(YandexForecastProvider::new(
        api_key.to_owned(),
        config.forecast.clone(),
    )?))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
