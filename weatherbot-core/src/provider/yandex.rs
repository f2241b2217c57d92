use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    config::ForecastSettings,
    model::{Coordinates, DayPart, ForecastDay, ForecastSeries},
};

use super::{ForecastProvider, ProviderError, truncate_body};

/// Daily forecasts from the Yandex Weather `/v2/forecast` API.
#[derive(Debug, Clone)]
pub struct YandexForecastProvider {
    api_key: String,
    settings: ForecastSettings,
    http: Client,
}

impl YandexForecastProvider {
    pub fn new(api_key: String, settings: ForecastSettings) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            api_key,
            settings,
            http,
        })
    }
}

#[derive(Debug, Deserialize)]
struct YaPart {
    temp_avg: Option<f64>,
    temp_min: f64,
    temp_max: f64,
    feels_like: f64,
    condition: String,
    wind_speed: f64,
    wind_dir: String,
    humidity: f64,
    pressure_mm: f64,
    prec_prob: f64,
}

#[derive(Debug, Deserialize)]
struct YaParts {
    day: YaPart,
    night: YaPart,
}

#[derive(Debug, Deserialize)]
struct YaForecast {
    date: NaiveDate,
    parts: YaParts,
}

#[derive(Debug, Deserialize)]
struct YaForecastResponse {
    forecasts: Vec<YaForecast>,
}

impl From<YaPart> for DayPart {
    fn from(part: YaPart) -> Self {
        DayPart {
            // Some parts omit the average; fall back to the midpoint.
            temp_avg: part
                .temp_avg
                .unwrap_or((part.temp_min + part.temp_max) / 2.0),
            temp_min: part.temp_min,
            temp_max: part.temp_max,
            feels_like: part.feels_like,
            condition: part.condition,
            wind_speed: part.wind_speed,
            wind_dir: part.wind_dir,
            humidity: part.humidity.round().clamp(0.0, 100.0) as u8,
            pressure: part.pressure_mm.round().clamp(0.0, f64::from(u16::MAX)) as u16,
            precipitation_probability: part.prec_prob.round().clamp(0.0, 100.0) as u8,
        }
    }
}

impl From<YaForecast> for ForecastDay {
    fn from(forecast: YaForecast) -> Self {
        ForecastDay {
            date: forecast.date,
            day: forecast.parts.day.into(),
            night: forecast.parts.night.into(),
        }
    }
}

#[async_trait]
impl ForecastProvider for YandexForecastProvider {
    #[instrument(skip(self))]
    async fn fetch_forecast(
        &self,
        coords: Coordinates,
        days: u8,
    ) -> Result<ForecastSeries, ProviderError> {
        let url = format!("{}/v2/forecast", self.settings.base_url.trim_end_matches('/'));
        debug!(%url, "forecast request");

        let res = self
            .http
            .get(&url)
            .header("X-Yandex-API-Key", &self.api_key)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("lang", self.settings.lang.clone()),
                ("limit", days.max(1).to_string()),
                ("hours", "false".to_string()),
                ("extra", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                ProviderError::Transient(format!("Failed to send request to Yandex Weather: {e}"))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            ProviderError::Transient(format!("Failed to read Yandex Weather response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(ProviderError::Transient(format!(
                "Yandex Weather request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let parsed: YaForecastResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::Transient(format!("Failed to parse Yandex Weather JSON: {e}"))
        })?;

        debug!(days = parsed.forecasts.len(), "forecast received");
        Ok(parsed.forecasts.into_iter().map(ForecastDay::from).collect())
    }
}
