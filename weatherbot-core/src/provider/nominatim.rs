//! City lookup through the OpenStreetMap Nominatim search API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::{config::GeocoderSettings, model::Coordinates};

use super::{Geocoder, ProviderError, truncate_body};

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    settings: GeocoderSettings,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new(settings: GeocoderSettings) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self { settings, http })
    }
}

#[derive(Debug, Deserialize)]
struct NmPlace {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

impl NmPlace {
    fn coordinates(&self) -> Result<Coordinates, ProviderError> {
        let parse = |value: &str| {
            value.trim().parse::<f64>().map_err(|e| {
                ProviderError::Transient(format!(
                    "Nominatim returned bad coordinate '{value}': {e}"
                ))
            })
        };

        Ok(Coordinates {
            latitude: parse(&self.lat)?,
            longitude: parse(&self.lon)?,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, city: &str) -> Result<Coordinates, ProviderError> {
        let url = format!("{}/search", self.settings.base_url.trim_end_matches('/'));
        debug!(%url, "geocoding request");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("city", city),
                ("format", "json"),
                ("limit", "1"),
                ("accept-language", self.settings.language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                ProviderError::Transient(format!("Failed to send request to Nominatim: {e}"))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            ProviderError::Transient(format!("Failed to read Nominatim response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(ProviderError::Transient(format!(
                "Nominatim request failed with status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let places: Vec<NmPlace> = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Transient(format!("Failed to parse Nominatim JSON: {e}")))?;

        let Some(place) = places.first() else {
            warn!(city, "city not found");
            return Err(ProviderError::NotFound(city.to_string()));
        };

        let coords = place.coordinates()?;
        info!(
            city,
            place = place.display_name.as_deref().unwrap_or(city),
            lat = coords.latitude,
            lon = coords.longitude,
            "found coordinates"
        );

        Ok(coords)
    }
}
