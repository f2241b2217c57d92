//! The `/weather` pipeline: parse, resolve dates, geocode, fetch, select, render.

use tracing::{info, warn};

use crate::{
    command::parse_query,
    dates::DateResolver,
    error::WeatherError,
    format::{format_day, format_period},
    model::{Coordinates, DateSpec, ForecastSeries, Query, QueryMode, RenderedMessage},
    provider::{ForecastProvider, Geocoder, ProviderError},
    select::{select_day, select_range},
};

/// Answers weather commands using a geocoder and a forecast provider.
///
/// Holds no per-request state, so one service can serve concurrent commands.
#[derive(Debug)]
pub struct WeatherService {
    geocoder: Box<dyn Geocoder>,
    forecasts: Box<dyn ForecastProvider>,
    forecast_days: u8,
}

impl WeatherService {
    pub fn new(
        geocoder: Box<dyn Geocoder>,
        forecasts: Box<dyn ForecastProvider>,
        forecast_days: u8,
    ) -> Self {
        Self {
            geocoder,
            forecasts,
            forecast_days,
        }
    }

    /// Answer a command; failures become the matching user message.
    pub async fn answer(&self, text: &str) -> RenderedMessage {
        match self.handle(text).await {
            Ok(message) => message,
            Err(err) => {
                warn!(error = %err, "weather query failed");
                RenderedMessage::from_text(&err.user_message())
            }
        }
    }

    /// Answer a command with dates resolved against the current local date.
    pub async fn handle(&self, text: &str) -> Result<RenderedMessage, WeatherError> {
        self.handle_at(text, DateResolver::now()).await
    }

    pub async fn handle_at(
        &self,
        text: &str,
        resolver: DateResolver,
    ) -> Result<RenderedMessage, WeatherError> {
        let query = parse_query(text)?;
        info!(city = %query.location, mode = ?query.mode, full = query.verbose, "weather request");

        let text = match query.mode {
            QueryMode::Range { from, to } => {
                let range = resolver.resolve_range(from, to)?;
                let series = self.lookup(&query).await?;
                let days = select_range(&series, range, &query.location)?;
                format_period(&days, &query.location, range, query.verbose)
            }
            QueryMode::SingleDate(spec) => self.single_day(&query, spec, resolver).await?,
            QueryMode::Default => self.single_day(&query, DateSpec::Today, resolver).await?,
        };

        Ok(RenderedMessage::from_text(&text))
    }

    async fn single_day(
        &self,
        query: &Query,
        spec: DateSpec,
        resolver: DateResolver,
    ) -> Result<String, WeatherError> {
        let date = resolver.resolve(spec);
        let series = self.lookup(query).await?;
        let day = select_day(&series, date, &query.location)?;
        Ok(format_day(day, &query.location, &spec.to_string(), query.verbose))
    }

    async fn lookup(&self, query: &Query) -> Result<ForecastSeries, WeatherError> {
        let coords = self.coordinates(&query.location).await?;

        self.forecasts
            .fetch_forecast(coords, self.forecast_days)
            .await
            .map_err(|e| WeatherError::ForecastUnavailable(e.to_string()))
    }

    async fn coordinates(&self, city: &str) -> Result<Coordinates, WeatherError> {
        self.geocoder.geocode(city).await.map_err(|e| match e {
            ProviderError::NotFound(_) => WeatherError::LocationNotFound(city.to_string()),
            ProviderError::Transient(msg) => WeatherError::ForecastUnavailable(msg),
        })
    }
}
