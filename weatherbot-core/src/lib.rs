//! Core library for the weather chat bot.
//!
//! This crate defines:
//! - Parsing of `/weather` commands and date resolution
//! - Selection and rendering of daily forecasts
//! - Abstractions over the geocoding and forecast gateways
//! - Configuration & credentials handling
//!
//! It is used by the `weatherbot` binary but does not depend on any chat transport.

pub mod command;
pub mod config;
pub mod dates;
pub mod error;
pub mod format;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod select;
pub mod service;

#[cfg(test)]
mod fixtures;

pub use config::Config;
pub use error::WeatherError;
pub use model::{Coordinates, DayPart, ForecastDay, ForecastSeries, Query, RenderedMessage};
pub use provider::{ForecastProvider, Geocoder, ProviderError};
pub use service::WeatherService;
