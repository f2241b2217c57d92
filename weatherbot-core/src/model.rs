use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum length of a single outbound message, in characters.
pub const MAX_CHUNK_LEN: usize = 4000;

/// Structured form of a `/weather` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub location: String,
    pub mode: QueryMode,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    /// No date given; answered as a single date for today.
    Default,
    SingleDate(DateSpec),
    Range { from: DateSpec, to: DateSpec },
}

/// A user-supplied date expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSpec {
    Today,
    Tomorrow,
    Explicit(NaiveDate),
}

impl fmt::Display for DateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateSpec::Today => f.write_str("сегодня"),
            DateSpec::Tomorrow => f.write_str("завтра"),
            DateSpec::Explicit(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

/// Inclusive `[from, to]` range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Weather summary for one half of a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPart {
    pub temp_avg: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub feels_like: f64,
    pub condition: String,
    /// Metres per second.
    pub wind_speed: f64,
    pub wind_dir: String,
    pub humidity: u8,
    /// Millimetres of mercury.
    pub pressure: u16,
    pub precipitation_probability: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub day: DayPart,
    pub night: DayPart,
}

/// Daily forecasts as returned by a provider, in provider order.
pub type ForecastSeries = Vec<ForecastDay>;

/// Reply text split into chunks that each fit into one chat message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedMessage {
    pub chunks: Vec<String>,
}

impl RenderedMessage {
    pub fn from_text(text: &str) -> Self {
        Self {
            chunks: crate::format::split_chunks(text, MAX_CHUNK_LEN),
        }
    }

    pub fn text(&self) -> String {
        self.chunks.concat()
    }
}
