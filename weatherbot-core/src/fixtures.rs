//! Forecast values shared by unit tests.

use chrono::NaiveDate;

use crate::model::{DayPart, ForecastDay};

pub(crate) fn part(temp: f64, condition: &str) -> DayPart {
    DayPart {
        temp_avg: temp,
        temp_min: temp - 2.0,
        temp_max: temp + 2.0,
        feels_like: temp - 3.0,
        condition: condition.to_string(),
        wind_speed: 3.5,
        wind_dir: "nw".to_string(),
        humidity: 80,
        pressure: 745,
        precipitation_probability: 20,
    }
}

pub(crate) fn day(date: NaiveDate) -> ForecastDay {
    ForecastDay {
        date,
        day: part(-1.0, "cloudy"),
        night: part(-5.0, "clear"),
    }
}
