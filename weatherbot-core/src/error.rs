use chrono::NaiveDate;
use thiserror::Error;

use crate::model::DateRange;

/// Longest allowed distance between the ends of a requested period, in days.
pub const MAX_RANGE_DAYS: i64 = 30;

/// Everything that can end a weather query early.
#[derive(Debug, Error, PartialEq)]
pub enum WeatherError {
    /// Bad or missing command arguments. Carries the text shown to the user.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid date format: '{0}'")]
    InvalidDateFormat(String),

    #[error("invalid range: start {from} is after end {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("range too large: {days} days, at most {max} allowed", max = MAX_RANGE_DAYS)]
    RangeTooLarge { days: i64 },

    #[error("location not found: {0}")]
    LocationNotFound(String),

    #[error("forecast unavailable: {0}")]
    ForecastUnavailable(String),

    #[error("no forecast for {date} in {city}")]
    ForecastNotFound { date: NaiveDate, city: String },

    #[error("no forecast data for {range} in {city}")]
    NoDataForPeriod { range: DateRange, city: String },
}

impl WeatherError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Fixed text shown to the chat user for this kind of failure.
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::Validation(message) => message.clone(),
            WeatherError::InvalidDateFormat(_) => {
                "Неверный формат даты. Используйте ГГГГ-ММ-ДД, 'сегодня' или 'завтра'.".to_string()
            }
            WeatherError::InvalidRange { .. } => {
                "Начальная дата должна быть раньше конечной.".to_string()
            }
            WeatherError::RangeTooLarge { .. } => {
                format!("Максимальный период - {MAX_RANGE_DAYS} дней.")
            }
            WeatherError::LocationNotFound(_) => {
                "Город не найден. Попробуйте уточнить название.".to_string()
            }
            WeatherError::ForecastUnavailable(_) => {
                "Не удалось получить данные о погоде. Попробуйте позже.".to_string()
            }
            WeatherError::ForecastNotFound { date, .. } => format!("Прогноз на {date} не найден."),
            WeatherError::NoDataForPeriod { range, .. } => {
                format!("Нет данных за указанный период {range}.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_passed_through() {
        let err = WeatherError::validation("Пожалуйста, укажите город.");
        assert_eq!(err.user_message(), "Пожалуйста, укажите город.");
        assert_eq!(err.to_string(), "validation error: Пожалуйста, укажите город.");
    }

    #[test]
    fn period_message_names_the_range() {
        let range = DateRange {
            from: NaiveDate::from_ymd_opt(2023, 12, 25).unwrap(),
            to: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        };
        let err = WeatherError::NoDataForPeriod {
            range,
            city: "Сочи".into(),
        };

        assert_eq!(
            err.user_message(),
            "Нет данных за указанный период 2023-12-25 - 2023-12-31."
        );
    }

    #[test]
    fn range_too_large_mentions_limit() {
        let err = WeatherError::RangeTooLarge { days: 31 };
        assert!(err.user_message().contains("30"));
        assert!(err.to_string().contains("31 days"));
    }
}
