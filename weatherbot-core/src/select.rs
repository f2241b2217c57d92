use chrono::NaiveDate;

use crate::{
    error::WeatherError,
    model::{DateRange, ForecastDay},
};

/// Forecast for exactly `date`, taken from the provider's series.
pub fn select_day<'a>(
    series: &'a [ForecastDay],
    date: NaiveDate,
    city: &str,
) -> Result<&'a ForecastDay, WeatherError> {
    series
        .iter()
        .find(|day| day.date == date)
        .ok_or_else(|| WeatherError::ForecastNotFound {
            date,
            city: city.to_string(),
        })
}

/// Every forecast inside `range`, in series order.
pub fn select_range<'a>(
    series: &'a [ForecastDay],
    range: DateRange,
    city: &str,
) -> Result<Vec<&'a ForecastDay>, WeatherError> {
    let days: Vec<_> = series.iter().filter(|day| range.contains(day.date)).collect();

    if days.is_empty() {
        return Err(WeatherError::NoDataForPeriod {
            range,
            city: city.to_string(),
        });
    }

    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::day;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 12, d).unwrap()
    }

    fn december_week() -> Vec<ForecastDay> {
        (25..=31).map(|d| day(date(d))).collect()
    }

    #[test]
    fn single_day_is_found() {
        let series = december_week();
        let found = select_day(&series, date(26), "Москва").unwrap();
        assert_eq!(found.date, date(26));
    }

    #[test]
    fn single_day_outside_series_is_not_found() {
        let series = december_week();
        let missing = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let err = select_day(&series, missing, "Москва").unwrap_err();
        assert_eq!(
            err,
            WeatherError::ForecastNotFound {
                date: missing,
                city: "Москва".into()
            }
        );
    }

    #[test]
    fn range_is_inclusive_and_ordered() {
        let series = december_week();
        let range = DateRange {
            from: date(27),
            to: date(29),
        };

        let days = select_range(&series, range, "Москва").unwrap();
        let dates: Vec<_> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(27), date(28), date(29)]);
    }

    #[test]
    fn range_overlapping_series_end_is_truncated() {
        let series = december_week();
        let range = DateRange {
            from: date(30),
            to: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        };

        let days = select_range(&series, range, "Москва").unwrap();
        assert_eq!(days.len(), 2);
    }

    #[test]
    fn range_without_data_is_an_error() {
        let series = december_week();
        let range = DateRange {
            from: date(1),
            to: date(10),
        };

        let err = select_range(&series, range, "Москва").unwrap_err();
        assert!(matches!(err, WeatherError::NoDataForPeriod { .. }));
    }
}
