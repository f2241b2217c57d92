//! Resolution of user date expressions into calendar dates.

use chrono::{Duration, Local, NaiveDate};

use crate::{
    error::{MAX_RANGE_DAYS, WeatherError},
    model::{DateRange, DateSpec},
};

const TODAY_KEYWORDS: &[&str] = &["сегодня", "today"];
const TOMORROW_KEYWORDS: &[&str] = &["завтра", "tomorrow"];

impl DateSpec {
    /// Parse a single date token: a today/tomorrow keyword or a strict `YYYY-MM-DD`.
    pub fn parse(token: &str) -> Result<Self, WeatherError> {
        let lower = token.to_lowercase();

        if TODAY_KEYWORDS.contains(&lower.as_str()) {
            return Ok(DateSpec::Today);
        }
        if TOMORROW_KEYWORDS.contains(&lower.as_str()) {
            return Ok(DateSpec::Tomorrow);
        }

        NaiveDate::parse_from_str(token, "%Y-%m-%d")
            .map(DateSpec::Explicit)
            .map_err(|_| WeatherError::InvalidDateFormat(token.to_string()))
    }
}

/// Turns [`DateSpec`]s into dates relative to a fixed "today".
#[derive(Debug, Clone, Copy)]
pub struct DateResolver {
    today: NaiveDate,
}

impl DateResolver {
    /// Resolver anchored at the current local date.
    pub fn now() -> Self {
        Self::at(Local::now().date_naive())
    }

    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn resolve(&self, spec: DateSpec) -> NaiveDate {
        match spec {
            DateSpec::Today => self.today,
            DateSpec::Tomorrow => self.today + Duration::days(1),
            DateSpec::Explicit(date) => date,
        }
    }

    pub fn resolve_token(&self, token: &str) -> Result<NaiveDate, WeatherError> {
        DateSpec::parse(token).map(|spec| self.resolve(spec))
    }

    /// Resolve both ends of a period and check ordering and span.
    pub fn resolve_range(&self, from: DateSpec, to: DateSpec) -> Result<DateRange, WeatherError> {
        let from = self.resolve(from);
        let to = self.resolve(to);

        if from > to {
            return Err(WeatherError::InvalidRange { from, to });
        }

        let days = (to - from).num_days();
        if days > MAX_RANGE_DAYS {
            return Err(WeatherError::RangeTooLarge { days });
        }

        Ok(DateRange { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn explicit(s: &str) -> DateSpec {
        DateSpec::parse(s).unwrap()
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(DateSpec::parse("Сегодня").unwrap(), DateSpec::Today);
        assert_eq!(DateSpec::parse("ЗАВТРА").unwrap(), DateSpec::Tomorrow);
        assert_eq!(DateSpec::parse("Tomorrow").unwrap(), DateSpec::Tomorrow);
    }

    #[test]
    fn today_and_tomorrow_follow_the_anchor() {
        let resolver = DateResolver::at(date(2023, 12, 31));

        assert_eq!(resolver.resolve_token("сегодня").unwrap(), date(2023, 12, 31));
        assert_eq!(resolver.resolve_token("завтра").unwrap(), date(2024, 1, 1));
    }

    #[test]
    fn now_resolves_today_to_local_date() {
        let resolver = DateResolver::now();
        let today = resolver.resolve(DateSpec::Today);

        assert_eq!(today, resolver.today());
        assert_eq!(resolver.resolve(DateSpec::Tomorrow), today + Duration::days(1));
    }

    #[test]
    fn explicit_dates_must_be_iso() {
        let resolver = DateResolver::at(date(2023, 12, 1));
        assert_eq!(resolver.resolve_token("2023-12-25").unwrap(), date(2023, 12, 25));

        for bad in ["25.12.2023", "2023-13-01", "2023-02-30", "послезавтра", ""] {
            let err = DateSpec::parse(bad).unwrap_err();
            assert_eq!(err, WeatherError::InvalidDateFormat(bad.to_string()));
        }
    }

    #[test]
    fn range_start_after_end_is_rejected() {
        let resolver = DateResolver::at(date(2023, 12, 1));
        let err = resolver
            .resolve_range(explicit("2023-12-31"), explicit("2023-12-25"))
            .unwrap_err();

        assert!(matches!(err, WeatherError::InvalidRange { .. }));
    }

    #[test]
    fn range_span_is_limited_to_thirty_days() {
        let resolver = DateResolver::at(date(2023, 12, 1));

        let ok = resolver
            .resolve_range(explicit("2024-01-01"), explicit("2024-01-31"))
            .unwrap();
        assert_eq!(ok.from, date(2024, 1, 1));
        assert_eq!(ok.to, date(2024, 1, 31));

        let err = resolver
            .resolve_range(explicit("2024-01-01"), explicit("2024-02-01"))
            .unwrap_err();
        assert_eq!(err, WeatherError::RangeTooLarge { days: 31 });
    }

    #[test]
    fn range_accepts_keywords_and_single_day() {
        let resolver = DateResolver::at(date(2023, 12, 30));
        let range = resolver
            .resolve_range(DateSpec::Today, DateSpec::Tomorrow)
            .unwrap();
        assert_eq!(range.from, date(2023, 12, 30));
        assert_eq!(range.to, date(2023, 12, 31));

        let same = resolver.resolve_range(DateSpec::Today, DateSpec::Today).unwrap();
        assert_eq!(same.from, same.to);
    }
}
