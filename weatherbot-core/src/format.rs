//! Human-readable rendering of forecasts.

use chrono::Datelike;

use crate::{
    lookup::{condition_label, wind_direction_label, weekday_label},
    model::{DateRange, DayPart, ForecastDay},
};

const SEPARATOR_WIDTH: usize = 30;

/// Render the forecast for one day. `when` is the date as the user asked for it.
pub fn format_day(forecast: &ForecastDay, city: &str, when: &str, verbose: bool) -> String {
    if verbose {
        format_day_detailed(forecast, city, when)
    } else {
        format_day_short(forecast, city, when)
    }
}

/// Render the forecasts of a period, one block per day.
pub fn format_period(days: &[&ForecastDay], city: &str, range: DateRange, verbose: bool) -> String {
    if verbose {
        format_period_detailed(days, city, range)
    } else {
        format_period_short(days, city, range)
    }
}

fn format_day_short(forecast: &ForecastDay, city: &str, when: &str) -> String {
    let day = &forecast.day;
    let night = &forecast.night;

    format!(
        "🌤 Погода в {city} на {when}:\n\
         🌞 Днем: {}°C (ощущается как {}°C)\n\
         ☁ {}, 💧{}%, 🌬 {} м/с\n\
         🌙 Ночью: {}°C (ощущается как {}°C)\n\
         ☁ {}, 💧{}%, 🌬 {} м/с",
        day.temp_avg,
        day.feels_like,
        condition_label(&day.condition),
        day.humidity,
        day.wind_speed,
        night.temp_avg,
        night.feels_like,
        condition_label(&night.condition),
        night.humidity,
        night.wind_speed,
    )
}

fn format_day_detailed(forecast: &ForecastDay, city: &str, when: &str) -> String {
    let mut out = format!("📊 Подробный прогноз в {city} на {when}:\n");
    push_detailed_parts(&mut out, forecast);
    out
}

fn format_period_short(days: &[&ForecastDay], city: &str, range: DateRange) -> String {
    let mut out = format!("🌤 Погода в {city} с {} по {}:\n", range.from, range.to);

    for forecast in days {
        out.push_str(&format!(
            "\n📅 {}:\n🌞 Днем: {}°C, ☁ {}\n🌙 Ночью: {}°C\n",
            day_heading(forecast),
            forecast.day.temp_avg,
            condition_label(&forecast.day.condition),
            forecast.night.temp_avg,
        ));
    }

    out.truncate(out.trim_end().len());
    out
}

fn format_period_detailed(days: &[&ForecastDay], city: &str, range: DateRange) -> String {
    let mut out = format!(
        "📊 Подробный прогноз в {city} с {} по {}:\n",
        range.from, range.to
    );

    for forecast in days {
        out.push_str(&format!("\n📅 {}:", day_heading(forecast)));
        push_detailed_parts(&mut out, forecast);
        out.push('\n');
        out.push_str(&"-".repeat(SEPARATOR_WIDTH));
        out.push('\n');
    }

    out.truncate(out.trim_end().len());
    out
}

fn day_heading(forecast: &ForecastDay) -> String {
    format!(
        "{} ({})",
        forecast.date.format("%Y-%m-%d"),
        weekday_label(forecast.date.weekday())
    )
}

fn push_detailed_parts(out: &mut String, forecast: &ForecastDay) {
    push_detailed_part(out, "🌞 Дневной прогноз:", &forecast.day);
    out.push('\n');
    push_detailed_part(out, "🌙 Ночной прогноз:", &forecast.night);
}

fn push_detailed_part(out: &mut String, title: &str, part: &DayPart) {
    out.push_str(&format!(
        "\n{title}\n\
         🌡 Температура: {}°C (мин {}°C, макс {}°C)\n\
         Ощущается как: {}°C\n\
         ☁ Состояние: {}\n\
         🌬 Ветер: {} м/с, направление: {}\n\
         💧 Влажность: {}%\n\
         📊 Давление: {} мм рт. ст.\n\
         🌧 Вероятность осадков: {}%",
        part.temp_avg,
        part.temp_min,
        part.temp_max,
        part.feels_like,
        condition_label(&part.condition),
        part.wind_speed,
        wind_direction_label(&part.wind_dir),
        part.humidity,
        part.pressure,
        part.precipitation_probability,
    ));
}

/// Split `text` into consecutive pieces of at most `max` characters.
///
/// Lengths are counted in `char`s so multi-byte text is never cut inside a
/// character. Empty text yields no chunks.
pub fn split_chunks(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut len = 0;

    for ch in text.chars() {
        if len == max {
            chunks.push(std::mem::take(&mut current));
            len = 0;
        }
        current.push(ch);
        len += 1;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{day, part};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 12, d).unwrap()
    }

    #[test]
    fn short_day_has_no_min_max() {
        let text = format_day(&day(date(25)), "Москва", "завтра", false);

        assert!(text.starts_with("🌤 Погода в Москва на завтра:"));
        assert!(text.contains("🌞 Днем: -1°C (ощущается как -4°C)"));
        assert!(text.contains("облачно с прояснениями"));
        assert!(text.contains("🌙 Ночью: -5°C"));
        assert!(!text.contains("мин"));
        assert!(!text.contains("макс"));
        assert!(!text.contains("Давление"));
    }

    #[test]
    fn detailed_day_translates_codes() {
        let text = format_day(&day(date(25)), "Москва", "2023-12-25", true);

        assert!(text.starts_with("📊 Подробный прогноз в Москва на 2023-12-25:"));
        assert!(text.contains("(мин -3°C, макс 1°C)"));
        assert!(text.contains("☁ Состояние: ясно"));
        assert!(!text.contains("Состояние: clear"));
        assert!(text.contains("направление: северо-западный"));
        assert!(text.contains("📊 Давление: 745 мм рт. ст."));
        assert!(text.contains("🌧 Вероятность осадков: 20%"));
    }

    #[test]
    fn unknown_codes_appear_verbatim() {
        let mut forecast = day(date(25));
        forecast.day = part(2.5, "foo");
        forecast.day.wind_dir = "zz".into();

        let text = format_day(&forecast, "Москва", "сегодня", true);
        assert!(text.contains("☁ Состояние: foo"));
        assert!(text.contains("направление: zz"));
        assert!(text.contains("🌡 Температура: 2.5°C"));
    }

    #[test]
    fn short_period_lists_days_in_order_with_weekdays() {
        let days = [day(date(25)), day(date(26))];
        let refs: Vec<_> = days.iter().collect();
        let range = DateRange {
            from: date(25),
            to: date(31),
        };

        let text = format_period(&refs, "Сочи", range, false);
        assert!(text.starts_with("🌤 Погода в Сочи с 2023-12-25 по 2023-12-31:"));

        let first = text.find("📅 2023-12-25 (понедельник):").unwrap();
        let second = text.find("📅 2023-12-26 (вторник):").unwrap();
        assert!(first < second);
        assert!(text.contains("🌞 Днем: -1°C, ☁ облачно с прояснениями"));
        assert!(!text.contains("мин"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn detailed_period_separates_days() {
        let days = [day(date(25)), day(date(26)), day(date(27))];
        let refs: Vec<_> = days.iter().collect();
        let range = DateRange {
            from: date(25),
            to: date(27),
        };

        let text = format_period(&refs, "Сочи", range, true);
        let separator = "-".repeat(SEPARATOR_WIDTH);

        assert_eq!(text.matches(&separator).count(), 3);
        assert_eq!(text.matches("🌞 Дневной прогноз:").count(), 3);
        assert!(text.contains("📅 2023-12-27 (среда):"));
    }

    #[test]
    fn chunks_split_at_limit() {
        let text = "ж".repeat(8500);
        let chunks = split_chunks(&text, 4000);

        let lens: Vec<_> = chunks.iter().map(|c| c.chars().count()).collect();
        assert_eq!(lens, vec![4000, 4000, 500]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_chunks("abc", 4000), vec!["abc".to_string()]);
        assert_eq!(split_chunks(&"a".repeat(4000), 4000).len(), 1);
        assert!(split_chunks("", 4000).is_empty());
    }
}
