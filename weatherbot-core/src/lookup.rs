//! Display labels for provider codes.
//!
//! Every lookup is total: a code missing from its table comes back unchanged.

use chrono::Weekday;

const CONDITIONS: &[(&str, &str)] = &[
    ("clear", "ясно"),
    ("partly-cloudy", "малооблачно"),
    ("cloudy", "облачно с прояснениями"),
    ("overcast", "пасмурно"),
    ("light-rain", "небольшой дождь"),
    ("rain", "дождь"),
    ("heavy-rain", "сильный дождь"),
    ("showers", "ливень"),
    ("wet-snow", "дождь со снегом"),
    ("light-snow", "небольшой снег"),
    ("snow", "снег"),
    ("snow-showers", "снегопад"),
    ("hail", "град"),
    ("thunderstorm", "гроза"),
    ("thunderstorm-with-rain", "дождь с грозой"),
    ("thunderstorm-with-hail", "гроза с градом"),
];

const WIND_DIRECTIONS: &[(&str, &str)] = &[
    ("nw", "северо-западный"),
    ("n", "северный"),
    ("ne", "северо-восточный"),
    ("e", "восточный"),
    ("se", "юго-восточный"),
    ("s", "южный"),
    ("sw", "юго-западный"),
    ("w", "западный"),
    ("c", "штиль"),
];

fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(code, _)| *code == key)
        .map(|(_, label)| *label)
}

/// Label for a weather condition code such as `"partly-cloudy"`.
pub fn condition_label(code: &str) -> &str {
    lookup(CONDITIONS, code).unwrap_or(code)
}

/// Label for a wind direction code such as `"NW"`. Case-insensitive.
pub fn wind_direction_label(code: &str) -> &str {
    lookup(WIND_DIRECTIONS, &code.to_ascii_lowercase()).unwrap_or(code)
}

pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "понедельник",
        Weekday::Tue => "вторник",
        Weekday::Wed => "среда",
        Weekday::Thu => "четверг",
        Weekday::Fri => "пятница",
        Weekday::Sat => "суббота",
        Weekday::Sun => "воскресенье",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_condition_is_translated() {
        assert_eq!(condition_label("clear"), "ясно");
        assert_eq!(condition_label("thunderstorm-with-hail"), "гроза с градом");
    }

    #[test]
    fn unknown_codes_pass_through() {
        assert_eq!(condition_label("foo"), "foo");
        assert_eq!(wind_direction_label("xyz"), "xyz");
        assert_eq!(condition_label(""), "");
    }

    #[test]
    fn wind_direction_ignores_case() {
        assert_eq!(wind_direction_label("NW"), "северо-западный");
        assert_eq!(wind_direction_label("c"), "штиль");
    }

    #[test]
    fn weekday_names() {
        assert_eq!(weekday_label(Weekday::Mon), "понедельник");
        assert_eq!(weekday_label(Weekday::Sun), "воскресенье");
    }
}
