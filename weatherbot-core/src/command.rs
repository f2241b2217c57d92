//! Parsing of `/weather` command text into a [`Query`].
//!
//! The text is split on whitespace and every token is matched against a fixed
//! flag table. A token is a flag only when it equals one of the spellings
//! exactly, so hyphenated place names like `Санкт-Петербург` stay values.

use crate::{
    error::WeatherError,
    model::{DateSpec, Query, QueryMode},
};

const MISSING_CITY: &str = "Пожалуйста, укажите город. Например: /weather --location Москва";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Location,
    Date,
    From,
    To,
    Full,
}

impl Flag {
    const TABLE: &'static [(&'static str, Flag)] = &[
        ("--location", Flag::Location),
        ("-location", Flag::Location),
        ("-l", Flag::Location),
        ("--date", Flag::Date),
        ("-date", Flag::Date),
        ("-t", Flag::Date),
        ("--from", Flag::From),
        ("-from", Flag::From),
        ("--to", Flag::To),
        ("-to", Flag::To),
        ("--full", Flag::Full),
        ("-full", Flag::Full),
        ("-f", Flag::Full),
    ];

    fn from_token(token: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(spelling, _)| spelling.eq_ignore_ascii_case(token))
            .map(|(_, flag)| *flag)
    }

    fn name(self) -> &'static str {
        match self {
            Flag::Location => "--location",
            Flag::Date => "--date",
            Flag::From => "--from",
            Flag::To => "--to",
            Flag::Full => "--full",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Flag(Flag),
    Word(&'a str),
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace()
        .map(|word| Flag::from_token(word).map_or(Token::Word(word), Token::Flag))
        .collect()
}

/// Parse the text of a `/weather` message.
///
/// Words that are neither flags nor flag values, including the command itself,
/// are ignored. A repeated flag keeps its last value.
pub fn parse_query(text: &str) -> Result<Query, WeatherError> {
    let tokens = tokenize(text);

    let mut location: Option<String> = None;
    let mut date: Option<&str> = None;
    let mut from: Option<&str> = None;
    let mut to: Option<&str> = None;
    let mut verbose = false;

    let mut i = 0;
    while i < tokens.len() {
        let flag = match tokens[i] {
            Token::Flag(flag) => flag,
            Token::Word(_) => {
                i += 1;
                continue;
            }
        };
        i += 1;

        match flag {
            Flag::Full => verbose = true,
            Flag::Location => {
                let words: Vec<&str> = tokens[i..]
                    .iter()
                    .map_while(|token| match token {
                        Token::Word(word) => Some(*word),
                        Token::Flag(_) => None,
                    })
                    .collect();
                i += words.len();
                location = Some(words.join(" ").trim().to_string());
            }
            Flag::Date | Flag::From | Flag::To => {
                let Some(Token::Word(word)) = tokens.get(i) else {
                    return Err(WeatherError::validation(format!(
                        "Флаг {} требует значения.",
                        flag.name()
                    )));
                };
                i += 1;

                match flag {
                    Flag::Date => date = Some(*word),
                    Flag::From => from = Some(*word),
                    _ => to = Some(*word),
                }
            }
        }
    }

    let location = location
        .filter(|l| !l.is_empty())
        .ok_or_else(|| WeatherError::validation(MISSING_CITY))?;

    // Only the dates of the selected mode are parsed; the rest are ignored.
    let mode = match (from, to, date) {
        (Some(from), Some(to), _) => QueryMode::Range {
            from: DateSpec::parse(from)?,
            to: DateSpec::parse(to)?,
        },
        (_, _, Some(date)) => QueryMode::SingleDate(DateSpec::parse(date)?),
        _ => QueryMode::Default,
    };

    Ok(Query {
        location,
        mode,
        verbose,
    })
}
