/// Date format patterns such as `mm/dd/yyyy`, and the lenient parser and
/// formatter built on them.
use crate::calendar::CalendarDate;
use crate::exceptions::PickerError;
use log::debug;
use regex::Regex;

const DEFAULT_SEPARATOR: char = '/';

/// One component of a date format pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `d`
    Day,
    /// `dd`
    DayPadded,
    /// `m`
    Month,
    /// `mm`
    MonthPadded,
    /// `yy`
    YearShort,
    /// `yyyy`
    Year,
    /// Any other part of the pattern. Counts as a field, reads nothing and
    /// writes nothing.
    Literal(String),
}

impl Token {
    fn from_part(part: &str) -> Self {
        match part {
            "d" => Self::Day,
            "dd" => Self::DayPadded,
            "m" => Self::Month,
            "mm" => Self::MonthPadded,
            "yy" => Self::YearShort,
            "yyyy" => Self::Year,
            other => Self::Literal(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    separator: char,
    tokens: Vec<Token>,
    has_year: bool,
    has_month: bool,
    has_day: bool,
}

impl DateFormat {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn has_year(&self) -> bool {
        self.has_year
    }

    pub fn has_month(&self) -> bool {
        self.has_month
    }

    pub fn has_day(&self) -> bool {
        self.has_day
    }
}

/// Derive a [`DateFormat`] from a pattern. The separator is the first `.`, `/`,
/// `-` or whitespace character in the pattern, the parts are whatever lies
/// between runs of non-word characters.
pub fn parse_format(pattern: &str) -> Result<DateFormat, PickerError> {
    let separator_re =
        Regex::new(r"[./\-\s]").map_err(|e| PickerError::InvalidFormat(e.to_string()))?;
    let split_re = Regex::new(r"\W+").map_err(|e| PickerError::InvalidFormat(e.to_string()))?;

    let separator = separator_re
        .find(pattern)
        .and_then(|m| m.as_str().chars().next())
        .unwrap_or(DEFAULT_SEPARATOR);

    let tokens: Vec<Token> = split_re
        .split(pattern)
        .filter(|part| !part.is_empty())
        .map(Token::from_part)
        .collect();

    let has_year = tokens
        .iter()
        .any(|t| matches!(t, Token::Year | Token::YearShort));
    let has_month = tokens
        .iter()
        .any(|t| matches!(t, Token::Month | Token::MonthPadded));
    let has_day = tokens
        .iter()
        .any(|t| matches!(t, Token::Day | Token::DayPadded));

    if !(has_year || has_month || has_day) {
        return Err(PickerError::InvalidFormat(pattern.to_string()));
    }

    Ok(DateFormat {
        pattern: pattern.to_string(),
        separator,
        tokens,
        has_year,
        has_month,
        has_day,
    })
}

/// Parse `text` against `format`, falling back to today for anything that
/// cannot be read. Never fails.
pub fn parse_date(text: &str, format: &DateFormat) -> CalendarDate {
    parse_date_relative(text, format, CalendarDate::today())
}

/// Same as [`parse_date`] with an explicit "today".
///
/// When the number of parts differs from the number of tokens the whole
/// input is ignored and `today` is returned. Otherwise every part is read as a
/// leading integer; a part with no digits (or a zero) reads as 1. Two digit
/// years are always taken as 20xx. Overflowing days and months roll into the
/// following month or year.
pub fn parse_date_relative(text: &str, format: &DateFormat, today: CalendarDate) -> CalendarDate {
    let parts: Vec<&str> = if text.is_empty() {
        Vec::new()
    } else {
        text.split(format.separator).collect()
    };

    let mut year = today.year as i64;
    let mut month = today.month as i64;
    let mut day = today.day as i64;

    if parts.len() == format.tokens.len() {
        for (part, token) in parts.iter().zip(format.tokens.iter()) {
            let val = match lenient_int(part) {
                Some(v) if v != 0 => v,
                _ => {
                    if !matches!(token, Token::Literal(_)) {
                        debug!("Could not read {:?} as {:?}, using 1", part, token);
                    }
                    1
                }
            };

            match token {
                Token::Day | Token::DayPadded => day = val,
                Token::Month | Token::MonthPadded => month = val.saturating_sub(1),
                Token::YearShort => year = 2000_i64.saturating_add(val),
                Token::Year => year = val,
                Token::Literal(_) => {}
            }
        }
    } else if !text.is_empty() {
        debug!(
            "{:?} has {} parts but {} expects {}, using today",
            text,
            parts.len(),
            format.pattern,
            format.tokens.len()
        );
    }

    CalendarDate::normalized(year, month, day)
}

/// Render `date` with `format`
pub fn format_date(date: &CalendarDate, format: &DateFormat) -> String {
    let separator = format.separator.to_string();
    format
        .tokens
        .iter()
        .map(|token| match token {
            Token::Day => date.day.to_string(),
            Token::DayPadded => format!("{:02}", date.day),
            Token::Month => (date.month + 1).to_string(),
            Token::MonthPadded => format!("{:02}", date.month + 1),
            Token::YearShort => format!("{:02}", date.year.rem_euclid(100)),
            Token::Year => date.year.to_string(),
            Token::Literal(_) => String::new(),
        })
        .collect::<Vec<String>>()
        .join(&separator)
}

/// Read the integer at the start of `text`: leading whitespace, an optional
/// sign and at least one digit. Anything after the digits is ignored.
fn lenient_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    rest[..end].parse::<i64>().ok().map(|v| sign * v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> CalendarDate {
        CalendarDate::new(2026, 9, 16).unwrap()
    }

    #[test]
    fn test_parse_format_us() {
        let format = parse_format("mm/dd/yyyy").unwrap();
        assert_eq!(format.separator(), '/');
        assert_eq!(
            format.tokens(),
            &[Token::MonthPadded, Token::DayPadded, Token::Year]
        );
        assert!(format.has_year() && format.has_month() && format.has_day());
    }

    #[test]
    fn test_parse_format_separators() {
        assert_eq!(parse_format("yyyy-mm-dd").unwrap().separator(), '-');
        assert_eq!(parse_format("dd.mm.yy").unwrap().separator(), '.');
        assert_eq!(parse_format("d m yyyy").unwrap().separator(), ' ');
        // a comma splits the parts but is not a recognised separator
        assert_eq!(parse_format("dd,mm").unwrap().separator(), '/');
    }

    #[test]
    fn test_parse_format_partial() {
        let format = parse_format("yyyy").unwrap();
        assert!(format.has_year());
        assert!(!format.has_month());
        assert!(!format.has_day());

        let format = parse_format("mm/yyyy").unwrap();
        assert!(format.has_month());
        assert!(!format.has_day());
    }

    #[test]
    fn test_parse_format_rejects_patterns_without_tokens() {
        assert_eq!(
            parse_format("").unwrap_err(),
            PickerError::InvalidFormat(String::new())
        );
        assert!(parse_format("--//").is_err());
        assert!(parse_format("hh:ii").is_err());
    }

    #[test]
    fn test_parse_date_full() {
        let format = parse_format("mm/dd/yyyy").unwrap();
        assert_eq!(
            parse_date_relative("02/15/2024", &format, today()),
            CalendarDate::new(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_date_wrong_part_count_is_today() {
        let format = parse_format("mm/dd/yyyy").unwrap();
        assert_eq!(parse_date_relative("02/15", &format, today()), today());
        assert_eq!(parse_date_relative("", &format, today()), today());
        assert_eq!(parse_date_relative("2024-02-15", &format, today()), today());
    }

    #[test]
    fn test_parse_date_garbled_parts_default_to_one() {
        let format = parse_format("yyyy-mm-dd").unwrap();
        assert_eq!(
            parse_date_relative("2024-xx-0", &format, today()),
            CalendarDate::new(2024, 0, 1).unwrap()
        );
        assert_eq!(
            parse_date_relative("2024-3rd-7th", &format, today()),
            CalendarDate::new(2024, 2, 7).unwrap()
        );
    }

    #[test]
    fn test_parse_date_two_digit_year() {
        let format = parse_format("dd.mm.yy").unwrap();
        assert_eq!(
            parse_date_relative("15.02.99", &format, today()),
            CalendarDate::new(2099, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_date_overflow_rolls_forward() {
        let format = parse_format("yyyy-mm-dd").unwrap();
        assert_eq!(
            parse_date_relative("2023-02-31", &format, today()),
            CalendarDate::new(2023, 2, 3).unwrap()
        );
        assert_eq!(
            parse_date_relative("2023-13-01", &format, today()),
            CalendarDate::new(2024, 0, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_date_extreme_numbers_clamp_the_year() {
        use crate::calendar::{MAX_YEAR, MIN_YEAR};

        let format = parse_format("mm/dd/yyyy").unwrap();
        let date = parse_date_relative(
            "9223372036854775807/1/9223372036854775807",
            &format,
            today(),
        );
        assert_eq!(date.year, MAX_YEAR);
        assert_eq!(date.day, 1);

        let date = parse_date_relative(
            "-9223372036854775807/1/-9223372036854775807",
            &format,
            today(),
        );
        assert_eq!(date.year, MIN_YEAR);
    }

    #[test]
    fn test_parse_date_year_only_keeps_today_fields() {
        let format = parse_format("yyyy").unwrap();
        assert_eq!(
            parse_date_relative("1999", &format, today()),
            CalendarDate::new(1999, 9, 16).unwrap()
        );
    }

    #[test]
    fn test_format_date() {
        let date = CalendarDate::new(2024, 1, 5).unwrap();
        assert_eq!(
            format_date(&date, &parse_format("mm/dd/yyyy").unwrap()),
            "02/05/2024"
        );
        assert_eq!(
            format_date(&date, &parse_format("d.m.yy").unwrap()),
            "5.2.24"
        );
        assert_eq!(
            format_date(
                &CalendarDate::new(2003, 0, 1).unwrap(),
                &parse_format("yy").unwrap()
            ),
            "03"
        );
    }

    #[test]
    fn test_round_trip_is_canonical() {
        let cases = [
            ("mm/dd/yyyy", "2/5/2024", "02/05/2024"),
            ("yyyy-mm-dd", "2024-12-31", "2024-12-31"),
            ("dd.mm.yy", "1.1.30", "01.01.30"),
            ("d/m/yyyy", "09/03/1987", "9/3/1987"),
        ];
        for (pattern, input, expected) in cases {
            let format = parse_format(pattern).unwrap();
            let date = parse_date_relative(input, &format, today());
            assert_eq!(format_date(&date, &format), expected, "{pattern} {input}");
        }
    }

    #[test]
    fn test_lenient_int() {
        assert_eq!(lenient_int(" 12"), Some(12));
        assert_eq!(lenient_int("-3"), Some(-3));
        assert_eq!(lenient_int("7th"), Some(7));
        assert_eq!(lenient_int("x7"), None);
        assert_eq!(lenient_int(""), None);
    }
}
