use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do with a numeric cell that is present but cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    /// Treat the cell as missing (a gap in the series) and log a warning.
    #[default]
    Lenient,
    /// Reject the dataset with `ChartError::MalformedNumber`.
    Strict,
}

/// A cell that is not a number in the expected locale format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed number `{value}`")]
pub struct ParseNumberError {
    pub value: String,
}

impl ParseNumberError {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }
}

/// Parses a Dutch-formatted euro amount such as `€5.123,4`.
///
/// A leading minus may sit on either side of the `€`. Empty or absent input
/// means "no data" and yields `Ok(None)`.
pub fn parse_euro<'a>(
    input: impl Into<Option<&'a str>>,
) -> Result<Option<f64>, ParseNumberError> {
    let Some(raw) = input.into() else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest.trim_start()),
        None => ("", trimmed),
    };
    let stripped = unsigned.trim_start_matches('€').trim();
    if stripped.is_empty() {
        return if sign.is_empty() {
            Ok(None)
        } else {
            Err(ParseNumberError::new(raw))
        };
    }

    let normalized = format!("{sign}{}", stripped.replace('.', "").replace(',', "."));
    parse_decimal(&normalized)
        .map(Some)
        .ok_or_else(|| ParseNumberError::new(raw))
}

/// Parses a comma-decimal percentage such as `12,3` (a trailing `%` is allowed).
pub fn parse_percent<'a>(
    input: impl Into<Option<&'a str>>,
) -> Result<Option<f64>, ParseNumberError> {
    let Some(raw) = input.into() else {
        return Ok(None);
    };
    let stripped = raw.trim().trim_end_matches('%').trim();
    if stripped.is_empty() {
        return Ok(None);
    }

    let normalized = stripped.replace(',', ".");
    parse_decimal(&normalized)
        .map(Some)
        .ok_or_else(|| ParseNumberError::new(raw))
}

/// Parses a locale-neutral non-negative count.
///
/// Empty or absent input yields `Ok(None)`, like the amount parsers.
pub fn parse_count<'a>(
    input: impl Into<Option<&'a str>>,
) -> Result<Option<u64>, ParseNumberError> {
    let Some(raw) = input.into() else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ParseNumberError::new(raw))
}

/// Parses a calendar year.
pub fn parse_year(raw: &str) -> Result<i32, ParseNumberError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ParseNumberError::new(raw))
}

fn parse_decimal(normalized: &str) -> Option<f64> {
    let value = Decimal::from_str(normalized).ok()?;
    value.to_f64().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::{parse_count, parse_euro, parse_percent, parse_year};

    #[test]
    fn euro_strips_symbol_and_thousands_dots() {
        let value = parse_euro("€5.123,4").expect("parse").expect("value");
        approx::assert_relative_eq!(value, 5123.4);
        let value = parse_euro(" € 5.100.000 ").expect("parse").expect("value");
        approx::assert_relative_eq!(value, 5_100_000.0);
    }

    #[test]
    fn empty_cells_are_missing_not_zero() {
        assert_eq!(parse_euro(""), Ok(None));
        assert_eq!(parse_euro("€"), Ok(None));
        assert_eq!(parse_percent(None), Ok(None));
        assert_eq!(parse_percent("  "), Ok(None));
    }

    #[test]
    fn euro_sign_may_precede_or_follow_the_minus() {
        assert_eq!(parse_euro("-€5,0"), Ok(Some(-5.0)));
        assert_eq!(parse_euro("€-5,0"), Ok(Some(-5.0)));
        assert_eq!(parse_euro(" - € 1.250,5"), Ok(Some(-1250.5)));
        assert!(parse_euro("-").is_err());
        assert!(parse_euro("--€5").is_err());
    }

    #[test]
    fn garbage_is_reported_with_the_raw_cell() {
        let err = parse_euro("€12abc").expect_err("must fail");
        assert_eq!(err.value, "€12abc");
        assert!(parse_percent("1,2,3").is_err());
        assert!(parse_percent("NaN").is_err());
    }

    #[test]
    fn counts_and_years_parse_plain_integers() {
        assert_eq!(parse_count(" 815000 "), Ok(Some(815_000)));
        assert_eq!(parse_count(""), Ok(None));
        assert!(parse_count("-1").is_err());
        assert_eq!(parse_year("2021"), Ok(2021));
    }
}
