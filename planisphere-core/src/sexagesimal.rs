//! Sexagesimal coordinate parsing
//!
//! Two notations are accepted, each with a fixed grammar:
//!
//! ```text
//! Right ascension:  12h25m30s    12h 25m 30.5s
//! Declination:      +24°40'42"   -24°40′42″   24d40m42s   24度40分42秒
//! ```
//!
//! Declination seconds may be marked with `"`, `″`, `”`, `''`, `s` or `秒`,
//! or left unmarked. The sign is read from the text itself, so `-0°30'00"`
//! is negative even though its degree field is zero.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Invalid RA format: '{0}' - expected format like '12h25m30s'")]
    MalformedRa(String),

    #[error("Invalid Dec format: '{0}' - expected format like '+24°40′42″' or '+24°40'42\"'")]
    MalformedDec(String),

    #[error("{component} out of range in '{input}'")]
    OutOfRange {
        component: &'static str,
        input: String,
    },
}

static RA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?xi)
        ^\s*
        (\d{1,2}) \s* h \s*              # hours
        (\d{1,2}) \s* m \s*              # minutes
        (\d{1,2}(?:\.\d+)?) \s* s        # seconds with optional decimal
        \s*$
        "#,
    )
    .expect("RA grammar is a valid regex")
});

static DEC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        ^\s*
        ([+\-−])? \s*                    # optional sign, ASCII or Unicode minus
        (\d{1,3}) \s* [°º˚dD度] \s*       # degrees
        (\d{1,2}) \s* ['′’mM分] \s*       # minutes
        (\d{1,2}(?:\.\d+)?) \s*          # seconds with optional decimal
        (?:''|["″”sS秒])?                # optional seconds marker
        \s*$
        "#,
    )
    .expect("Dec grammar is a valid regex")
});

fn field(caps: &regex::Captures, index: usize) -> Option<f64> {
    caps.get(index)?.as_str().parse().ok()
}

/// Parse right ascension in hours, minutes and seconds into degrees
pub fn parse_ra(input: &str) -> Result<f64, CoordinateError> {
    let malformed = || CoordinateError::MalformedRa(input.to_string());
    let caps = RA_REGEX.captures(input).ok_or_else(malformed)?;

    let hours = field(&caps, 1).ok_or_else(malformed)?;
    let minutes = field(&caps, 2).ok_or_else(malformed)?;
    let seconds = field(&caps, 3).ok_or_else(malformed)?;

    check_range("hours", hours, 24.0, input)?;
    check_range("minutes", minutes, 60.0, input)?;
    check_range("seconds", seconds, 60.0, input)?;

    Ok((hours + minutes / 60.0 + seconds / 3600.0) / 24.0 * 360.0)
}

/// Parse signed declination in degrees, minutes and seconds into degrees
pub fn parse_dec(input: &str) -> Result<f64, CoordinateError> {
    let malformed = || CoordinateError::MalformedDec(input.to_string());
    let caps = DEC_REGEX.captures(input).ok_or_else(malformed)?;

    let negative = caps.get(1).is_some_and(|m| m.as_str() != "+");
    let degrees = field(&caps, 2).ok_or_else(malformed)?;
    let minutes = field(&caps, 3).ok_or_else(malformed)?;
    let seconds = field(&caps, 4).ok_or_else(malformed)?;

    check_range("minutes", minutes, 60.0, input)?;
    check_range("seconds", seconds, 60.0, input)?;

    let magnitude = degrees + minutes / 60.0 + seconds / 3600.0;
    if magnitude > 90.0 {
        return Err(CoordinateError::OutOfRange {
            component: "degrees",
            input: input.to_string(),
        });
    }

    Ok(if negative { -magnitude } else { magnitude })
}

/// Parse an RA/Dec pair, failing on the first bad field
pub fn parse_hms_dms(ra: &str, dec: &str) -> Result<(f64, f64), CoordinateError> {
    Ok((parse_ra(ra)?, parse_dec(dec)?))
}

fn check_range(
    component: &'static str,
    value: f64,
    limit: f64,
    input: &str,
) -> Result<(), CoordinateError> {
    if value >= limit {
        return Err(CoordinateError::OutOfRange {
            component,
            input: input.to_string(),
        });
    }
    Ok(())
}
