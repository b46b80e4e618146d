//! Date normalization for feed cells.
//!
//! Feed dates arrive in whatever shape the person typing them chose:
//! `05-Jan-24`, `05-January-2024`, `2024-01-05`, `1/5/2024`, `Jan 5, 2024`.
//! Everything that parses becomes a UTC instant. Civil dates land on
//! midnight UTC so results never depend on the host time zone.

use jiff::Timestamp;
use jiff::civil::{Date, DateTime};
use jiff::tz::TimeZone;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parses a feed date cell.
///
/// Returns `None` for blank cells, the `NA` placeholder, and anything
/// unrecognized. An unparseable date means "no signal", never an error.
pub fn parse_date(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("na") {
        return None;
    }

    if let Some(date) = parse_day_month_year(raw) {
        return midnight_utc(date);
    }

    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Some(ts);
    }
    if let Ok(dt) = raw.parse::<DateTime>() {
        return dt.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp());
    }
    if let Ok(date) = raw.parse::<Date>() {
        return midnight_utc(date);
    }

    parse_slashed(raw)
        .or_else(|| parse_month_name_first(raw))
        .and_then(midnight_utc)
}

/// Renders an instant as its UTC calendar day, `YYYY-MM-DD`.
pub fn format_date(ts: Timestamp) -> String {
    ts.strftime("%Y-%m-%d").to_string()
}

/// `DD-MMM-YY` or `DD-MMM-YYYY`. Two-digit years are in the 2000s.
fn parse_day_month_year(raw: &str) -> Option<Date> {
    let mut parts = raw.split('-');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let day: i8 = parse_digits(day, 2)?;
    let month = month_number(month)?;
    let year = parse_year(year)?;
    Date::new(year, month, day).ok()
}

/// `M/D/YYYY`, the common US spreadsheet export.
fn parse_slashed(raw: &str) -> Option<Date> {
    let mut parts = raw.split('/');
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let month: i8 = parse_digits(month, 2)?;
    let day: i8 = parse_digits(day, 2)?;
    let year = parse_year(year)?;
    Date::new(year, month, day).ok()
}

/// `January 5, 2024` or `Jan 5 2024`.
fn parse_month_name_first(raw: &str) -> Option<Date> {
    let mut parts = raw.split_whitespace();
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let month = month_number(month.trim_end_matches('.'))?;
    let day: i8 = parse_digits(day.trim_end_matches(','), 2)?;
    let year = parse_year(year)?;
    Date::new(year, month, day).ok()
}

/// Resolves a month name or abbreviation (three letters or more).
fn month_number(name: &str) -> Option<i8> {
    if name.len() < 3 || !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let name = name.to_ascii_lowercase();
    let index = MONTHS.iter().position(|m| m.starts_with(&name))?;
    i8::try_from(index + 1).ok()
}

fn parse_year(raw: &str) -> Option<i16> {
    match raw.len() {
        1 | 2 => parse_digits::<i16>(raw, 2).map(|yy| 2000 + yy),
        4 => parse_digits(raw, 4),
        _ => None,
    }
}

fn parse_digits<T: std::str::FromStr>(raw: &str, max_len: usize) -> Option<T> {
    if raw.is_empty() || raw.len() > max_len || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn midnight_utc(date: Date) -> Option<Timestamp> {
    date.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp())
}
