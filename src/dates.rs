//! Ordering and bucketing for session dates.
//!
//! Session dates arrive as ISO `YYYY-MM-DD` strings, bare `YYYY` years, or the
//! occasional other parseable string. Everything that sorts or groups
//! sessions by date goes through this module.

use crate::models::Session;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::cmp::{Ordering, Reverse};

/// Legacy bare year that always sorts as the oldest date in a set.
pub const LEGACY_BARE_YEAR: &str = "2024";

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionDate {
    Year(i32),
    Full(NaiveDate),
    Unknown,
}

impl SessionDate {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if is_bare_year(raw) {
            return raw.parse().map(Self::Year).unwrap_or(Self::Unknown);
        }
        parse_full(raw).map(Self::Full).unwrap_or(Self::Unknown)
    }

    pub fn year(self) -> Option<i32> {
        match self {
            Self::Year(year) => Some(year),
            Self::Full(date) => Some(date.year()),
            Self::Unknown => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Dated {
        year: Reverse<i32>,
        full: Reverse<bool>,
        day: Reverse<Option<NaiveDate>>,
    },
    Unparsed(&'a str),
    Legacy,
}

fn sort_key(raw: &str) -> SortKey<'_> {
    let trimmed = raw.trim();
    if trimmed == LEGACY_BARE_YEAR {
        return SortKey::Legacy;
    }
    match SessionDate::parse(trimmed) {
        SessionDate::Year(year) => SortKey::Dated {
            year: Reverse(year),
            full: Reverse(false),
            day: Reverse(None),
        },
        SessionDate::Full(date) => SortKey::Dated {
            year: Reverse(date.year()),
            full: Reverse(true),
            day: Reverse(Some(date)),
        },
        SessionDate::Unknown => SortKey::Unparsed(trimmed),
    }
}

/// Orders two session dates newest first.
///
/// Full dates beat a bare year of the same year. Unparseable strings come
/// after every dated entry, and [`LEGACY_BARE_YEAR`] comes after everything.
pub fn compare_desc(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

pub fn sort_sessions_desc(sessions: &mut [Session]) {
    sessions.sort_by(|a, b| compare_desc(&a.date, &b.date));
}

/// Year bucket for a session date, or `None` when no year can be derived.
pub fn year_of(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if is_bare_year(raw) {
        return Some(raw.to_string());
    }
    if is_iso_shaped(raw) {
        return Some(raw[..4].to_string());
    }
    SessionDate::parse(raw)
        .year()
        .map(|year| format!("{year:04}"))
}

pub fn display_label(raw: &str) -> String {
    match SessionDate::parse(raw) {
        SessionDate::Full(date) => date.format("%B %-d, %Y").to_string(),
        SessionDate::Year(_) | SessionDate::Unknown => raw.trim().to_string(),
    }
}

fn is_bare_year(raw: &str) -> bool {
    raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit())
}

/// `YYYY-MM-DD` by shape alone, whether or not the day exists.
fn is_iso_shaped(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn parse_full(raw: &str) -> Option<NaiveDate> {
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
    {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|stamp| stamp.date())
}
