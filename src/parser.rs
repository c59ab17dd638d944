use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

// Dotted quad without octet range checks: 999.999.999.999 is accepted.
static RE_IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b").unwrap()
});

static RE_ENDPOINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(?:GET|POST|PUT|DELETE|HEAD|OPTIONS) ([^\s]+)"#).unwrap()
});

static RE_AUTH_FAILURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"401|Invalid credentials").unwrap()
});

// Only date and hour are captured; minutes and seconds are dropped on purpose.
static RE_HOUR_STAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{2}/[A-Za-z]{3}/[0-9]{4}:[0-9]{2}").unwrap()
});

static RE_STATUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s([0-9]{3})\s").unwrap()
});

/// Outcome of an optional per-line extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction<'a, T> {
    /// The pattern did not occur on the line.
    Absent,
    Parsed(T),
    /// The pattern matched but the fragment could not be interpreted.
    Malformed(&'a str),
}

impl<'a, T> Extraction<'a, T> {
    pub fn parsed(&self) -> Option<&T> {
        match self {
            Extraction::Parsed(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Extraction::Malformed(_))
    }
}

/// Access-log timestamp truncated to the hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourStamp(NaiveDateTime);

impl HourStamp {
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn as_datetime(&self) -> NaiveDateTime {
        self.0
    }
}

/// Parse a `DD/Mon/YYYY:HH` fragment. The month abbreviation is matched
/// case-insensitively.
pub fn parse_hour_stamp(fragment: &str) -> Option<HourStamp> {
    let (date, hour) = fragment.split_once(':')?;
    let date = NaiveDate::parse_from_str(date, "%d/%b/%Y").ok()?;
    if date.year() < 1 {
        return None;
    }
    if hour.len() != 2 {
        return None;
    }
    let hour: u32 = hour.parse().ok()?;
    date.and_hms_opt(hour, 0, 0).map(HourStamp)
}

/// Signals pulled out of a single access-log line. Every field is independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields<'a> {
    pub ip: Option<&'a str>,
    pub endpoint: Option<&'a str>,
    pub timestamp: Extraction<'a, HourStamp>,
    pub status: Option<&'a str>,
    pub auth_failure: bool,
}

impl<'a> ExtractedFields<'a> {
    /// IP to charge with a failed login, if this line is one.
    pub fn failed_ip(&self) -> Option<&'a str> {
        if self.auth_failure { self.ip } else { None }
    }
}

pub fn extract_fields(line: &str) -> ExtractedFields<'_> {
    let ip = RE_IPV4.find(line).map(|m| m.as_str());
    let endpoint = RE_ENDPOINT
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str());
    let timestamp = match RE_HOUR_STAMP.find(line) {
        None => Extraction::Absent,
        Some(m) => match parse_hour_stamp(m.as_str()) {
            Some(ts) => Extraction::Parsed(ts),
            None => Extraction::Malformed(m.as_str()),
        },
    };
    let status = RE_STATUS
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str());
    ExtractedFields {
        ip,
        endpoint,
        timestamp,
        status,
        auth_failure: RE_AUTH_FAILURE.is_match(line),
    }
}
