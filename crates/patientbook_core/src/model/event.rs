//! Event domain model.
//!
//! # Responsibility
//! - Parse `name` + `DD-MM-YYYY[, HH:mm - HH:mm]` input into a validated record.
//! - Provide the total order, the past-event predicate and canonical rendering.
//!
//! # Invariants
//! - `time_range` is `Some` iff the raw spec carried a comma-separated time segment.
//! - `end` is never earlier than `start`; equal bounds are allowed.
//! - Values are immutable after parse. Edits build a new `EventSpec`.
//!
//! # See also
//! - `DateOrdering` for the single place where date comparison is decided.

use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// `chrono` pattern for the canonical `DD-MM-YYYY` date text.
pub const DATE_FORMAT: &str = "%d-%m-%Y";
/// `chrono` pattern for the canonical `HH:mm` time text.
pub const TIME_FORMAT: &str = "%H:%M";

/// User-facing constraint message for date and time range input.
pub const DATETIME_MESSAGE_CONSTRAINTS: &str = "Dates should be in the format: DD-MM-YYYY, \
HH:mm - HH:mm, where the End Time is after or equal to the Start Time, \
OR if there is no time period, in the format: DD-MM-YYYY. \
Dates and Times should also be valid, i.e., 12-12-2023, 00:00 - 24:00 is not valid due to '24:00'";

static NAME_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9 ]").expect("valid event name regex"));
static DATE_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{4}$").expect("valid date regex"));
static TIME_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").expect("valid time regex"));

/// Acceptance rule for event names.
///
/// Both rules reject empty names. They differ only in how symbol
/// characters (anything outside ASCII letters, digits and space) are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventNameRule {
    /// Name must contain at least one symbol character, e.g. `Birthday!`.
    #[default]
    RequireSymbol,
    /// Name may only contain ASCII letters, digits and spaces.
    AlphanumericOnly,
}

impl EventNameRule {
    /// Stable config string for this rule.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RequireSymbol => "require_symbol",
            Self::AlphanumericOnly => "alphanumeric_only",
        }
    }

    /// Parses a config string (case-insensitive, surrounding whitespace ignored).
    pub fn from_config_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "require_symbol" => Some(Self::RequireSymbol),
            "alphanumeric_only" => Some(Self::AlphanumericOnly),
            _ => None,
        }
    }

    /// Returns whether an already-trimmed name satisfies this rule.
    pub fn accepts(self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        let has_symbol = NAME_SYMBOL_RE.is_match(name);
        match self {
            Self::RequireSymbol => has_symbol,
            Self::AlphanumericOnly => !has_symbol,
        }
    }

    /// User-facing constraint message for this rule.
    pub fn message(self) -> &'static str {
        match self {
            Self::RequireSymbol => {
                "The Name of the Event should be non-empty and contain at least one symbol character"
            }
            Self::AlphanumericOnly => "The Name of the Event should be alphanumerical and non-empty",
        }
    }
}

/// Comparison used for the date component of the event order.
///
/// This is the only place where date ordering is decided; every sorted
/// event view goes through `compare_events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateOrdering {
    /// Order by the canonical `DD-MM-YYYY` text: day, then month, then year.
    /// Not calendar order (`05-12-2024` sorts before `15-01-2024`).
    #[default]
    Lexicographic,
    /// True calendar order.
    Chronological,
}

impl DateOrdering {
    /// Stable config string for this ordering.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lexicographic => "lexicographic",
            Self::Chronological => "chronological",
        }
    }

    /// Parses a config string (case-insensitive, surrounding whitespace ignored).
    pub fn from_config_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lexicographic" => Some(Self::Lexicographic),
            "chronological" => Some(Self::Chronological),
            _ => None,
        }
    }

    /// Compares two event dates.
    pub fn compare_dates(self, left: NaiveDate, right: NaiveDate) -> Ordering {
        match self {
            // Fixed-width zero-padded text compares field by field.
            Self::Lexicographic => date_text_key(left).cmp(&date_text_key(right)),
            Self::Chronological => left.cmp(&right),
        }
    }

    /// Total order over events.
    ///
    /// Date first, then time range (`start`, then `end`), where an event with
    /// a time range sorts after one without on the same date, then name.
    pub fn compare_events(self, left: &EventSpec, right: &EventSpec) -> Ordering {
        self.compare_dates(left.date, right.date)
            .then_with(|| match (&left.time_range, &right.time_range) {
                (Some(l), Some(r)) => l.start.cmp(&r.start).then_with(|| l.end.cmp(&r.end)),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| left.name.cmp(&right.name))
    }
}

fn date_text_key(date: NaiveDate) -> (u32, u32, i32) {
    (date.day(), date.month(), date.year())
}

/// Validation errors raised while parsing an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// Name is empty or rejected by the active `EventNameRule`.
    InvalidName { name: String, rule: EventNameRule },
    /// Date segment is not a calendar-valid `DD-MM-YYYY` value.
    InvalidDate(String),
    /// Time segment is malformed, out of range, or ends before it starts.
    InvalidTimeRange(String),
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName { name, rule } => {
                write!(f, "invalid event name `{name}`: {}", rule.message())
            }
            Self::InvalidDate(raw) => {
                write!(f, "invalid event date `{raw}`: {DATETIME_MESSAGE_CONSTRAINTS}")
            }
            Self::InvalidTimeRange(raw) => {
                write!(f, "invalid event time range `{raw}`: {DATETIME_MESSAGE_CONSTRAINTS}")
            }
        }
    }
}

impl Error for EventValidationError {}

/// Inclusive start/end window within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeRange {
    /// Builds a range, returning `None` when `end` is before `start`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<Self> {
        if end < start {
            return None;
        }
        Some(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Canonical `HH:mm` start text.
    pub fn start_text(&self) -> String {
        self.start.format(TIME_FORMAT).to_string()
    }

    /// Canonical `HH:mm` end text.
    pub fn end_text(&self) -> String {
        self.end.format(TIME_FORMAT).to_string()
    }
}

/// Validated temporal annotation attached to a patient.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "EventSpecRecord", try_from = "EventSpecRecord")]
pub struct EventSpec {
    name: String,
    date: NaiveDate,
    time_range: Option<TimeRange>,
}

impl EventSpec {
    /// Parses an event using the default `EventNameRule`.
    pub fn parse(name: &str, raw_spec: &str) -> Result<Self, EventValidationError> {
        Self::parse_with(name, raw_spec, EventNameRule::default())
    }

    /// Parses an event from a name and a `DD-MM-YYYY[, HH:mm - HH:mm]` spec.
    ///
    /// # Errors
    /// - `InvalidName` when the trimmed name fails `rule`.
    /// - `InvalidDate` when the date segment is not a valid `DD-MM-YYYY` date.
    /// - `InvalidTimeRange` when a time segment exists but is not exactly
    ///   two valid `HH:mm` values with `end >= start`.
    pub fn parse_with(
        name: &str,
        raw_spec: &str,
        rule: EventNameRule,
    ) -> Result<Self, EventValidationError> {
        let name = name.trim();
        if !rule.accepts(name) {
            return Err(EventValidationError::InvalidName {
                name: name.to_string(),
                rule,
            });
        }

        let raw_spec = raw_spec.trim();
        let (date_segment, time_segment) = match raw_spec.split_once(',') {
            Some((date, time)) => (date, Some(time)),
            None => (raw_spec, None),
        };

        let date = parse_date(date_segment)
            .ok_or_else(|| EventValidationError::InvalidDate(date_segment.trim().to_string()))?;
        let time_range = time_segment.map(parse_time_range).transpose()?;

        Ok(Self {
            name: name.to_string(),
            date,
            time_range,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Canonical `DD-MM-YYYY` date text.
    pub fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn time_range(&self) -> Option<&TimeRange> {
        self.time_range.as_ref()
    }

    /// Canonical spec text accepted back by `parse`.
    pub fn spec_text(&self) -> String {
        match &self.time_range {
            Some(range) => format!(
                "{}, {} - {}",
                self.date_text(),
                range.start_text(),
                range.end_text()
            ),
            None => self.date_text(),
        }
    }

    /// Returns whether the event is over relative to the given moment.
    ///
    /// Uses calendar comparison regardless of the configured `DateOrdering`.
    /// Same-day events are past only when they carry a range that ended
    /// strictly before `now_time`.
    pub fn is_past_event(&self, now_date: NaiveDate, now_time: NaiveTime) -> bool {
        match self.date.cmp(&now_date) {
            Ordering::Less => true,
            Ordering::Equal => self
                .time_range
                .map(|range| range.end < now_time)
                .unwrap_or(false),
            Ordering::Greater => false,
        }
    }

    /// `is_past_event` against the local wall clock.
    pub fn is_past_event_now(&self) -> bool {
        let now = Local::now().naive_local();
        self.is_past_event(now.date(), now.time())
    }
}

impl Ord for EventSpec {
    fn cmp(&self, other: &Self) -> Ordering {
        DateOrdering::Lexicographic.compare_events(self, other)
    }
}

impl PartialOrd for EventSpec {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for EventSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.time_range {
            Some(range) => write!(
                f,
                "{} ({}, from {} to {})",
                self.name,
                self.date_text(),
                range.start_text(),
                range.end_text()
            ),
            None => write!(f, "{} ({})", self.name, self.date_text()),
        }
    }
}

/// Text-only wire shape for `EventSpec`.
///
/// Deserialization re-validates through `EventSpec::parse`, so persisted
/// payloads cannot carry a reversed window or an invalid date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSpecRecord {
    pub name: String,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl From<EventSpec> for EventSpecRecord {
    fn from(value: EventSpec) -> Self {
        let date = value.date_text();
        let (start_time, end_time) = match value.time_range {
            Some(range) => (Some(range.start_text()), Some(range.end_text())),
            None => (None, None),
        };
        Self {
            name: value.name,
            date,
            start_time,
            end_time,
        }
    }
}

impl TryFrom<EventSpecRecord> for EventSpec {
    type Error = EventValidationError;

    fn try_from(value: EventSpecRecord) -> Result<Self, Self::Error> {
        let raw_spec = match (value.start_time, value.end_time) {
            (None, None) => value.date,
            (Some(start), Some(end)) => format!("{}, {start} - {end}", value.date),
            (start, end) => {
                return Err(EventValidationError::InvalidTimeRange(format!(
                    "{} - {}",
                    start.unwrap_or_default(),
                    end.unwrap_or_default()
                )))
            }
        };
        EventSpec::parse(&value.name, &raw_spec)
    }
}

/// Returns true when `name` (after trim) is acceptable under `rule`.
pub fn is_valid_event_name(name: &str, rule: EventNameRule) -> bool {
    rule.accepts(name.trim())
}

/// Returns true when `raw_spec` is a valid `DD-MM-YYYY[, HH:mm - HH:mm]` spec.
pub fn is_valid_event_spec(raw_spec: &str) -> bool {
    let raw_spec = raw_spec.trim();
    match raw_spec.split_once(',') {
        Some((date, time)) => parse_date(date).is_some() && parse_time_range(time).is_ok(),
        None => parse_date(raw_spec).is_some(),
    }
}

/// Returns true when `raw_range` is a valid `HH:mm - HH:mm` range.
pub fn is_valid_time_range(raw_range: &str) -> bool {
    parse_time_range(raw_range).is_ok()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if !DATE_TEXT_RE.is_match(trimmed) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if !TIME_TEXT_RE.is_match(trimmed) {
        return None;
    }
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT).ok()
}

fn parse_time_range(raw: &str) -> Result<TimeRange, EventValidationError> {
    let invalid = || EventValidationError::InvalidTimeRange(raw.trim().to_string());

    let parts: Vec<&str> = raw.split('-').collect();
    let [start, end] = parts.as_slice() else {
        return Err(invalid());
    };
    let start = parse_time(start).ok_or_else(invalid)?;
    let end = parse_time(end).ok_or_else(invalid)?;
    TimeRange::new(start, end).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::{parse_date, parse_time, DateOrdering, EventNameRule};
    use chrono::NaiveDate;
    use std::cmp::Ordering;

    #[test]
    fn parse_date_requires_zero_padded_fields() {
        assert!(parse_date("01-02-2024").is_some());
        assert!(parse_date("1-02-2024").is_none());
        assert!(parse_date("01-2-2024").is_none());
        assert!(parse_date("01-02-24").is_none());
        assert!(parse_date("2024-02-01").is_none());
    }

    #[test]
    fn parse_date_rejects_impossible_calendar_days() {
        assert!(parse_date("29-02-2024").is_some());
        assert!(parse_date("29-02-2023").is_none());
        assert!(parse_date("31-04-2024").is_none());
        assert!(parse_date("00-01-2024").is_none());
    }

    #[test]
    fn parse_time_rejects_out_of_range_values() {
        assert!(parse_time("00:00").is_some());
        assert!(parse_time("23:59").is_some());
        assert!(parse_time("24:00").is_none());
        assert!(parse_time("12:60").is_none());
        assert!(parse_time("9:00").is_none());
    }

    #[test]
    fn name_rules_disagree_on_symbols_and_agree_on_empty() {
        assert!(EventNameRule::RequireSymbol.accepts("Checkup!"));
        assert!(!EventNameRule::RequireSymbol.accepts("Checkup"));
        assert!(EventNameRule::AlphanumericOnly.accepts("Checkup"));
        assert!(!EventNameRule::AlphanumericOnly.accepts("Checkup!"));
        assert!(!EventNameRule::RequireSymbol.accepts(""));
        assert!(!EventNameRule::AlphanumericOnly.accepts(""));
    }

    #[test]
    fn lexicographic_date_order_follows_day_first_text() {
        let early_day = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();
        let late_day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        assert_eq!(
            DateOrdering::Lexicographic.compare_dates(early_day, late_day),
            Ordering::Less
        );
        assert_eq!(
            DateOrdering::Chronological.compare_dates(early_day, late_day),
            Ordering::Greater
        );
    }

    #[test]
    fn config_strings_round_trip() {
        for rule in [EventNameRule::RequireSymbol, EventNameRule::AlphanumericOnly] {
            assert_eq!(EventNameRule::from_config_str(rule.as_str()), Some(rule));
        }
        for ordering in [DateOrdering::Lexicographic, DateOrdering::Chronological] {
            assert_eq!(DateOrdering::from_config_str(ordering.as_str()), Some(ordering));
        }
        assert_eq!(DateOrdering::from_config_str(" CHRONOLOGICAL "), Some(DateOrdering::Chronological));
        assert_eq!(EventNameRule::from_config_str("strict"), None);
    }
}
