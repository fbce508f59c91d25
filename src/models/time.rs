//! Weekly time model.
//!
//! Courses meet on a weekly pattern, so time is expressed as a day of the
//! week plus minutes since midnight rather than absolute timestamps.
//!
//! # Intervals
//! A [`Meeting`] is the half-open interval `[start, end)` on one day.
//! Touching meetings (`a.end == b.start`) do not overlap.
//!
//! # Unscheduled courses
//! Online or "time to be announced" courses carry [`TimeSlot::Unscheduled`].
//! Such a slot never conflicts with anything and occupies no day.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrorKind};

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Monday through Friday.
    pub const WEEKDAYS: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    /// Zero-based index (Mon = 0, Sun = 6).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day for a zero-based index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Whether this is a teaching day (Mon–Fri).
    #[inline]
    pub fn is_weekday(self) -> bool {
        self.index() < 5
    }

    /// Maps a single Korean day character used by catalog feeds.
    pub fn from_korean(c: char) -> Option<Self> {
        match c {
            '월' => Some(Weekday::Mon),
            '화' => Some(Weekday::Tue),
            '수' => Some(Weekday::Wed),
            '목' => Some(Weekday::Thu),
            '금' => Some(Weekday::Fri),
            '토' => Some(Weekday::Sat),
            '일' => Some(Weekday::Sun),
            _ => None,
        }
    }

    /// Three-letter English abbreviation.
    pub fn abbrev(self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

impl FromStr for Weekday {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(day) = Self::from_korean(c) {
                return Ok(day);
            }
        }

        let lower = trimmed.to_ascii_lowercase();
        let day = match lower.as_str() {
            "mon" | "monday" => Weekday::Mon,
            "tue" | "tues" | "tuesday" => Weekday::Tue,
            "wed" | "wednesday" => Weekday::Wed,
            "thu" | "thur" | "thurs" | "thursday" => Weekday::Thu,
            "fri" | "friday" => Weekday::Fri,
            "sat" | "saturday" => Weekday::Sat,
            "sun" | "sunday" => Weekday::Sun,
            _ => {
                return Err(ValidationError::new(
                    ValidationErrorKind::InvalidDay,
                    format!("Unknown day of week: '{s}'"),
                ))
            }
        };
        Ok(day)
    }
}

/// Time of day in minutes since midnight.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Minutes in a day; the exclusive upper bound for start times.
    pub const MINUTES_PER_DAY: u16 = 24 * 60;

    /// Creates a clock time from minutes since midnight.
    ///
    /// Values up to and including `24:00` are accepted so that a meeting
    /// may end at midnight.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes <= Self::MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Creates a clock time from hours and minutes.
    pub fn hm(hours: u16, minutes: u16) -> Option<Self> {
        if minutes >= 60 {
            return None;
        }
        hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .and_then(Self::from_minutes)
    }

    /// Minutes since midnight.
    #[inline]
    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    /// Parses `H:MM` or `HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            ValidationError::new(
                ValidationErrorKind::InvalidTimeFormat,
                format!("Expected HH:MM, got '{s}'"),
            )
        };

        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str, max_len: usize| {
            !part.is_empty() && part.len() <= max_len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !digits(h, 2) || !digits(m, 2) || m.len() != 2 {
            return Err(invalid());
        }

        let hours: u16 = h.parse().map_err(|_| invalid())?;
        let minutes: u16 = m.parse().map_err(|_| invalid())?;
        Self::hm(hours, minutes).ok_or_else(invalid)
    }
}

/// One weekly meeting: `[start, end)` on `day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Meeting {
    /// Day of the week.
    pub day: Weekday,
    /// Start time (inclusive).
    pub start: ClockTime,
    /// End time (exclusive).
    pub end: ClockTime,
}

impl Meeting {
    /// Creates a meeting.
    pub fn new(day: Weekday, start: ClockTime, end: ClockTime) -> Self {
        Self { day, start, end }
    }

    /// Creates a meeting from whole hours and minutes.
    ///
    /// # Panics
    /// Panics if either time is outside `00:00..=24:00`. Intended for
    /// fixtures; parse untrusted input with [`ClockTime::from_str`].
    pub fn at(day: Weekday, start: (u16, u16), end: (u16, u16)) -> Self {
        let clock = |(h, m): (u16, u16)| {
            ClockTime::hm(h, m).unwrap_or_else(|| panic!("invalid clock time {h}:{m:02}"))
        };
        Self::new(day, clock(start), clock(end))
    }

    /// Length in minutes (zero for inverted meetings).
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes().saturating_sub(self.start.minutes())
    }

    /// Whether `end > start`.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.end > self.start
    }

    /// Whether two meetings share a day and their intervals overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day && self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Meeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.day, self.start, self.end)
    }
}

/// A course time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeSlot {
    /// A fixed weekly meeting.
    Scheduled(Meeting),
    /// No fixed time (online, to be announced).
    Unscheduled,
}

impl TimeSlot {
    /// Shorthand for a scheduled slot.
    pub fn at(day: Weekday, start: (u16, u16), end: (u16, u16)) -> Self {
        TimeSlot::Scheduled(Meeting::at(day, start, end))
    }

    /// The meeting, if scheduled.
    #[inline]
    pub fn meeting(&self) -> Option<&Meeting> {
        match self {
            TimeSlot::Scheduled(m) => Some(m),
            TimeSlot::Unscheduled => None,
        }
    }

    /// Whether this slot has a fixed time.
    #[inline]
    pub fn is_scheduled(&self) -> bool {
        matches!(self, TimeSlot::Scheduled(_))
    }
}

impl From<Meeting> for TimeSlot {
    fn from(meeting: Meeting) -> Self {
        TimeSlot::Scheduled(meeting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_index_roundtrip() {
        for (i, day) in Weekday::ALL.iter().enumerate() {
            assert_eq!(day.index(), i);
            assert_eq!(Weekday::from_index(i), Some(*day));
        }
        assert_eq!(Weekday::from_index(7), None);
        assert!(Weekday::Fri.is_weekday());
        assert!(!Weekday::Sat.is_weekday());
    }

    #[test]
    fn test_weekday_parse() {
        assert_eq!("Mon".parse::<Weekday>().unwrap(), Weekday::Mon);
        assert_eq!("thursday".parse::<Weekday>().unwrap(), Weekday::Thu);
        assert_eq!("수".parse::<Weekday>().unwrap(), Weekday::Wed);

        let err = "Funday".parse::<Weekday>().unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidDay);
    }

    #[test]
    fn test_clock_parse() {
        assert_eq!("09:00".parse::<ClockTime>().unwrap().minutes(), 540);
        assert_eq!("9:30".parse::<ClockTime>().unwrap().minutes(), 570);
        assert_eq!(" 13:05 ".parse::<ClockTime>().unwrap().minutes(), 785);
        assert_eq!("24:00".parse::<ClockTime>().unwrap().minutes(), 1440);
    }

    #[test]
    fn test_clock_parse_rejects_malformed() {
        for bad in ["", "9", "9:5", "25:00", "12:60", "ab:cd", "12-30", "-1:00", "123:00"] {
            let err = bad.parse::<ClockTime>().unwrap_err();
            assert_eq!(err.kind, ValidationErrorKind::InvalidTimeFormat, "input {bad:?}");
        }
    }

    #[test]
    fn test_clock_display() {
        assert_eq!(ClockTime::hm(9, 5).unwrap().to_string(), "09:05");
        assert_eq!(Meeting::at(Weekday::Tue, (13, 0), (14, 15)).to_string(), "Tue 13:00-14:15");
    }

    #[test]
    fn test_meeting_overlap_half_open() {
        let a = Meeting::at(Weekday::Mon, (9, 0), (10, 0));
        let touching = Meeting::at(Weekday::Mon, (10, 0), (11, 0));
        let overlapping = Meeting::at(Weekday::Mon, (9, 30), (10, 30));
        let other_day = Meeting::at(Weekday::Tue, (9, 0), (10, 0));

        assert!(!a.overlaps(&touching));
        assert!(!touching.overlaps(&a));
        assert!(a.overlaps(&overlapping));
        assert!(!a.overlaps(&other_day));
        assert_eq!(a.duration_minutes(), 60);
    }

    #[test]
    fn test_slot_serde_tagged() {
        let slot = TimeSlot::at(Weekday::Wed, (13, 0), (14, 0));
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, r#"{"kind":"scheduled","day":"Wed","start":780,"end":840}"#);

        let back: TimeSlot = serde_json::from_str(r#"{"kind":"unscheduled"}"#).unwrap();
        assert_eq!(back, TimeSlot::Unscheduled);
    }
}
