//! Generation and recommendation requests.
//!
//! Requests are the wire-facing input of the engine. They are plain data;
//! [`validate_request`](crate::validation::validate_request) turns the
//! textual parts (blocked time windows) into typed values before any
//! search starts.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{ClockTime, Meeting, Weekday};
use crate::validation::{ValidationError, ValidationErrorKind};

/// A time of day given either as `"HH:MM"` text or as minutes since midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeInput {
    Minutes(u16),
    Text(String),
}

impl TimeInput {
    /// Resolves to a clock time.
    pub fn resolve(&self) -> Result<ClockTime, ValidationError> {
        match self {
            TimeInput::Minutes(m) => ClockTime::from_minutes(*m).ok_or_else(|| {
                ValidationError::new(
                    ValidationErrorKind::InvalidTimeFormat,
                    format!("{m} minutes is past the end of the day"),
                )
            }),
            TimeInput::Text(s) => s.parse(),
        }
    }
}

impl From<&str> for TimeInput {
    fn from(s: &str) -> Self {
        TimeInput::Text(s.to_string())
    }
}

impl From<u16> for TimeInput {
    fn from(m: u16) -> Self {
        TimeInput::Minutes(m)
    }
}

/// A window during which the requester cannot attend classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedTime {
    pub day: Weekday,
    pub start: TimeInput,
    pub end: TimeInput,
}

impl BlockedTime {
    pub fn new(day: Weekday, start: impl Into<TimeInput>, end: impl Into<TimeInput>) -> Self {
        Self {
            day,
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parses into a meeting-shaped window.
    ///
    /// Fails with `InvalidTimeFormat` for unparseable times and
    /// `InvalidTimeRange` when `end <= start`.
    pub fn to_meeting(&self) -> Result<Meeting, ValidationError> {
        let start = self.start.resolve()?;
        let end = self.end.resolve()?;
        if end <= start {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidTimeRange,
                format!("Blocked time on {} ends ({end}) before it starts ({start})", self.day),
            ));
        }
        Ok(Meeting::new(self.day, start, end))
    }
}

/// Hard-constraint generation request (precise mode).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRequest {
    /// Credit total every schedule must reach.
    pub target_credit: u32,
    /// Minimum credit from major courses.
    pub min_major_credit: u32,
    /// Minimum number of must-have major courses included.
    pub min_must_have_major_count: usize,
    /// Minimum number of must-have general courses included.
    pub min_must_have_general_count: usize,
    /// Must-have major course IDs.
    pub must_have_major_ids: HashSet<String>,
    /// Must-have general course IDs.
    pub must_have_general_ids: HashSet<String>,
    /// Exclude courses whose detail text contains any of these.
    pub avoid_keywords: Vec<String>,
    /// Exclude courses whose name contains any of these.
    pub avoid_name_keywords: Vec<String>,
    /// Courses whose detail text contains any of these are tried first.
    pub preferred_keywords: Vec<String>,
    /// Windows no course may occupy.
    pub blocked_times: Vec<BlockedTime>,
    /// Days the requester would like to keep free.
    pub wanted_day_offs: HashSet<Weekday>,
    /// Minimum course rating.
    pub min_rating: f64,
    /// Only major courses are eligible.
    pub only_major: bool,
    /// Courses without a fixed time are ineligible.
    pub exclude_no_time: bool,
    /// Every eligible must-have course has to appear in each schedule,
    /// not just the minimum counts.
    pub require_every_must_have: bool,
}

impl GenerationRequest {
    /// Creates a request for the given credit target.
    pub fn new(target_credit: u32) -> Self {
        Self {
            target_credit,
            ..Self::default()
        }
    }

    pub fn with_min_major_credit(mut self, credit: u32) -> Self {
        self.min_major_credit = credit;
        self
    }

    pub fn with_must_have_counts(mut self, major: usize, general: usize) -> Self {
        self.min_must_have_major_count = major;
        self.min_must_have_general_count = general;
        self
    }

    pub fn with_must_have_major(mut self, id: impl Into<String>) -> Self {
        self.must_have_major_ids.insert(id.into());
        self
    }

    pub fn with_must_have_general(mut self, id: impl Into<String>) -> Self {
        self.must_have_general_ids.insert(id.into());
        self
    }

    pub fn with_avoid_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.avoid_keywords.push(keyword.into());
        self
    }

    pub fn with_avoid_name_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.avoid_name_keywords.push(keyword.into());
        self
    }

    pub fn with_preferred_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.preferred_keywords.push(keyword.into());
        self
    }

    pub fn with_blocked_time(mut self, blocked: BlockedTime) -> Self {
        self.blocked_times.push(blocked);
        self
    }

    pub fn with_day_off(mut self, day: Weekday) -> Self {
        self.wanted_day_offs.insert(day);
        self
    }

    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.min_rating = rating;
        self
    }

    pub fn with_only_major(mut self, only_major: bool) -> Self {
        self.only_major = only_major;
        self
    }

    pub fn with_exclude_no_time(mut self, exclude: bool) -> Self {
        self.exclude_no_time = exclude;
        self
    }

    pub fn with_require_every_must_have(mut self, require: bool) -> Self {
        self.require_every_must_have = require;
        self
    }

    /// Whether `id` is a must-have course of either kind.
    pub fn is_must_have(&self, id: &str) -> bool {
        self.must_have_major_ids.contains(id) || self.must_have_general_ids.contains(id)
    }

    /// Wanted day-offs in weekday order.
    pub fn day_offs(&self) -> Vec<Weekday> {
        let mut days: Vec<Weekday> = self.wanted_day_offs.iter().copied().collect();
        days.sort();
        days
    }
}

/// Time-of-day bias for recommendations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePreference {
    #[default]
    None,
    /// Classes starting at or before 09:00.
    Morning,
    /// Classes starting at or after 13:00.
    Afternoon,
}

/// Soft-preference recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationRequest {
    /// Upper end of the accepted credit window.
    pub target_credit: u32,
    /// Preferred number of Mon–Fri days without classes.
    pub preferred_breaks: usize,
    pub time_preference: TimePreference,
    /// General-education category labels the requester likes.
    pub preferred_categories: Vec<String>,
    /// Minimum course rating.
    pub min_rating: f64,
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self {
            target_credit: 18,
            preferred_breaks: 0,
            time_preference: TimePreference::None,
            preferred_categories: Vec::new(),
            min_rating: 0.0,
        }
    }
}

impl RecommendationRequest {
    pub fn new(target_credit: u32) -> Self {
        Self {
            target_credit,
            ..Self::default()
        }
    }

    pub fn with_preferred_breaks(mut self, breaks: usize) -> Self {
        self.preferred_breaks = breaks;
        self
    }

    pub fn with_time_preference(mut self, preference: TimePreference) -> Self {
        self.time_preference = preference;
        self
    }

    pub fn with_preferred_category(mut self, category: impl Into<String>) -> Self {
        self.preferred_categories.push(category.into());
        self
    }

    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.min_rating = rating;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_time_text_and_minutes() {
        let text = BlockedTime::new(Weekday::Mon, "09:00", "10:30");
        let minutes = BlockedTime::new(Weekday::Mon, 540u16, 630u16);
        assert_eq!(text.to_meeting().unwrap(), minutes.to_meeting().unwrap());
    }

    #[test]
    fn test_blocked_time_invalid_format() {
        let err = BlockedTime::new(Weekday::Tue, "nine", "10:00")
            .to_meeting()
            .unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidTimeFormat);

        let err = BlockedTime::new(Weekday::Tue, 2000u16, 2100u16)
            .to_meeting()
            .unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidTimeFormat);
    }

    #[test]
    fn test_blocked_time_inverted() {
        let err = BlockedTime::new(Weekday::Tue, "11:00", "10:00")
            .to_meeting()
            .unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidTimeRange);
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "target_credit": 18,
            "min_major_credit": 9,
            "must_have_major_ids": ["COSE211-01"],
            "blocked_times": [{"day": "Fri", "start": "13:00", "end": 1080}],
            "wanted_day_offs": ["Fri"],
            "exclude_no_time": true
        }"#;
        let req: GenerationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.target_credit, 18);
        assert!(req.is_must_have("COSE211-01"));
        assert_eq!(req.blocked_times[0].start, TimeInput::Text("13:00".into()));
        assert_eq!(req.blocked_times[0].end, TimeInput::Minutes(1080));
        assert_eq!(req.day_offs(), vec![Weekday::Fri]);
        assert!(req.exclude_no_time);
        assert!(!req.only_major);
    }

    #[test]
    fn test_recommendation_defaults() {
        let req: RecommendationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.target_credit, 18);
        assert_eq!(req.time_preference, TimePreference::None);
    }
}
