//! Additive preference score for recommendation mode.
//!
//! # Algorithm
//!
//! ```text
//! score = 100
//!       - 10 * |break_days - preferred_breaks|
//!       + 5  * (meetings starting <= 09:00)   if Morning
//!       + 5  * (meetings starting >= 13:00)   if Afternoon
//!       + 15 * (general courses in a preferred category)
//! score = max(score, 0)
//! ```
//!
//! `break_days` counts Mon–Fri days without a scheduled meeting.
//! Category matching is exact on the category label.

use crate::models::{ClockTime, RecommendationRequest, Schedule, TimePreference};

/// Latest start (minutes) counted as a morning class: 09:00.
pub const MORNING_UNTIL: u16 = 9 * 60;
/// Earliest start (minutes) counted as an afternoon class: 13:00.
pub const AFTERNOON_FROM: u16 = 13 * 60;

const BASE_SCORE: i64 = 100;
const BREAK_PENALTY: i64 = 10;
const TIME_BONUS: i64 = 5;
const CATEGORY_BONUS: i64 = 15;

/// Scores schedules against a [`RecommendationRequest`].
#[derive(Debug, Clone, Default)]
pub struct PreferenceScorer {
    preferred_breaks: usize,
    time_preference: TimePreference,
    preferred_categories: Vec<String>,
}

impl PreferenceScorer {
    pub fn new(request: &RecommendationRequest) -> Self {
        Self {
            preferred_breaks: request.preferred_breaks,
            time_preference: request.time_preference,
            preferred_categories: request.preferred_categories.clone(),
        }
    }

    /// Preference score, never below zero.
    pub fn score(&self, schedule: &Schedule) -> i32 {
        let break_gap = i64::try_from(schedule.break_days().abs_diff(self.preferred_breaks))
            .unwrap_or(i64::MAX);
        let mut score = BASE_SCORE.saturating_sub(BREAK_PENALTY.saturating_mul(break_gap));

        let slots = match self.time_preference {
            TimePreference::None => 0,
            TimePreference::Morning => morning_count(schedule),
            TimePreference::Afternoon => afternoon_count(schedule),
        };
        score = score.saturating_add(TIME_BONUS.saturating_mul(slots as i64));

        let liked = schedule
            .courses
            .iter()
            .filter(|c| {
                !c.is_major()
                    && self
                        .preferred_categories
                        .iter()
                        .any(|p| *p == c.category.label)
            })
            .count() as i64;
        score = score.saturating_add(CATEGORY_BONUS.saturating_mul(liked));

        score.clamp(0, i32::MAX as i64) as i32
    }
}

fn count_starts(schedule: &Schedule, pred: impl Fn(ClockTime) -> bool) -> usize {
    schedule
        .courses
        .iter()
        .flat_map(|c| c.meetings())
        .filter(|m| pred(m.start))
        .count()
}

/// Meetings starting at or before 09:00.
pub(crate) fn morning_count(schedule: &Schedule) -> usize {
    count_starts(schedule, |t| t.minutes() <= MORNING_UNTIL)
}

/// Meetings starting at or after 13:00.
pub(crate) fn afternoon_count(schedule: &Schedule) -> usize {
    count_starts(schedule, |t| t.minutes() >= AFTERNOON_FROM)
}
