//! Built-in ranking criteria.
//!
//! # Categories
//!
//! - **Wishes**: DAY_OFF, MUST_HAVE, PREFERRED
//! - **Quality**: RATING
//! - **Shape**: COMPACT, CREDIT
//!
//! # Score Convention
//! All criteria return lower scores for better schedules.

use super::{RankScore, RankingContext, RankingCriterion};
use crate::filter::contains_any;
use crate::models::Schedule;

/// Realized day-offs.
///
/// Counts wanted days on which the schedule has no scheduled meeting.
/// Unscheduled courses never occupy a day.
#[derive(Debug, Clone, Copy)]
pub struct DayOffsRealized;

impl RankingCriterion for DayOffsRealized {
    fn name(&self) -> &'static str {
        "DAY_OFF"
    }

    fn evaluate(&self, schedule: &Schedule, context: &RankingContext) -> RankScore {
        -(schedule.realized_day_offs(&context.wanted_day_offs) as f64)
    }

    fn description(&self) -> &'static str {
        "Most Wanted Days Off"
    }
}

/// Mean course rating.
#[derive(Debug, Clone, Copy)]
pub struct MeanRating;

impl RankingCriterion for MeanRating {
    fn name(&self) -> &'static str {
        "RATING"
    }

    fn evaluate(&self, schedule: &Schedule, _context: &RankingContext) -> RankScore {
        -schedule.mean_rating()
    }

    fn description(&self) -> &'static str {
        "Highest Mean Rating"
    }
}

/// Number of must-have courses included.
#[derive(Debug, Clone, Copy)]
pub struct MustHaveCount;

impl RankingCriterion for MustHaveCount {
    fn name(&self) -> &'static str {
        "MUST_HAVE"
    }

    fn evaluate(&self, schedule: &Schedule, context: &RankingContext) -> RankScore {
        -(schedule
            .courses
            .iter()
            .filter(|c| context.must_have_ids.contains(&c.id))
            .count() as f64)
    }

    fn description(&self) -> &'static str {
        "Most Must-Have Courses"
    }
}

/// Number of courses whose details match a preferred keyword.
#[derive(Debug, Clone, Copy)]
pub struct PreferredKeywordCount;

impl RankingCriterion for PreferredKeywordCount {
    fn name(&self) -> &'static str {
        "PREFERRED"
    }

    fn evaluate(&self, schedule: &Schedule, context: &RankingContext) -> RankScore {
        -(schedule
            .courses
            .iter()
            .filter(|c| contains_any(&c.details, &context.preferred_keywords))
            .count() as f64)
    }

    fn description(&self) -> &'static str {
        "Most Preferred-Keyword Courses"
    }
}

/// Fewest Mon–Fri days with classes.
#[derive(Debug, Clone, Copy)]
pub struct CompactWeek;

impl RankingCriterion for CompactWeek {
    fn name(&self) -> &'static str {
        "COMPACT"
    }

    fn evaluate(&self, schedule: &Schedule, _context: &RankingContext) -> RankScore {
        schedule.days_with_classes() as f64
    }

    fn description(&self) -> &'static str {
        "Fewest Days On Campus"
    }
}

/// Total credit, fewest first.
///
/// Prefers schedules that overshoot the target the least.
#[derive(Debug, Clone, Copy)]
pub struct TotalCredit;

impl RankingCriterion for TotalCredit {
    fn name(&self) -> &'static str {
        "CREDIT"
    }

    fn evaluate(&self, schedule: &Schedule, _context: &RankingContext) -> RankScore {
        schedule.total_credit() as f64
    }

    fn description(&self) -> &'static str {
        "Least Credit Overshoot"
    }
}
