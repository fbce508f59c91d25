//! Schedule (solution) model.
//!
//! A schedule is a set of course sections taken together in one term.
//! Accepted schedules satisfy two invariants:
//! - no two courses have overlapping meetings on the same day;
//! - no two courses share a name (or a course code, see [`Course::base_code`]).
//!
//! # Day counting
//! Only Monday–Friday count as teaching days, so
//! `days_with_classes() + break_days() == 5` always holds.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Course, Weekday};
use crate::conflict;

/// A generated timetable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Courses in the order they were chosen.
    pub courses: Vec<Course>,
}

/// A schedule with its preference score (recommendation mode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSchedule {
    pub schedule: Schedule,
    pub score: i32,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schedule from courses.
    pub fn from_courses(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Adds a course.
    pub fn add_course(&mut self, course: Course) {
        self.courses.push(course);
    }

    /// Number of courses.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Course IDs in order.
    pub fn course_ids(&self) -> Vec<&str> {
        self.courses.iter().map(|c| c.id.as_str()).collect()
    }

    /// Whether a course with this ID is included.
    pub fn contains(&self, course_id: &str) -> bool {
        self.courses.iter().any(|c| c.id == course_id)
    }

    /// Sum of credits, saturating at `u32::MAX`.
    pub fn total_credit(&self) -> u32 {
        self.courses
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.credit))
    }

    /// Sum of credits of major courses.
    pub fn major_credit(&self) -> u32 {
        self.courses
            .iter()
            .filter(|c| c.is_major())
            .fold(0u32, |acc, c| acc.saturating_add(c.credit))
    }

    /// Whether any course meets on `day`.
    pub fn has_class_on(&self, day: Weekday) -> bool {
        self.courses.iter().any(|c| c.meets_on(day))
    }

    /// Distinct Mon–Fri days with at least one scheduled meeting.
    pub fn days_with_classes(&self) -> usize {
        Weekday::WEEKDAYS
            .iter()
            .filter(|&&d| self.has_class_on(d))
            .count()
    }

    /// Mon–Fri days without any class.
    pub fn break_days(&self) -> usize {
        5 - self.days_with_classes()
    }

    /// How many of the wanted days off are free of classes.
    pub fn realized_day_offs(&self, wanted: &[Weekday]) -> usize {
        let wanted: HashSet<Weekday> = wanted.iter().copied().collect();
        wanted.iter().filter(|&&d| !self.has_class_on(d)).count()
    }

    /// Arithmetic mean rating; 0.0 for an empty schedule.
    pub fn mean_rating(&self) -> f64 {
        if self.courses.is_empty() {
            return 0.0;
        }
        self.courses.iter().map(|c| c.rating).sum::<f64>() / self.courses.len() as f64
    }

    /// Whether any pair of courses has overlapping meetings.
    pub fn has_conflict(&self) -> bool {
        self.courses.iter().enumerate().any(|(i, a)| {
            self.courses[i + 1..]
                .iter()
                .any(|b| conflict::courses_conflict(a, b))
        })
    }

    /// Whether two courses share a (non-blank) name.
    pub fn has_duplicate_name(&self) -> bool {
        let mut seen = HashSet::new();
        self.courses
            .iter()
            .filter(|c| !c.name.is_empty())
            .any(|c| !seen.insert(c.name.as_str()))
    }
}
