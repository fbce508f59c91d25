//! Time-conflict detection.
//!
//! Two scheduled slots conflict iff they share a day and their half-open
//! intervals overlap: `start_a < end_b && start_b < end_a`. Touching
//! boundaries are not a conflict. Unscheduled slots never conflict.

use crate::models::{Course, Meeting, TimeSlot};

/// Whether two meetings overlap on the same day.
#[inline]
pub fn meetings_overlap(a: &Meeting, b: &Meeting) -> bool {
    a.overlaps(b)
}

/// Whether two slots conflict.
pub fn slots_conflict(a: &TimeSlot, b: &TimeSlot) -> bool {
    match (a, b) {
        (TimeSlot::Scheduled(x), TimeSlot::Scheduled(y)) => meetings_overlap(x, y),
        _ => false,
    }
}

/// Whether any meeting of `a` overlaps any meeting of `b`.
pub fn courses_conflict(a: &Course, b: &Course) -> bool {
    a.meetings()
        .any(|x| b.meetings().any(|y| meetings_overlap(x, y)))
}

/// Whether `course` conflicts with any course already placed.
pub fn conflicts_with_any<'a, I>(course: &Course, placed: I) -> bool
where
    I: IntoIterator<Item = &'a Course>,
{
    placed.into_iter().any(|p| courses_conflict(course, p))
}

/// Whether any meeting of `course` overlaps one of the `windows`.
pub fn overlaps_windows(course: &Course, windows: &[Meeting]) -> bool {
    course
        .meetings()
        .any(|m| windows.iter().any(|w| meetings_overlap(m, w)))
}
