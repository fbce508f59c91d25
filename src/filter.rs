//! Candidate filtering and ordering.
//!
//! Turns a catalog into the candidate pool searched by the combination
//! engine. Must-have courses always pass; every other course has to clear
//! the hard constraints of the request.
//!
//! # Rules (non-must-have courses)
//! 1. `rating >= min_rating`
//! 2. Major category, if `only_major`
//! 3. No avoid keyword in the detail text; no avoid-name keyword in the name
//! 4. At least one fixed meeting, if `exclude_no_time`
//! 5. No meeting overlapping a blocked window
//!
//! # Order
//! Must-have first, then courses matching a preferred keyword, then by
//! rating descending. The sort is stable, so catalog order breaks ties.

use std::cmp::Ordering;

use crate::conflict;
use crate::models::{Course, GenerationRequest, Meeting};

/// A course admitted to the search, with its request-specific flags.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub course: &'a Course,
    pub is_must_have_major: bool,
    pub is_must_have_general: bool,
    /// Detail text matches a preferred keyword.
    pub has_preference: bool,
}

impl<'a> Candidate<'a> {
    /// Flags `course` against `request`.
    pub fn new(course: &'a Course, request: &GenerationRequest) -> Self {
        Self {
            course,
            is_must_have_major: request.must_have_major_ids.contains(&course.id),
            is_must_have_general: request.must_have_general_ids.contains(&course.id),
            has_preference: contains_any(&course.details, &request.preferred_keywords),
        }
    }

    #[inline]
    pub fn is_must_have(&self) -> bool {
        self.is_must_have_major || self.is_must_have_general
    }
}

/// Filters and orders the catalog for `request`.
///
/// `blocked` holds the request's blocked windows, already parsed by
/// [`validate_request`](crate::validation::validate_request).
pub fn filter_candidates<'a>(
    courses: &'a [Course],
    request: &GenerationRequest,
    blocked: &[Meeting],
) -> Vec<Candidate<'a>> {
    let mut candidates: Vec<Candidate<'a>> = courses
        .iter()
        .map(|c| Candidate::new(c, request))
        .filter(|c| c.is_must_have() || passes(c.course, request, blocked))
        .collect();

    candidates.sort_by(compare_priority);
    candidates
}

/// Whether a non-must-have course clears the hard constraints.
pub fn passes(course: &Course, request: &GenerationRequest, blocked: &[Meeting]) -> bool {
    if course.rating < request.min_rating {
        return false;
    }
    if request.only_major && !course.is_major() {
        return false;
    }
    if contains_any(&course.details, &request.avoid_keywords) {
        return false;
    }
    if contains_any(&course.name, &request.avoid_name_keywords) {
        return false;
    }
    if request.exclude_no_time && !course.has_fixed_time() {
        return false;
    }
    !conflict::overlaps_windows(course, blocked)
}

fn compare_priority(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.is_must_have()
        .cmp(&a.is_must_have())
        .then_with(|| b.has_preference.cmp(&a.has_preference))
        .then_with(|| {
            b.course
                .rating
                .partial_cmp(&a.course.rating)
                .unwrap_or(Ordering::Equal)
        })
}

/// Case-insensitive substring match against any non-blank keyword.
pub(crate) fn contains_any(text: &str, keywords: &[String]) -> bool {
    if keywords.is_empty() {
        return false;
    }
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .any(|k| haystack.contains(&k.to_lowercase()))
}
