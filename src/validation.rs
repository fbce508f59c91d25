//! Input validation for timetable generation.
//!
//! Checks request and catalog integrity before any search runs. Detects:
//! - Unparseable or inverted blocked-time windows
//! - Out-of-range rating thresholds
//! - Duplicate course IDs and inverted meetings in the catalog
//!
//! Unsatisfiable numeric constraints (e.g. a major-credit minimum above the
//! credit target) are *not* validation errors; the search simply finds
//! nothing. [`must_have_conflicts`] reports must-have courses that cannot
//! honor the request, as warnings rather than failures.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::conflict;
use crate::models::{Course, GenerationRequest, Meeting};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{kind:?}: {message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationErrorKind {
    /// A time string is not `HH:MM` or is outside the day.
    InvalidTimeFormat,
    /// A window ends at or before its start.
    InvalidTimeRange,
    /// A day name could not be recognised.
    InvalidDay,
    /// A rating threshold is outside 0.0–5.0 or not a number.
    InvalidRating,
    /// Two catalog courses share the same ID.
    DuplicateId,
    /// A must-have course clashes with blocked times or wanted day-offs.
    MustHaveConflict,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a generation request and resolves its blocked windows.
///
/// Checks:
/// 1. Every blocked time parses (`InvalidTimeFormat`)
/// 2. Every blocked time ends after it starts (`InvalidTimeRange`)
/// 3. `min_rating` is a number within 0.0–5.0 (`InvalidRating`)
///
/// # Returns
/// The parsed blocked windows, or all detected issues.
pub fn validate_request(request: &GenerationRequest) -> Result<Vec<Meeting>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut windows = Vec::with_capacity(request.blocked_times.len());

    for blocked in &request.blocked_times {
        match blocked.to_meeting() {
            Ok(m) => windows.push(m),
            Err(e) => errors.push(e),
        }
    }

    if let Some(e) = check_rating(request.min_rating) {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(windows)
    } else {
        Err(errors)
    }
}

pub(crate) fn check_rating(min_rating: f64) -> Option<ValidationError> {
    if min_rating.is_nan() || !(0.0..=5.0).contains(&min_rating) {
        Some(ValidationError::new(
            ValidationErrorKind::InvalidRating,
            format!("Minimum rating must be within 0.0-5.0, got {min_rating}"),
        ))
    } else {
        None
    }
}

/// Validates catalog integrity.
///
/// Checks:
/// 1. No duplicate course IDs
/// 2. Every meeting ends after it starts
pub fn validate_catalog(courses: &[Course]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for course in courses {
        if !ids.insert(course.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", course.id),
            ));
        }

        for m in course.meetings() {
            if !m.is_well_formed() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidTimeRange,
                    format!("Course '{}' has an inverted meeting: {m}", course.id),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Lists must-have courses that meet on a wanted day-off or during a
/// blocked window.
///
/// Must-have courses bypass the candidate filter, so these clashes are
/// not enforced by the search; callers usually surface them to the user.
pub fn must_have_conflicts(
    courses: &[Course],
    request: &GenerationRequest,
    blocked: &[Meeting],
) -> Vec<ValidationError> {
    let mut warnings = Vec::new();

    for course in courses.iter().filter(|c| request.is_must_have(&c.id)) {
        let clashing_days: Vec<String> = request
            .day_offs()
            .into_iter()
            .filter(|&d| course.meets_on(d))
            .map(|d| d.to_string())
            .collect();
        if !clashing_days.is_empty() {
            warnings.push(ValidationError::new(
                ValidationErrorKind::MustHaveConflict,
                format!(
                    "'{}' meets on wanted day off ({})",
                    course.name,
                    clashing_days.join(", ")
                ),
            ));
            continue;
        }

        if conflict::overlaps_windows(course, blocked) {
            warnings.push(ValidationError::new(
                ValidationErrorKind::MustHaveConflict,
                format!("'{}' overlaps a blocked time", course.name),
            ));
        }
    }

    warnings
}
