//! Course model.
//!
//! A course is one schedulable catalog entry (a specific section) with
//! its weekly meetings. Courses are immutable for the duration of a
//! generation request.

use serde::{Deserialize, Serialize};

use super::{Meeting, TimeSlot, Weekday};

/// Whether a course counts toward the major or general education.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseKind {
    /// Major (전공) course.
    Major,
    /// General education (교양) course.
    #[default]
    General,
}

/// Course category: kind plus the free-text subtype from the catalog
/// (e.g. "전공필수", "핵심교양", "Writing").
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    /// Major or general.
    pub kind: CourseKind,
    /// Catalog label.
    pub label: String,
}

impl Category {
    /// Major category with a subtype label.
    pub fn major(label: impl Into<String>) -> Self {
        Self {
            kind: CourseKind::Major,
            label: label.into(),
        }
    }

    /// General-education category with a subtype label.
    pub fn general(label: impl Into<String>) -> Self {
        Self {
            kind: CourseKind::General,
            label: label.into(),
        }
    }

    /// Classifies a raw catalog label.
    ///
    /// Labels mentioning `전공` or `major` (any case) are major courses;
    /// everything else is general education.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        let kind = if label.contains("전공") || label.to_lowercase().contains("major") {
            CourseKind::Major
        } else {
            CourseKind::General
        };
        Self { kind, label }
    }

    #[inline]
    pub fn is_major(&self) -> bool {
        self.kind == CourseKind::Major
    }
}

/// A course section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier (course code plus section, e.g. `COSE211-01`).
    pub id: String,
    /// Course title.
    pub name: String,
    /// Instructor.
    pub professor: String,
    /// Credit units.
    pub credit: u32,
    /// Category.
    pub category: Category,
    /// Average rating, 0.0–5.0.
    pub rating: f64,
    /// Free-text detail/tag text (delivery mode, notes, keywords).
    #[serde(default)]
    pub details: String,
    /// Weekly slots. Empty means no fixed time.
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

impl Course {
    /// Creates a course with the given ID and defaults elsewhere.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            professor: String::new(),
            credit: 0,
            category: Category::default(),
            rating: 0.0,
            details: String::new(),
            slots: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_professor(mut self, professor: impl Into<String>) -> Self {
        self.professor = professor.into();
        self
    }

    pub fn with_credit(mut self, credit: u32) -> Self {
        self.credit = credit;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Adds a slot.
    pub fn with_slot(mut self, slot: impl Into<TimeSlot>) -> Self {
        self.slots.push(slot.into());
        self
    }

    /// Adds a scheduled meeting from `(hour, minute)` pairs.
    pub fn meets(self, day: Weekday, start: (u16, u16), end: (u16, u16)) -> Self {
        self.with_slot(Meeting::at(day, start, end))
    }

    #[inline]
    pub fn is_major(&self) -> bool {
        self.category.is_major()
    }

    /// Scheduled meetings, skipping unscheduled slots.
    pub fn meetings(&self) -> impl Iterator<Item = &Meeting> {
        self.slots.iter().filter_map(TimeSlot::meeting)
    }

    /// Whether the course has at least one fixed meeting.
    pub fn has_fixed_time(&self) -> bool {
        self.slots.iter().any(TimeSlot::is_scheduled)
    }

    /// Whether any meeting falls on `day`.
    pub fn meets_on(&self, day: Weekday) -> bool {
        self.meetings().any(|m| m.day == day)
    }

    /// Course code without the section suffix (`COSE211-01` → `COSE211`).
    pub fn base_code(&self) -> &str {
        self.id.split('-').next().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_builder() {
        let c = Course::new("COSE211-01")
            .with_name("Data Structures")
            .with_professor("Kim")
            .with_credit(3)
            .with_category(Category::major("전공필수"))
            .with_rating(4.2)
            .with_details("영어강의")
            .meets(Weekday::Mon, (9, 0), (10, 15))
            .meets(Weekday::Wed, (9, 0), (10, 15));

        assert_eq!(c.base_code(), "COSE211");
        assert!(c.is_major());
        assert_eq!(c.meetings().count(), 2);
        assert!(c.meets_on(Weekday::Wed));
        assert!(!c.meets_on(Weekday::Tue));
        assert!(c.has_fixed_time());
    }

    #[test]
    fn test_base_code_without_section() {
        assert_eq!(Course::new("GEN100").base_code(), "GEN100");
    }

    #[test]
    fn test_unscheduled_course() {
        let c = Course::new("ONLINE-01").with_slot(TimeSlot::Unscheduled);
        assert!(!c.has_fixed_time());
        assert_eq!(c.meetings().count(), 0);
        assert!(!Course::new("EMPTY").has_fixed_time());
    }

    #[test]
    fn test_category_from_label() {
        assert!(Category::from_label("전공선택").is_major());
        assert!(Category::from_label("Major Elective").is_major());
        assert!(!Category::from_label("핵심교양").is_major());
        assert_eq!(Category::from_label("Writing").label, "Writing");
    }
}
