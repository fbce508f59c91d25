//! Course catalog boundary.
//!
//! The engine consumes an immutable [`Catalog`] snapshot per request. How
//! the records are stored or fetched is up to a [`CatalogProvider`]; this
//! module only defines the boundary plus an in-memory provider.
//!
//! # Records vs. courses
//! Catalog feeds ship one row per meeting ([`CourseRecord`]). A course that
//! meets twice a week appears as two rows with the same ID.
//! [`Catalog::from_records`] folds them into multi-slot [`Course`]s.
//! Feeds without structured time columns carry the raw time/room text
//! instead, which is expanded with [`parse_time_room`].

mod time_room;

pub use time_room::{parse_time_room, period_end, period_start};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Category, ClockTime, Course, Meeting, TimeSlot, Weekday};

/// Catalog access error.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("No catalog for term {0}")]
    UnknownTerm(Term),

    #[error("Catalog source unavailable: {0}")]
    Unavailable(String),
}

/// Academic term of a university.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub university: String,
    pub year: u16,
    pub semester: u8,
}

impl Term {
    pub fn new(university: impl Into<String>, year: u16, semester: u8) -> Self {
        Self {
            university: university.into(),
            year,
            semester,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}-{}", self.university, self.year, self.semester)
    }
}

/// One catalog row: a course section and one of its meetings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub professor: String,
    pub credit: u32,
    /// Raw category label (e.g. "전공필수").
    pub category: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub details: String,
    /// Meeting day; ignored when `start`/`end` are absent.
    #[serde(default)]
    pub day: Option<Weekday>,
    /// Meeting start; `None` means no fixed time.
    #[serde(default)]
    pub start: Option<ClockTime>,
    #[serde(default)]
    pub end: Option<ClockTime>,
    /// Free-text time/room column (e.g. `월수(10:00-11:15) 공학관 301`),
    /// parsed when the structured day/start/end columns are missing.
    #[serde(default)]
    pub time_room: Option<String>,
}

impl CourseRecord {
    /// The slots this row describes.
    ///
    /// Structured columns win; otherwise `time_room` goes through
    /// [`parse_time_room`]. A row with neither is unscheduled.
    pub fn slots(&self) -> Vec<TimeSlot> {
        match (self.day, self.start, self.end, &self.time_room) {
            (Some(day), Some(start), Some(end), _) => {
                vec![TimeSlot::Scheduled(Meeting::new(day, start, end))]
            }
            (_, _, _, Some(text)) => parse_time_room(text),
            _ => vec![TimeSlot::Unscheduled],
        }
    }
}

/// Immutable course snapshot for one term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Creates a catalog from already-grouped courses.
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Groups per-meeting rows into courses, keeping first-seen order.
    ///
    /// Course attributes come from the first row of each ID.
    pub fn from_records(records: impl IntoIterator<Item = CourseRecord>) -> Self {
        let mut courses: Vec<Course> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in records {
            let slots = record.slots();
            if let Some(&i) = index.get(&record.id) {
                for slot in slots {
                    if !courses[i].slots.contains(&slot) {
                        courses[i].slots.push(slot);
                    }
                }
                continue;
            }

            index.insert(record.id.clone(), courses.len());
            courses.push(Course {
                id: record.id,
                name: record.name,
                professor: record.professor,
                credit: record.credit,
                category: Category::from_label(record.category),
                rating: record.rating,
                details: record.details,
                slots,
            });
        }

        Self { courses }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Finds a course by ID.
    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Courses whose name, professor or ID contains `keyword`
    /// (case-insensitive). A blank keyword matches everything.
    pub fn search(&self, keyword: &str) -> Vec<&Course> {
        let k = keyword.trim().to_lowercase();
        if k.is_empty() {
            return self.courses.iter().collect();
        }
        self.courses
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&k)
                    || c.professor.to_lowercase().contains(&k)
                    || c.id.to_lowercase().contains(&k)
            })
            .collect()
    }
}

impl FromIterator<Course> for Catalog {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Supplies read-only catalog snapshots.
pub trait CatalogProvider {
    /// Returns the catalog for `term`.
    fn snapshot(&self, term: &Term) -> Result<Catalog, CatalogError>;
}

/// In-memory provider keyed by term.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    terms: HashMap<Term, Catalog>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a catalog for a term.
    pub fn with_term(mut self, term: Term, catalog: Catalog) -> Self {
        self.terms.insert(term, catalog);
        self
    }
}

impl CatalogProvider for StaticCatalog {
    fn snapshot(&self, term: &Term) -> Result<Catalog, CatalogError> {
        self.terms
            .get(term)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownTerm(term.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, day: Option<Weekday>, start: u16, end: u16) -> CourseRecord {
        CourseRecord {
            id: id.into(),
            name: format!("Course {id}"),
            professor: "Lee".into(),
            credit: 3,
            category: "전공필수".into(),
            rating: 4.0,
            details: String::new(),
            day,
            start: ClockTime::from_minutes(start),
            end: ClockTime::from_minutes(end),
            time_room: None,
        }
    }

    #[test]
    fn test_from_records_groups_by_id() {
        let catalog = Catalog::from_records(vec![
            record("A-01", Some(Weekday::Mon), 540, 615),
            record("B-01", Some(Weekday::Tue), 600, 675),
            record("A-01", Some(Weekday::Wed), 540, 615),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.courses()[0].id, "A-01");
        assert_eq!(catalog.courses()[0].slots.len(), 2);
        assert!(catalog.courses()[0].is_major());
        assert_eq!(catalog.get("B-01").unwrap().slots.len(), 1);
    }

    #[test]
    fn test_record_without_time_is_unscheduled() {
        let mut r = record("O-01", None, 0, 0);
        r.start = None;
        r.end = None;
        assert_eq!(r.slots(), vec![TimeSlot::Unscheduled]);
        let catalog = Catalog::from_records(vec![r]);
        assert!(!catalog.courses()[0].has_fixed_time());
    }

    #[test]
    fn test_records_from_json() {
        let json = r#"[
            {"id": "GEN1-01", "name": "Writing", "credit": 2, "category": "교양",
             "day": "Thu", "start": 780, "end": 870},
            {"id": "GEN2-01", "name": "Online Ethics", "credit": 1, "category": "교양"}
        ]"#;
        let records: Vec<CourseRecord> = serde_json::from_str(json).unwrap();
        let catalog = Catalog::from_records(records);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.courses()[0].meets_on(Weekday::Thu));
        assert!(!catalog.courses()[1].has_fixed_time());
    }

    #[test]
    fn test_time_room_fallback() {
        let mut r = record("C-01", None, 0, 0);
        r.start = None;
        r.end = None;
        r.time_room = Some("월수(10:00-11:15) 공학관 301".into());
        let mut structured = record("C-01", Some(Weekday::Fri), 540, 615);
        structured.time_room = Some("화(3-4)".into());

        let catalog = Catalog::from_records(vec![r, structured]);
        let course = &catalog.courses()[0];
        assert_eq!(course.slots.len(), 3);
        assert!(course.meets_on(Weekday::Mon));
        assert!(course.meets_on(Weekday::Wed));
        assert!(course.meets_on(Weekday::Fri));
        assert!(!course.meets_on(Weekday::Tue));
    }

    #[test]
    fn test_time_room_from_json() {
        let json = r#"{"id": "E-01", "name": "Ethics", "credit": 2, "category": "교양",
                       "time_room": "미정"}"#;
        let record: CourseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.slots(), vec![TimeSlot::Unscheduled]);
    }

    #[test]
    fn test_search() {
        let catalog = Catalog::from_records(vec![
            record("COSE211-01", Some(Weekday::Mon), 540, 615),
            record("MATH101-02", Some(Weekday::Tue), 600, 675),
        ]);
        assert_eq!(catalog.search("cose").len(), 1);
        assert_eq!(catalog.search("lee").len(), 2);
        assert_eq!(catalog.search("  ").len(), 2);
        assert!(catalog.search("physics").is_empty());
    }

    #[test]
    fn test_static_provider() {
        let term = Term::new("KOREA", 2026, 1);
        let provider = StaticCatalog::new().with_term(
            term.clone(),
            Catalog::new(vec![Course::new("A")]),
        );
        assert_eq!(provider.snapshot(&term).unwrap().len(), 1);

        let missing = Term::new("HANYANG", 2026, 1);
        let err = provider.snapshot(&missing).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownTerm(_)));
        assert_eq!(err.to_string(), "No catalog for term HANYANG 2026-1");
    }
}
