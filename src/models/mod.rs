//! Timetable domain models.
//!
//! Provides the data types for describing a course catalog, a generation
//! request, and the resulting schedules.
//!
//! # Domain Mappings
//!
//! | u-timetable | Korean catalog feed | Registrar |
//! |-------------|---------------------|-----------|
//! | Course | 강의 (학수번호-분반) | Section |
//! | Meeting | 요일 + 시간 | Meeting pattern |
//! | Category | 이수구분 | Requirement type |
//! | Schedule | 시간표 | Enrollment plan |

mod course;
mod request;
mod schedule;
mod time;

pub use course::{Category, Course, CourseKind};
pub use request::{
    BlockedTime, GenerationRequest, RecommendationRequest, TimeInput, TimePreference,
};
pub use schedule::{Schedule, ScoredSchedule};
pub use time::{ClockTime, Meeting, TimeSlot, Weekday};
