//! University timetable generation.
//!
//! Builds conflict-free weekly timetables from a course catalog under hard
//! constraints (credit totals, must-have courses, blocked times) and ranks
//! them by soft preferences (day-offs, ratings, time-of-day bias).
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `TimeSlot`, `Meeting`, `Schedule`,
//!   `GenerationRequest`, `RecommendationRequest`
//! - **`catalog`**: Catalog snapshot, provider boundary, time/room text parsing
//! - **`conflict`**: Half-open interval overlap between meetings and courses
//! - **`filter`**: Candidate filtering and priority ordering
//! - **`search`**: Bounded backtracking combination search (precise and
//!   recommendation modes)
//! - **`ranking`**: Composable ranking criteria and the preference scorer
//! - **`engine`**: End-to-end pipeline with logging
//! - **`validation`**: Request and catalog integrity checks
//! - **`config`**: Search caps and budgets, loadable from TOML
//!
//! # Quick Start
//!
//! ```
//! use u_timetable::{Catalog, Category, Course, GenerationRequest, TimetableEngine, Weekday};
//!
//! let catalog = Catalog::new(vec![
//!     Course::new("CS101-01").with_name("Data Structures").with_credit(3)
//!         .with_category(Category::major("전공필수")).with_rating(4.2)
//!         .meets(Weekday::Tue, (10, 30), (11, 45))
//!         .meets(Weekday::Thu, (10, 30), (11, 45)),
//!     Course::new("GE210-02").with_name("Academic Writing").with_credit(3)
//!         .with_rating(3.9)
//!         .meets(Weekday::Wed, (13, 30), (14, 45)),
//! ]);
//!
//! let request = GenerationRequest::new(6)
//!     .with_min_major_credit(3)
//!     .with_day_off(Weekday::Fri);
//!
//! let result = TimetableEngine::new().generate(&catalog, &request).unwrap();
//! assert_eq!(result.schedules.len(), 1);
//! assert_eq!(result.schedules[0].realized_day_offs(&[Weekday::Fri]), 1);
//! ```
//!
//! # Termination
//!
//! The search is a bounded heuristic, not an optimizer: it stops at a result
//! cap, a node budget or a deadline (see [`config::EngineConfig`]).

pub mod catalog;
pub mod config;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod filter;
pub mod models;
pub mod ranking;
pub mod search;
pub mod validation;

pub use catalog::{Catalog, CatalogProvider, Term};
pub use config::EngineConfig;
pub use engine::{Generation, Recommendation, TimetableEngine};
pub use error::TimetableError;
pub use models::{
    BlockedTime, Category, Course, GenerationRequest, RecommendationRequest, Schedule,
    ScoredSchedule, TimePreference, TimeSlot, Weekday,
};
