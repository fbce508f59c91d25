//! Schedule ranking and preference scoring.
//!
//! Two orderings exist, one per search mode:
//!
//! - **Precise mode**: a [`Ranker`] composes [`RankingCriterion`]s. The
//!   default ([`Ranker::precise`]) orders by must-have courses included,
//!   then realized day-offs, then mean course rating.
//! - **Recommendation mode**: a [`PreferenceScorer`] computes an additive
//!   score starting at 100.
//!
//! # Usage
//!
//! ```
//! use u_timetable::ranking::{criteria, Ranker, RankingContext};
//!
//! let ranker = Ranker::new()
//!     .with_criterion(criteria::MustHaveCount)
//!     .with_tie_breaker(criteria::MeanRating);
//!
//! let context = RankingContext::default();
//! // let ranked = ranker.rank(schedules, &context, 50);
//! ```

pub mod criteria;

mod context;
mod engine;
mod preference;

pub use context::RankingContext;
pub use engine::{EvaluationMode, Ranker};
pub use preference::{PreferenceScorer, AFTERNOON_FROM, MORNING_UNTIL};

use crate::models::Schedule;
use std::fmt::Debug;

/// Score returned by a ranking criterion.
///
/// Lower scores rank first, matching the convention of priority
/// dispatching: criteria that reward a quantity return its negation.
pub type RankScore = f64;

/// A criterion that orders schedules.
///
/// # Score Convention
/// **Lower score = better schedule.**
pub trait RankingCriterion: Send + Sync + Debug {
    /// Criterion name (e.g. "DAY_OFF").
    fn name(&self) -> &'static str;

    /// Evaluates a schedule.
    fn evaluate(&self, schedule: &Schedule, context: &RankingContext) -> RankScore;

    /// Criterion description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
