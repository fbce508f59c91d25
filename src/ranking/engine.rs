//! Multi-criteria schedule ranker.
//!
//! Composes ranking criteria with a sequential (lexicographic) or weighted
//! evaluation mode. Sorting is stable, so schedules that tie on every
//! criterion keep their discovery order.

use std::cmp::Ordering;
use std::sync::Arc;

use super::criteria::{DayOffsRealized, MeanRating, MustHaveCount};
use super::{RankScore, RankingContext, RankingCriterion};
use crate::models::Schedule;

/// How multiple criteria are combined.
#[derive(Debug, Clone, Default)]
pub enum EvaluationMode {
    /// Apply criteria in sequence; use the next one only on ties.
    #[default]
    Sequential,
    /// Compute the weighted sum of all criterion scores.
    Weighted,
}

#[derive(Clone)]
struct WeightedCriterion {
    criterion: Arc<dyn RankingCriterion>,
    weight: f64,
}

/// A composable ranker for accepted schedules.
///
/// # Example
/// ```
/// use u_timetable::ranking::{criteria, Ranker};
///
/// let ranker = Ranker::new()
///     .with_criterion(criteria::DayOffsRealized)
///     .with_tie_breaker(criteria::MeanRating);
/// ```
#[derive(Clone)]
pub struct Ranker {
    criteria: Vec<WeightedCriterion>,
    mode: EvaluationMode,
    epsilon: f64,
}

impl Ranker {
    /// Creates an empty ranker. With no criteria, order is preserved.
    pub fn new() -> Self {
        Self {
            criteria: Vec::new(),
            mode: EvaluationMode::Sequential,
            epsilon: 1e-9,
        }
    }

    /// Precise-mode ranking: most must-have courses, then most realized
    /// day-offs, then highest mean rating.
    ///
    /// With must-have count leading, truncation keeps a must-have schedule
    /// whenever the search found one.
    pub fn precise() -> Self {
        Self::new()
            .with_criterion(MustHaveCount)
            .with_tie_breaker(DayOffsRealized)
            .with_tie_breaker(MeanRating)
    }

    /// Adds a primary criterion (weight 1.0).
    pub fn with_criterion<C: RankingCriterion + 'static>(mut self, criterion: C) -> Self {
        self.criteria.push(WeightedCriterion {
            criterion: Arc::new(criterion),
            weight: 1.0,
        });
        self
    }

    /// Adds a weighted criterion.
    pub fn with_weighted_criterion<C: RankingCriterion + 'static>(
        mut self,
        criterion: C,
        weight: f64,
    ) -> Self {
        self.criteria.push(WeightedCriterion {
            criterion: Arc::new(criterion),
            weight,
        });
        self
    }

    /// Adds a tie-breaking criterion (weight 0.0, only used in Sequential mode).
    pub fn with_tie_breaker<C: RankingCriterion + 'static>(mut self, criterion: C) -> Self {
        self.criteria.push(WeightedCriterion {
            criterion: Arc::new(criterion),
            weight: 0.0,
        });
        self
    }

    /// Sets the evaluation mode.
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Names of the configured criteria, in evaluation order.
    pub fn criterion_names(&self) -> Vec<&'static str> {
        self.criteria.iter().map(|wc| wc.criterion.name()).collect()
    }

    /// Returns indices into `schedules`, best first.
    pub fn sort_indices(&self, schedules: &[Schedule], context: &RankingContext) -> Vec<usize> {
        if schedules.is_empty() {
            return Vec::new();
        }

        // One score row per schedule; criteria are evaluated once each.
        let rows: Vec<Vec<RankScore>> = schedules
            .iter()
            .map(|s| self.raw_scores(s, context))
            .collect();
        let mut indices: Vec<usize> = (0..schedules.len()).collect();

        match &self.mode {
            EvaluationMode::Sequential => {
                indices.sort_by(|&a, &b| self.compare_sequential(&rows[a], &rows[b]));
            }
            EvaluationMode::Weighted => {
                let totals: Vec<f64> = rows.iter().map(|row| self.weighted_sum(row)).collect();
                indices.sort_by(|&a, &b| {
                    totals[a].partial_cmp(&totals[b]).unwrap_or(Ordering::Equal)
                });
            }
        }

        indices
    }

    /// Sorts `schedules` best first and keeps at most `limit`.
    pub fn rank(
        &self,
        schedules: Vec<Schedule>,
        context: &RankingContext,
        limit: usize,
    ) -> Vec<Schedule> {
        let order = self.sort_indices(&schedules, context);
        let mut slots: Vec<Option<Schedule>> = schedules.into_iter().map(Some).collect();
        order
            .into_iter()
            .take(limit)
            .filter_map(|i| slots[i].take())
            .collect()
    }

    /// Returns the index of the best schedule.
    pub fn select_best(&self, schedules: &[Schedule], context: &RankingContext) -> Option<usize> {
        self.sort_indices(schedules, context).first().copied()
    }

    /// Weighted scores of a single schedule, one per criterion.
    pub fn evaluate(&self, schedule: &Schedule, context: &RankingContext) -> Vec<RankScore> {
        self.criteria
            .iter()
            .map(|wc| wc.criterion.evaluate(schedule, context) * wc.weight)
            .collect()
    }

    fn raw_scores(&self, schedule: &Schedule, context: &RankingContext) -> Vec<RankScore> {
        self.criteria
            .iter()
            .map(|wc| wc.criterion.evaluate(schedule, context))
            .collect()
    }

    fn compare_sequential(&self, a: &[RankScore], b: &[RankScore]) -> Ordering {
        for (score_a, score_b) in a.iter().zip(b) {
            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(score_b).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }

    fn weighted_sum(&self, row: &[RankScore]) -> f64 {
        row.iter()
            .zip(&self.criteria)
            .map(|(score, wc)| score * wc.weight)
            .sum()
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::precise()
    }
}

impl std::fmt::Debug for Ranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ranker")
            .field(
                "criteria",
                &self
                    .criteria
                    .iter()
                    .map(|c| format!("{}(w={})", c.criterion.name(), c.weight))
                    .collect::<Vec<_>>(),
            )
            .field("mode", &self.mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Weekday};
    use crate::ranking::criteria;

    fn schedule(id: &str, day: Weekday, rating: f64, credit: u32) -> Schedule {
        Schedule::from_courses(vec![Course::new(id)
            .with_credit(credit)
            .with_rating(rating)
            .meets(day, (9, 0), (10, 0))])
    }

    fn ids(schedules: &[Schedule]) -> Vec<&str> {
        schedules.iter().map(|s| s.courses[0].id.as_str()).collect()
    }

    #[test]
    fn test_precise_order() {
        let schedules = vec![
            schedule("fri_low", Weekday::Fri, 3.0, 3),
            schedule("mon_high", Weekday::Mon, 4.5, 3),
            schedule("mon_low", Weekday::Mon, 2.0, 3),
            schedule("fri_high", Weekday::Fri, 4.9, 3),
        ];
        let ctx = RankingContext::default().with_day_off(Weekday::Fri);

        let ranked = Ranker::precise().rank(schedules, &ctx, 50);
        assert_eq!(ids(&ranked), vec!["mon_high", "mon_low", "fri_high", "fri_low"]);
    }

    #[test]
    fn test_precise_puts_must_have_first() {
        let mut schedules: Vec<Schedule> = (0..5)
            .map(|i| schedule(&format!("free{i}"), Weekday::Mon, 5.0, 3))
            .collect();
        schedules.push(schedule("must", Weekday::Fri, 1.0, 3));
        let ctx = RankingContext::default()
            .with_must_have("must")
            .with_day_off(Weekday::Fri);

        let ranked = Ranker::precise().rank(schedules, &ctx, 2);
        assert_eq!(ids(&ranked), vec!["must", "free0"]);
        assert_eq!(
            Ranker::precise().criterion_names(),
            vec!["MUST_HAVE", "DAY_OFF", "RATING"]
        );
    }

    #[test]
    fn test_rank_truncates() {
        let schedules = vec![
            schedule("a", Weekday::Mon, 3.0, 3),
            schedule("b", Weekday::Mon, 4.0, 3),
            schedule("c", Weekday::Mon, 5.0, 3),
        ];
        let ranked = Ranker::precise().rank(schedules, &RankingContext::default(), 2);
        assert_eq!(ids(&ranked), vec!["c", "b"]);
    }

    #[test]
    fn test_full_tie_keeps_discovery_order() {
        let schedules = vec![
            schedule("first", Weekday::Mon, 4.0, 3),
            schedule("second", Weekday::Tue, 4.0, 3),
            schedule("third", Weekday::Wed, 4.0, 3),
        ];
        let ranked = Ranker::precise().rank(schedules, &RankingContext::default(), 50);
        assert_eq!(ids(&ranked), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_weighted_mode() {
        let schedules = vec![
            schedule("A", Weekday::Mon, 5.0, 6),
            schedule("B", Weekday::Mon, 3.0, 3),
        ];
        let ranker = Ranker::new()
            .with_mode(EvaluationMode::Weighted)
            .with_weighted_criterion(criteria::MeanRating, 1.0)
            .with_weighted_criterion(criteria::TotalCredit, 1.0);
        // A: -5 + 6 = 1, B: -3 + 3 = 0
        let ctx = RankingContext::default();
        assert_eq!(ranker.select_best(&schedules, &ctx), Some(1));
    }

    #[test]
    fn test_evaluate_scores() {
        let s = schedule("T", Weekday::Mon, 4.0, 3);
        let ranker = Ranker::new()
            .with_criterion(criteria::TotalCredit)
            .with_tie_breaker(criteria::MeanRating);
        let scores = ranker.evaluate(&s, &RankingContext::default());
        assert_eq!(scores.len(), 2);
        assert!((scores[0] - 3.0).abs() < 1e-10);
        assert!(scores[1].abs() < 1e-10);
        assert_eq!(ranker.criterion_names(), vec!["CREDIT", "RATING"]);
    }

    #[test]
    fn test_empty() {
        let ranker = Ranker::precise();
        let ctx = RankingContext::default();
        assert!(ranker.sort_indices(&[], &ctx).is_empty());
        assert!(ranker.select_best(&[], &ctx).is_none());
        assert!(ranker.rank(Vec::new(), &ctx, 10).is_empty());
    }
}
