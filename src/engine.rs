//! Timetable generation engine.
//!
//! # Pipeline
//!
//! **Precise mode** ([`TimetableEngine::generate`]):
//! 1. Validate the request (fails fast on malformed blocked times or rating).
//! 2. Check catalog integrity and must-have clashes (logged, returned as warnings).
//! 3. Filter and order candidates.
//! 4. Backtracking search under the configured budget.
//! 5. Rank by the configured [`Ranker`] and keep the top `max_ranked_results`.
//!
//! **Recommendation mode** ([`TimetableEngine::recommend`]):
//! 1. Filter with no exclusions other than the rating floor.
//! 2. Two-phase search inside the credit window, scoring each schedule.
//!
//! Each call works on its own snapshot; the engine holds no mutable state.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogProvider, Term};
use crate::config::EngineConfig;
use crate::error::TimetableError;
use crate::filter::filter_candidates;
use crate::models::{GenerationRequest, RecommendationRequest, Schedule, ScoredSchedule};
use crate::ranking::{PreferenceScorer, Ranker, RankingContext};
use crate::search::{precise_search, recommend_search, Exhaustion, SearchBudget, SearchStats};
use crate::validation::{
    check_rating, must_have_conflicts, validate_catalog, validate_request, ValidationError,
};

/// Ranked result of a precise-mode request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Generation {
    /// Best schedules first.
    pub schedules: Vec<Schedule>,
    pub stats: SearchStats,
    /// Non-fatal issues: catalog integrity and must-have clashes.
    pub warnings: Vec<ValidationError>,
}

/// Scored result of a recommendation request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Recommendation {
    /// Highest score first.
    pub schedules: Vec<ScoredSchedule>,
    pub stats: SearchStats,
}

/// Timetable engine.
///
/// # Example
///
/// ```
/// use u_timetable::catalog::Catalog;
/// use u_timetable::engine::TimetableEngine;
/// use u_timetable::models::{Category, Course, GenerationRequest, Weekday};
///
/// let catalog = Catalog::new(vec![
///     Course::new("A").with_name("Algorithms").with_credit(3)
///         .with_category(Category::major("전공"))
///         .meets(Weekday::Mon, (9, 0), (10, 15)),
///     Course::new("W").with_name("Writing").with_credit(3)
///         .meets(Weekday::Wed, (13, 0), (14, 15)),
/// ]);
///
/// let engine = TimetableEngine::new();
/// let result = engine.generate(&catalog, &GenerationRequest::new(6)).unwrap();
/// assert_eq!(result.schedules.len(), 1);
/// assert_eq!(result.schedules[0].total_credit(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableEngine {
    config: EngineConfig,
    ranker: Ranker,
}

impl TimetableEngine {
    /// Creates an engine with default configuration and precise ranking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the precise-mode ranker.
    pub fn with_ranker(mut self, ranker: Ranker) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generates ranked schedules meeting the hard constraints of `request`.
    ///
    /// # Errors
    /// [`TimetableError::InvalidRequest`] when a blocked time does not parse
    /// or the rating threshold is out of range. An unsatisfiable request is
    /// not an error; it returns no schedules.
    pub fn generate(
        &self,
        catalog: &Catalog,
        request: &GenerationRequest,
    ) -> Result<Generation, TimetableError> {
        self.config.validate()?;
        let blocked = validate_request(request)?;

        info!(
            event = "generate_start",
            courses = catalog.len(),
            target_credit = request.target_credit,
            blocked = blocked.len(),
            day_offs = request.wanted_day_offs.len(),
        );

        let mut warnings = Vec::new();
        if let Err(errors) = validate_catalog(catalog.courses()) {
            warn!(event = "catalog_integrity", issues = errors.len());
            warnings.extend(errors);
        }
        for clash in must_have_conflicts(catalog.courses(), request, &blocked) {
            warn!(event = "must_have_conflict", message = %clash.message);
            warnings.push(clash);
        }

        let candidates = filter_candidates(catalog.courses(), request, &blocked);
        debug!(event = "candidates", count = candidates.len());

        let (raw, stats) = precise_search(
            &candidates,
            request,
            self.config.credit_tolerance,
            SearchBudget::from_config(&self.config),
        );
        log_exhaustion(&stats);

        let context = RankingContext::from_request(request);
        let schedules = self
            .ranker
            .rank(raw, &context, self.config.max_ranked_results);

        info!(
            event = "generate_end",
            schedules = schedules.len(),
            accepted = stats.accepted,
            nodes = stats.nodes_visited,
            warnings = warnings.len(),
        );

        Ok(Generation {
            schedules,
            stats,
            warnings,
        })
    }

    /// Generates scored schedules inside the credit window below the target.
    ///
    /// # Errors
    /// [`TimetableError::InvalidRequest`] when the rating threshold is out
    /// of range.
    pub fn recommend(
        &self,
        catalog: &Catalog,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, TimetableError> {
        self.config.validate()?;
        if let Some(e) = check_rating(request.min_rating) {
            return Err(TimetableError::InvalidRequest(vec![e]));
        }

        info!(
            event = "recommend_start",
            courses = catalog.len(),
            target_credit = request.target_credit,
            preferred_breaks = request.preferred_breaks,
        );

        let filter = GenerationRequest::default().with_min_rating(request.min_rating);
        let candidates = filter_candidates(catalog.courses(), &filter, &[]);
        let scorer = PreferenceScorer::new(request);

        let (schedules, stats) = recommend_search(
            &candidates,
            request.target_credit,
            self.config.recommendation_window,
            &scorer,
            SearchBudget::from_config(&self.config),
        );
        log_exhaustion(&stats);

        info!(
            event = "recommend_end",
            schedules = schedules.len(),
            nodes = stats.nodes_visited,
            best_score = schedules.first().map(|s| s.score),
        );

        Ok(Recommendation { schedules, stats })
    }

    /// Fetches the catalog for `term` from `provider`, then [`generate`](Self::generate)s.
    pub fn generate_from(
        &self,
        provider: &dyn CatalogProvider,
        term: &Term,
        request: &GenerationRequest,
    ) -> Result<Generation, TimetableError> {
        let catalog = provider.snapshot(term)?;
        debug!(event = "catalog_snapshot", term = %term, courses = catalog.len());
        self.generate(&catalog, request)
    }
}

fn log_exhaustion(stats: &SearchStats) {
    match stats.exhausted {
        Some(reason @ (Exhaustion::NodeBudget | Exhaustion::TimeLimit)) => warn!(
            event = "search_truncated",
            reason = ?reason,
            nodes = stats.nodes_visited,
            accepted = stats.accepted,
        ),
        Some(Exhaustion::ResultCap) => debug!(event = "result_cap", accepted = stats.accepted),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, StaticCatalog};
    use crate::models::{BlockedTime, Category, Course, TimePreference, Weekday};
    use crate::ranking::criteria;
    use crate::validation::ValidationErrorKind;

    fn major(id: &str, rating: f64) -> Course {
        Course::new(id)
            .with_name(format!("Major {id}"))
            .with_credit(3)
            .with_category(Category::major("전공"))
            .with_rating(rating)
    }

    fn general(id: &str, rating: f64) -> Course {
        Course::new(id)
            .with_name(format!("General {id}"))
            .with_credit(3)
            .with_category(Category::general("교양"))
            .with_rating(rating)
    }

    fn sorted_ids(s: &Schedule) -> Vec<&str> {
        let mut ids = s.course_ids();
        ids.sort();
        ids
    }

    fn abc() -> Catalog {
        Catalog::new(vec![
            major("A", 4.5).meets(Weekday::Mon, (9, 0), (10, 0)),
            major("B", 4.0).meets(Weekday::Mon, (9, 0), (10, 0)),
            general("C", 4.8).meets(Weekday::Wed, (13, 0), (14, 0)),
        ])
    }

    #[test]
    fn test_generate_ranks_best_first() {
        let req = GenerationRequest::new(6).with_min_major_credit(3);
        let result = TimetableEngine::new().generate(&abc(), &req).unwrap();

        assert_eq!(sorted_ids(&result.schedules[0]), vec!["A", "C"]);
        for s in &result.schedules {
            assert!(!(s.contains("A") && s.contains("B")));
            assert!(s.total_credit() >= 6);
        }
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_blocked_time_empties_result() {
        let req = GenerationRequest::new(6)
            .with_min_major_credit(3)
            .with_blocked_time(BlockedTime::new(Weekday::Mon, "09:00", "10:00"));
        let result = TimetableEngine::new().generate(&abc(), &req).unwrap();
        assert!(result.schedules.is_empty());
    }

    #[test]
    fn test_malformed_blocked_time_fails_fast() {
        let req = GenerationRequest::new(6)
            .with_blocked_time(BlockedTime::new(Weekday::Mon, "9h", "10:00"));
        let err = TimetableEngine::new().generate(&abc(), &req).unwrap_err();
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::InvalidTimeFormat
        );
    }

    #[test]
    fn test_must_have_clash_is_warning() {
        let req = GenerationRequest::new(6)
            .with_must_have_major("A")
            .with_day_off(Weekday::Mon);
        let result = TimetableEngine::new().generate(&abc(), &req).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, ValidationErrorKind::MustHaveConflict);
    }

    #[test]
    fn test_ranked_results_capped() {
        let catalog = Catalog::new(
            (0..6)
                .map(|i| general(&format!("G{i}"), 4.0).with_credit(1))
                .collect(),
        );
        let engine = TimetableEngine::new().with_config(
            EngineConfig::default()
                .with_credit_tolerance(0)
                .with_max_ranked_results(4),
        );
        let result = engine.generate(&catalog, &GenerationRequest::new(2)).unwrap();
        assert_eq!(result.schedules.len(), 4);
        assert_eq!(result.stats.accepted, 15);
    }

    #[test]
    fn test_custom_ranker() {
        let catalog = Catalog::new(vec![
            general("G1", 5.0).meets(Weekday::Mon, (9, 0), (10, 0)),
            general("G2", 5.0).meets(Weekday::Tue, (9, 0), (10, 0)),
            general("G3", 1.0).meets(Weekday::Mon, (11, 0), (12, 0)),
        ]);
        let engine = TimetableEngine::new().with_ranker(
            Ranker::new()
                .with_criterion(criteria::CompactWeek)
                .with_tie_breaker(criteria::MeanRating),
        );
        let result = engine.generate(&catalog, &GenerationRequest::new(6)).unwrap();
        assert_eq!(sorted_ids(&result.schedules[0]), vec!["G1", "G3"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let engine =
            TimetableEngine::new().with_config(EngineConfig::default().with_max_raw_results(0));
        let err = engine.generate(&abc(), &GenerationRequest::new(6)).unwrap_err();
        assert!(matches!(err, TimetableError::Config(_)));
    }

    #[test]
    fn test_recommend() {
        let req = RecommendationRequest::new(6)
            .with_preferred_breaks(3)
            .with_time_preference(TimePreference::Afternoon);
        let result = TimetableEngine::new().recommend(&abc(), &req).unwrap();

        assert!(!result.schedules.is_empty());
        assert!(result.schedules.windows(2).all(|w| w[0].score >= w[1].score));
        for s in &result.schedules {
            let credit = s.schedule.total_credit();
            assert!((3..=6).contains(&credit));
        }
        // Any single course lands in the window, so singletons are accepted.
        // C: 4 break days (-10), one afternoon class (+5)
        assert_eq!(sorted_ids(&result.schedules[0].schedule), vec!["C"]);
        assert_eq!(result.schedules[0].score, 95);
        assert_eq!(result.schedules.len(), 3);
    }

    #[test]
    fn test_recommend_rejects_bad_rating() {
        let req = RecommendationRequest::new(6).with_min_rating(9.0);
        let err = TimetableEngine::new().recommend(&abc(), &req).unwrap_err();
        assert_eq!(err.validation_errors()[0].kind, ValidationErrorKind::InvalidRating);
    }

    #[test]
    fn test_generate_from_provider() {
        let term = Term::new("KU", 2026, 1);
        let provider = StaticCatalog::new().with_term(term.clone(), abc());
        let engine = TimetableEngine::new();

        let result = engine
            .generate_from(&provider, &term, &GenerationRequest::new(6))
            .unwrap();
        assert!(!result.schedules.is_empty());

        let missing = engine.generate_from(&provider, &Term::new("KU", 2025, 2), &GenerationRequest::new(6));
        assert!(matches!(
            missing,
            Err(TimetableError::Catalog(CatalogError::UnknownTerm(_)))
        ));
    }
}
