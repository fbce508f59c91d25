//! Recommendation (soft-preference) search.
//!
//! # Algorithm
//!
//! Two-phase depth-first search over a major pool and a general pool, both
//! in candidate order. A schedule is accepted as soon as its credit total
//! `c` satisfies `target - window <= c <= target`; accepted branches are
//! not extended. Courses that would push `c` past `target` are skipped.
//!
//! Every major-phase node, once its own major loop is done, hands its
//! selection to the general phase (cursor reset to 0). Each combination of
//! a major subset and a general subset is therefore reached exactly once.
//!
//! Accepted schedules are scored with a [`PreferenceScorer`] and returned
//! sorted by score, highest first; equal scores keep discovery order.

use tracing::debug;

use super::{SearchBudget, SearchStats, Selection};
use crate::filter::Candidate;
use crate::models::{Course, ScoredSchedule};
use crate::ranking::PreferenceScorer;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Major,
    General,
}

struct RecommendState<'a, 's> {
    majors: Vec<&'a Course>,
    generals: Vec<&'a Course>,
    target: u32,
    floor: u32,
    scorer: &'s PreferenceScorer,
    selection: Selection<'a>,
    budget: SearchBudget,
    results: Vec<ScoredSchedule>,
}

impl<'a, 's> RecommendState<'a, 's> {
    fn in_window(&self) -> bool {
        let credit = self.selection.credit();
        !self.selection.is_empty() && credit >= self.floor && credit <= self.target
    }

    fn descend(&mut self, phase: Phase, start: usize) {
        if !self.budget.visit() {
            return;
        }

        if self.in_window() {
            let schedule = self.selection.to_schedule();
            let score = self.scorer.score(&schedule);
            self.results.push(ScoredSchedule { schedule, score });
            self.budget.accept();
            return;
        }

        let pool_len = match phase {
            Phase::Major => self.majors.len(),
            Phase::General => self.generals.len(),
        };
        for i in start..pool_len {
            if self.budget.is_exhausted() {
                return;
            }
            let course = match phase {
                Phase::Major => self.majors[i],
                Phase::General => self.generals[i],
            };
            if self
                .selection
                .credit_with(course)
                .map_or(true, |credit| credit > self.target)
                || !self.selection.admits(course)
            {
                continue;
            }

            self.selection.push(course);
            self.descend(phase, i + 1);
            self.selection.pop();
        }

        if phase == Phase::Major && !self.budget.is_exhausted() {
            self.descend(Phase::General, 0);
        }
    }
}

/// Enumerates schedules inside the credit window `[target - window, target]`
/// and scores them.
///
/// Candidates are split into major and general pools, keeping their order.
pub fn recommend_search(
    candidates: &[Candidate<'_>],
    target: u32,
    window: u32,
    scorer: &PreferenceScorer,
    budget: SearchBudget,
) -> (Vec<ScoredSchedule>, SearchStats) {
    let (majors, generals): (Vec<&Course>, Vec<&Course>) = candidates
        .iter()
        .map(|c| c.course)
        .partition(|c| c.is_major());

    let mut state = RecommendState {
        majors,
        generals,
        target,
        floor: target.saturating_sub(window),
        scorer,
        selection: Selection::new(),
        budget,
        results: Vec::new(),
    };

    state.descend(Phase::Major, 0);

    let mut results = state.results;
    results.sort_by(|a, b| b.score.cmp(&a.score));

    let stats = state.budget.into_stats();
    debug!(
        event = "recommend_search_end",
        candidates = candidates.len(),
        nodes = stats.nodes_visited,
        accepted = stats.accepted,
        exhausted = ?stats.exhausted,
    );
    (results, stats)
}
