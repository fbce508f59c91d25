//! Precise (hard-constraint) search.
//!
//! # Algorithm
//!
//! Depth-first over the candidate pool with cursor `start`. At each node
//! with accumulated credit `c`:
//! 1. If `c >= target` and the success predicate holds, record the
//!    schedule and stop extending this branch.
//! 2. Otherwise try each candidate `i >= start`, skipping any that would
//!    push `c` past `target + tolerance`, clash in time, or duplicate a
//!    chosen name or course code.
//!
//! The success predicate requires, among chosen courses:
//! - must-have majors `>= min_must_have_major_count`
//! - must-have generals `>= min_must_have_general_count`
//! - major credit `>= min_major_credit`
//! - every must-have candidate, if `require_every_must_have`
//!
//! # Complexity
//! Exponential in the pool size in the worst case; bounded in practice by
//! the [`SearchBudget`].

use tracing::debug;

use super::{SearchBudget, SearchStats, Selection};
use crate::filter::Candidate;
use crate::models::{GenerationRequest, Schedule};

struct PreciseState<'a, 'r> {
    candidates: &'r [Candidate<'a>],
    request: &'r GenerationRequest,
    ceiling: u32,
    must_have_total: usize,
    selection: Selection<'a>,
    must_major: usize,
    must_general: usize,
    budget: SearchBudget,
    results: Vec<Schedule>,
}

impl<'a, 'r> PreciseState<'a, 'r> {
    fn is_satisfied(&self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        if self.must_major < self.request.min_must_have_major_count
            || self.must_general < self.request.min_must_have_general_count
            || self.selection.major_credit() < self.request.min_major_credit
        {
            return false;
        }
        !self.request.require_every_must_have
            || self.must_major + self.must_general == self.must_have_total
    }

    fn descend(&mut self, start: usize) {
        if !self.budget.visit() {
            return;
        }

        if self.selection.credit() >= self.request.target_credit && self.is_satisfied() {
            self.results.push(self.selection.to_schedule());
            self.budget.accept();
            return;
        }

        for i in start..self.candidates.len() {
            if self.budget.is_exhausted() {
                return;
            }

            let candidate = self.candidates[i];
            let course = candidate.course;
            if self
                .selection
                .credit_with(course)
                .map_or(true, |credit| credit > self.ceiling)
            {
                continue;
            }
            if !self.selection.admits(course) {
                continue;
            }

            self.enter(candidate);
            self.descend(i + 1);
            self.leave(candidate);
        }
    }

    fn enter(&mut self, candidate: Candidate<'a>) {
        self.selection.push(candidate.course);
        self.must_major += usize::from(candidate.is_must_have_major);
        self.must_general += usize::from(candidate.is_must_have_general);
    }

    fn leave(&mut self, candidate: Candidate<'a>) {
        self.selection.pop();
        self.must_major -= usize::from(candidate.is_must_have_major);
        self.must_general -= usize::from(candidate.is_must_have_general);
    }
}

/// Enumerates schedules meeting the hard constraints of `request`.
///
/// Returns the accepted schedules in discovery order (unranked) together
/// with the search counters. Unsatisfiable requests produce an empty list.
pub fn precise_search(
    candidates: &[Candidate<'_>],
    request: &GenerationRequest,
    credit_tolerance: u32,
    budget: SearchBudget,
) -> (Vec<Schedule>, SearchStats) {
    let mut state = PreciseState {
        candidates,
        request,
        ceiling: request.target_credit.saturating_add(credit_tolerance),
        must_have_total: candidates.iter().filter(|c| c.is_must_have()).count(),
        selection: Selection::new(),
        must_major: 0,
        must_general: 0,
        budget,
        results: Vec::new(),
    };

    state.descend(0);

    let stats = state.budget.into_stats();
    debug!(
        event = "precise_search_end",
        candidates = candidates.len(),
        nodes = stats.nodes_visited,
        accepted = stats.accepted,
        exhausted = ?stats.exhausted,
    );
    (state.results, stats)
}
