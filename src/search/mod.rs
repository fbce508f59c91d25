//! Backtracking combination search.
//!
//! Enumerates subsets of the candidate pool that are pairwise
//! conflict-free and free of duplicate courses. Candidates are visited in
//! pool order with an advancing cursor, so each subset is produced at most
//! once (combinations, not permutations).
//!
//! # Modes
//!
//! - **Precise** ([`precise_search`]): hard constraints. Accepts once the
//!   credit total reaches the target (overshoot up to a tolerance) and the
//!   must-have counts and major-credit minimum hold.
//! - **Recommendation** ([`recommend_search`]): soft preferences. Accepts
//!   any schedule inside a credit window below the target and scores it.
//!
//! # Termination
//! The search is a bounded heuristic, not an optimizer. It stops at the
//! first of: result cap, node budget, wall-clock deadline. Which one fired
//! is reported in [`SearchStats::exhausted`].

mod precise;
mod recommend;

pub use precise::precise_search;
pub use recommend::recommend_search;

use std::collections::HashSet;
use std::time::Instant;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::conflict;
use crate::models::{Course, Schedule};

/// Why a search stopped before exhausting the space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Exhaustion {
    /// `max_raw_results` schedules were accepted.
    ResultCap,
    /// `max_nodes` search nodes were visited.
    NodeBudget,
    /// `time_limit_ms` elapsed.
    TimeLimit,
}

/// Search counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Recursive steps taken.
    pub nodes_visited: u64,
    /// Schedules accepted.
    pub accepted: usize,
    /// Set when a limit cut the search short.
    pub exhausted: Option<Exhaustion>,
}

/// Result cap, node budget and deadline for one search.
#[derive(Debug, Clone)]
pub struct SearchBudget {
    max_results: usize,
    max_nodes: Option<u64>,
    deadline: Option<Instant>,
    stats: SearchStats,
}

impl SearchBudget {
    /// How often (in nodes) the deadline is checked.
    const CLOCK_STRIDE: u64 = 256;

    /// Creates a budget starting now.
    pub fn new(max_results: usize, max_nodes: Option<u64>, deadline: Option<Instant>) -> Self {
        Self {
            max_results,
            max_nodes,
            deadline,
            stats: SearchStats::default(),
        }
    }

    /// Budget from configuration; the deadline counts from now.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            config.max_raw_results,
            config.max_nodes,
            config.time_limit().map(|d| Instant::now() + d),
        )
    }

    /// Unlimited except for the result cap.
    pub fn results_only(max_results: usize) -> Self {
        Self::new(max_results, None, None)
    }

    /// Whether the search has to stop.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.stats.exhausted.is_some()
    }

    /// Counts one node. Returns `false` once any limit is hit.
    pub fn visit(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        if self.max_nodes.is_some_and(|max| self.stats.nodes_visited >= max) {
            self.stats.exhausted = Some(Exhaustion::NodeBudget);
            return false;
        }
        if let Some(deadline) = self.deadline {
            if self.stats.nodes_visited % Self::CLOCK_STRIDE == 0 && Instant::now() >= deadline {
                self.stats.exhausted = Some(Exhaustion::TimeLimit);
                return false;
            }
        }
        self.stats.nodes_visited += 1;
        true
    }

    /// Counts one accepted schedule; trips the result cap when reached.
    pub fn accept(&mut self) {
        self.stats.accepted += 1;
        if self.stats.accepted >= self.max_results && !self.is_exhausted() {
            self.stats.exhausted = Some(Exhaustion::ResultCap);
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn into_stats(self) -> SearchStats {
        self.stats
    }
}

/// The courses chosen on the current search branch.
///
/// Push/pop mirror the recursion; the name and code sets make the
/// duplicate guards O(1).
#[derive(Debug, Default)]
pub(crate) struct Selection<'a> {
    courses: Vec<&'a Course>,
    names: HashSet<&'a str>,
    codes: HashSet<&'a str>,
    credit: u32,
    major_credit: u32,
}

impl<'a> Selection<'a> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether `course` can join without a time clash or a duplicate
    /// name or course code. Blank names are not compared.
    pub(crate) fn admits(&self, course: &Course) -> bool {
        (course.name.is_empty() || !self.names.contains(course.name.as_str()))
            && !self.codes.contains(course.base_code())
            && !conflict::conflicts_with_any(course, self.courses.iter().copied())
    }

    pub(crate) fn push(&mut self, course: &'a Course) {
        self.names.insert(course.name.as_str());
        self.codes.insert(course.base_code());
        self.credit += course.credit;
        if course.is_major() {
            self.major_credit += course.credit;
        }
        self.courses.push(course);
    }

    pub(crate) fn pop(&mut self) {
        if let Some(course) = self.courses.pop() {
            self.names.remove(course.name.as_str());
            self.codes.remove(course.base_code());
            self.credit -= course.credit;
            if course.is_major() {
                self.major_credit -= course.credit;
            }
        }
    }

    #[inline]
    pub(crate) fn credit(&self) -> u32 {
        self.credit
    }

    /// Credit total if `course` joined; `None` past `u32::MAX`.
    #[inline]
    pub(crate) fn credit_with(&self, course: &Course) -> Option<u32> {
        self.credit.checked_add(course.credit)
    }

    #[inline]
    pub(crate) fn major_credit(&self) -> u32 {
        self.major_credit
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Copies the current branch into an owned schedule.
    pub(crate) fn to_schedule(&self) -> Schedule {
        Schedule::from_courses(self.courses.iter().map(|&c| c.clone()).collect())
    }
}
