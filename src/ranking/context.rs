//! Request-derived state passed to ranking criteria.

use std::collections::HashSet;

use crate::models::{GenerationRequest, Weekday};

/// What the requester asked for, as seen by ranking criteria.
#[derive(Debug, Clone, Default)]
pub struct RankingContext {
    /// Days the requester wants free, in weekday order.
    pub wanted_day_offs: Vec<Weekday>,
    /// Must-have course IDs of either kind.
    pub must_have_ids: HashSet<String>,
    /// Keywords whose presence in course details is preferred.
    pub preferred_keywords: Vec<String>,
}

impl RankingContext {
    /// Builds the context for a generation request.
    pub fn from_request(request: &GenerationRequest) -> Self {
        Self {
            wanted_day_offs: request.day_offs(),
            must_have_ids: request
                .must_have_major_ids
                .iter()
                .chain(&request.must_have_general_ids)
                .cloned()
                .collect(),
            preferred_keywords: request.preferred_keywords.clone(),
        }
    }

    /// Adds a wanted day off.
    pub fn with_day_off(mut self, day: Weekday) -> Self {
        if !self.wanted_day_offs.contains(&day) {
            self.wanted_day_offs.push(day);
        }
        self
    }

    /// Adds a must-have course ID.
    pub fn with_must_have(mut self, id: impl Into<String>) -> Self {
        self.must_have_ids.insert(id.into());
        self
    }

    /// Adds a preferred keyword.
    pub fn with_preferred_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.preferred_keywords.push(keyword.into());
        self
    }
}
