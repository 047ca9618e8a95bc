use serde::Serialize;

use crate::models::{ActiveTab, RequestStatus, ResultPassage};

/// Trust rating shown before the user clicks a star.
pub const DEFAULT_TRUST_RATING: f32 = 4.5;

/// Number of stars on the rating scale.
pub const MAX_STARS: u8 = 5;

/// Immutable view of a session at one point in time.
///
/// The presentation layer renders exclusively from this struct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Identity of the current query; bumped on every accepted submission.
    pub submission: u64,
    /// Last submitted query text, verbatim. `None` before the first submission.
    pub query: Option<String>,
    pub active_tab: ActiveTab,
    pub status: RequestStatus,
    /// Ranked passages of the last successful search.
    pub results: Vec<ResultPassage>,
    /// Failure message; only set while `status == Failed`.
    pub error: Option<String>,
    /// Trust rating in `[0, 5]`.
    pub rating: f32,
    pub helpful_count: u32,
    pub needs_work_count: u32,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            submission: 0,
            query: None,
            active_tab: ActiveTab::default(),
            status: RequestStatus::default(),
            results: Vec::new(),
            error: None,
            rating: DEFAULT_TRUST_RATING,
            helpful_count: 0,
            needs_work_count: 0,
        }
    }
}

impl SessionSnapshot {
    /// Checks the lifecycle invariants:
    /// - `Pending` and `Failed` hold no results
    /// - `error` is set iff `Failed`
    pub fn is_consistent(&self) -> bool {
        let results_ok = match self.status {
            RequestStatus::Pending | RequestStatus::Failed => self.results.is_empty(),
            RequestStatus::Idle | RequestStatus::Success => true,
        };
        let error_ok = self.error.is_some() == (self.status == RequestStatus::Failed);
        results_ok && error_ok && (0.0..=f32::from(MAX_STARS)).contains(&self.rating)
    }
}
