//! Session state store: the sole mutable owner of one panel's state.
//!
//! The store is a [`tokio::sync::watch`] channel holding the current
//! [`SessionSnapshot`]. Every operation mutates the snapshot in place under the
//! channel's lock and notifies subscribers only when something changed, so a
//! reader never observes a half-applied transition.
//!
//! Lifecycle guards:
//! - [`SessionStateStore::submit_query`] refuses blank text and refuses to start
//!   while a request is `Pending` (single-flight).
//! - [`SessionStateStore::resolve_success`] / [`SessionStateStore::resolve_failure`]
//!   apply only while `Pending`; anything else is a stale response and is dropped.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error_handler::{RatingError, SubmitRejection};
use crate::models::{ActiveTab, MAX_STARS, RequestStatus, ResultPassage, SessionSnapshot};

/// Receiver yielding a fresh snapshot on every applied change.
pub type SessionWatcher = watch::Receiver<SessionSnapshot>;

/// Whether a backend outcome was applied to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The session was `Pending` and is now `Success` or `Failed`.
    Applied,
    /// The session was not `Pending`; the outcome was discarded.
    Stale,
}

/// Observable state container for one query session.
pub struct SessionStateStore {
    state: watch::Sender<SessionSnapshot>,
}

impl Default for SessionStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStateStore {
    /// Creates a store in the `Idle` state with the default trust rating.
    pub fn new() -> Self {
        let (state, _rx) = watch::channel(SessionSnapshot::default());
        Self { state }
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Current request status without cloning the snapshot.
    pub fn status(&self) -> RequestStatus {
        self.state.borrow().status
    }

    /// Subscribes to state changes.
    ///
    /// The receiver starts at the current snapshot; call `changed().await` to
    /// wait for the next applied transition.
    pub fn subscribe(&self) -> SessionWatcher {
        self.state.subscribe()
    }

    /// Starts a new query.
    ///
    /// On success the session is `Pending` with cleared results, error and
    /// feedback counters, and the new submission id is returned. All of this
    /// is visible before the caller dispatches the backend request.
    ///
    /// # Errors
    /// - [`SubmitRejection::BlankQuery`] for empty/whitespace-only text
    /// - [`SubmitRejection::RequestInFlight`] while a request is `Pending`
    pub fn submit_query(&self, text: &str) -> Result<u64, SubmitRejection> {
        if text.trim().is_empty() {
            debug!("submit ignored: blank query");
            return Err(SubmitRejection::BlankQuery);
        }

        let mut outcome = Err(SubmitRejection::RequestInFlight);
        self.state.send_if_modified(|s| {
            if s.status.is_pending() {
                return false;
            }
            s.submission += 1;
            s.query = Some(text.to_string());
            s.status = RequestStatus::Pending;
            s.results.clear();
            s.error = None;
            // Feedback belongs to one answer; a new question starts from zero.
            s.helpful_count = 0;
            s.needs_work_count = 0;
            outcome = Ok(s.submission);
            true
        });

        match outcome {
            Ok(submission) => info!(submission, query = %text, "query submitted"),
            Err(_) => warn!(query = %text, "submit ignored: a search is already in progress"),
        }
        outcome
    }

    /// Completes the pending request with the backend's passages, verbatim.
    ///
    /// An empty list is a valid "no matches" outcome.
    pub fn resolve_success(&self, results: Vec<ResultPassage>) -> Resolution {
        let hits = results.len();
        let applied = self.state.send_if_modified(move |s| {
            if !s.status.is_pending() {
                return false;
            }
            s.status = RequestStatus::Success;
            s.results = results;
            s.error = None;
            true
        });

        if applied {
            info!(hits, "search resolved");
            Resolution::Applied
        } else {
            warn!(hits, "dropping stale search result: session is not pending");
            Resolution::Stale
        }
    }

    /// Fails the pending request with a human-readable message.
    ///
    /// Results stay cleared; nothing from an earlier search is restored.
    pub fn resolve_failure(&self, message: impl Into<String>) -> Resolution {
        let message = message.into();
        let applied = self.state.send_if_modified(|s| {
            if !s.status.is_pending() {
                return false;
            }
            s.status = RequestStatus::Failed;
            s.results.clear();
            s.error = Some(message.clone());
            true
        });

        if applied {
            info!(error = %message, "search failed");
            Resolution::Applied
        } else {
            warn!(error = %message, "dropping stale search failure: session is not pending");
            Resolution::Stale
        }
    }

    /// Sets the trust rating to a whole number of stars (last write wins).
    ///
    /// # Errors
    /// [`RatingError::OutOfRange`] for values outside `1..=5`; state is untouched.
    pub fn adjust_rating(&self, stars: u8) -> Result<(), RatingError> {
        if !(1..=MAX_STARS).contains(&stars) {
            return Err(RatingError::OutOfRange(stars));
        }
        let rating = f32::from(stars);
        self.state.send_if_modified(|s| {
            if s.rating == rating {
                return false;
            }
            s.rating = rating;
            true
        });
        debug!(stars, "trust rating adjusted");
        Ok(())
    }

    /// Records one "helpful" click. Returns the new count.
    pub fn mark_helpful(&self) -> u32 {
        let mut count = 0;
        self.state.send_modify(|s| {
            s.helpful_count = s.helpful_count.saturating_add(1);
            count = s.helpful_count;
        });
        debug!(count, "marked helpful");
        count
    }

    /// Records one "needs work" click. Returns the new count.
    pub fn mark_needs_work(&self) -> u32 {
        let mut count = 0;
        self.state.send_modify(|s| {
            s.needs_work_count = s.needs_work_count.saturating_add(1);
            count = s.needs_work_count;
        });
        debug!(count, "marked needs work");
        count
    }

    /// Switches the display tab. Touches nothing else.
    pub fn set_active_tab(&self, tab: ActiveTab) {
        self.state.send_if_modified(|s| {
            if s.active_tab == tab {
                return false;
            }
            s.active_tab = tab;
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passages(n: usize) -> Vec<ResultPassage> {
        (0..n)
            .map(|i| ResultPassage::new(format!("src-{i}"), format!("text-{i}")))
            .collect()
    }

    #[test]
    fn starts_idle_with_default_rating() {
        let store = SessionStateStore::new();
        let s = store.snapshot();
        assert_eq!(s.status, RequestStatus::Idle);
        assert_eq!(s.rating, 4.5);
        assert!(s.query.is_none());
        assert!(s.is_consistent());
    }

    #[test]
    fn submit_enters_pending_and_clears_everything() {
        let store = SessionStateStore::new();
        store.submit_query("first").unwrap();
        store.resolve_success(passages(3));
        store.mark_helpful();
        store.mark_needs_work();

        let id = store.submit_query("second").unwrap();
        let s = store.snapshot();
        assert_eq!(id, 2);
        assert_eq!(s.status, RequestStatus::Pending);
        assert_eq!(s.query.as_deref(), Some("second"));
        assert!(s.results.is_empty());
        assert!(s.error.is_none());
        assert_eq!((s.helpful_count, s.needs_work_count), (0, 0));
        assert!(s.is_consistent());
    }

    #[test]
    fn blank_submissions_are_rejected_without_change() {
        let store = SessionStateStore::new();
        store.submit_query("q").unwrap();
        store.resolve_success(passages(2));
        let before = store.snapshot();

        assert_eq!(store.submit_query(""), Err(SubmitRejection::BlankQuery));
        assert_eq!(store.submit_query("   "), Err(SubmitRejection::BlankQuery));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn submit_while_pending_is_rejected() {
        let store = SessionStateStore::new();
        store.submit_query("original").unwrap();
        assert_eq!(
            store.submit_query("intruder"),
            Err(SubmitRejection::RequestInFlight)
        );
        let s = store.snapshot();
        assert_eq!(s.query.as_deref(), Some("original"));
        assert_eq!(s.submission, 1);
        assert_eq!(s.status, RequestStatus::Pending);
    }

    #[test]
    fn empty_success_is_a_valid_terminal_state() {
        let store = SessionStateStore::new();
        store.submit_query("nothing matches").unwrap();
        assert_eq!(store.resolve_success(Vec::new()), Resolution::Applied);
        let s = store.snapshot();
        assert_eq!(s.status, RequestStatus::Success);
        assert!(s.results.is_empty());
        assert!(s.error.is_none());
    }

    #[test]
    fn success_keeps_backend_order() {
        let store = SessionStateStore::new();
        store.submit_query("q").unwrap();
        store.resolve_success(passages(3));
        let sources: Vec<_> = store
            .snapshot()
            .results
            .into_iter()
            .map(|p| p.source)
            .collect();
        assert_eq!(sources, ["src-0", "src-1", "src-2"]);
    }

    #[test]
    fn failure_records_message_and_no_results() {
        let store = SessionStateStore::new();
        store.submit_query("q").unwrap();
        assert_eq!(store.resolve_failure("HTTP 500"), Resolution::Applied);
        let s = store.snapshot();
        assert_eq!(s.status, RequestStatus::Failed);
        assert_eq!(s.error.as_deref(), Some("HTTP 500"));
        assert!(s.results.is_empty());
        assert!(s.is_consistent());
    }

    #[test]
    fn resolutions_outside_pending_are_dropped() {
        let store = SessionStateStore::new();
        assert_eq!(store.resolve_success(passages(1)), Resolution::Stale);
        assert_eq!(store.resolve_failure("late"), Resolution::Stale);
        assert_eq!(store.status(), RequestStatus::Idle);

        store.submit_query("q").unwrap();
        store.resolve_success(passages(2));
        assert_eq!(store.resolve_failure("late"), Resolution::Stale);
        let s = store.snapshot();
        assert_eq!(s.status, RequestStatus::Success);
        assert_eq!(s.results.len(), 2);
    }

    #[test]
    fn failed_session_accepts_a_new_submission() {
        let store = SessionStateStore::new();
        store.submit_query("q").unwrap();
        store.resolve_failure("offline");
        assert!(store.submit_query("q again").is_ok());
        assert!(store.snapshot().error.is_none());
    }

    #[test]
    fn rating_is_last_write_wins() {
        let store = SessionStateStore::new();
        store.adjust_rating(3).unwrap();
        store.adjust_rating(5).unwrap();
        assert_eq!(store.snapshot().rating, 5.0);
    }

    #[test]
    fn rating_outside_scale_is_rejected() {
        let store = SessionStateStore::new();
        assert_eq!(store.adjust_rating(0), Err(RatingError::OutOfRange(0)));
        assert_eq!(store.adjust_rating(6), Err(RatingError::OutOfRange(6)));
        assert_eq!(store.snapshot().rating, 4.5);
    }

    #[test]
    fn rating_survives_new_submissions() {
        let store = SessionStateStore::new();
        store.adjust_rating(2).unwrap();
        store.submit_query("q").unwrap();
        assert_eq!(store.snapshot().rating, 2.0);
    }

    #[test]
    fn feedback_counters_are_independent_and_reset_on_submit() {
        let store = SessionStateStore::new();
        store.mark_helpful();
        assert_eq!(store.mark_helpful(), 2);
        assert_eq!(store.mark_needs_work(), 1);
        let s = store.snapshot();
        assert_eq!((s.helpful_count, s.needs_work_count), (2, 1));

        store.submit_query("next question").unwrap();
        let s = store.snapshot();
        assert_eq!((s.helpful_count, s.needs_work_count), (0, 0));
    }

    #[test]
    fn feedback_and_tabs_work_while_pending() {
        let store = SessionStateStore::new();
        store.submit_query("q").unwrap();
        store.mark_helpful();
        store.set_active_tab(ActiveTab::History);
        store.adjust_rating(1).unwrap();
        let s = store.snapshot();
        assert_eq!(s.status, RequestStatus::Pending);
        assert_eq!(s.active_tab, ActiveTab::History);
        assert_eq!(s.helpful_count, 1);
    }

    #[test]
    fn tab_switch_leaves_results_alone() {
        let store = SessionStateStore::new();
        store.submit_query("q").unwrap();
        store.resolve_success(passages(2));
        store.set_active_tab(ActiveTab::History);
        store.set_active_tab(ActiveTab::Qa);
        let s = store.snapshot();
        assert_eq!(s.results.len(), 2);
        assert_eq!(s.status, RequestStatus::Success);
    }

    #[test]
    fn subscribers_see_pending_immediately() {
        let store = SessionStateStore::new();
        let mut rx = store.subscribe();
        rx.mark_unchanged();

        store.submit_query("q").unwrap();
        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.status, RequestStatus::Pending);
        assert!(seen.results.is_empty());
    }

    #[test]
    fn rejected_operations_do_not_notify() {
        let store = SessionStateStore::new();
        let mut rx = store.subscribe();
        rx.mark_unchanged();

        let _ = store.submit_query("  ");
        store.resolve_success(passages(1));
        store.set_active_tab(ActiveTab::Qa);
        assert!(!rx.has_changed().unwrap());
    }
}
