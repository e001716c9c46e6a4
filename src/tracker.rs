//! In-flight request registry with per-request cancellation.
//!
//! Every dispatched request registers a [`CancellationToken`] under an
//! opaque id before hitting the network and is unregistered when the call
//! settles. Cancelling one id never affects other requests; `cancel_all`
//! exists for logout, where stale responses must not land after the
//! credentials are gone.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Registry of pending requests keyed by opaque request id.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    inner: Arc<Mutex<HashMap<String, CancellationToken>>>,
}

impl RequestTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned guard still wraps a valid map; recover it so the cancel
    // paths stay panic-free.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CancellationToken>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a request id and return its cancellation token.
    ///
    /// Re-using an id cancels the request previously tracked under it.
    pub fn track(&self, id: &str) -> CancellationToken {
        let token = CancellationToken::new();
        let mut map = self.lock();
        if let Some(previous) = map.insert(id.to_string(), token.clone()) {
            previous.cancel();
        }
        token
    }

    /// Remove a request id without cancelling it.
    pub fn untrack(&self, id: &str) {
        self.lock().remove(id);
    }

    /// Cancel and remove a single tracked request.
    ///
    /// Returns `true` if the id was tracked.
    pub fn cancel(&self, id: &str) -> bool {
        match self.lock().remove(id) {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel and remove every tracked request.
    pub fn cancel_all(&self) {
        for (_, token) in self.lock().drain() {
            token.cancel();
        }
    }

    /// Number of requests currently in flight.
    pub fn pending_count(&self) -> usize {
        self.lock().len()
    }

    /// Whether a request id is currently tracked.
    pub fn is_tracked(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }
}

/// Removes a request id from the tracker when dropped.
///
/// Tying cleanup to `Drop` guarantees the registry entry is removed on
/// every exit path: success, server error, timeout, and abort.
pub(crate) struct UntrackGuard {
    tracker: RequestTracker,
    id: String,
}

impl UntrackGuard {
    pub(crate) fn new(tracker: &RequestTracker, id: &str) -> Self {
        Self {
            tracker: tracker.clone(),
            id: id.to_string(),
        }
    }
}

impl Drop for UntrackGuard {
    fn drop(&mut self) {
        self.tracker.untrack(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_untrack() {
        let tracker = RequestTracker::new();
        let token = tracker.track("req_1");
        assert!(tracker.is_tracked("req_1"));
        assert_eq!(tracker.pending_count(), 1);

        tracker.untrack("req_1");
        assert!(!tracker.is_tracked("req_1"));
        assert_eq!(tracker.pending_count(), 0);
        // Untrack does not cancel.
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_single() {
        let tracker = RequestTracker::new();
        let t1 = tracker.track("req_1");
        let t2 = tracker.track("req_2");

        assert!(tracker.cancel("req_1"));
        assert!(t1.is_cancelled());
        assert!(!t2.is_cancelled());
        assert_eq!(tracker.pending_count(), 1);

        // Cancelling an unknown id reports false.
        assert!(!tracker.cancel("req_1"));
        assert!(!tracker.cancel("nope"));
    }

    #[test]
    fn test_cancel_all() {
        let tracker = RequestTracker::new();
        let tokens: Vec<_> = (0..5).map(|i| tracker.track(&format!("req_{}", i))).collect();

        tracker.cancel_all();
        assert_eq!(tracker.pending_count(), 0);
        assert!(tokens.iter().all(|t| t.is_cancelled()));
    }

    #[test]
    fn test_track_same_id_cancels_previous() {
        let tracker = RequestTracker::new();
        let first = tracker.track("req_1");
        let second = tracker.track("req_1");

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert_eq!(tracker.pending_count(), 1);
    }

    #[test]
    fn test_guard_untracks_on_drop() {
        let tracker = RequestTracker::new();
        tracker.track("req_1");
        {
            let _guard = UntrackGuard::new(&tracker, "req_1");
            assert!(tracker.is_tracked("req_1"));
        }
        assert!(!tracker.is_tracked("req_1"));
    }
}
