//! Session metrics: counters for guard and language events.
//!
//! One instance is owned by each [`AppContext`](crate::AppContext) and shared
//! with the components that record into it.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for the session and localization state machine.
#[derive(Debug, Default)]
pub struct SessionMetrics {
    /// Redirects to the login route issued by the guard
    redirects: AtomicUsize,

    /// Transitions delivered to a guard after it was unmounted
    stale_transitions: AtomicUsize,

    /// Auth resolutions that failed or timed out
    auth_failures: AtomicUsize,

    /// Language toggles performed through the selector
    language_toggles: AtomicUsize,

    /// Language codes rejected by the store
    invalid_languages: AtomicUsize,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_redirect(&self) {
        self.redirects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_transition(&self) {
        self.stale_transitions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_auth_failure(&self) {
        self.auth_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_language_toggle(&self) {
        self.language_toggles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalid_language(&self) {
        self.invalid_languages.fetch_add(1, Ordering::Relaxed);
    }

    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::Relaxed)
    }

    pub fn stale_transitions(&self) -> usize {
        self.stale_transitions.load(Ordering::Relaxed)
    }

    pub fn auth_failures(&self) -> usize {
        self.auth_failures.load(Ordering::Relaxed)
    }

    pub fn language_toggles(&self) -> usize {
        self.language_toggles.load(Ordering::Relaxed)
    }

    pub fn invalid_languages(&self) -> usize {
        self.invalid_languages.load(Ordering::Relaxed)
    }

    /// Snapshot of all counters.
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            redirects: self.redirects(),
            stale_transitions: self.stale_transitions(),
            auth_failures: self.auth_failures(),
            language_toggles: self.language_toggles(),
            invalid_languages: self.invalid_languages(),
        }
    }
}

/// Point-in-time copy of [`SessionMetrics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsReport {
    pub redirects: usize,
    pub stale_transitions: usize,
    pub auth_failures: usize,
    pub language_toggles: usize,
    pub invalid_languages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_zero() {
        let report = SessionMetrics::new().report();
        assert_eq!(
            report,
            MetricsReport {
                redirects: 0,
                stale_transitions: 0,
                auth_failures: 0,
                language_toggles: 0,
                invalid_languages: 0,
            }
        );
    }

    #[test]
    fn test_counters_are_independent() {
        let metrics = SessionMetrics::new();
        metrics.record_redirect();
        metrics.record_redirect();
        metrics.record_stale_transition();
        metrics.record_auth_failure();
        metrics.record_language_toggle();
        metrics.record_invalid_language();
        metrics.record_invalid_language();
        metrics.record_invalid_language();

        assert_eq!(metrics.redirects(), 2);
        assert_eq!(metrics.stale_transitions(), 1);
        assert_eq!(metrics.auth_failures(), 1);
        assert_eq!(metrics.language_toggles(), 1);
        assert_eq!(metrics.invalid_languages(), 3);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = SessionMetrics::new();
        metrics.record_redirect();

        let json = serde_json::to_value(metrics.report()).expect("Should serialize");
        assert_eq!(json["redirects"], 1);
        assert_eq!(json["language_toggles"], 0);
    }
}
