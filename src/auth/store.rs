//! Auth store: the session's [`AuthState`], observable.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::auth::{AuthProvider, AuthState, User};
use crate::error::AuthError;
use crate::metrics::SessionMetrics;
use crate::observer::{Observable, Subscription};
use crate::retry::{with_retry_if, RetryConfig};

/// How long and how often to ask the provider before giving up.
#[derive(Debug, Clone)]
pub struct ResolvePolicy {
    /// Upper bound for the whole resolution, retries included.
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl ResolvePolicy {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            retry: RetryConfig::auth_resolution(),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }
}

impl Default for ResolvePolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

/// Holds the session's [`AuthState`]. Starts in [`AuthState::Loading`].
pub struct AuthStore {
    state: Observable<AuthState>,
    /// Bumped by every explicit sign-in or sign-out.
    epoch: AtomicU64,
    metrics: Arc<SessionMetrics>,
}

impl AuthStore {
    pub fn new(metrics: Arc<SessionMetrics>) -> Self {
        Self {
            state: Observable::new(AuthState::Loading),
            epoch: AtomicU64::new(0),
            metrics,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state().user().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state().is_loading()
    }

    /// Apply the provider's answer.
    pub fn resolve(&self, user: Option<User>) {
        match &user {
            Some(user) => info!(user_id = %user.id, "Session resolved"),
            None => info!("Session resolved: signed out"),
        }
        self.state.set(AuthState::from_user(user));
    }

    /// Treat a failed resolution as signed out.
    pub fn fail(&self, error: &AuthError) {
        self.metrics.record_auth_failure();
        warn!("Session resolution failed, treating as signed out: {}", error);
        self.state.set(AuthState::SignedOut);
    }

    pub fn sign_in(&self, user: User) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        info!(user_id = %user.id, "User signed in");
        self.state.set(AuthState::SignedIn(user));
    }

    /// End the session (logout or expiry).
    pub fn sign_out(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        if self.state.set(AuthState::SignedOut) {
            info!("User signed out");
        }
    }

    /// Ask `provider` for the session and apply the answer.
    ///
    /// Transient provider errors are retried within `policy.timeout`. A
    /// timeout or a final error leaves the store signed out, so the store
    /// never stays [`AuthState::Loading`] longer than the timeout.
    ///
    /// An answer that arrives after a sign-in or sign-out made while it was
    /// pending is discarded, and the state that sign-in or sign-out set is
    /// kept.
    pub async fn resolve_from<P>(&self, provider: &P, policy: &ResolvePolicy) -> AuthState
    where
        P: AuthProvider + ?Sized,
    {
        debug!(timeout = ?policy.timeout, "Resolving session");
        let epoch = self.epoch.load(Ordering::Acquire);

        let attempt = with_retry_if(
            &policy.retry,
            "auth resolution",
            || provider.current_user(),
            AuthError::is_transient,
        );

        let outcome = tokio::time::timeout(policy.timeout, attempt).await;

        if self.epoch.load(Ordering::Acquire) != epoch {
            self.metrics.record_stale_transition();
            debug!("Session changed while resolving, discarding provider answer");
            return self.state();
        }

        match outcome {
            Ok(Ok(user)) => self.resolve(user),
            Ok(Err(e)) => self.fail(&e),
            Err(_) => self.fail(&AuthError::Timeout(policy.timeout)),
        }

        self.state()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&AuthState) + Send + Sync + 'static,
    {
        self.state.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticAuthProvider;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn store() -> (AuthStore, Arc<SessionMetrics>) {
        let metrics = Arc::new(SessionMetrics::new());
        (AuthStore::new(Arc::clone(&metrics)), metrics)
    }

    /// Fails with a provider error for the first `failures` calls.
    struct FlakyProvider {
        failures: u32,
        calls: AtomicU32,
    }

    impl AuthProvider for FlakyProvider {
        fn current_user(&self) -> BoxFuture<'_, Result<Option<User>, AuthError>> {
            async move {
                let call = self.calls.fetch_add(1, Ordering::SeqCst);
                if call < self.failures {
                    Err(AuthError::Provider("connection reset".to_string()))
                } else {
                    Ok(Some(User::new("u1")))
                }
            }
            .boxed()
        }
    }

    struct HangingProvider;

    impl AuthProvider for HangingProvider {
        fn current_user(&self) -> BoxFuture<'_, Result<Option<User>, AuthError>> {
            futures::future::pending().boxed()
        }
    }

    // ==================== State Tests ====================

    #[test]
    fn test_starts_loading() {
        let (store, _) = store();
        assert!(store.is_loading());
        assert_eq!(store.current_user(), None);
    }

    #[test]
    fn test_resolve_and_sign_out() {
        let (store, _) = store();
        store.resolve(Some(User::new("u1")));
        assert_eq!(store.current_user().map(|u| u.id), Some("u1".to_string()));

        store.sign_out();
        assert_eq!(store.state(), AuthState::SignedOut);
    }

    #[test]
    fn test_fail_counts_and_signs_out() {
        let (store, metrics) = store();
        store.fail(&AuthError::Provider("boom".to_string()));
        assert_eq!(store.state(), AuthState::SignedOut);
        assert_eq!(metrics.auth_failures(), 1);
    }

    // ==================== resolve_from Tests ====================

    #[tokio::test]
    async fn test_resolve_from_signed_out_provider() {
        let (store, _) = store();
        let state = store
            .resolve_from(&StaticAuthProvider::new(), &ResolvePolicy::default())
            .await;
        assert_eq!(state, AuthState::SignedOut);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_from_retries_transient_errors() {
        let (store, metrics) = store();
        let provider = FlakyProvider {
            failures: 2,
            calls: AtomicU32::new(0),
        };

        let state = store.resolve_from(&provider, &ResolvePolicy::default()).await;

        assert_eq!(state.user().map(|u| u.id.as_str()), Some("u1"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
        assert_eq!(metrics.auth_failures(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_from_gives_up_after_retries() {
        let (store, metrics) = store();
        let provider = FlakyProvider {
            failures: u32::MAX,
            calls: AtomicU32::new(0),
        };

        let state = store.resolve_from(&provider, &ResolvePolicy::default()).await;

        assert_eq!(state, AuthState::SignedOut);
        assert_eq!(metrics.auth_failures(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_from_times_out() {
        let (store, metrics) = store();
        let policy = ResolvePolicy::new(Duration::from_secs(3));

        let started = tokio::time::Instant::now();
        let state = store.resolve_from(&HangingProvider, &policy).await;

        assert_eq!(state, AuthState::SignedOut);
        assert!(started.elapsed() >= Duration::from_secs(3));
        assert!(started.elapsed() < Duration::from_secs(4));
        assert_eq!(metrics.auth_failures(), 1);
    }

    #[tokio::test]
    async fn test_resolve_from_without_retry_fails_fast() {
        let (store, metrics) = store();
        let provider = FlakyProvider {
            failures: 1,
            calls: AtomicU32::new(0),
        };
        let policy = ResolvePolicy::default().with_retry(RetryConfig::no_retry());

        let state = store.resolve_from(&provider, &policy).await;

        assert_eq!(state, AuthState::SignedOut);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(metrics.auth_failures(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sign_out_during_resolution_wins() {
        let (store, metrics) = store();
        let provider = StaticAuthProvider::new()
            .with_session(User::new("u1"))
            .with_latency(Duration::from_secs(2));

        let policy = ResolvePolicy::default();
        let (state, _) = tokio::join!(store.resolve_from(&provider, &policy), async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            store.sign_out();
        });

        assert_eq!(state, AuthState::SignedOut);
        assert_eq!(store.state(), AuthState::SignedOut);
        assert_eq!(metrics.stale_transitions(), 1);
    }

    #[tokio::test]
    async fn test_resolve_from_notifies_subscribers() {
        let (store, _) = store();
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let _sub = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let provider = StaticAuthProvider::new().with_session(User::new("u1"));
        store.resolve_from(&provider, &ResolvePolicy::default()).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
