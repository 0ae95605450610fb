//! Route guard: keeps signed-out users on the login route.
//!
//! [`RouteGuard`] is the state machine on its own, driven by explicit
//! `on_auth_change` / `on_route_change` calls and returning a
//! [`GuardDecision`]. [`RouteGuard::mount`] wires it to an [`AuthStore`] and
//! a [`Router`], carrying out redirects until the returned [`MountedGuard`]
//! is unmounted.
//!
//! ```text
//!   Loading ──user──▶ Authenticated
//!      │                  │   ▲
//!    none/error      sign-out │ sign-in
//!      ▼                  ▼   │
//!   Unauthenticated ◀─────────┘
//! ```

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, info};

use crate::auth::{AuthState, AuthStore};
use crate::cancel::CancellationToken;
use crate::metrics::SessionMetrics;
use crate::observer::{lock, Subscription};
use crate::router::Router;

/// Where the guard stands on the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardState {
    Loading,
    Authenticated,
    Unauthenticated,
}

/// What the guard wants done about the current route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session unknown yet; do nothing.
    Defer,
    /// The route may be shown.
    Allow,
    /// Navigate to the given path.
    Redirect(String),
    /// A redirect is already on its way; do nothing.
    Hold,
}

/// Result of delivering an auth change to a mounted guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied(GuardDecision),
    /// Delivered after the guard was unmounted; nothing was done.
    Stale,
}

/// Decision table for a single evaluation.
pub fn decide(state: GuardState, path: &str, login_path: &str, redirect_pending: bool) -> GuardDecision {
    match state {
        GuardState::Loading => GuardDecision::Defer,
        GuardState::Authenticated => GuardDecision::Allow,
        GuardState::Unauthenticated if path == login_path => GuardDecision::Allow,
        GuardState::Unauthenticated if redirect_pending => GuardDecision::Hold,
        GuardState::Unauthenticated => GuardDecision::Redirect(login_path.to_string()),
    }
}

/// The guard state machine.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    state: GuardState,
    login_path: String,
    redirect_pending: bool,
}

impl RouteGuard {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            state: GuardState::Loading,
            login_path: login_path.into(),
            redirect_pending: false,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Whether a redirect was issued and the router has not reached it yet.
    pub fn redirect_pending(&self) -> bool {
        self.redirect_pending
    }

    /// Feed a new auth state observed while the router is at `path`.
    pub fn on_auth_change(&mut self, auth: &AuthState, path: &str) -> GuardDecision {
        let next = match auth {
            // Nothing reverts to loading once the session is known.
            AuthState::Loading => self.state,
            AuthState::SignedIn(_) => GuardState::Authenticated,
            AuthState::SignedOut => GuardState::Unauthenticated,
        };

        if next != self.state {
            info!(from = ?self.state, to = ?next, path, "Guard transition");
            self.state = next;
        }
        if next != GuardState::Unauthenticated {
            self.redirect_pending = false;
        }

        self.evaluate(path)
    }

    /// Feed a route change to `path`.
    pub fn on_route_change(&mut self, path: &str) -> GuardDecision {
        if path == self.login_path {
            self.redirect_pending = false;
        }
        self.evaluate(path)
    }

    fn evaluate(&mut self, path: &str) -> GuardDecision {
        let decision = decide(self.state, path, &self.login_path, self.redirect_pending);
        match &decision {
            GuardDecision::Redirect(_) => self.redirect_pending = true,
            GuardDecision::Defer => debug!(path, "Session loading, redirect deferred"),
            GuardDecision::Hold => debug!(path, "Redirect already pending"),
            GuardDecision::Allow => {}
        }
        decision
    }

    /// Attach the guard to `auth` and `router`.
    ///
    /// The current auth state is evaluated immediately, then again on every
    /// auth change and every route change, until the returned handle is
    /// unmounted or dropped.
    pub fn mount(
        self,
        auth: &AuthStore,
        router: Arc<dyn Router>,
        metrics: Arc<SessionMetrics>,
    ) -> MountedGuard {
        let wiring = Arc::new(GuardWiring {
            guard: Mutex::new(self),
            router,
            metrics,
            token: CancellationToken::new(),
        });

        wiring.deliver_auth(&auth.state());

        let auth_wiring = Arc::clone(&wiring);
        let auth_sub = auth.subscribe(move |state| {
            auth_wiring.deliver_auth(state);
        });

        let route_wiring = Arc::clone(&wiring);
        let route_sub = wiring.router.on_route_change(Box::new(move |path| {
            route_wiring.deliver_route(path);
        }));

        MountedGuard {
            wiring,
            subscriptions: vec![auth_sub, route_sub],
        }
    }
}

struct GuardWiring {
    guard: Mutex<RouteGuard>,
    router: Arc<dyn Router>,
    metrics: Arc<SessionMetrics>,
    token: CancellationToken,
}

impl GuardWiring {
    fn deliver_auth(&self, auth: &AuthState) -> TransitionOutcome {
        if self.token.is_cancelled() {
            return self.stale("auth");
        }
        let path = self.router.current_path();
        let decision = lock(&self.guard).on_auth_change(auth, &path);
        self.apply(&path, decision)
    }

    fn deliver_route(&self, path: &str) -> TransitionOutcome {
        if self.token.is_cancelled() {
            return self.stale("route");
        }
        let decision = lock(&self.guard).on_route_change(path);
        self.apply(path, decision)
    }

    fn stale(&self, source: &str) -> TransitionOutcome {
        self.metrics.record_stale_transition();
        debug!(source, "Ignoring transition delivered after unmount");
        TransitionOutcome::Stale
    }

    fn apply(&self, path: &str, decision: GuardDecision) -> TransitionOutcome {
        if let GuardDecision::Redirect(target) = &decision {
            self.metrics.record_redirect();
            info!(from = path, to = %target, "Redirecting unauthenticated user");
            self.router.navigate(target);
        }
        TransitionOutcome::Applied(decision)
    }
}

/// A guard attached to live stores. Dropping it unmounts.
pub struct MountedGuard {
    wiring: Arc<GuardWiring>,
    subscriptions: Vec<Subscription>,
}

impl MountedGuard {
    pub fn state(&self) -> GuardState {
        lock(&self.wiring.guard).state()
    }

    pub fn redirect_pending(&self) -> bool {
        lock(&self.wiring.guard).redirect_pending()
    }

    pub fn is_mounted(&self) -> bool {
        !self.wiring.token.is_cancelled()
    }

    /// Stop reacting to auth and route changes.
    pub fn unmount(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if !self.wiring.token.is_cancelled() {
            debug!("Route guard unmounted");
        }
        self.wiring.token.cancel();
        self.subscriptions.clear();
    }
}

impl Drop for MountedGuard {
    fn drop(&mut self) {
        self.detach();
    }
}
