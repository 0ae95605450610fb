//! Application context: the stores a running front-end shares.
//!
//! Created once at start-up and handed to every component that needs it;
//! nothing here is a global.

use std::sync::Arc;

use tracing::info;

use crate::auth::{AuthProvider, AuthState, AuthStore, ResolvePolicy};
use crate::config::Config;
use crate::i18n::LanguageStore;
use crate::metrics::{MetricsReport, SessionMetrics};
use crate::router::Router;

pub struct AppContext {
    pub config: Config,
    pub metrics: Arc<SessionMetrics>,
    pub language: Arc<LanguageStore>,
    pub auth: Arc<AuthStore>,
    pub router: Arc<dyn Router>,
}

impl AppContext {
    pub fn new(config: Config, router: Arc<dyn Router>) -> Self {
        let metrics = Arc::new(SessionMetrics::new());
        let language = Arc::new(LanguageStore::new(config.default_language, Arc::clone(&metrics)));
        let auth = Arc::new(AuthStore::new(Arc::clone(&metrics)));

        info!(
            language = %config.default_language,
            login_path = %config.login_path,
            "Application context initialized"
        );

        Self {
            config,
            metrics,
            language,
            auth,
            router,
        }
    }

    pub fn resolve_policy(&self) -> ResolvePolicy {
        ResolvePolicy::new(self.config.auth_timeout)
    }

    /// Resolve the session against `provider` using the configured timeout.
    pub async fn resolve_session<P>(&self, provider: &P) -> AuthState
    where
        P: AuthProvider + ?Sized,
    {
        self.auth.resolve_from(provider, &self.resolve_policy()).await
    }

    /// Final metrics for the session.
    pub fn shutdown(&self) -> MetricsReport {
        let report = self.metrics.report();
        info!(
            redirects = report.redirects,
            language_toggles = report.language_toggles,
            auth_failures = report.auth_failures,
            "Application context shut down"
        );
        report
    }
}
