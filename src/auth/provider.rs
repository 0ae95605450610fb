//! Auth provider seam and an in-memory implementation.

use std::sync::Mutex;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::{info, warn};

use crate::auth::User;
use crate::error::AuthError;
use crate::observer::lock;
use crate::security::constant_time_compare;

/// External source of truth for the current session.
pub trait AuthProvider: Send + Sync {
    /// Resolve the signed-in user, or `None` when there is no session.
    fn current_user(&self) -> BoxFuture<'_, Result<Option<User>, AuthError>>;
}

struct Account {
    user: User,
    email: String,
    password: String,
}

/// Provider backed by a fixed list of accounts held in memory.
pub struct StaticAuthProvider {
    accounts: Vec<Account>,
    session: Mutex<Option<User>>,
    latency: Duration,
}

impl StaticAuthProvider {
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
            session: Mutex::new(None),
            latency: Duration::ZERO,
        }
    }

    /// Register an account that can sign in with `email` and `password`.
    pub fn with_account(mut self, user: User, password: impl Into<String>) -> Self {
        let email = user.email.clone().unwrap_or_else(|| user.id.clone());
        self.accounts.push(Account {
            user,
            email,
            password: password.into(),
        });
        self
    }

    /// Start with an existing session, as if restored from a cookie.
    pub fn with_session(self, user: User) -> Self {
        *lock(&self.session) = Some(user);
        self
    }

    /// Delay every `current_user` answer by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Check credentials and open a session on success.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        // Every account is compared so the time taken does not depend on
        // which one matched.
        let mut matched = None;
        for account in &self.accounts {
            let email_ok = constant_time_compare(&account.email, email);
            let password_ok = constant_time_compare(&account.password, password);
            if email_ok && password_ok {
                matched = Some(account.user.clone());
            }
        }

        match matched {
            Some(user) => {
                info!(user_id = %user.id, "Signed in");
                *lock(&self.session) = Some(user.clone());
                Ok(user)
            }
            None => {
                warn!("Sign-in rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Close the current session, if any.
    pub fn end_session(&self) {
        lock(&self.session).take();
    }
}

impl Default for StaticAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider for StaticAuthProvider {
    fn current_user(&self) -> BoxFuture<'_, Result<Option<User>, AuthError>> {
        async move {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            Ok(lock(&self.session).clone())
        }
        .boxed()
    }
}
