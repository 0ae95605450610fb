//! Error types for the session and localization core.
//!
//! None of these reach the user as a crash: the guard maps auth failures to a
//! signed-out session, and the language store keeps its previous value.

use std::time::Duration;

use thiserror::Error;

use crate::i18n::LanguageRegistry;

/// Rejected language selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    #[error(
        "invalid language '{0}': expected one of {}",
        LanguageRegistry::get().supported_codes()
    )]
    InvalidLanguage(String),
}

/// Failure reported by, or while waiting on, the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The collaborator failed to resolve the session.
    #[error("auth provider failed: {0}")]
    Provider(String),

    /// The collaborator did not resolve within the configured bound.
    #[error("auth resolution timed out after {0:?}")]
    Timeout(Duration),

    /// Sign-in attempt with unknown email or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,
}

impl AuthError {
    /// Whether another attempt could succeed.
    ///
    /// Timeouts are final because they already consumed the whole budget.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::Provider(_))
    }
}
