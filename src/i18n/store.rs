//! Language store: the active display language for a session.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::LanguageError;
use crate::i18n::{Language, LanguageStrings};
use crate::metrics::SessionMetrics;
use crate::observer::{Observable, Subscription};

/// Holds the current [`Language`] and notifies subscribers when it changes.
pub struct LanguageStore {
    current: Observable<Language>,
    metrics: Arc<SessionMetrics>,
}

impl LanguageStore {
    pub fn new(initial: Language, metrics: Arc<SessionMetrics>) -> Self {
        Self {
            current: Observable::new(initial),
            metrics,
        }
    }

    /// The active language.
    pub fn language(&self) -> Language {
        self.current.get()
    }

    /// Localized strings for the active language.
    pub fn strings(&self) -> &'static LanguageStrings {
        self.language().strings()
    }

    /// Switch to the language named by `code`.
    ///
    /// Unknown codes are rejected and the current language is kept.
    pub fn set_language(&self, code: &str) -> Result<Language, LanguageError> {
        match Language::from_code(code) {
            Ok(language) => {
                self.set(language);
                Ok(language)
            }
            Err(e) => {
                self.metrics.record_invalid_language();
                warn!(code, current = %self.language(), "Rejected language change: {}", e);
                Err(e)
            }
        }
    }

    /// Switch to `language`. Returns `true` when the value changed.
    pub fn set(&self, language: Language) -> bool {
        let changed = self.current.set(language);
        if changed {
            debug!(language = %language, "Language changed");
        }
        changed
    }

    /// Run `listener` with the new language on every change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Language) + Send + Sync + 'static,
    {
        self.current.subscribe(listener)
    }
}
