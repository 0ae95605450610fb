//! Language selector control.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::i18n::{fill, Language, LanguageStore};
use crate::metrics::SessionMetrics;

/// Record of a single toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageTransition {
    pub from: Language,
    pub to: Language,
}

/// Two-state toggle bound to a [`LanguageStore`].
pub struct LanguageSelector {
    store: Arc<LanguageStore>,
    metrics: Arc<SessionMetrics>,
}

impl LanguageSelector {
    pub fn new(store: Arc<LanguageStore>, metrics: Arc<SessionMetrics>) -> Self {
        Self { store, metrics }
    }

    /// Switch the store to the other language.
    pub fn activate(&self) -> LanguageTransition {
        let from = self.store.language();
        let to = from.other();
        self.store.set(to);
        self.metrics.record_language_toggle();

        info!(from = %from, to = %to, "Language toggled");
        LanguageTransition { from, to }
    }

    /// The language activating the control would switch to.
    pub fn target(&self) -> Language {
        self.store.language().other()
    }

    /// Button caption, in the current language, naming the target.
    pub fn label(&self) -> String {
        fill(
            self.store.strings().switch_language,
            &[("language", self.target().native_name())],
        )
    }
}
