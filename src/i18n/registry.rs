//! Language registry: static metadata for every display language.
//!
//! The registry is an immutable table built once on first access. It holds
//! no user state; the active selection lives in [`LanguageStore`].
//!
//! [`LanguageStore`]: crate::i18n::LanguageStore

use std::sync::OnceLock;

use crate::i18n::Language;

/// Metadata for a supported display language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// The language this entry describes
    pub language: Language,

    /// ISO 639-1 code (e.g., "es", "en")
    pub code: &'static str,

    /// English name of the language (e.g., "Spanish")
    pub name: &'static str,

    /// Native name of the language (e.g., "Español")
    pub native_name: &'static str,

    /// Whether this is the language a fresh session starts in
    pub is_default: bool,
}

/// Table of supported display languages.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the registry, building it on first call.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Look up a language by its code.
    ///
    /// Matching is exact: `"ES"` and `" es"` are not valid codes.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Look up the entry for a language.
    pub fn get_by_language(&self, language: Language) -> &LanguageConfig {
        self.languages
            .iter()
            .find(|lang| lang.language == language)
            .unwrap_or(&self.languages[0])
    }

    /// All supported languages, in display order.
    pub fn list(&self) -> &[LanguageConfig] {
        &self.languages
    }

    /// The language new sessions start in.
    pub fn default_language(&self) -> Language {
        self.languages
            .iter()
            .find(|lang| lang.is_default)
            .map(|lang| lang.language)
            .unwrap_or(Language::Es)
    }

    /// Comma-separated list of accepted codes, for error messages.
    pub fn supported_codes(&self) -> String {
        self.languages
            .iter()
            .map(|lang| lang.code)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            language: Language::Es,
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_default: true,
        },
        LanguageConfig {
            language: Language::En,
            code: "en",
            name: "English",
            native_name: "English",
            is_default: false,
        },
    ]
}
