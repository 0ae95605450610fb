//! Language type: the closed set of display languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LanguageError;
use crate::i18n::strings::{ENGLISH_STRINGS, SPANISH_STRINGS};
use crate::i18n::{LanguageConfig, LanguageRegistry, LanguageStrings};

/// A display language.
///
/// There is no "unset" or third value: every store, config and page holds
/// exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Es,
    En,
}

impl Language {
    /// Parse a language code.
    ///
    /// # Returns
    /// * `Ok(Language)` for `"es"` or `"en"`
    /// * `Err(LanguageError::InvalidLanguage)` for anything else
    pub fn from_code(code: &str) -> Result<Language, LanguageError> {
        LanguageRegistry::get()
            .get_by_code(code)
            .map(|config| config.language)
            .ok_or_else(|| LanguageError::InvalidLanguage(code.to_string()))
    }

    /// The ISO 639-1 code (`"es"` or `"en"`).
    pub fn code(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }

    /// The other member of the pair. Applying it twice is the identity.
    pub fn other(&self) -> Language {
        match self {
            Language::Es => Language::En,
            Language::En => Language::Es,
        }
    }

    /// Registry metadata for this language.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get().get_by_language(*self)
    }

    /// English name (e.g., "Spanish").
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name (e.g., "Español").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Localized UI strings for this language.
    pub fn strings(&self) -> &'static LanguageStrings {
        match self {
            Language::Es => &SPANISH_STRINGS,
            Language::En => &ENGLISH_STRINGS,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        LanguageRegistry::get().default_language()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s)
    }
}
