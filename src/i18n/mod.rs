//! Internationalization: display languages, localized strings and the
//! per-session language store.
//!
//! - `registry`: static metadata for each supported language
//! - `language`: the closed [`Language`] enum
//! - `strings`: localized UI strings per language
//! - `store`: the session's current language, observable
//! - `selector`: the toggle control bound to the store
//!
//! # Example
//!
//! ```rust,ignore
//! use clinic_portal::i18n::{Language, LanguageSelector, LanguageStore};
//!
//! let store = Arc::new(LanguageStore::new(Language::Es, metrics.clone()));
//! let selector = LanguageSelector::new(store.clone(), metrics);
//! selector.activate(); // es -> en
//! ```

mod language;
mod registry;
mod selector;
mod store;
mod strings;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use selector::{LanguageSelector, LanguageTransition};
pub use store::LanguageStore;
pub use strings::{fill, LanguageStrings, ENGLISH_STRINGS, SPANISH_STRINGS};
