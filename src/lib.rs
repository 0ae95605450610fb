//! Session guard, language store and page shells for a clinic management
//! front-end.
//!
//! The crate decides, on every navigation, whether the user may see a page
//! and in which language it renders:
//!
//! - [`auth::AuthStore`] holds the session (`Loading`, `SignedIn`, `SignedOut`)
//! - [`guard::RouteGuard`] redirects signed-out users to the login route
//! - [`i18n::LanguageStore`] and [`i18n::LanguageSelector`] hold and toggle
//!   the display language
//! - [`shell::AppShell`] composes them over an [`AppContext`] and renders pages

pub mod auth;
pub mod cancel;
pub mod config;
pub mod context;
pub mod error;
pub mod guard;
pub mod i18n;
pub mod metrics;
pub mod models;
pub mod observer;
pub mod retry;
pub mod router;
pub mod security;
pub mod shell;

pub use context::AppContext;
