use anyhow::{Context, Result};
use std::time::Duration;

use crate::i18n::Language;

#[derive(Debug, Clone)]
pub struct Config {
    // Routing
    pub login_path: String,
    pub home_path: String,

    // Localization
    pub default_language: Language,

    // Session
    pub auth_timeout: Duration,

    // Demo account for the in-memory auth provider
    pub demo_user_id: Option<String>,
    pub demo_user_email: Option<String>,
    pub demo_user_password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            home_path: "/dashboard".to_string(),
            default_language: Language::default(),
            auth_timeout: Duration::from_secs(10),
            demo_user_id: None,
            demo_user_email: None,
            demo_user_password: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            // Routing
            login_path: std::env::var("LOGIN_PATH").unwrap_or(defaults.login_path),
            home_path: std::env::var("HOME_PATH").unwrap_or(defaults.home_path),

            // Localization
            default_language: match std::env::var("DEFAULT_LANGUAGE") {
                Ok(code) => Language::from_code(code.trim()).context("DEFAULT_LANGUAGE is invalid")?,
                Err(_) => defaults.default_language,
            },

            // Session
            auth_timeout: std::env::var("AUTH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.auth_timeout),

            // Demo account
            demo_user_id: std::env::var("DEMO_USER_ID").ok(),
            demo_user_email: std::env::var("DEMO_USER_EMAIL").ok(),
            demo_user_password: std::env::var("DEMO_USER_PASSWORD").ok(),
        })
    }
}
