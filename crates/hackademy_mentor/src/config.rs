//! Mentor endpoint configuration from environment variables.

use hackademy_core::constants::{DEFAULT_MENTOR_BASE_URL, DEFAULT_MENTOR_MODEL};
use std::env;
use std::time::Duration;

pub const API_KEY_VAR: &str = "HACKADEMY_API_KEY";
/// Fallback key variable shared with other tooling.
pub const LEGACY_API_KEY_VAR: &str = "API_KEY";
pub const MODEL_VAR: &str = "HACKADEMY_MENTOR_MODEL";
pub const BASE_URL_VAR: &str = "HACKADEMY_MENTOR_URL";
pub const TIMEOUT_VAR: &str = "HACKADEMY_MENTOR_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach the mentor model.
#[derive(Clone, PartialEq, Eq)]
pub struct MentorConfig {
    /// `None` when unset or blank; requests then fail without network access.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

// Keeps the key out of logs.
impl std::fmt::Debug for MentorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MentorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for MentorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MENTOR_MODEL.to_string(),
            base_url: DEFAULT_MENTOR_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl MentorConfig {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`MentorConfig`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let api_key =
            non_blank(lookup(API_KEY_VAR)).or_else(|| non_blank(lookup(LEGACY_API_KEY_VAR)));
        Self {
            api_key,
            model: non_blank(lookup(MODEL_VAR)).unwrap_or(defaults.model),
            base_url: non_blank(lookup(BASE_URL_VAR))
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout: lookup(TIMEOUT_VAR)
                .and_then(|secs| secs.trim().parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}
