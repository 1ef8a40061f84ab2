//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_CHAR_WIDTH, DEFAULT_DISMISS_DELAY_MS, DEFAULT_GUTTER_WIDTH, DEFAULT_LINE_HEIGHT,
    DEFAULT_PADDING_LEFT, DEFAULT_PADDING_TOP,
};
use crate::error::CoreError;
use crate::layout::EditorMetrics;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const LINE_HEIGHT_VAR: &str = "HACKADEMY_LINE_HEIGHT";
pub const PADDING_TOP_VAR: &str = "HACKADEMY_PADDING_TOP";
pub const PADDING_LEFT_VAR: &str = "HACKADEMY_PADDING_LEFT";
pub const GUTTER_WIDTH_VAR: &str = "HACKADEMY_GUTTER_WIDTH";
pub const CHAR_WIDTH_VAR: &str = "HACKADEMY_CHAR_WIDTH";
pub const DISMISS_DELAY_VAR: &str = "HACKADEMY_DISMISS_DELAY_MS";
pub const TRACE_SESSION_VAR: &str = "HACKADEMY_TRACE_SESSION";

/// Runtime configuration for the editor engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub metrics: EditorMetrics,
    /// Grace period between focus loss and popup dismissal.
    pub dismiss_delay: Duration,
    /// Log every handled editor event at info level.
    pub trace_session: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metrics: EditorMetrics::default(),
            dismiss_delay: Duration::from_millis(DEFAULT_DISMISS_DELAY_MS),
            trace_session: false,
        }
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

trait ConfigValue: Sized {
    fn parse_value(raw: &str) -> Option<Self>;
}

impl ConfigValue for f32 {
    fn parse_value(raw: &str) -> Option<Self> {
        f32::from_str(raw.trim())
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
    }
}

impl ConfigValue for u64 {
    fn parse_value(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl ConfigValue for bool {
    fn parse_value(raw: &str) -> Option<Self> {
        parse_env_flag(raw)
    }
}

/// Reads one variable. Missing values yield `Ok(None)`.
fn read<T, F>(lookup: &mut F, key: &str) -> Result<Option<T>, CoreError>
where
    T: ConfigValue,
    F: FnMut(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => T::parse_value(&raw)
            .map(Some)
            .ok_or_else(|| CoreError::InvalidConfig {
                key: key.to_string(),
                value: raw,
            }),
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing
    /// or invalid.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, falling back to the
    /// default for each value that is missing or fails to parse.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut lenient = |key: &str, default: f32| -> f32 {
            read(&mut lookup, key).unwrap_or_else(|err| {
                warn!("{}; using default {}", err, default);
                None
            })
            .unwrap_or(default)
        };
        let metrics = EditorMetrics {
            line_height: lenient(LINE_HEIGHT_VAR, DEFAULT_LINE_HEIGHT),
            padding_top: lenient(PADDING_TOP_VAR, DEFAULT_PADDING_TOP),
            padding_left: lenient(PADDING_LEFT_VAR, DEFAULT_PADDING_LEFT),
            gutter_width: lenient(GUTTER_WIDTH_VAR, DEFAULT_GUTTER_WIDTH),
            char_width: lenient(CHAR_WIDTH_VAR, DEFAULT_CHAR_WIDTH),
        };
        let dismiss_delay = match read::<u64, _>(&mut lookup, DISMISS_DELAY_VAR) {
            Ok(Some(ms)) => Duration::from_millis(ms),
            Ok(None) => defaults.dismiss_delay,
            Err(err) => {
                warn!("{}; using default {}ms", err, DEFAULT_DISMISS_DELAY_MS);
                defaults.dismiss_delay
            }
        };
        let trace_session = match read::<bool, _>(&mut lookup, TRACE_SESSION_VAR) {
            Ok(flag) => flag.unwrap_or(false),
            Err(err) => {
                warn!("{}; tracing disabled", err);
                false
            }
        };
        Self {
            metrics,
            dismiss_delay,
            trace_session,
        }
    }

    /// Strict variant of [`Config::from_lookup`].
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidConfig`] for the first value that is set
    /// but does not parse. Pixel metrics must be finite and non-negative.
    pub fn try_from_lookup<F>(mut lookup: F) -> Result<Self, CoreError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut metric = |key: &str, default: f32| -> Result<f32, CoreError> {
            Ok(read(&mut lookup, key)?.unwrap_or(default))
        };
        let metrics = EditorMetrics {
            line_height: metric(LINE_HEIGHT_VAR, DEFAULT_LINE_HEIGHT)?,
            padding_top: metric(PADDING_TOP_VAR, DEFAULT_PADDING_TOP)?,
            padding_left: metric(PADDING_LEFT_VAR, DEFAULT_PADDING_LEFT)?,
            gutter_width: metric(GUTTER_WIDTH_VAR, DEFAULT_GUTTER_WIDTH)?,
            char_width: metric(CHAR_WIDTH_VAR, DEFAULT_CHAR_WIDTH)?,
        };
        let dismiss_delay = read::<u64, _>(&mut lookup, DISMISS_DELAY_VAR)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.dismiss_delay);
        let trace_session = read::<bool, _>(&mut lookup, TRACE_SESSION_VAR)?.unwrap_or(false);
        Ok(Self {
            metrics,
            dismiss_delay,
            trace_session,
        })
    }
}
