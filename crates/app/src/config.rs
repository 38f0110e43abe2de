//! Runtime settings read from `QUEST_*` environment variables.

use thiserror::Error;

pub const PAUSE_VAR: &str = "QUEST_PAUSE";
pub const SHUFFLE_QUIZ_VAR: &str = "QUEST_SHUFFLE_QUIZ";
pub const LOG_VAR: &str = "QUEST_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} must be a boolean (1/0, true/false, yes/no, on/off), got `{raw}`")]
    InvalidBool { var: &'static str, raw: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Wait for Enter between demonstrations.
    pub pause: bool,
    /// Ask quiz questions in random order.
    pub shuffle_quiz: bool,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pause: true,
            shuffle_quiz: false,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl AppConfig {
    /// Read the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a boolean variable holds an unrecognised value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `QUEST_LOG` falls back to `RUST_LOG`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a boolean variable holds an unrecognised value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let pause = read_bool(&lookup, PAUSE_VAR)?.unwrap_or(defaults.pause);
        let shuffle_quiz = read_bool(&lookup, SHUFFLE_QUIZ_VAR)?.unwrap_or(defaults.shuffle_quiz);
        let log_filter = [LOG_VAR, "RUST_LOG"]
            .into_iter()
            .filter_map(&lookup)
            .find(|value| !value.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Ok(Self {
            pause,
            shuffle_quiz,
            log_filter,
        })
    }
}

fn read_bool(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<bool>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidBool { var, raw }),
    }
}
