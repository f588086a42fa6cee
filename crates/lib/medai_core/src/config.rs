//! Widget configuration.

use std::path::PathBuf;

use crate::pacing::{
    DEFAULT_INDICATOR_DELAY_MS, DEFAULT_RESPONSE_DELAY_MAX_MS, DEFAULT_RESPONSE_DELAY_MIN_MS,
    Pacing,
};
use crate::responder::{DictionaryError, ResponseDictionary};
use crate::session::{DEFAULT_COUNTRY, Mode, SessionContext};

pub const ENV_COUNTRY: &str = "MEDAI_COUNTRY";
pub const ENV_MODE: &str = "MEDAI_MODE";
pub const ENV_INDICATOR_DELAY_MS: &str = "MEDAI_INDICATOR_DELAY_MS";
pub const ENV_RESPONSE_DELAY_MIN_MS: &str = "MEDAI_RESPONSE_DELAY_MIN_MS";
pub const ENV_RESPONSE_DELAY_MAX_MS: &str = "MEDAI_RESPONSE_DELAY_MAX_MS";
pub const ENV_DICTIONARY: &str = "MEDAI_DICTIONARY";

/// Startup configuration for a widget front-end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Country a fresh session starts with.
    pub default_country: String,
    /// Mode a fresh session starts with.
    pub default_mode: Mode,
    /// Cosmetic typing delays.
    pub pacing: Pacing,
    /// Optional YAML dictionary replacing the built-in replies.
    pub dictionary_path: Option<PathBuf>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            default_country: DEFAULT_COUNTRY.to_string(),
            default_mode: Mode::default(),
            pacing: Pacing::default(),
            dictionary_path: None,
        }
    }
}

impl WidgetConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                      | Default  |
    /// |-------------------------------|----------|
    /// | `MEDAI_COUNTRY`               | `Global` |
    /// | `MEDAI_MODE`                  | `simple` |
    /// | `MEDAI_INDICATOR_DELAY_MS`    | `300`    |
    /// | `MEDAI_RESPONSE_DELAY_MIN_MS` | `800`    |
    /// | `MEDAI_RESPONSE_DELAY_MAX_MS` | `1200`   |
    /// | `MEDAI_DICTIONARY`            | unset    |
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`WidgetConfig::from_env`] over an arbitrary lookup.
    ///
    /// Unparseable values are logged and replaced by their default.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let default_country = non_blank(ENV_COUNTRY)
            .map(|c| c.trim().to_string())
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

        let default_mode = match non_blank(ENV_MODE) {
            Some(raw) => raw.parse::<Mode>().unwrap_or_else(|e| {
                log::warn!("{ENV_MODE}: {e}; using simple");
                Mode::default()
            }),
            None => Mode::default(),
        };

        let millis = |key: &str, default: u64| match non_blank(key) {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                log::warn!("{key}: '{raw}' is not a number of milliseconds; using {default}");
                default
            }),
            None => default,
        };

        let pacing = Pacing::new(
            millis(ENV_INDICATOR_DELAY_MS, DEFAULT_INDICATOR_DELAY_MS),
            millis(ENV_RESPONSE_DELAY_MIN_MS, DEFAULT_RESPONSE_DELAY_MIN_MS),
            millis(ENV_RESPONSE_DELAY_MAX_MS, DEFAULT_RESPONSE_DELAY_MAX_MS),
        );

        Self {
            default_country,
            default_mode,
            pacing,
            dictionary_path: non_blank(ENV_DICTIONARY).map(PathBuf::from),
        }
    }

    /// A fresh session seeded with the configured defaults.
    pub fn new_session(&self) -> SessionContext {
        let mut session = SessionContext {
            mode: self.default_mode,
            ..Default::default()
        };
        session.set_country(&self.default_country);
        session
    }

    /// The configured dictionary, or the built-in one.
    pub fn load_dictionary(&self) -> Result<ResponseDictionary, DictionaryError> {
        match &self.dictionary_path {
            Some(path) => ResponseDictionary::load(path),
            None => Ok(ResponseDictionary::builtin()),
        }
    }
}
