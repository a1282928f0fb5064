//! crates/logger/src/config.rs
//! Threshold configuration: the lookup contract and the sources it ships with.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use thiserror::Error;

use super::levels::{ACCEPTED_LABELS, Severity};

/// Configuration key holding the minimum severity for global subscribers.
pub const CONFIG_LEVEL_KEY: &str = "log_level";

/// Threshold used when the configuration does not name one.
pub const DEFAULT_LOG_LEVEL: Severity = Severity::Info;

/// Key/value lookup a [`Logger`](crate::Logger) reads its threshold from.
///
/// Implementations return `None` when the key is absent. A present value is
/// validated by the logger; sources never substitute defaults themselves.
pub trait ConfigSource {
    /// Looks up `key`.
    fn get(&self, key: &str) -> Option<String>;
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

impl<H: BuildHasher> ConfigSource for HashMap<String, String, H> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl ConfigSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> ConfigSource for [(K, V)] {
    fn get(&self, key: &str) -> Option<String> {
        self.iter()
            .find(|(candidate, _)| candidate.as_ref() == key)
            .map(|(_, value)| value.as_ref().to_owned())
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> ConfigSource for [(K, V); N] {
    fn get(&self, key: &str) -> Option<String> {
        ConfigSource::get(self.as_slice(), key)
    }
}

/// Source with no keys; every lookup is absent.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NoConfig;

impl ConfigSource for NoConfig {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Reads keys from process environment variables.
///
/// A key maps to its upper-cased name, optionally prefixed: `log_level`
/// becomes `LOG_LEVEL`, or `APP_LOG_LEVEL` with the prefix `APP`. Values that
/// are not valid UTF-8 are converted lossily and will then fail validation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EnvConfig {
    prefix: Option<String>,
}

impl EnvConfig {
    /// Source reading unprefixed variable names.
    #[must_use]
    pub const fn new() -> Self {
        Self { prefix: None }
    }

    /// Source reading variables named `<PREFIX>_<KEY>`.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Returns the environment variable name consulted for `key`.
    #[must_use]
    pub fn var_name(&self, key: &str) -> String {
        let key = key.to_ascii_uppercase();
        match &self.prefix {
            Some(prefix) => format!("{}_{key}", prefix.to_ascii_uppercase()),
            None => key,
        }
    }
}

impl ConfigSource for EnvConfig {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var_os(self.var_name(key)).map(|value| value.to_string_lossy().into_owned())
    }
}

/// Deserializable settings record, for callers that load configuration files.
///
/// ```
/// # #[cfg(feature = "serde")]
/// # {
/// use logger::{Logger, LoggerSettings, Severity};
///
/// let settings = LoggerSettings::with_log_level("warn");
/// let logger = Logger::from_config(&settings).unwrap();
/// assert_eq!(logger.current_log_level(), Severity::Warn);
/// # }
/// ```
#[cfg(feature = "serde")]
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LoggerSettings {
    /// Configured minimum severity label, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

#[cfg(feature = "serde")]
impl LoggerSettings {
    /// Settings naming `level` as the threshold.
    #[must_use]
    pub fn with_log_level(level: impl Into<String>) -> Self {
        Self {
            log_level: Some(level.into()),
        }
    }
}

#[cfg(feature = "serde")]
impl ConfigSource for LoggerSettings {
    fn get(&self, key: &str) -> Option<String> {
        if key == CONFIG_LEVEL_KEY {
            self.log_level.clone()
        } else {
            None
        }
    }
}

/// The configured threshold is not a recognised severity.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("config key \"{key}\" value \"{value}\" is invalid; expected one of: {accepted}", accepted = ACCEPTED_LABELS)]
pub struct ConfigError {
    key: String,
    value: String,
}

impl ConfigError {
    pub(crate) fn invalid_value(key: &str, value: String) -> Self {
        Self {
            key: key.to_owned(),
            value,
        }
    }

    /// Configuration key that held the bad value.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The rejected value, verbatim.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Reads [`CONFIG_LEVEL_KEY`] from `source`.
///
/// Returns `Ok(None)` when the key is absent so callers can tell a default
/// apart from a configured value.
pub(crate) fn configured_threshold<C: ConfigSource + ?Sized>(
    source: &C,
) -> Result<Option<Severity>, ConfigError> {
    source
        .get(CONFIG_LEVEL_KEY)
        .map(|value| {
            value
                .parse::<Severity>()
                .map_err(|_| ConfigError::invalid_value(CONFIG_LEVEL_KEY, value))
        })
        .transpose()
}

/// Resolves the threshold configured in `source`, defaulting to
/// [`DEFAULT_LOG_LEVEL`] when the key is absent.
pub fn resolve_threshold<C: ConfigSource + ?Sized>(source: &C) -> Result<Severity, ConfigError> {
    Ok(configured_threshold(source)?.unwrap_or(DEFAULT_LOG_LEVEL))
}
