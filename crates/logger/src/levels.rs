//! crates/logger/src/levels.rs
//! Severity levels and their fixed priority order.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Comma-separated list of every accepted severity label, in priority order.
pub(crate) const ACCEPTED_LABELS: &str = "trace, debug, info, warn, critical";

/// Severity attached to every logged message.
///
/// Variants are declared in priority order, so the derived [`Ord`] agrees
/// with [`Severity::priority`]: `Trace < Debug < Info < Warn < Critical`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Fine-grained tracing output.
    Trace,
    /// Debugging output.
    Debug,
    /// Routine informational output.
    #[default]
    Info,
    /// Something unexpected that does not stop the program.
    Warn,
    /// A failure that needs immediate attention.
    Critical,
}

impl Severity {
    /// Number of distinct severities.
    pub const COUNT: usize = 5;

    /// Every severity, from least to most urgent.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Critical,
    ];

    /// Returns the numeric priority, `0` for trace up to `4` for critical.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Trace => 0,
            Self::Debug => 1,
            Self::Info => 2,
            Self::Warn => 3,
            Self::Critical => 4,
        }
    }

    /// Returns the lowercase label used in configuration and display output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Critical => "critical",
        }
    }

    /// Returns `true` when this severity is at or above `threshold`.
    #[must_use]
    pub const fn meets(self, threshold: Self) -> bool {
        self.priority() >= threshold.priority()
    }

    pub(crate) fn index(self) -> usize {
        usize::from(self.priority())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Error returned when parsing a [`Severity`] from an unrecognised string.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unrecognised severity \"{value}\"; expected one of: {accepted}", accepted = ACCEPTED_LABELS)]
pub struct ParseSeverityError {
    value: String,
}

impl ParseSeverityError {
    /// Returns the text that failed to parse.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    /// Parses one of the exact lowercase labels. Matching is case-sensitive and
    /// surrounding whitespace is not trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.label() == s)
            .ok_or_else(|| ParseSeverityError {
                value: s.to_owned(),
            })
    }
}
