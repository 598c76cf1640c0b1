// ABOUTME: Timestamped release identifiers and their validation.
// ABOUTME: A token is a fixed-width digit string, so string order is chronological order.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Number of digits in a `Short` token (`YYYYMMDDHHMMSS`).
const SHORT_LEN: usize = 14;
/// Number of digits in a `Long` token (`YYYYMMDDHHMMSS` + 12 sub-second digits).
const LONG_LEN: usize = 26;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReleaseTokenError {
    #[error("release token must be {expected} digits, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("invalid character in release token: '{0}'")]
    InvalidChar(char),
}

/// Timestamp precision used when naming release directories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseFormat {
    /// Second precision: `YYYYMMDDHHMMSS`.
    #[default]
    Short,
    /// Picosecond-width precision: `YYYYMMDDHHMMSS` followed by 12 digits.
    Long,
}

impl ReleaseFormat {
    /// Number of digits a token in this format carries.
    pub fn token_len(&self) -> usize {
        match self {
            ReleaseFormat::Short => SHORT_LEN,
            ReleaseFormat::Long => LONG_LEN,
        }
    }

    /// Whether `value` names a release under this format.
    pub fn is_token(&self, value: &str) -> bool {
        value.len() == self.token_len() && value.bytes().all(|b| b.is_ascii_digit())
    }

    /// Render the token for a release created at `at`.
    pub fn token_at(&self, at: DateTime<Utc>) -> ReleaseToken {
        let seconds = at.format("%Y%m%d%H%M%S").to_string();
        match self {
            ReleaseFormat::Short => ReleaseToken(seconds),
            // Nanoseconds padded to picosecond width.
            ReleaseFormat::Long => ReleaseToken(format!(
                "{}{:09}000",
                seconds,
                at.timestamp_subsec_nanos() % 1_000_000_000
            )),
        }
    }
}

impl fmt::Display for ReleaseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseFormat::Short => write!(f, "short"),
            ReleaseFormat::Long => write!(f, "long"),
        }
    }
}

/// Name of a release directory under `releases/`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseToken(String);

impl ReleaseToken {
    pub fn parse(format: ReleaseFormat, value: &str) -> Result<Self, ReleaseTokenError> {
        if let Some(c) = value.chars().find(|c| !c.is_ascii_digit()) {
            return Err(ReleaseTokenError::InvalidChar(c));
        }

        if value.len() != format.token_len() {
            return Err(ReleaseTokenError::WrongLength {
                expected: format.token_len(),
                actual: value.len(),
            });
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReleaseToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
