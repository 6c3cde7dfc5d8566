//! Account management configuration.
//!
//! # Configuration
//!
//! - `OTP_EXPIRY_HOURS`: Lifetime of a one-time password issued by an account reset (default: 24)
//! - `OTP_LENGTH`: Number of characters in a one-time password (default: 10)
//! - `INVITATION_EXPIRY_HOURS`: Lifetime of an invitation code (default: 72)
//!
//! Values that are missing, fail to parse, or fall outside their range fall
//! back to the defaults. Lifetimes must be between 1 and
//! [`MAX_EXPIRY_HOURS`] hours.

use chrono::{DateTime, Duration, Utc};
use std::env;

/// Upper bound for configured lifetimes: one year.
pub const MAX_EXPIRY_HOURS: i64 = 24 * 365;

fn parse_hours(value: Option<String>) -> Option<i64> {
    value
        .and_then(|s| s.trim().parse().ok())
        .filter(|hours| (1..=MAX_EXPIRY_HOURS).contains(hours))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountConfig {
    /// Hours until a one-time password expires.
    pub otp_expiry_hours: i64,

    /// Characters in a generated one-time password.
    pub otp_length: usize,

    /// Hours until an invitation code expires.
    pub invitation_expiry_hours: i64,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            otp_expiry_hours: 24,
            otp_length: 10,
            invitation_expiry_hours: 72,
        }
    }
}

impl AccountConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            otp_expiry_hours: parse_hours(lookup("OTP_EXPIRY_HOURS"))
                .unwrap_or(defaults.otp_expiry_hours),
            otp_length: lookup("OTP_LENGTH")
                .and_then(|s| s.parse().ok())
                .filter(|len| *len > 0)
                .unwrap_or(defaults.otp_length),
            invitation_expiry_hours: parse_hours(lookup("INVITATION_EXPIRY_HOURS"))
                .unwrap_or(defaults.invitation_expiry_hours),
        }
    }

    /// `None` when the hour count does not fit a [`Duration`].
    #[must_use]
    pub fn otp_lifetime(&self) -> Option<Duration> {
        Duration::try_hours(self.otp_expiry_hours)
    }

    #[must_use]
    pub fn invitation_lifetime(&self) -> Option<Duration> {
        Duration::try_hours(self.invitation_expiry_hours)
    }

    /// When a one-time password issued at `now` expires, or `None` on overflow.
    pub fn otp_expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        now.checked_add_signed(self.otp_lifetime()?)
    }

    /// When an invitation issued at `now` expires, or `None` on overflow.
    pub fn invitation_expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        now.checked_add_signed(self.invitation_lifetime()?)
    }
}
