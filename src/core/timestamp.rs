//! Timestamp formatting utilities
//!
//! Provides the configurable formats used for the `_t` field and for time
//! values passed among keyvals, plus the injectable clock.

use super::keys::{DEFAULT_TIME_FORMAT, DEFAULT_TIME_VAL_FORMAT};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::sync::Arc;

/// Source of "now" for a logger.
pub type Clock = Arc<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

/// Clock backed by the system time in the local timezone.
pub fn system_clock() -> Clock {
    Arc::new(|| Local::now().fixed_offset())
}

/// Clock which always returns `at`. Handy for deterministic tests.
pub fn fixed_clock(at: DateTime<FixedOffset>) -> Clock {
    Arc::new(move || at)
}

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use structlog::TimestampFormat;
/// use chrono::{FixedOffset, TimeZone};
///
/// let at = FixedOffset::east_opt(3600).unwrap()
///     .with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
/// assert_eq!(TimestampFormat::Stamp.format(&at), "Jan  2 03:04:05");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `Jan  2 15:04:05`
    Stamp,

    /// `Jan  2 15:04:05.000000`, the default for `_t`
    StampMicro,

    /// RFC 3339 with nanoseconds, the default for time values
    Rfc3339Nano,

    /// ISO 8601 in UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    ///
    /// ```
    /// use structlog::TimestampFormat;
    ///
    /// let format = TimestampFormat::Custom("%H:%M:%S%.3f %Z ".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Format a timestamp according to this format
    ///
    /// A `Custom` format chrono can't parse falls back to `Rfc3339Nano`.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<FixedOffset>) -> String {
        match self {
            TimestampFormat::Stamp => datetime.format("%b %e %H:%M:%S").to_string(),
            TimestampFormat::StampMicro => datetime.format(DEFAULT_TIME_FORMAT).to_string(),
            TimestampFormat::Rfc3339Nano => datetime.format(DEFAULT_TIME_VAL_FORMAT).to_string(),
            TimestampFormat::Iso8601 => datetime
                .with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                match write!(out, "{}", datetime.format(format_str)) {
                    Ok(()) => out,
                    Err(_) => TimestampFormat::Rfc3339Nano.format(datetime),
                }
            }
        }
    }

    /// Whether every strftime specifier of a `Custom` format is known.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            TimestampFormat::Custom(format_str) => {
                !StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error))
            }
            _ => true,
        }
    }

    /// Format the timestamp after converting it to UTC
    #[must_use]
    pub fn format_utc(&self, datetime: &DateTime<FixedOffset>) -> String {
        self.format(&datetime.with_timezone(&Utc).fixed_offset())
    }
}

impl From<&str> for TimestampFormat {
    fn from(format_str: &str) -> Self {
        TimestampFormat::Custom(format_str.to_string())
    }
}

impl From<String> for TimestampFormat {
    fn from(format_str: String) -> Self {
        TimestampFormat::Custom(format_str)
    }
}
