//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    #[default]
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    /// Short name used in rendered records.
    ///
    /// Warnings and errors are upper-cased so they stand out in text output.
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "dbg",
            LogLevel::Info => "inf",
            LogLevel::Warn => "WRN",
            LogLevel::Error => "ERR",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> Option<colored::Color> {
        use colored::Color::*;
        match self {
            LogLevel::Debug | LogLevel::Info => None,
            LogLevel::Warn => Some(Yellow),
            LogLevel::Error => Some(Red),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    /// Case-insensitive, accepts common syslog-style synonyms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "err" | "error" | "fatal" | "crit" | "critical" | "alert" | "emerg" | "emergency" => {
                Ok(LogLevel::Error)
            }
            "wrn" | "warn" | "warning" => Ok(LogLevel::Warn),
            "inf" | "info" | "notice" => Ok(LogLevel::Info),
            "dbg" | "debug" | "trace" => Ok(LogLevel::Debug),
            _ => Err(LoggerError::invalid_level(s)),
        }
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonyms() {
        for name in ["err", "ERROR", "Fatal", "crit", "critical", "alert", "emerg", "emergency"] {
            assert_eq!(name.parse::<LogLevel>().unwrap(), LogLevel::Error, "{}", name);
        }
        for name in ["wrn", "warn", "WARNING"] {
            assert_eq!(name.parse::<LogLevel>().unwrap(), LogLevel::Warn, "{}", name);
        }
        for name in ["inf", "Info", "notice"] {
            assert_eq!(name.parse::<LogLevel>().unwrap(), LogLevel::Info, "{}", name);
        }
        for name in ["dbg", "debug", "TRACE"] {
            assert_eq!(name.parse::<LogLevel>().unwrap(), LogLevel::Debug, "{}", name);
        }
    }

    #[test]
    fn test_unknown_level() {
        let err = "loud".parse::<LogLevel>().unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel { ref name } if name == "loud"));
    }

    #[test]
    fn test_ordering_and_display() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::Warn.to_string(), "WRN");
        assert_eq!(LogLevel::Info.to_string(), "inf");
    }

    #[test]
    fn test_serde() {
        let level: LogLevel = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(level, LogLevel::Warn);
        assert_eq!(serde_json::to_string(&LogLevel::Error).unwrap(), "\"ERR\"");
    }
}
