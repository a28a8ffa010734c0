//! Rendered log line handed to appenders

use super::log_level::LogLevel;
use super::output_format::OutputFormat;

/// A fully rendered, self-contained record.
///
/// `text` holds the complete line without a trailing newline: the
/// concatenated key/value tokens for `OutputFormat::Text`, or a
/// single-line JSON object for `OutputFormat::Json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: LogLevel,
    pub format: OutputFormat,
    pub text: String,
}

impl LogLine {
    pub fn new(level: LogLevel, format: OutputFormat, text: String) -> Self {
        Self {
            level,
            format,
            text,
        }
    }
}
