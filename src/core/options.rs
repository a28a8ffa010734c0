//! Declarative logger configuration
//!
//! [`LogOptions`] deserializes from any serde format, e.g. a section of an
//! application's JSON config file, and is applied to a logger with
//! [`Logger::apply_options`].

use super::logger::Logger;
use super::output_format::OutputFormat;
use super::timestamp::TimestampFormat;
use super::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logger settings, all optional.
///
/// ```
/// use structlog::{LogOptions, LogLevel, Logger, OutputFormat};
///
/// let options: LogOptions = serde_json::from_str(r#"{
///     "level": "warning",
///     "format": "json",
///     "prefix_keys": ["_l"],
///     "default_keyvals": {"service": "billing"}
/// }"#).unwrap();
///
/// let log = Logger::zero(vec![]).apply_options(&options);
/// assert_eq!(log.level(), LogLevel::Warn);
/// assert_eq!(log.format(), OutputFormat::Json);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogOptions {
    /// Level name, synonyms accepted (`warning`, `crit`, `trace`, ...).
    pub level: Option<String>,
    pub format: Option<OutputFormat>,
    pub key_val_format: Option<String>,
    /// strftime format of the `_t` field
    pub time_format: Option<String>,
    /// strftime format of time values
    pub time_val_format: Option<String>,
    pub json_timestamp: Option<bool>,
    pub prefix_keys: Option<Vec<String>>,
    pub suffix_keys: Option<Vec<String>>,
    pub keys_format: BTreeMap<String, String>,
    pub default_keyvals: BTreeMap<String, String>,
}

impl Logger {
    /// Apply `options` with the regular setters.
    ///
    /// Bad values are reported like their setters report them: an unknown
    /// level name logs an `ERR` record and gives `dbg`, the other options
    /// are still applied. Structural options (`prefix_keys`, `suffix_keys`,
    /// `keys_format`) panic like their setters when the logger was already
    /// used.
    #[track_caller]
    pub fn apply_options(&self, options: &LogOptions) -> Logger {
        if let Some(name) = &options.level {
            self.set_log_level(self.parse_level(name));
        }
        if let Some(format) = options.format {
            self.set_log_format(format);
        }
        if let Some(format) = &options.key_val_format {
            self.set_key_val_format(format.as_str());
        }
        if let Some(format) = &options.time_format {
            self.set_time_format(TimestampFormat::Custom(format.clone()));
        }
        if let Some(format) = &options.time_val_format {
            self.set_time_val_format(TimestampFormat::Custom(format.clone()));
        }
        if let Some(enabled) = options.json_timestamp {
            self.set_json_timestamp(enabled);
        }
        if !options.default_keyvals.is_empty() {
            let keyvals = options
                .default_keyvals
                .iter()
                .flat_map(|(k, v)| [Value::from(k), Value::from(v)])
                .collect();
            self.set_default_keyvals(keyvals);
        }
        if let Some(keys) = &options.prefix_keys {
            self.set_prefix_keys(keys);
        }
        if let Some(keys) = &options.suffix_keys {
            self.set_suffix_keys(keys);
        }
        if !options.keys_format.is_empty() {
            self.set_keys_format(
                options
                    .keys_format
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }
        self.clone()
    }
}
