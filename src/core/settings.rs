//! Per-logger settings and the parent merge
//!
//! Every logger owns a `Settings` holding only what was configured on it.
//! The first time a logger is used its parent chain is collapsed into it
//! with [`Settings::merged_with_parent`]:
//!
//! | setting            | policy                                        |
//! |--------------------|-----------------------------------------------|
//! | format, level      | parent's only if unset here                   |
//! | templates, times   | parent's only if unset here                   |
//! | output, clock, exit| parent's only if unset here                   |
//! | call depth         | added to parent's                             |
//! | default keyvals    | parent's keys missing here (`Nil` blocks one) |
//! | prefix keys        | parent's, then own                            |
//! | suffix keys        | own, then parent's                            |
//! | keys format        | parent's keys missing here                    |

use super::appender::Output;
use super::keys::{DEFAULT_KEY_VAL_FORMAT, DEFAULT_TIME_FORMAT, DEFAULT_TIME_VAL_FORMAT};
use super::log_level::LogLevel;
use super::output_format::OutputFormat;
use super::template::Template;
use super::timestamp::{system_clock, Clock, TimestampFormat};
use super::value::Value;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Called with the process exit status by fatal log calls.
pub type ExitHook = Arc<dyn Fn(i32) + Send + Sync>;

#[derive(Clone, Default)]
pub(crate) struct Settings {
    pub format: Option<OutputFormat>,
    pub level: Option<LogLevel>,
    pub key_val_format: Option<Template>,
    pub time_format: Option<TimestampFormat>,
    pub time_val_format: Option<TimestampFormat>,
    pub json_timestamp: Option<bool>,
    pub output: Option<Output>,
    pub clock: Option<Clock>,
    pub exit_hook: Option<ExitHook>,
    pub call_depth: usize,
    pub default_keyvals: HashMap<String, Value>,
    pub prefix_keys: Vec<String>,
    pub suffix_keys: Vec<String>,
    pub keys_format: HashMap<String, Template>,
}

impl Settings {
    /// Settings of the hidden root every logger descends from.
    pub fn root() -> Self {
        Self {
            format: Some(OutputFormat::Text),
            level: Some(LogLevel::Debug),
            key_val_format: Some(Template::parse(DEFAULT_KEY_VAL_FORMAT)),
            time_format: Some(TimestampFormat::Custom(DEFAULT_TIME_FORMAT.to_string())),
            time_val_format: Some(TimestampFormat::Custom(DEFAULT_TIME_VAL_FORMAT.to_string())),
            json_timestamp: Some(true),
            output: None,
            clock: Some(system_clock()),
            exit_hook: Some(Arc::new(|status| std::process::exit(status))),
            call_depth: 0,
            default_keyvals: HashMap::new(),
            prefix_keys: Vec::new(),
            suffix_keys: Vec::new(),
            keys_format: HashMap::new(),
        }
    }

    /// Collapse `parent` (already fully merged) into these settings.
    ///
    /// Pure: neither input changes. Applying it to an already merged
    /// result would double parent contributions, so callers must do it
    /// exactly once per logger.
    pub fn merged_with_parent(&self, parent: &Settings) -> Settings {
        let mut default_keyvals = self.default_keyvals.clone();
        for (k, v) in &parent.default_keyvals {
            default_keyvals.entry(k.clone()).or_insert_with(|| v.clone());
        }

        let mut keys_format = self.keys_format.clone();
        for (k, v) in &parent.keys_format {
            keys_format.entry(k.clone()).or_insert_with(|| v.clone());
        }

        let mut prefix_keys = parent.prefix_keys.clone();
        prefix_keys.extend(self.prefix_keys.iter().cloned());

        let mut suffix_keys = self.suffix_keys.clone();
        suffix_keys.extend(parent.suffix_keys.iter().cloned());

        Settings {
            format: self.format.or(parent.format),
            level: self.level.or(parent.level),
            key_val_format: self
                .key_val_format
                .clone()
                .or_else(|| parent.key_val_format.clone()),
            time_format: self.time_format.clone().or_else(|| parent.time_format.clone()),
            time_val_format: self
                .time_val_format
                .clone()
                .or_else(|| parent.time_val_format.clone()),
            json_timestamp: self.json_timestamp.or(parent.json_timestamp),
            output: self.output.clone().or_else(|| parent.output.clone()),
            clock: self.clock.clone().or_else(|| parent.clock.clone()),
            exit_hook: self.exit_hook.clone().or_else(|| parent.exit_hook.clone()),
            call_depth: self.call_depth + parent.call_depth,
            default_keyvals,
            prefix_keys,
            suffix_keys,
            keys_format,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    pub fn level(&self) -> LogLevel {
        self.level.unwrap_or_default()
    }

    pub fn json_timestamp(&self) -> bool {
        self.json_timestamp.unwrap_or(true)
    }

    pub fn time_format(&self) -> TimestampFormat {
        self.time_format
            .clone()
            .unwrap_or_else(|| TimestampFormat::Custom(DEFAULT_TIME_FORMAT.to_string()))
    }

    pub fn time_val_format(&self) -> TimestampFormat {
        self.time_val_format
            .clone()
            .unwrap_or_else(|| TimestampFormat::Custom(DEFAULT_TIME_VAL_FORMAT.to_string()))
    }

    /// Default value for `key`, treating the `Nil` marker as absent.
    pub fn default_value(&self, key: &str) -> Option<&Value> {
        self.default_keyvals.get(key).filter(|v| !v.is_nil())
    }

    /// Template used to render `key`.
    pub fn template_for(&self, key: &str) -> &Template {
        static FALLBACK: OnceLock<Template> = OnceLock::new();
        self.keys_format
            .get(key)
            .or(self.key_val_format.as_ref())
            .unwrap_or_else(|| FALLBACK.get_or_init(|| Template::parse(DEFAULT_KEY_VAL_FORMAT)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child() -> Settings {
        Settings::default()
    }

    #[test]
    fn test_scalars_inherit_only_when_unset() {
        let parent = Settings::root();
        let mut own = child();
        own.level = Some(LogLevel::Warn);

        let merged = own.merged_with_parent(&parent);
        assert_eq!(merged.level(), LogLevel::Warn);
        assert_eq!(merged.format(), OutputFormat::Text);
        assert!(merged.clock.is_some());
        assert!(merged.exit_hook.is_some());
    }

    #[test]
    fn test_call_depth_adds() {
        let mut parent = Settings::root();
        parent.call_depth = 2;
        let mut own = child();
        own.call_depth = 3;

        assert_eq!(own.merged_with_parent(&parent).call_depth, 5);
    }

    #[test]
    fn test_default_keyvals_and_tombstones() {
        let mut parent = Settings::root();
        parent.default_keyvals.insert("u".into(), Value::from("pkg"));
        parent.default_keyvals.insert("a".into(), Value::from("app"));
        let mut own = child();
        own.default_keyvals.insert("a".into(), Value::Nil);
        own.default_keyvals.insert("b".into(), Value::from(1));

        let merged = own.merged_with_parent(&parent);
        assert_eq!(merged.default_value("u"), Some(&Value::from("pkg")));
        assert_eq!(merged.default_value("a"), None);
        assert_eq!(merged.default_keyvals.get("a"), Some(&Value::Nil));
        assert_eq!(merged.default_value("b"), Some(&Value::from(1)));
    }

    #[test]
    fn test_key_order() {
        let mut parent = Settings::root();
        parent.prefix_keys = vec!["p1".into(), "p2".into()];
        parent.suffix_keys = vec!["s1".into(), "s2".into()];
        let mut own = child();
        own.prefix_keys = vec!["c1".into()];
        own.suffix_keys = vec!["c2".into()];

        let merged = own.merged_with_parent(&parent);
        assert_eq!(merged.prefix_keys, vec!["p1", "p2", "c1"]);
        assert_eq!(merged.suffix_keys, vec!["c2", "s1", "s2"]);
    }

    #[test]
    fn test_keys_format_inherit() {
        let mut parent = Settings::root();
        parent.keys_format.insert("k".into(), Template::parse("[{value}]"));
        parent.keys_format.insert("m".into(), Template::parse("{value}"));
        let mut own = child();
        own.keys_format.insert("m".into(), Template::parse(" {value:q}"));

        let merged = own.merged_with_parent(&parent);
        assert_eq!(merged.template_for("k").as_str(), "[{value}]");
        assert_eq!(merged.template_for("m").as_str(), " {value:q}");
        assert_eq!(merged.template_for("other").as_str(), DEFAULT_KEY_VAL_FORMAT);
    }

    #[test]
    fn test_merge_is_pure() {
        let mut parent = Settings::root();
        parent.prefix_keys = vec!["p".into()];
        let mut own = child();
        own.prefix_keys = vec!["c".into()];

        let first = own.merged_with_parent(&parent);
        let second = own.merged_with_parent(&parent);
        assert_eq!(first.prefix_keys, second.prefix_keys);
        assert_eq!(parent.prefix_keys, vec!["p"]);
        assert_eq!(own.prefix_keys, vec!["c"]);
    }
}
