//! Record rendering
//!
//! Turns a level, a message and call keyvals into one line, given a fully
//! merged [`Settings`]. Field placement:
//!
//! 1. prefix keys with a default value
//! 2. suffix keys with a default value
//! 3. `_m`, then every other key in first-seen order
//!
//! A key seen again keeps its position and takes the later value. Text
//! output concatenates the templates of prefix, middle and suffix keys in
//! that order. JSON output is the whole field map with string values.

use super::caller::{capture_stack, Caller};
use super::error::{panic_message, LoggerError};
use super::keys::{KEY_FUNC, KEY_LEVEL, KEY_MESSAGE, KEY_SOURCE, KEY_STACK, KEY_TIME, KEY_UNIT};
use super::log_level::LogLevel;
use super::output_format::OutputFormat;
use super::settings::Settings;
use super::value::Value;
use super::wrap::collect_keyvals;
use chrono::{DateTime, FixedOffset};
use std::collections::{HashMap, HashSet};

/// Caller misuse found while rendering. The record is still produced.
#[derive(Debug)]
pub(crate) enum Issue {
    NonStringKey(Value),
    ChainTooDeep(LoggerError),
}

pub(crate) struct Rendered {
    pub text: String,
    pub issues: Vec<Issue>,
}

/// Render a record. `keyvals` must have even length.
///
/// A panic anywhere in rendering (a misbehaving `Display` impl, say) is
/// caught and the error text becomes the record.
pub(crate) fn render(
    settings: &Settings,
    level: LogLevel,
    caller: &Caller,
    msg: Value,
    keyvals: Vec<Value>,
) -> Rendered {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        RecordRenderer::new(settings, caller).render(level, msg, keyvals)
    }));
    match result {
        Ok(rendered) => rendered,
        Err(payload) => Rendered {
            text: LoggerError::render_panic(panic_message(payload.as_ref())).to_string(),
            issues: Vec::new(),
        },
    }
}

struct RecordRenderer<'a> {
    settings: &'a Settings,
    caller: &'a Caller,
    now: Option<DateTime<FixedOffset>>,
    issues: Vec<Issue>,
}

impl<'a> RecordRenderer<'a> {
    fn new(settings: &'a Settings, caller: &'a Caller) -> Self {
        Self {
            settings,
            caller,
            now: None,
            issues: Vec::new(),
        }
    }

    fn now(&mut self) -> DateTime<FixedOffset> {
        if let Some(now) = self.now {
            return now;
        }
        let now = match &self.settings.clock {
            Some(clock) => clock(),
            None => chrono::Local::now().fixed_offset(),
        };
        self.now = Some(now);
        now
    }

    fn render(mut self, level: LogLevel, msg: Value, keyvals: Vec<Value>) -> Rendered {
        let settings = self.settings;
        let keyvals = self.with_error_keyvals(&msg, keyvals);

        let mut fields: HashMap<String, Value> = HashMap::new();
        let mut surround: HashSet<&str> = HashSet::new();
        for key in settings.prefix_keys.iter().chain(&settings.suffix_keys) {
            surround.insert(key.as_str());
            if let Some(value) = settings.default_value(key) {
                fields.insert(key.clone(), value.clone());
            }
        }

        let mut middle: Vec<String> = vec![KEY_MESSAGE.to_string()];
        fields.insert(KEY_MESSAGE.to_string(), msg);

        let time_val_format = settings.time_val_format();
        let mut pairs = keyvals.into_iter();
        while let (Some(key), Some(value)) = (pairs.next(), pairs.next()) {
            let key = match key {
                Value::Str(key) => key,
                other => {
                    let key = other.to_string();
                    self.issues.push(Issue::NonStringKey(other));
                    key
                }
            };
            let value = match value {
                Value::Time(t) => Value::Str(time_val_format.format(&t)),
                other => other,
            };
            if !surround.contains(key.as_str()) && !fields.contains_key(&key) {
                middle.push(key.clone());
            }
            fields.insert(key, value);
        }

        self.fill_dynamic(level, &mut fields);

        let text = match settings.format() {
            OutputFormat::Json => match OutputFormat::encode_json(&fields) {
                Ok(json) => json,
                Err(e) => e.to_string(),
            },
            OutputFormat::Text => self.concat(&fields, &middle),
        };

        Rendered {
            text,
            issues: self.issues,
        }
    }

    /// Prepend the keyvals carried by the message and values. Chains too
    /// deep to unwrap are reported once per record.
    fn with_error_keyvals(&mut self, msg: &Value, keyvals: Vec<Value>) -> Vec<Value> {
        let values = keyvals.iter().skip(1).step_by(2);
        let mut extra = Vec::new();
        for err in std::iter::once(msg).chain(values).filter_map(Value::as_error) {
            match collect_keyvals(err.as_dyn()) {
                Ok(mut kv) => extra.append(&mut kv),
                Err(e) => {
                    if !self.issues.iter().any(|i| matches!(i, Issue::ChainTooDeep(_))) {
                        self.issues.push(Issue::ChainTooDeep(e));
                    }
                }
            }
        }
        if extra.is_empty() {
            return keyvals;
        }
        extra.extend(keyvals);
        extra
    }

    fn fill_dynamic(&mut self, level: LogLevel, fields: &mut HashMap<String, Value>) {
        if self.settings.format() == OutputFormat::Json && self.settings.json_timestamp() {
            let now = self.now();
            let stamp = self.settings.time_format().format_utc(&now);
            fields.insert(KEY_TIME.to_string(), Value::Str(stamp));
        } else if fields.get(KEY_TIME).is_some_and(Value::is_auto) {
            let now = self.now();
            let stamp = self.settings.time_format().format(&now);
            fields.insert(KEY_TIME.to_string(), Value::Str(stamp));
        }

        fields.insert(KEY_LEVEL.to_string(), Value::from(level));

        if let Some(unit) = fields.get_mut(KEY_UNIT) {
            if unit.is_auto() {
                *unit = Value::Str(self.caller.unit());
            }
        }
        if let Some(func) = fields.get_mut(KEY_FUNC) {
            if !func.is_nil() {
                if let Some(name) = self.caller.function() {
                    *func = Value::Str(name);
                }
            }
        }
        if let Some(source) = fields.get_mut(KEY_SOURCE) {
            if !source.is_nil() {
                *source = Value::Str(self.caller.source());
            }
        }
        if let Some(stack) = fields.get_mut(KEY_STACK) {
            if stack.is_auto() {
                *stack = Value::Str(capture_stack(self.settings.call_depth));
            }
        }
    }

    fn concat(&self, fields: &HashMap<String, Value>, middle: &[String]) -> String {
        let mut out = String::with_capacity(128);
        let keys = self
            .settings
            .prefix_keys
            .iter()
            .chain(middle)
            .chain(&self.settings.suffix_keys);
        for key in keys {
            if let Some(value) = fields.get(key) {
                self.settings.template_for(key).render_into(key, value, &mut out);
            }
        }
        out
    }
}
