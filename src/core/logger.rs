//! Main logger implementation
//!
//! A [`Logger`] is a cheap handle to a node in a tree of configurations.
//! A freshly derived node holds only what was set on it and a link to its
//! parent. The first time it is used to log (or queried) the parent chain
//! is merged into it once and the link is dropped, so changes made to a
//! parent in `main()` still reach loggers created earlier, as long as
//! those loggers were not used yet.

use super::{
    appender::Output,
    caller::Caller,
    error::LoggerError,
    keys::{
        KEY_APP, KEY_FUNC, KEY_LEVEL, KEY_MESSAGE, KEY_PID, KEY_SOURCE, KEY_STACK, KEY_UNIT,
        MISSING_VALUE, UNKNOWN,
    },
    log_entry::LogLine,
    log_level::LogLevel,
    output_format::OutputFormat,
    render::{render, Issue},
    settings::{ExitHook, Settings},
    template::Template,
    timestamp::{Clock, TimestampFormat},
    value::{ErrorValue, Value},
    wrap::WrappedError,
};
use crate::appenders::ConsoleAppender;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Template used for the self-diagnostic about a non-string key.
const NON_STRING_KEY_FORMAT: &str = " {key}={value:?}";

struct NodeState {
    parent: Option<Arc<Node>>,
    settings: Arc<Settings>,
}

struct Node {
    state: RwLock<NodeState>,
    resolved: AtomicBool,
    merge_lock: Mutex<()>,
}

impl Node {
    fn new(parent: Option<Arc<Node>>, settings: Settings) -> Self {
        let resolved = parent.is_none();
        Self {
            state: RwLock::new(NodeState {
                parent,
                settings: Arc::new(settings),
            }),
            resolved: AtomicBool::new(resolved),
            merge_lock: Mutex::new(()),
        }
    }

    /// Merge the parent chain into this node (once) and return the result.
    fn resolve(&self) -> Arc<Settings> {
        if !self.resolved.load(Ordering::Acquire) {
            let _merge = self.merge_lock.lock();
            if !self.resolved.load(Ordering::Acquire) {
                let parent = self.state.read().parent.clone();
                if let Some(parent) = parent {
                    let parent_settings = parent.resolve();
                    let mut state = self.state.write();
                    let merged = state.settings.merged_with_parent(&parent_settings);
                    state.settings = Arc::new(merged);
                    state.parent = None;
                }
                self.resolved.store(true, Ordering::Release);
            }
        }
        Arc::clone(&self.state.read().settings)
    }

    /// Merged view without resolving anything.
    fn snapshot(&self) -> Settings {
        let (own, parent) = {
            let state = self.state.read();
            (Arc::clone(&state.settings), state.parent.clone())
        };
        match parent {
            Some(parent) => own.merged_with_parent(&parent.snapshot()),
            None => (*own).clone(),
        }
    }
}

/// Structured logger handle.
///
/// Cloning is cheap and every clone refers to the same node: setters on
/// one clone are seen by all of them. Use [`Logger::derive`] to get an
/// independent child which inherits this logger's settings.
///
/// Setters return a handle to the same node so calls can be chained.
/// Prefix keys, suffix keys and per-key templates are structural: changing
/// them after the logger was first used panics.
#[derive(Clone)]
pub struct Logger {
    node: Arc<Node>,
}

impl Logger {
    /// Create a logger with empty settings.
    ///
    /// Output goes to stderr as text, the level is `dbg`, and the `_u`,
    /// `_f` and `_s` fields are enabled but listed in no key set.
    #[track_caller]
    pub fn zero(keyvals: Vec<Value>) -> Logger {
        let mut settings = Settings::root();
        settings.output = Some(Output::new(ConsoleAppender::plain()));
        settings.default_keyvals.insert(KEY_UNIT.to_string(), Value::Auto);
        settings.default_keyvals.insert(KEY_FUNC.to_string(), Value::from(UNKNOWN));
        settings.default_keyvals.insert(KEY_SOURCE.to_string(), Value::from(UNKNOWN));

        let root = Logger {
            node: Arc::new(Node::new(None, settings)),
        };
        root.derive(keyvals)
    }

    /// Create the conventional application logger.
    ///
    /// Lines look like
    /// ``app[1234] inf unit: `message` key=value 	@ module::func(file.rs:42)``.
    /// Configure it in `main()` and derive per-module loggers from it.
    ///
    /// The function name after `@` is only known to the logging macros
    /// ([`info!`](crate::info) and friends). Plain method calls print `???`
    /// there, the `file:line` part is always filled.
    #[track_caller]
    pub fn standard(keyvals: Vec<Value>) -> Logger {
        let mut defaults = vec![
            Value::from(KEY_APP),
            Value::from(app_name()),
            Value::from(KEY_PID),
            Value::from(std::process::id()),
        ];
        defaults.extend(keyvals);

        Logger::zero(defaults)
            .set_prefix_keys([KEY_APP, KEY_PID, KEY_LEVEL, KEY_UNIT])
            .set_suffix_keys([KEY_FUNC, KEY_SOURCE, KEY_STACK])
            .set_keys_format([
                (KEY_APP, "{value}"),
                (KEY_PID, "[{value}]"),
                (KEY_LEVEL, " {value}"),
                (KEY_UNIT, " {value}:"),
                (KEY_MESSAGE, " {value:q}"),
                (KEY_FUNC, " \t@ {value}"),
                (KEY_SOURCE, "({value})"),
                (KEY_STACK, "\n{value}"),
            ])
    }

    /// Create a builder for a zero-based logger.
    ///
    /// # Example
    /// ```
    /// use structlog::prelude::*;
    ///
    /// let buffer = BufferAppender::new();
    /// let log = Logger::builder()
    ///     .level(LogLevel::Warn)
    ///     .output(buffer.clone())
    ///     .build();
    ///
    /// log.info("skipped", vec![]);
    /// log.warn("kept", vec![]);
    /// assert_eq!(buffer.lines(), vec![" _m=kept"]);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Create a child which inherits all settings from this logger.
    #[track_caller]
    pub fn derive(&self, keyvals: Vec<Value>) -> Logger {
        let child = Logger {
            node: Arc::new(Node::new(Some(Arc::clone(&self.node)), Settings::default())),
        };
        child.set_default_keyvals(keyvals)
    }

    #[track_caller]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Logger {
        self.derive(vec![Value::Str(key.into()), value.into()])
    }

    #[track_caller]
    pub fn with_fields<K, V>(&self, fields: impl IntoIterator<Item = (K, V)>) -> Logger
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let keyvals = fields
            .into_iter()
            .flat_map(|(k, v)| [Value::Str(k.into()), v.into()])
            .collect();
        self.derive(keyvals)
    }

    /// True if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    fn update(&self, f: impl FnOnce(&mut Settings)) -> Logger {
        let mut state = self.node.state.write();
        f(Arc::make_mut(&mut state.settings));
        self.clone()
    }

    fn update_structure(&self, what: &str, f: impl FnOnce(&mut Settings)) -> Logger {
        let mut state = self.node.state.write();
        if state.parent.is_none() {
            panic!("{}", LoggerError::config(what, "too late to reconfigure"));
        }
        f(Arc::make_mut(&mut state.settings));
        self.clone()
    }

    pub fn set_log_format(&self, format: OutputFormat) -> Logger {
        self.update(|s| s.format = Some(format))
    }

    pub fn set_log_level(&self, level: LogLevel) -> Logger {
        self.update(|s| s.level = Some(level))
    }

    /// Template for keys without a per-key template (default ` {key}={value}`).
    pub fn set_key_val_format(&self, format: impl Into<Template>) -> Logger {
        let format = format.into();
        self.update(|s| s.key_val_format = Some(format))
    }

    /// Format of the `_t` field.
    ///
    /// An unparsable strftime format is reported with an `ERR` record and
    /// renders as RFC 3339.
    #[track_caller]
    pub fn set_time_format(&self, format: impl Into<TimestampFormat>) -> Logger {
        let format = format.into();
        self.check_time_format(Caller::capture(), &format);
        self.update(|s| s.time_format = Some(format))
    }

    /// Format of time values given in keyvals.
    #[track_caller]
    pub fn set_time_val_format(&self, format: impl Into<TimestampFormat>) -> Logger {
        let format = format.into();
        self.check_time_format(Caller::capture(), &format);
        self.update(|s| s.time_val_format = Some(format))
    }

    fn check_time_format(&self, caller: Caller, format: &TimestampFormat) {
        if let TimestampFormat::Custom(format_str) = format {
            if !format.is_valid() {
                let settings = self.node.snapshot();
                diagnose(
                    &settings,
                    caller,
                    "invalid time format",
                    vec!["format".into(), format_str.as_str().into()],
                );
            }
        }
    }

    /// Whether JSON records always get a `_t` field (default true).
    pub fn set_json_timestamp(&self, enabled: bool) -> Logger {
        self.update(|s| s.json_timestamp = Some(enabled))
    }

    pub fn set_output(&self, output: impl Into<Output>) -> Logger {
        let output = output.into();
        self.update(|s| s.output = Some(output))
    }

    pub fn set_clock(&self, clock: Clock) -> Logger {
        self.update(|s| s.clock = Some(clock))
    }

    /// Hook called with the exit status by [`Logger::fatal`].
    pub fn set_exit_hook<F>(&self, hook: F) -> Logger
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        let hook: ExitHook = Arc::new(hook);
        self.update(|s| s.exit_hook = Some(hook))
    }

    /// Skip `depth` more innermost frames when capturing `__` stacks.
    pub fn add_call_depth(&self, depth: usize) -> Logger {
        self.update(|s| s.call_depth += depth)
    }

    /// Add or replace default values.
    ///
    /// Defaults are only output for keys listed in prefix or suffix keys
    /// and not given in the call's keyvals. A `Value::Nil` value removes
    /// the key, including a value inherited from a parent.
    #[track_caller]
    pub fn set_default_keyvals(&self, mut keyvals: Vec<Value>) -> Logger {
        if keyvals.is_empty() {
            return self.clone();
        }
        let caller = Caller::capture();
        if keyvals.len() % 2 != 0 {
            let settings = self.node.snapshot();
            diagnose(&settings, caller, "odd keyvals", vec![]);
            keyvals.push(Value::from(MISSING_VALUE));
        }

        let mut pairs = Vec::with_capacity(keyvals.len() / 2);
        let mut iter = keyvals.into_iter();
        while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
            let key = match key {
                Value::Str(key) => key,
                other => {
                    let mut settings = self.node.snapshot();
                    settings.key_val_format = Some(Template::parse(NON_STRING_KEY_FORMAT));
                    let key = other.to_string();
                    diagnose(&settings, caller, "key is not string", vec!["key".into(), other]);
                    key
                }
            };
            pairs.push((key, value));
        }

        self.update(|s| s.default_keyvals.extend(pairs))
    }

    /// Replace this node's prefix keys. They are output after the parent's.
    ///
    /// # Panics
    ///
    /// If the logger (or a logger derived from it) was already used.
    pub fn set_prefix_keys<K: Into<String>>(&self, keys: impl IntoIterator<Item = K>) -> Logger {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        self.update_structure("prefix_keys", |s| s.prefix_keys = keys)
    }

    pub fn append_prefix_keys<K: Into<String>>(&self, keys: impl IntoIterator<Item = K>) -> Logger {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        self.update_structure("prefix_keys", |s| s.prefix_keys.extend(keys))
    }

    /// Replace this node's suffix keys. They are output before the parent's.
    ///
    /// # Panics
    ///
    /// If the logger (or a logger derived from it) was already used.
    pub fn set_suffix_keys<K: Into<String>>(&self, keys: impl IntoIterator<Item = K>) -> Logger {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        self.update_structure("suffix_keys", |s| s.suffix_keys = keys)
    }

    pub fn prepend_suffix_keys<K: Into<String>>(
        &self,
        keys: impl IntoIterator<Item = K>,
    ) -> Logger {
        let mut keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        self.update_structure("suffix_keys", |s| {
            keys.append(&mut s.suffix_keys);
            s.suffix_keys = keys;
        })
    }

    /// Add or replace per-key templates.
    ///
    /// # Panics
    ///
    /// If the logger (or a logger derived from it) was already used.
    pub fn set_keys_format<K, T>(&self, formats: impl IntoIterator<Item = (K, T)>) -> Logger
    where
        K: Into<String>,
        T: Into<Template>,
    {
        let formats: Vec<(String, Template)> = formats
            .into_iter()
            .map(|(k, t)| (k.into(), t.into()))
            .collect();
        self.update_structure("keys_format", |s| s.keys_format.extend(formats))
    }

    pub fn level(&self) -> LogLevel {
        self.node.resolve().level()
    }

    pub fn format(&self) -> OutputFormat {
        self.node.resolve().format()
    }

    /// Output this logger writes to, with its metrics.
    pub fn output(&self) -> Option<Output> {
        self.node.resolve().output.clone()
    }

    /// True if `inf` records are output.
    pub fn is_info(&self) -> bool {
        self.level() <= LogLevel::Info
    }

    /// True if `dbg` records are output.
    pub fn is_debug(&self) -> bool {
        self.level() <= LogLevel::Debug
    }

    /// Parse a level name from a flag or config file.
    ///
    /// Unknown names are reported with an `ERR` record and give `dbg`.
    #[track_caller]
    pub fn parse_level(&self, name: &str) -> LogLevel {
        match name.parse::<LogLevel>() {
            Ok(level) => level,
            Err(_) => {
                self.log_at(
                    LogLevel::Error,
                    Caller::capture(),
                    "failed",
                    vec!["levelName".into(), name.into()],
                );
                LogLevel::Debug
            }
        }
    }

    /// Log with an explicit caller. Used by the logging macros.
    pub fn log_at(&self, level: LogLevel, caller: Caller, msg: impl Into<Value>, keyvals: Vec<Value>) {
        let settings = self.node.resolve();
        emit(&settings, level, caller, msg.into(), keyvals, false);
    }

    /// Log at `ERR` with an explicit caller and return the error, see [`Logger::err`].
    pub fn err_at(
        &self,
        caller: Caller,
        msg: impl Into<Value>,
        keyvals: Vec<Value>,
    ) -> ErrorValue {
        let msg = msg.into();
        let err = first_error(&msg, &keyvals);
        self.log_at(LogLevel::Error, caller, msg, keyvals);
        err
    }

    #[track_caller]
    pub fn debug(&self, msg: impl Into<Value>, keyvals: Vec<Value>) {
        self.log_at(LogLevel::Debug, Caller::capture(), msg, keyvals);
    }

    #[track_caller]
    pub fn info(&self, msg: impl Into<Value>, keyvals: Vec<Value>) {
        self.log_at(LogLevel::Info, Caller::capture(), msg, keyvals);
    }

    #[track_caller]
    pub fn warn(&self, msg: impl Into<Value>, keyvals: Vec<Value>) {
        self.log_at(LogLevel::Warn, Caller::capture(), msg, keyvals);
    }

    /// Log at `ERR`. Prefer [`Logger::err`] to both log and return an error.
    #[track_caller]
    pub fn print_err(&self, msg: impl Into<Value>, keyvals: Vec<Value>) {
        self.log_at(LogLevel::Error, Caller::capture(), msg, keyvals);
    }

    /// Log at `ERR` and return the first error among `msg` and `keyvals`,
    /// or an error with `msg` as text if there is none.
    ///
    /// ```
    /// use structlog::{keyvals, BufferAppender, ErrorValue, Logger};
    ///
    /// fn load(log: &Logger) -> Result<(), ErrorValue> {
    ///     let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    ///     Err(log.err("failed to load", keyvals!["err", err]))
    /// }
    ///
    /// let log = Logger::zero(vec![]).set_output(BufferAppender::new());
    /// assert_eq!(load(&log).unwrap_err().to_string(), "gone");
    /// ```
    #[track_caller]
    pub fn err(&self, msg: impl Into<Value>, keyvals: Vec<Value>) -> ErrorValue {
        self.err_at(Caller::capture(), msg, keyvals)
    }

    /// Attach keyvals to `err`, see [`WrappedError`].
    ///
    /// Unlike [`WrappedError::new`] an odd number of keyvals is reported
    /// with an `ERR` record before the last key is paired with `(MISSING)`.
    ///
    /// ```
    /// use structlog::{keyvals, BufferAppender, Logger};
    ///
    /// let buffer = BufferAppender::new();
    /// let log = Logger::zero(vec![]).set_output(buffer.clone());
    /// let eof = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "EOF");
    ///
    /// let err = log.wrap_err(eof, keyvals!["offset", 512]);
    /// log.warn("short read", keyvals!["err", err]);
    /// assert_eq!(buffer.lines(), vec![" _m=short read offset=512 err=EOF"]);
    /// ```
    #[track_caller]
    pub fn wrap_err(&self, err: impl Into<ErrorValue>, keyvals: Vec<Value>) -> WrappedError {
        if keyvals.len() % 2 != 0 {
            let settings = self.node.snapshot();
            diagnose(&settings, Caller::capture(), "odd keyvals", vec![]);
        }
        WrappedError::new(err, keyvals)
    }

    /// [`Logger::wrap_err`] applied to the error of a `Result`.
    #[track_caller]
    pub fn wrap_result<T, E: Into<ErrorValue>>(
        &self,
        res: Result<T, E>,
        keyvals: Vec<Value>,
    ) -> Result<T, WrappedError> {
        match res {
            Ok(v) => Ok(v),
            Err(err) => Err(self.wrap_err(err, keyvals)),
        }
    }

    /// Log the message at `inf`.
    #[track_caller]
    pub fn print(&self, msg: impl fmt::Display) {
        self.log_at(LogLevel::Info, Caller::capture(), Value::display(msg), vec![]);
    }

    /// Log the message at `ERR`, then call the exit hook with status 1.
    #[track_caller]
    pub fn fatal(&self, msg: impl fmt::Display) {
        let settings = self.node.resolve();
        emit(&settings, LogLevel::Error, Caller::capture(), Value::display(msg), vec![], false);
        match &settings.exit_hook {
            Some(hook) => hook(1),
            None => std::process::exit(1),
        }
    }

    /// Log the message at `ERR`, then panic with it.
    #[track_caller]
    pub fn panic(&self, msg: impl fmt::Display) -> ! {
        let text = msg.to_string();
        self.log_at(LogLevel::Error, Caller::capture(), text.clone(), vec![]);
        panic!("{}", text)
    }

    #[track_caller]
    pub fn err_if_fail<E: Into<ErrorValue>>(
        &self,
        f: impl FnOnce() -> Result<(), E>,
        keyvals: Vec<Value>,
    ) {
        self.log_if_fail(LogLevel::Error, Caller::capture(), f, keyvals);
    }

    #[track_caller]
    pub fn warn_if_fail<E: Into<ErrorValue>>(
        &self,
        f: impl FnOnce() -> Result<(), E>,
        keyvals: Vec<Value>,
    ) {
        self.log_if_fail(LogLevel::Warn, Caller::capture(), f, keyvals);
    }

    #[track_caller]
    pub fn info_if_fail<E: Into<ErrorValue>>(
        &self,
        f: impl FnOnce() -> Result<(), E>,
        keyvals: Vec<Value>,
    ) {
        self.log_if_fail(LogLevel::Info, Caller::capture(), f, keyvals);
    }

    #[track_caller]
    pub fn debug_if_fail<E: Into<ErrorValue>>(
        &self,
        f: impl FnOnce() -> Result<(), E>,
        keyvals: Vec<Value>,
    ) {
        self.log_if_fail(LogLevel::Debug, Caller::capture(), f, keyvals);
    }

    fn log_if_fail<E: Into<ErrorValue>>(
        &self,
        level: LogLevel,
        caller: Caller,
        f: impl FnOnce() -> Result<(), E>,
        keyvals: Vec<Value>,
    ) {
        if let Err(err) = f() {
            self.log_at(level, caller, Value::error(err), keyvals);
        }
    }

    /// Flush the output.
    pub fn flush(&self) -> super::error::Result<()> {
        match self.output() {
            Some(output) => output.flush(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("resolved", &self.node.resolved.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::standard(vec![])
    }
}

/// Emit one record through fully merged `settings`.
///
/// `diagnostic` marks records the logger writes about caller misuse; those
/// never produce further diagnostics.
pub(crate) fn emit(
    settings: &Settings,
    level: LogLevel,
    caller: Caller,
    msg: Value,
    mut keyvals: Vec<Value>,
    diagnostic: bool,
) {
    if level < settings.level() {
        if let Some(output) = &settings.output {
            output.metrics().record_filtered();
        }
        return;
    }

    if keyvals.len() % 2 != 0 {
        if !diagnostic {
            diagnose(settings, caller, "odd keyvals", vec![]);
        }
        keyvals.push(Value::from(MISSING_VALUE));
    }

    let rendered = render(settings, level, &caller, msg, keyvals);
    if !diagnostic {
        for issue in rendered.issues {
            match issue {
                Issue::NonStringKey(key) => {
                    let mut s = settings.clone();
                    s.key_val_format = Some(Template::parse(NON_STRING_KEY_FORMAT));
                    diagnose(&s, caller, "key is not string", vec!["key".into(), key]);
                }
                Issue::ChainTooDeep(err) => {
                    diagnose(
                        settings,
                        caller,
                        "failed to unwrap error keyvals",
                        vec!["err".into(), err.into()],
                    );
                }
            }
        }
    }

    let line = LogLine::new(level, settings.format(), rendered.text);
    match &settings.output {
        Some(output) => output.deliver(&line),
        None => eprintln!("{}", line.text),
    }
}

fn diagnose(settings: &Settings, caller: Caller, msg: &str, keyvals: Vec<Value>) {
    if let Some(output) = &settings.output {
        output.metrics().record_diagnostic();
    }
    emit(settings, LogLevel::Error, caller, Value::from(msg), keyvals, true);
}

pub(crate) fn first_error(msg: &Value, keyvals: &[Value]) -> ErrorValue {
    std::iter::once(msg)
        .chain(keyvals)
        .find_map(Value::as_error)
        .cloned()
        .unwrap_or_else(|| ErrorValue::new(LoggerError::Message(msg.to_string())))
}

fn app_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            std::path::Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Builder for a [`Logger`] derived from [`Logger::zero`] or
/// [`Logger::standard`].
///
/// # Example
/// ```
/// use structlog::prelude::*;
///
/// let log = Logger::builder()
///     .standard()
///     .level(LogLevel::Info)
///     .format(OutputFormat::Json)
///     .default_keyvals(keyvals!["service", "billing"])
///     .build();
///
/// assert!(log.is_info());
/// assert!(!log.is_debug());
/// ```
pub struct LoggerBuilder {
    standard: bool,
    level: Option<LogLevel>,
    format: Option<OutputFormat>,
    output: Option<Output>,
    key_val_format: Option<Template>,
    time_format: Option<TimestampFormat>,
    clock: Option<Clock>,
    exit_hook: Option<ExitHook>,
    prefix_keys: Option<Vec<String>>,
    suffix_keys: Option<Vec<String>>,
    keys_format: Vec<(String, Template)>,
    default_keyvals: Vec<Value>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            standard: false,
            level: None,
            format: None,
            output: None,
            key_val_format: None,
            time_format: None,
            clock: None,
            exit_hook: None,
            prefix_keys: None,
            suffix_keys: None,
            keys_format: Vec::new(),
            default_keyvals: Vec::new(),
        }
    }

    /// Start from [`Logger::standard`] instead of [`Logger::zero`].
    #[must_use = "builder methods return a new value"]
    pub fn standard(mut self) -> Self {
        self.standard = true;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, output: impl Into<Output>) -> Self {
        self.output = Some(output.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn key_val_format(mut self, format: impl Into<Template>) -> Self {
        self.key_val_format = Some(format.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn time_format(mut self, format: impl Into<TimestampFormat>) -> Self {
        self.time_format = Some(format.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn exit_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.exit_hook = Some(Arc::new(hook));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix_keys<K: Into<String>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.prefix_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn suffix_keys<K: Into<String>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.suffix_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn key_format(mut self, key: impl Into<String>, format: impl Into<Template>) -> Self {
        self.keys_format.push((key.into(), format.into()));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn default_keyvals(mut self, keyvals: Vec<Value>) -> Self {
        self.default_keyvals.extend(keyvals);
        self
    }

    /// Build the Logger
    #[track_caller]
    pub fn build(self) -> Logger {
        let base = if self.standard {
            Logger::standard(vec![])
        } else {
            Logger::zero(vec![])
        };
        let log = base.derive(self.default_keyvals);

        if let Some(level) = self.level {
            log.set_log_level(level);
        }
        if let Some(format) = self.format {
            log.set_log_format(format);
        }
        if let Some(output) = self.output {
            log.set_output(output);
        }
        if let Some(format) = self.key_val_format {
            log.set_key_val_format(format);
        }
        if let Some(format) = self.time_format {
            log.set_time_format(format);
        }
        if let Some(clock) = self.clock {
            log.set_clock(clock);
        }
        if let Some(hook) = self.exit_hook {
            log.update(|s| s.exit_hook = Some(hook));
        }
        if let Some(keys) = self.prefix_keys {
            log.set_prefix_keys(keys);
        }
        if let Some(keys) = self.suffix_keys {
            log.set_suffix_keys(keys);
        }
        if !self.keys_format.is_empty() {
            log.set_keys_format(self.keys_format);
        }
        log
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
