//! Core logger types and traits

pub mod appender;
pub mod caller;
pub mod context;
pub mod deferred;
pub mod error;
pub mod keys;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod options;
pub mod output_format;
pub mod recover;
pub(crate) mod render;
pub(crate) mod settings;
pub mod template;
pub mod timestamp;
pub mod value;
pub mod wrap;

pub use appender::{Appender, Output};
pub use caller::{capture_stack, Caller};
pub use context::{from_context, ContextGuard};
pub use deferred::DeferredLogger;
pub use error::{LoggerError, Result};
pub use keys::*;
pub use log_entry::LogLine;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use options::LogOptions;
pub use output_format::OutputFormat;
pub use recover::{PanicGuard, RecoverMode};
pub use settings::ExitHook;
pub use template::Template;
pub use timestamp::{fixed_clock, system_clock, Clock, TimestampFormat};
pub use value::{ErrorValue, Value};
pub use wrap::{unwrap_keyvals, ResultExt, WrappedError, MAX_ERROR_CHAIN};
