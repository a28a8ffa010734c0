//! # structlog
//!
//! Structured logging with a tree of inheritable logger configurations.
//!
//! ## Features
//!
//! - **Key/value records**: every record is a message plus alternating keys
//!   and values, rendered as text or JSON
//! - **Inheritance**: derived loggers pick up settings changed on their
//!   parents until the first time they are used
//! - **Error context**: keyvals attached to errors with [`ResultExt`] show up
//!   in the record that finally logs the error
//! - **Pluggable output**: console, file, any `io::Write`, or a custom
//!   [`Appender`]
//!
//! ## Example
//!
//! ```
//! use structlog::prelude::*;
//!
//! let buffer = BufferAppender::new();
//! let app = Logger::zero(vec![])
//!     .set_output(buffer.clone())
//!     .set_prefix_keys(["_l"])
//!     .set_keys_format([("_l", "[{value}]")]);
//!
//! let db = app.derive(keyvals!["_u", "db"]);
//! app.set_log_level(LogLevel::Info);
//!
//! db.debug("connecting", keyvals![]);
//! db.info("connected", keyvals!["host", "localhost"]);
//!
//! assert_eq!(buffer.lines(), vec!["[inf] _m=connected host=localhost"]);
//! assert_eq!(db.format(), OutputFormat::Text);
//! ```

pub mod appenders;
pub mod core;
mod macros;

pub mod prelude {
    pub use crate::appenders::{BufferAppender, ConsoleAppender, FileAppender, WriterAppender};
    pub use crate::core::{
        from_context, Appender, ContextGuard, DeferredLogger, ErrorValue, LogLevel, LogLine,
        LogOptions, Logger, LoggerBuilder, LoggerError, LoggerMetrics, OutputFormat, RecoverMode,
        Result, ResultExt, TimestampFormat, Value, WrappedError,
    };
    pub use crate::keyvals;
}

pub use appenders::{BufferAppender, ConsoleAppender, ConsoleTarget, FileAppender, WriterAppender};
pub use self::core::{
    capture_stack, fixed_clock, from_context, system_clock, unwrap_keyvals, Appender, Caller,
    Clock, ContextGuard, DeferredLogger, ErrorValue, ExitHook, LogLevel, LogLine, LogOptions,
    Logger, LoggerBuilder, LoggerError, LoggerMetrics, Output, OutputFormat, PanicGuard,
    RecoverMode, Result, ResultExt, Template, TimestampFormat, Value, WrappedError,
    MAX_ERROR_CHAIN,
};
