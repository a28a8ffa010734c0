//! Logging macros.
//!
//! The macros do what the matching [`Logger`](crate::Logger) methods do
//! and also record the calling function's name for the `_f` field, which
//! the methods can't know.
//!
//! # Examples
//!
//! ```
//! use structlog::prelude::*;
//! use structlog::{info, warn};
//!
//! let buffer = BufferAppender::new();
//! let log = Logger::zero(vec![])
//!     .set_output(buffer.clone())
//!     .set_suffix_keys(["_f"]);
//!
//! info!(log, "server started");
//! warn!(log, "slow request", "took_ms", 950, "path", "/api");
//!
//! let lines = buffer.lines();
//! assert!(lines[0].starts_with(" _m=server started _f="));
//! assert!(lines[1].starts_with(" _m=slow request took_ms=950 path=/api _f="));
//! ```

/// Build a `Vec<Value>` from anything convertible into [`Value`](crate::Value).
///
/// ```
/// use structlog::{keyvals, Value};
///
/// let kv = keyvals!["user", "bob", "attempt", 3];
/// assert_eq!(kv, vec![Value::from("user"), Value::from("bob"), Value::from("attempt"), Value::from(3)]);
/// ```
#[macro_export]
macro_rules! keyvals {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($kv:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($kv)),+]
    };
}

/// Full path of the function the macro is expanded in.
#[doc(hidden)]
#[macro_export]
macro_rules! __function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        match name.strip_suffix("::f") {
            Some(stripped) => stripped,
            None => name,
        }
    }};
}

/// Caller of the macro, including its function name.
#[doc(hidden)]
#[macro_export]
macro_rules! __caller {
    () => {
        $crate::Caller::with_function($crate::__function_name!())
    };
}

/// Log at the given level.
///
/// ```
/// # use structlog::prelude::*;
/// # let log = Logger::zero(vec![]).set_output(BufferAppender::new());
/// use structlog::log;
/// log!(log, LogLevel::Info, "simple message");
/// log!(log, LogLevel::Error, "request failed", "status", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(, $kv:expr)* $(,)?) => {
        $logger.log_at($level, $crate::__caller!(), $msg, $crate::keyvals![$($kv),*])
    };
}

/// Log at `dbg`.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log at `inf`.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log at `WRN`.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log at `ERR`.
#[macro_export]
macro_rules! print_err {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log at `ERR` and evaluate to the error, see [`Logger::err`](crate::Logger::err).
///
/// ```
/// # use structlog::prelude::*;
/// # let log = Logger::zero(vec![]).set_output(BufferAppender::new());
/// use structlog::err;
///
/// fn check(log: &Logger, n: i32) -> std::result::Result<(), ErrorValue> {
///     if n < 0 {
///         return Err(err!(log, "negative input", "n", n));
///     }
///     Ok(())
/// }
///
/// assert_eq!(check(&log, -1).unwrap_err().to_string(), "negative input");
/// ```
#[macro_export]
macro_rules! err {
    ($logger:expr, $msg:expr $(, $kv:expr)* $(,)?) => {
        $logger.err_at($crate::__caller!(), $msg, $crate::keyvals![$($kv),*])
    };
}

#[cfg(test)]
mod tests {
    use crate::appenders::BufferAppender;
    use crate::core::keys::KEY_FUNC;
    use crate::{LogLevel, Logger, Value};

    fn buffered() -> (Logger, BufferAppender) {
        let buffer = BufferAppender::new();
        let log = Logger::zero(vec![])
            .set_output(buffer.clone())
            .set_suffix_keys([KEY_FUNC]);
        (log, buffer)
    }

    #[test]
    fn test_function_name() {
        let (log, buffer) = buffered();
        crate::info!(log, "hello");
        assert_eq!(buffer.lines(), vec![" _m=hello _f=tests::test_function_name"]);
    }

    #[test]
    fn test_function_name_in_closure() {
        let (log, buffer) = buffered();
        let run = || crate::debug!(log, "inside");
        run();
        assert_eq!(
            buffer.lines(),
            vec![" _m=inside _f=tests::test_function_name_in_closure::{{closure}}"]
        );
    }

    #[test]
    fn test_keyvals_and_levels() {
        let (log, buffer) = buffered();
        crate::warn!(log, "w", "a", 1, "b", true);
        crate::print_err!(log, "e");
        let levels: Vec<LogLevel> = buffer.records().iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![LogLevel::Warn, LogLevel::Error]);
        assert!(buffer.lines()[0].starts_with(" _m=w a=1 b=true _f="));
    }

    #[test]
    fn test_err_macro() {
        let (log, _buffer) = buffered();
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err = crate::err!(log, "write failed", "err", io);
        assert_eq!(err.to_string(), "disk");
    }

    #[test]
    fn test_keyvals_macro() {
        let empty = crate::keyvals![];
        assert!(empty.is_empty());
        assert_eq!(crate::keyvals!["k", 1u8,], vec![Value::from("k"), Value::Uint(1)]);
    }
}
