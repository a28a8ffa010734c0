//! Logging panics
//!
//! [`Logger::catch_panic`] runs a closure and logs a panic escaping it at
//! `ERR` with the stack. Whether the panic is then swallowed or keeps
//! unwinding is chosen per call with [`RecoverMode`].
//! [`Logger::panic_guard`] is the drop-guard form for code that can't be
//! wrapped in a closure.

use super::caller::Caller;
use super::error::{panic_message, LoggerError, Result};
use super::keys::KEY_STACK;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::value::Value;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverMode {
    /// Log and return `Err(LoggerError::Panicked)`.
    Suppress,
    /// Log and keep unwinding.
    Resume,
}

impl Logger {
    /// Run `f`, logging a panic escaping it.
    ///
    /// ```
    /// use structlog::{BufferAppender, LoggerError, Logger, RecoverMode};
    ///
    /// let buffer = BufferAppender::new();
    /// let log = Logger::zero(vec![]).set_output(buffer.clone());
    ///
    /// let res = log.catch_panic(RecoverMode::Suppress, vec![], || -> u32 { panic!("oops") });
    /// assert!(matches!(res, Err(LoggerError::Panicked { .. })));
    /// assert!(buffer.lines()[0].starts_with(" _m=oops"));
    /// ```
    #[track_caller]
    pub fn catch_panic<T, F>(&self, mode: RecoverMode, keyvals: Vec<Value>, f: F) -> Result<T>
    where
        F: FnOnce() -> T,
    {
        let caller = Caller::capture();
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => Ok(value),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                self.log_panic(caller, message.clone(), keyvals);
                match mode {
                    RecoverMode::Suppress => Err(LoggerError::panicked(message)),
                    RecoverMode::Resume => resume_unwind(payload),
                }
            }
        }
    }

    /// Guard which logs at `ERR` if it is dropped while the thread panics.
    #[track_caller]
    pub fn panic_guard(&self, keyvals: Vec<Value>) -> PanicGuard {
        PanicGuard {
            logger: self.clone(),
            caller: Caller::capture(),
            keyvals,
        }
    }

    fn log_panic(&self, caller: Caller, message: String, mut keyvals: Vec<Value>) {
        keyvals.push(Value::from(KEY_STACK));
        keyvals.push(Value::Auto);
        self.log_at(LogLevel::Error, caller, message, keyvals);
    }
}

/// See [`Logger::panic_guard`].
#[must_use = "the guard only logs panics while it is alive"]
pub struct PanicGuard {
    logger: Logger,
    caller: Caller,
    keyvals: Vec<Value>,
}

impl Drop for PanicGuard {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let keyvals = std::mem::take(&mut self.keyvals);
            self.logger.log_panic(self.caller, "panicked".to_string(), keyvals);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::BufferAppender;

    fn buffered() -> (Logger, BufferAppender) {
        let buffer = BufferAppender::new();
        let log = Logger::zero(vec![]).set_output(buffer.clone());
        (log, buffer)
    }

    #[test]
    fn test_no_panic_passes_value() {
        let (log, buffer) = buffered();
        let res = log.catch_panic(RecoverMode::Suppress, vec![], || 5);
        assert_eq!(res.unwrap(), 5);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_suppress_logs_with_stack() {
        let (log, buffer) = buffered();
        let res = log.catch_panic(RecoverMode::Suppress, vec!["job".into(), 3.into()], || {
            panic!("worker died")
        });

        match res {
            Err(LoggerError::Panicked { message }) => assert_eq!(message, "worker died"),
            other => panic!("unexpected {:?}", other.map(|_: ()| ())),
        }
        let record = &buffer.records()[0];
        assert_eq!(record.level, LogLevel::Error);
        assert!(record.text.starts_with(" _m=worker died job=3 __="), "{}", record.text);
    }

    #[test]
    fn test_resume_keeps_unwinding() {
        let (log, buffer) = buffered();
        let outer = catch_unwind(AssertUnwindSafe(|| {
            let _ = log.catch_panic(RecoverMode::Resume, vec![], || panic!("again"));
        }));
        assert!(outer.is_err());
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_guard_logs_only_when_panicking() {
        let (log, buffer) = buffered();
        {
            let _guard = log.panic_guard(vec![]);
        }
        assert!(buffer.is_empty());

        let res = catch_unwind(AssertUnwindSafe(|| {
            let _guard = log.panic_guard(vec!["step".into(), "load".into()]);
            panic!("bad input");
        }));
        assert!(res.is_err());
        assert!(buffer.lines()[0].starts_with(" _m=panicked step=load __="));
    }
}
