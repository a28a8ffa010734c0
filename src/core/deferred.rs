//! Logging before the logger is configured
//!
//! Setup code in `main()` often has to report problems before flags or
//! config files decided how logging looks. A [`DeferredLogger`] queues
//! those calls and replays them through the real logger once it exists.
//!
//! ```
//! use structlog::{BufferAppender, DeferredLogger, Logger};
//!
//! let deferred = DeferredLogger::new();
//! deferred.info("reading config", vec!["path".into(), "app.toml".into()]);
//!
//! let buffer = BufferAppender::new();
//! let log = Logger::zero(vec![]).set_output(buffer.clone());
//! deferred.execute(&log);
//!
//! assert_eq!(buffer.lines(), vec![" _m=reading config path=app.toml"]);
//! ```

use super::caller::Caller;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::settings::ExitHook;
use super::value::{ErrorValue, Value};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

struct DeferredCall {
    level: LogLevel,
    caller: Caller,
    msg: Value,
    keyvals: Vec<Value>,
}

#[derive(Default)]
struct DeferredState {
    calls: Vec<DeferredCall>,
    /// Message and caller of the first fatal call.
    exit: Option<(String, Caller)>,
    exit_status: i32,
    executed: bool,
    exit_func: Option<ExitHook>,
}

/// Queue of log calls waiting for [`DeferredLogger::execute`].
///
/// Unlike [`Logger::fatal`], [`DeferredLogger::fatal`] does not exit: the
/// caller keeps running until `execute`, which logs the fatal message and
/// exits with status 1. Calls made after a fatal call are dropped.
#[derive(Default)]
pub struct DeferredLogger {
    state: Mutex<DeferredState>,
}

impl DeferredLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `exit` instead of `std::process::exit` from `execute`.
    pub fn set_exit_func<F>(&self, exit: F)
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.state.lock().exit_func = Some(Arc::new(exit));
    }

    fn push(&self, level: LogLevel, caller: Caller, msg: Value, keyvals: Vec<Value>) {
        let mut state = self.state.lock();
        if state.executed {
            panic!("must not be called after execute");
        }
        if state.exit.is_none() {
            state.calls.push(DeferredCall {
                level,
                caller,
                msg,
                keyvals,
            });
        }
    }

    #[track_caller]
    pub fn debug(&self, msg: impl Into<Value>, keyvals: Vec<Value>) {
        self.push(LogLevel::Debug, Caller::capture(), msg.into(), keyvals);
    }

    #[track_caller]
    pub fn info(&self, msg: impl Into<Value>, keyvals: Vec<Value>) {
        self.push(LogLevel::Info, Caller::capture(), msg.into(), keyvals);
    }

    #[track_caller]
    pub fn warn(&self, msg: impl Into<Value>, keyvals: Vec<Value>) {
        self.push(LogLevel::Warn, Caller::capture(), msg.into(), keyvals);
    }

    #[track_caller]
    pub fn print_err(&self, msg: impl Into<Value>, keyvals: Vec<Value>) {
        self.push(LogLevel::Error, Caller::capture(), msg.into(), keyvals);
    }

    /// Queue an `ERR` record and return the error right away, like
    /// [`Logger::err`].
    #[track_caller]
    pub fn err(&self, msg: impl Into<Value>, keyvals: Vec<Value>) -> ErrorValue {
        let msg = msg.into();
        let err = super::logger::first_error(&msg, &keyvals);
        self.push(LogLevel::Error, Caller::capture(), msg, keyvals);
        err
    }

    #[track_caller]
    pub fn print(&self, msg: impl fmt::Display) {
        self.push(LogLevel::Info, Caller::capture(), Value::display(msg), vec![]);
    }

    /// Remember the first fatal message. Only `execute` exits.
    #[track_caller]
    pub fn fatal(&self, msg: impl fmt::Display) {
        let caller = Caller::capture();
        let mut state = self.state.lock();
        if state.executed {
            panic!("must not be called after execute");
        }
        if state.exit.is_none() {
            state.exit = Some((msg.to_string(), caller));
            state.exit_status = 1;
        }
    }

    /// Log the queued calls through `log`, then exit if a fatal call was
    /// made.
    ///
    /// # Panics
    ///
    /// If called more than once.
    pub fn execute(&self, log: &Logger) {
        let (calls, exit, status, exit_func) = {
            let mut state = self.state.lock();
            if state.executed {
                panic!("must be called just once");
            }
            state.executed = true;
            (
                std::mem::take(&mut state.calls),
                state.exit.take(),
                state.exit_status,
                state.exit_func.take(),
            )
        };

        for call in calls {
            log.log_at(call.level, call.caller, call.msg, call.keyvals);
        }

        let Some((msg, caller)) = exit else {
            return;
        };
        log.log_at(LogLevel::Error, caller, msg, vec![]);
        match exit_func {
            Some(exit) => exit(status),
            None => std::process::exit(status),
        }
    }
}
