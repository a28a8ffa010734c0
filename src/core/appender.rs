//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogLine, metrics::LoggerMetrics};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

pub trait Appender: Send {
    fn append(&mut self, line: &LogLine) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Appender shared by every logger configured to write to it, together
/// with the metrics for that destination.
#[derive(Clone)]
pub struct Output {
    appender: Arc<Mutex<Box<dyn Appender>>>,
    metrics: Arc<LoggerMetrics>,
}

impl Output {
    pub fn new<A: Appender + 'static>(appender: A) -> Self {
        Self::from_boxed(Box::new(appender))
    }

    pub fn from_boxed(appender: Box<dyn Appender>) -> Self {
        Self {
            appender: Arc::new(Mutex::new(appender)),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Deliver a line. Failures and panics stay inside: they are reported
    /// on stderr and counted, never returned to the logging call site.
    pub(crate) fn deliver(&self, line: &LogLine) {
        let mut appender = self.appender.lock();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            appender.append(line)
        }));

        match result {
            Ok(Ok(())) => {
                self.metrics.record_logged();
            }
            Ok(Err(e)) => {
                eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
                self.metrics.record_dropped();
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER CRITICAL] Appender '{}' panicked: {}",
                    appender.name(),
                    super::error::panic_message(panic_info.as_ref())
                );
                self.metrics.record_dropped();
            }
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.appender.lock().flush()
    }

    pub fn ptr_eq(&self, other: &Output) -> bool {
        Arc::ptr_eq(&self.appender, &other.appender)
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("appender", &self.appender.lock().name())
            .finish()
    }
}

impl<A: Appender + 'static> From<A> for Output {
    fn from(appender: A) -> Self {
        Output::new(appender)
    }
}
