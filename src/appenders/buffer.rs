//! In-memory appender for tests

use crate::core::{Appender, LogLine, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Keeps every record in memory.
///
/// Clones share the same storage, so keep one clone and hand the other to
/// the logger.
///
/// ```
/// use structlog::{BufferAppender, Logger};
///
/// let buffer = BufferAppender::new();
/// let log = Logger::zero(vec![]).set_output(buffer.clone());
/// log.info("hello", vec!["user".into(), "bob".into()]);
///
/// assert_eq!(buffer.contents(), " _m=hello user=bob\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BufferAppender {
    records: Arc<Mutex<Vec<LogLine>>>,
}

impl BufferAppender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogLine> {
        self.records.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.records.lock().iter().map(|r| r.text.clone()).collect()
    }

    /// All lines, each followed by a newline.
    pub fn contents(&self) -> String {
        self.records
            .lock()
            .iter()
            .fold(String::new(), |mut out, r| {
                out.push_str(&r.text);
                out.push('\n');
                out
            })
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Appender for BufferAppender {
    fn append(&mut self, line: &LogLine) -> Result<()> {
        self.records.lock().push(line.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "buffer"
    }
}
