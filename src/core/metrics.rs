//! Logger metrics for observability
//!
//! Counters for monitoring an output's health: records written, records
//! lost to appender failures, records filtered by level and
//! self-diagnostics caused by caller misuse.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for a log output
///
/// # Example
///
/// ```
/// use structlog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dropped();
/// metrics.record_logged();
///
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.total_logged(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Records the appender failed to write
    dropped_count: AtomicU64,

    /// Records successfully handed to the appender
    total_logged: AtomicU64,

    /// Calls skipped because of the minimum level
    filtered_count: AtomicU64,

    /// Self-diagnostic records (odd keyvals, non-string keys, ...)
    diagnostics_count: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            dropped_count: AtomicU64::new(0),
            total_logged: AtomicU64::new(0),
            filtered_count: AtomicU64::new(0),
            diagnostics_count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn diagnostics_count(&self) -> u64 {
        self.diagnostics_count.load(Ordering::Relaxed)
    }

    /// Record a dropped record, returns the previous count
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) {
        self.total_logged.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_filtered(&self) {
        self.filtered_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_diagnostic(&self) {
        self.diagnostics_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Percentage of records lost to appender failures
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count();
        let total = dropped + self.total_logged();
        if total == 0 {
            0.0
        } else {
            (dropped as f64 / total as f64) * 100.0
        }
    }

    pub fn reset(&self) {
        self.dropped_count.store(0, Ordering::Relaxed);
        self.total_logged.store(0, Ordering::Relaxed);
        self.filtered_count.store(0, Ordering::Relaxed);
        self.diagnostics_count.store(0, Ordering::Relaxed);
    }
}
