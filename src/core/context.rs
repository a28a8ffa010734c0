//! Per-thread current logger
//!
//! Instead of a process-wide default logger, code that needs "the logger
//! for this request" asks [`from_context`]. A caller makes a logger current
//! with [`Logger::enter`] for as long as the returned guard lives.

use super::logger::Logger;
use std::cell::RefCell;
use std::marker::PhantomData;

thread_local! {
    static CURRENT: RefCell<Option<Logger>> = const { RefCell::new(None) };
}

/// Restores the previously current logger when dropped.
///
/// Guards must be dropped in reverse order of creation, which scoping
/// gives for free. The guard is bound to the thread that created it.
#[must_use = "the logger stops being current when the guard is dropped"]
pub struct ContextGuard {
    previous: Option<Logger>,
    _not_send: PhantomData<*const ()>,
}

impl Logger {
    /// Make this logger current for the thread until the guard is dropped.
    ///
    /// ```
    /// use structlog::{from_context, Logger};
    ///
    /// let request_log = Logger::zero(vec!["req".into(), 7.into()]);
    /// {
    ///     let _guard = request_log.enter();
    ///     assert!(from_context(None).ptr_eq(&request_log));
    /// }
    /// assert!(!from_context(None).ptr_eq(&request_log));
    /// ```
    pub fn enter(&self) -> ContextGuard {
        let previous = CURRENT.with(|current| current.borrow_mut().replace(self.clone()));
        ContextGuard {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|current| *current.borrow_mut() = previous);
    }
}

/// The innermost entered logger, else `default`, else a new
/// [`Logger::standard`].
pub fn from_context(default: Option<&Logger>) -> Logger {
    CURRENT
        .with(|current| current.borrow().clone())
        .or_else(|| default.cloned())
        .unwrap_or_else(|| Logger::standard(vec![]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_guards() {
        let outer = Logger::zero(vec![]);
        let inner = outer.derive(vec![]);
        let fallback = Logger::zero(vec![]);

        assert!(from_context(Some(&fallback)).ptr_eq(&fallback));
        {
            let _outer = outer.enter();
            assert!(from_context(Some(&fallback)).ptr_eq(&outer));
            {
                let _inner = inner.enter();
                assert!(from_context(None).ptr_eq(&inner));
            }
            assert!(from_context(None).ptr_eq(&outer));
        }
        assert!(from_context(Some(&fallback)).ptr_eq(&fallback));
    }

    #[test]
    fn test_other_threads_unaffected() {
        let log = Logger::zero(vec![]);
        let _guard = log.enter();
        let fallback = Logger::zero(vec![]);
        let f = fallback.clone();
        let seen = std::thread::spawn(move || from_context(Some(&f)).ptr_eq(&f))
            .join()
            .unwrap();
        assert!(seen);
    }
}
