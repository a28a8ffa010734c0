//! Errors carrying keyvals
//!
//! A [`WrappedError`] attaches key/value pairs to an error so they show up
//! in the record of whichever logger finally reports it. Wrapping can be
//! layered; the renderer walks the `source()` chain and collects the pairs
//! of every `WrappedError` it meets.

use super::error::{LoggerError, Result};
use super::keys::MISSING_VALUE;
use super::value::{ErrorValue, SharedError, Value};
use std::error::Error as StdError;
use std::fmt;

/// Maximum number of `source()` hops followed when collecting keyvals.
pub const MAX_ERROR_CHAIN: usize = 256;

/// An error plus the keyvals attached to it.
///
/// Display is the inner error's; `source()` is the inner error itself, so
/// the usual error reporting tools see through the wrapper.
#[derive(Clone)]
pub struct WrappedError {
    inner: ErrorValue,
    keyvals: Vec<Value>,
}

impl WrappedError {
    /// Wrap without validation. Odd keyvals get a trailing `(MISSING)`;
    /// use [`Logger::wrap_err`](crate::Logger::wrap_err) to have them reported.
    pub fn new(err: impl Into<ErrorValue>, mut keyvals: Vec<Value>) -> Self {
        if keyvals.len() % 2 != 0 {
            keyvals.push(Value::from(MISSING_VALUE));
        }
        Self {
            inner: err.into(),
            keyvals,
        }
    }

    pub fn inner(&self) -> &ErrorValue {
        &self.inner
    }

    /// Pairs attached at this layer only.
    pub fn keyvals(&self) -> &[Value] {
        &self.keyvals
    }

    pub fn into_inner(self) -> ErrorValue {
        self.inner
    }
}

impl fmt::Display for WrappedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for WrappedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedError")
            .field("inner", &self.inner)
            .field("keyvals", &self.keyvals)
            .finish()
    }
}

impl StdError for WrappedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.inner.as_dyn())
    }
}

impl From<WrappedError> for Value {
    fn from(err: WrappedError) -> Self {
        Value::error(err)
    }
}

/// Keyvals attached anywhere along `err`'s chain, innermost layer first.
///
/// Resolving the result last-wins gives outer layers precedence over inner
/// ones. Pairs of a single layer keep their order.
pub fn unwrap_keyvals(err: &(dyn StdError + 'static)) -> Vec<Value> {
    collect_keyvals(err).unwrap_or_default()
}

pub(crate) fn collect_keyvals(err: &(dyn StdError + 'static)) -> Result<Vec<Value>> {
    let mut keyvals: Vec<Value> = Vec::new();
    let mut current = Some(err);
    let mut hops = 0;

    while let Some(e) = current {
        if hops == MAX_ERROR_CHAIN {
            return Err(LoggerError::ErrorChainTooDeep {
                limit: MAX_ERROR_CHAIN,
            });
        }
        hops += 1;

        if let Some(shared) = e.downcast_ref::<SharedError>() {
            current = Some(shared.0.as_dyn());
            continue;
        }
        if let Some(wrapped) = e.downcast_ref::<WrappedError>() {
            let mut layer = wrapped.keyvals.clone();
            layer.append(&mut keyvals);
            keyvals = layer;
        }
        current = e.source();
    }
    Ok(keyvals)
}

/// Attach keyvals to the error of a `Result`.
///
/// ```
/// use structlog::{keyvals, ResultExt, WrappedError};
///
/// fn open(path: &str) -> Result<std::fs::File, WrappedError> {
///     std::fs::File::open(path).with_keyvals(keyvals!["path", path])
/// }
///
/// assert!(open("/definitely/not/here").is_err());
/// ```
pub trait ResultExt<T> {
    fn with_keyvals(self, keyvals: Vec<Value>) -> std::result::Result<T, WrappedError>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ErrorValue>,
{
    fn with_keyvals(self, keyvals: Vec<Value>) -> std::result::Result<T, WrappedError> {
        self.map_err(|err| WrappedError::new(err, keyvals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn eof() -> io::Error {
        io::Error::new(io::ErrorKind::UnexpectedEof, "EOF")
    }

    #[derive(Debug)]
    struct Outer(io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "outer: {}", self.0)
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_plain_error_has_no_keyvals() {
        assert!(unwrap_keyvals(&eof()).is_empty());
    }

    #[test]
    fn test_layers_innermost_first() {
        let inner = WrappedError::new(eof(), vec!["a".into(), 1.into(), "b".into(), 2.into()]);
        let outer = WrappedError::new(inner, vec!["a".into(), 3.into(), "c".into(), 4.into()]);

        let kv = unwrap_keyvals(&outer);
        let expected: Vec<Value> = vec![
            "a".into(),
            1.into(),
            "b".into(),
            2.into(),
            "a".into(),
            3.into(),
            "c".into(),
            4.into(),
        ];
        assert_eq!(kv, expected);
        assert_eq!(outer.to_string(), "EOF");
    }

    #[test]
    fn test_walks_foreign_sources() {
        struct Middle(WrappedError);
        impl fmt::Debug for Middle {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("Middle")
            }
        }
        impl fmt::Display for Middle {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("middle")
            }
        }
        impl StdError for Middle {
            fn source(&self) -> Option<&(dyn StdError + 'static)> {
                Some(&self.0)
            }
        }

        let inner = WrappedError::new(Outer(eof()), vec!["k".into(), "v".into()]);
        let err = Middle(inner);
        assert_eq!(unwrap_keyvals(&err), vec![Value::from("k"), Value::from("v")]);
    }

    #[test]
    fn test_sees_through_boxed_error_value() {
        let wrapped = WrappedError::new(eof(), vec!["k".into(), 1.into()]);
        let boxed: Box<dyn StdError + Send + Sync> = ErrorValue::new(wrapped).into();
        assert_eq!(unwrap_keyvals(boxed.as_ref()), vec![Value::from("k"), Value::from(1)]);
    }

    #[test]
    fn test_odd_keyvals_filled() {
        let wrapped = WrappedError::new(eof(), vec!["lonely".into()]);
        assert_eq!(wrapped.keyvals(), &[Value::from("lonely"), Value::from(MISSING_VALUE)]);
    }

    #[test]
    fn test_chain_bound() {
        let mut err = WrappedError::new(eof(), vec!["depth".into(), 0.into()]);
        for depth in 1..=MAX_ERROR_CHAIN {
            err = WrappedError::new(err, vec!["depth".into(), depth.into()]);
        }
        assert!(matches!(
            collect_keyvals(&err),
            Err(LoggerError::ErrorChainTooDeep { limit: MAX_ERROR_CHAIN })
        ));
        assert!(unwrap_keyvals(&err).is_empty());
    }

    #[test]
    fn test_result_ext() {
        let res: std::result::Result<(), io::Error> = Err(eof());
        let err = res.with_keyvals(vec!["file".into(), "a.txt".into()]).unwrap_err();
        assert_eq!(err.keyvals(), &[Value::from("file"), Value::from("a.txt")]);

        let ok: std::result::Result<u8, io::Error> = Ok(7);
        assert_eq!(ok.with_keyvals(vec![]).unwrap(), 7);
    }
}
