//! Values carried by keyvals and default fields
//!
//! This module provides:
//! - `Value`: a dynamically typed log value, including the `Auto` and `Nil`
//!   sentinels used by configuration
//! - `ErrorValue`: a shared, clonable handle to any error

use super::error::LoggerError;
use super::log_level::LogLevel;
use chrono::{DateTime, FixedOffset, TimeZone};
use std::error::Error as StdError;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Shared handle to an error value.
///
/// Any `std::error::Error + Send + Sync + 'static` converts into it, which
/// is why it does not implement `Error` itself. Use [`ErrorValue::as_dyn`]
/// or deref to reach the error.
#[derive(Clone)]
pub struct ErrorValue(Arc<dyn StdError + Send + Sync + 'static>);

impl ErrorValue {
    pub fn new<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        ErrorValue(Arc::new(err))
    }

    pub fn from_boxed(err: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        ErrorValue(Arc::from(err))
    }

    pub fn as_dyn(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.0
    }

    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// True if both handles point at the same error allocation.
    pub fn ptr_eq(&self, other: &ErrorValue) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<E> From<E> for ErrorValue
where
    E: StdError + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        ErrorValue::new(err)
    }
}

impl Deref for ErrorValue {
    type Target = dyn StdError + Send + Sync + 'static;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl fmt::Debug for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Adapter which lets an `ErrorValue` travel as a boxed std error.
pub(crate) struct SharedError(pub(crate) ErrorValue);

impl fmt::Display for SharedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for SharedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl StdError for SharedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.as_dyn().source()
    }
}

impl From<ErrorValue> for Box<dyn StdError + Send + Sync + 'static> {
    fn from(err: ErrorValue) -> Self {
        Box::new(SharedError(err))
    }
}

/// Value type for keyvals and default fields
#[derive(Clone, Debug)]
pub enum Value {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Time(DateTime<FixedOffset>),
    Error(ErrorValue),
    /// Ask the logger to generate the value (unit, time, stack).
    Auto,
    /// Absence marker: disables a default field, including inherited ones.
    Nil,
}

impl Value {
    /// Wrap any error.
    pub fn error<E>(err: E) -> Self
    where
        E: Into<ErrorValue>,
    {
        Value::Error(err.into())
    }

    /// Stringify anything printable.
    pub fn display(value: impl fmt::Display) -> Self {
        Value::Str(value.to_string())
    }

    /// Stringify anything debuggable.
    pub fn debug(value: impl fmt::Debug) -> Self {
        Value::Str(format!("{:?}", value))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Value::Auto)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            Value::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Debug-style rendering: strings are quoted, everything else as Display.
    pub fn to_debug_string(&self) -> String {
        match self {
            Value::Str(s) => format!("{:?}", s),
            Value::Error(e) => format!("{:?}", e.to_string()),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Time(t) => write!(f, "{}", t.to_rfc3339()),
            Value::Error(e) => write!(f, "{}", e),
            Value::Auto => f.write_str("(AUTO)"),
            Value::Nil => f.write_str("null"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a.ptr_eq(b),
            (Value::Auto, Value::Auto) | (Value::Nil, Value::Nil) => true,
            _ => false,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(c.to_string())
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty, $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v as $target)
                }
            }
        )+
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64, isize);
impl_from_int!(Uint, u64, u8, u16, u32, u64, usize);

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(t: DateTime<Tz>) -> Self {
        Value::Time(t.fixed_offset())
    }
}

impl From<LogLevel> for Value {
    fn from(level: LogLevel) -> Self {
        Value::Str(level.to_str().to_string())
    }
}

impl From<ErrorValue> for Value {
    fn from(err: ErrorValue) -> Self {
        Value::Error(err)
    }
}

impl From<LoggerError> for Value {
    fn from(err: LoggerError) -> Self {
        Value::error(err)
    }
}

impl From<std::io::Error> for Value {
    fn from(err: std::io::Error) -> Self {
        Value::error(err)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}
