//! Reserved key names and default settings

/// Key name used to output current time.
pub const KEY_TIME: &str = "_t";
/// Key name used to output app name.
pub const KEY_APP: &str = "_a";
/// Key name used to output PID.
pub const KEY_PID: &str = "_p";
/// Key name used to output log level.
pub const KEY_LEVEL: &str = "_l";
/// Key name used to output unit/module name.
pub const KEY_UNIT: &str = "_u";
/// Key name used to output log message.
pub const KEY_MESSAGE: &str = "_m";
/// Key name used to output caller's function name.
pub const KEY_FUNC: &str = "_f";
/// Key name used to output caller's file and line.
pub const KEY_SOURCE: &str = "_s";
/// Key name used to output multiline stack trace.
pub const KEY_STACK: &str = "__";

/// Value substituted for the last key of an odd-length keyvals list.
pub const MISSING_VALUE: &str = "(MISSING)";

/// Placeholder for caller details which could not be resolved.
pub const UNKNOWN: &str = "???";

/// Template used for keys without a per-key template.
pub const DEFAULT_KEY_VAL_FORMAT: &str = " {key}={value}";

/// Time format used for `KEY_TIME` (`Jan  2 15:04:05.000000`).
pub const DEFAULT_TIME_FORMAT: &str = "%b %e %H:%M:%S%.6f";

/// Time format used for time values among keyvals.
pub const DEFAULT_TIME_VAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9f%:z";
