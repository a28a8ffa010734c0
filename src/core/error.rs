//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Level name not recognized by the level parser
    #[error("Unknown log level: '{name}'")]
    InvalidLevel { name: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Error chain did not end within the hop limit
    #[error("Error chain exceeds {limit} hops")]
    ErrorChainTooDeep { limit: usize },

    /// Rendering a record panicked
    #[error("Failed to render log record: {message}")]
    RenderPanic { message: String },

    /// Normalized panic payload caught by `Logger::catch_panic`
    #[error("{message}")]
    Panicked { message: String },

    /// Error synthesized from a logged message which carried no error
    #[error("{0}")]
    Message(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an unknown level error
    pub fn invalid_level(name: impl Into<String>) -> Self {
        LoggerError::InvalidLevel { name: name.into() }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an error for a panic caught while rendering
    pub fn render_panic(message: impl Into<String>) -> Self {
        LoggerError::RenderPanic {
            message: message.into(),
        }
    }

    /// Create an error from a caught panic payload
    pub fn panicked(message: impl Into<String>) -> Self {
        LoggerError::Panicked {
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

/// Extract a printable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(e) = payload.downcast_ref::<LoggerError>() {
        e.to_string()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::invalid_level("loud");
        assert!(matches!(err, LoggerError::InvalidLevel { .. }));

        let err = LoggerError::config("prefix_keys", "too late to reconfigure");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::panicked("oops");
        assert!(matches!(err, LoggerError::Panicked { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::invalid_level("loud");
        assert_eq!(err.to_string(), "Unknown log level: 'loud'");

        let err = LoggerError::ErrorChainTooDeep { limit: 256 };
        assert_eq!(err.to_string(), "Error chain exceeds 256 hops");

        let err = LoggerError::Message("fail".to_string());
        assert_eq!(err.to_string(), "fail");

        let err = LoggerError::render_panic("boom");
        assert_eq!(err.to_string(), "Failed to render log record: boom");
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("static str");
        assert_eq!(panic_message(payload.as_ref()), "static str");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");

        let payload: Box<dyn std::any::Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "Unknown panic");
    }
}
