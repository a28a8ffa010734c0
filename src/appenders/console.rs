//! Console appender implementation

use crate::core::{Appender, LogLine, OutputFormat, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

/// Writes each line to stderr (or stdout).
///
/// With colors enabled, text lines of `WRN` and `ERR` records are colored.
pub struct ConsoleAppender {
    use_colors: bool,
    target: ConsoleTarget,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            use_colors: cfg!(feature = "console"),
            target: ConsoleTarget::Stderr,
        }
    }

    /// Uncolored stderr output.
    pub fn plain() -> Self {
        Self::with_colors(false)
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            target: ConsoleTarget::Stderr,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: ConsoleTarget) -> Self {
        self.target = target;
        self
    }

    #[cfg(feature = "console")]
    fn decorate(&self, line: &LogLine) -> String {
        if self.use_colors && line.format == OutputFormat::Text {
            if let Some(color) = line.level.color_code() {
                return line.text.as_str().color(color).to_string();
            }
        }
        line.text.clone()
    }

    #[cfg(not(feature = "console"))]
    fn decorate(&self, line: &LogLine) -> String {
        line.text.clone()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, line: &LogLine) -> Result<()> {
        let text = self.decorate(line);
        match self.target {
            ConsoleTarget::Stderr => writeln!(std::io::stderr().lock(), "{}", text)?,
            ConsoleTarget::Stdout => writeln!(std::io::stdout().lock(), "{}", text)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stderr => std::io::stderr().flush()?,
            ConsoleTarget::Stdout => std::io::stdout().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
