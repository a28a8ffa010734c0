//! Caller details for the `_u`, `_f`, `_s` and `__` fields

use super::keys::UNKNOWN;
use std::backtrace::Backtrace;
use std::panic::Location;
use std::path::Path;

/// Where a log call was made.
///
/// Emit methods are `#[track_caller]`, so a `Caller` captured inside them
/// points at the application's call site. The function name is only known
/// when the call went through one of the logging macros.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    location: &'static Location<'static>,
    function: Option<&'static str>,
}

impl Caller {
    #[track_caller]
    pub fn capture() -> Self {
        Self {
            location: Location::caller(),
            function: None,
        }
    }

    #[track_caller]
    pub fn with_function(function: &'static str) -> Self {
        Self {
            location: Location::caller(),
            function: Some(function),
        }
    }

    pub fn file(&self) -> &'static str {
        self.location.file()
    }

    pub fn line(&self) -> u32 {
        self.location.line()
    }

    /// Name of the directory holding the caller's source file.
    pub fn unit(&self) -> String {
        Path::new(self.location.file())
            .parent()
            .and_then(|dir| dir.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// `file.rs:LINE`
    pub fn source(&self) -> String {
        let file = Path::new(self.location.file())
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.location.file().to_string());
        format!("{}:{}", file, self.location.line())
    }

    /// `module::function`, without the crate path.
    pub fn function(&self) -> Option<String> {
        self.function.map(short_function_name)
    }
}

fn short_function_name(path: &str) -> String {
    let segments: Vec<&str> = path.split("::").collect();
    let closures = segments
        .iter()
        .rev()
        .take_while(|s| **s == "{{closure}}")
        .count();
    let keep = (closures + 2).min(segments.len());
    segments[segments.len() - keep..].join("::")
}

/// Capture the current thread's stack, dropping the `skip` innermost frames.
pub fn capture_stack(skip: usize) -> String {
    let trace = Backtrace::force_capture().to_string();
    if skip == 0 {
        return trace;
    }

    let mut frames_seen = 0;
    let mut kept = Vec::new();
    for line in trace.lines() {
        if is_frame_header(line) {
            frames_seen += 1;
        }
        if frames_seen > skip {
            kept.push(line);
        }
    }
    kept.join("\n")
}

/// Frame headers look like `  12: some::symbol`.
fn is_frame_header(line: &str) -> bool {
    let trimmed = line.trim_start();
    match trimmed.split_once(':') {
        Some((index, _)) => !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}
