//! Appender implementations

pub mod buffer;
pub mod console;
pub mod file;
pub mod writer;

pub use buffer::BufferAppender;
pub use console::{ConsoleAppender, ConsoleTarget};
pub use file::FileAppender;
pub use writer::WriterAppender;

pub use crate::core::Appender;
