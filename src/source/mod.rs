mod fs_source;
mod memory_source;

use std::io;

pub use fs_source::FsSource;
pub use memory_source::MemorySource;

use crate::error::Result;

/// Where scraped files come from.
///
/// `list` failing means the whole source is unreachable and is reported as
/// `AppError::DirectoryUnavailable`; `read` failures are per file.
pub trait ProductSource: Send + Sync {
    /// Entry names in the order the underlying store yields them.
    fn list(&self) -> Result<Vec<String>>;

    fn read(&self, name: &str) -> io::Result<Vec<u8>>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}
