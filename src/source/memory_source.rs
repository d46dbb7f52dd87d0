use std::{io, sync::RwLock};

use crate::error::{AppError, Result};

use super::ProductSource;

/// In-memory stand-in for a scrape directory.
///
/// Files keep insertion order, which is the order `list` reports them in.
/// `set_unavailable` makes the next listings fail the way a deleted
/// directory would.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: RwLock<Vec<(String, Vec<u8>)>>,
    unavailable: RwLock<bool>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.put(name, bytes);
        self
    }

    /// Adds a file, or replaces the contents of an existing one in place.
    pub fn put(&self, name: &str, bytes: impl Into<Vec<u8>>) {
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        let bytes = bytes.into();
        match files.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = bytes,
            None => files.push((name.to_string(), bytes)),
        }
    }

    pub fn remove(&self, name: &str) {
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        files.retain(|(n, _)| n != name);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().unwrap_or_else(|e| e.into_inner()) = unavailable;
    }
}

impl ProductSource for MemorySource {
    fn list(&self) -> Result<Vec<String>> {
        if *self.unavailable.read().unwrap_or_else(|e| e.into_inner()) {
            return Err(AppError::DirectoryUnavailable(
                "in-memory source marked unavailable".to_string(),
            ));
        }

        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        Ok(files.iter().map(|(name, _)| name.clone()).collect())
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
