use std::{
    fs, io,
    path::PathBuf,
};

use crate::error::{AppError, Result};

use super::ProductSource;

/// A directory of scrape output files on local disk.
#[derive(Debug, Clone)]
pub struct FsSource {
    dir: PathBuf,
}

impl FsSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ProductSource for FsSource {
    fn list(&self) -> Result<Vec<String>> {
        let unavailable =
            |e: io::Error| AppError::DirectoryUnavailable(format!("{}: {}", self.dir.display(), e));

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(unavailable)? {
            let entry = entry.map_err(unavailable)?;

            // Subdirectories are never source files, whatever their name.
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::warn!("Skipping non UTF-8 file name {:?}", raw),
            }
        }

        Ok(names)
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.dir.join(name))
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}
