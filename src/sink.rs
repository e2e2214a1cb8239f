//! Destinations for finished documents.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Receives each serialized document as soon as its batch is done.
pub trait DocumentSink {
    /// Take ownership of one document.
    fn deliver(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<()>;
}

/// Writes documents into a directory, creating it on first delivery.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Create a sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in delivery order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DocumentSink for DirectorySink {
    fn deliver(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, &bytes)?;
        log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        self.written.push(path);
        Ok(())
    }
}

/// Keeps documents in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// `(file_name, bytes)` in delivery order
    pub documents: Vec<(String, Vec<u8>)>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of delivered documents.
    pub fn file_names(&self) -> Vec<&str> {
        self.documents.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl DocumentSink for MemorySink {
    fn deliver(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        log::debug!("Kept {} in memory ({} bytes)", file_name, bytes.len());
        self.documents.push((file_name.to_string(), bytes));
        Ok(())
    }
}
