//! Simple file-backed key-value cache
//!
//! Holds the daily price payload and the sensor token between runs. The
//! store is a flat JSON object on disk, loaded at startup and rewritten
//! on every put; values are opaque strings owned by the callers.

use crate::error::Result;
use crate::logging::get_logger;
use std::collections::HashMap;
use std::path::Path;

/// File-backed key-value store
pub struct CacheStore {
    file_path: String,
    entries: HashMap<String, String>,
    logger: crate::logging::StructuredLogger,
}

impl CacheStore {
    /// Open a cache store, loading existing entries if the file exists
    pub fn open(file_path: &str) -> Result<Self> {
        let logger = get_logger("cache");
        let path = Path::new(file_path);

        let entries = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        } else {
            logger.debug("No cache file found, starting empty");
            HashMap::new()
        };

        Ok(Self {
            file_path: file_path.to_string(),
            entries,
            logger,
        })
    }

    /// Get a cached value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Store a value and persist the store to disk
    pub fn put(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        let contents = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.file_path, contents)?;
        self.logger.debug(&format!("Cached entry {}", key));
        Ok(())
    }

    /// Remove a value and persist the store to disk
    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            let contents = serde_json::to_string_pretty(&self.entries)?;
            std::fs::write(&self.file_path, contents)?;
        }
        Ok(())
    }
}
