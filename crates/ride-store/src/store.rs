//! Persistent storage for the record set.

use crate::error::StoreError;
use crate::records::Records;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};

/// File-backed store.
///
/// The whole record set is written as pretty JSON so an operator can
/// provision customers, drivers and proxy numbers by editing the file.
pub struct FileStore {
    storage_path: PathBuf,
}

impl FileStore {
    pub fn new(storage_path: PathBuf) -> Self {
        Self { storage_path }
    }

    /// Save the record set.
    ///
    /// Writes atomically using temp file + rename.
    pub async fn save(&self, records: &Records) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(records)?;

        if let Some(parent) = self.storage_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = self.storage_path.with_extension("tmp");
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, &self.storage_path).await?;

        debug!(
            "Saved records ({} bytes) to {:?}",
            data.len(),
            self.storage_path
        );
        Ok(())
    }

    /// Load the record set.
    ///
    /// Returns an empty set if the file doesn't exist.
    pub async fn load(&self) -> Result<Records, StoreError> {
        if !self.storage_path.exists() {
            info!(
                "Record file not found at {:?}, starting with empty records",
                self.storage_path
            );
            return Ok(Records::new());
        }

        let data = fs::read(&self.storage_path).await?;
        let records: Records = serde_json::from_slice(&data)?;

        info!(
            "Loaded {} customers, {} drivers, {} proxy numbers and {} rides from {:?}",
            records.customers().len(),
            records.drivers().len(),
            records.proxy_numbers().len(),
            records.rides().len(),
            self.storage_path
        );
        Ok(records)
    }

    /// Check if a record file exists.
    pub fn exists(&self) -> bool {
        self.storage_path.exists()
    }
}

/// In-memory store for testing or when persistence is disabled.
pub struct MemoryStore;

impl MemoryStore {
    /// "Save" does nothing for memory store.
    pub async fn save(&self, _records: &Records) -> Result<(), StoreError> {
        debug!("Memory store: save is a no-op");
        Ok(())
    }

    /// "Load" returns an empty record set.
    pub async fn load(&self) -> Result<Records, StoreError> {
        debug!("Memory store: returning empty records");
        Ok(Records::new())
    }
}

/// Storage backend with or without persistence.
pub enum Store {
    /// JSON file storage
    File(FileStore),
    /// In-memory only (no persistence)
    Memory(MemoryStore),
}

impl Store {
    /// File-backed store at the given path.
    pub fn file(storage_path: PathBuf) -> Self {
        Store::File(FileStore::new(storage_path))
    }

    /// Memory-only store.
    pub fn memory() -> Self {
        Store::Memory(MemoryStore)
    }

    /// Save the record set.
    pub async fn save(&self, records: &Records) -> Result<(), StoreError> {
        match self {
            Store::File(s) => s.save(records).await,
            Store::Memory(s) => s.save(records).await,
        }
    }

    /// Load the record set.
    pub async fn load(&self) -> Result<Records, StoreError> {
        match self {
            Store::File(s) => s.load().await,
            Store::Memory(s) => s.load().await,
        }
    }
}
