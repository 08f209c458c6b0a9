//! Unlock watermark persistence
//!
//! The highest level ever reached is read once at startup and written on every
//! new unlock. Stores:
//! - `MemoryStore`: in-process, for tests and throwaway sessions
//! - `JsonFileStore`: a single JSON integer on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored watermark is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("storage backend rejected the write: {0}")]
    Backend(String),
}

/// Load/save the unlock watermark
pub trait UnlockStore {
    /// Stored watermark; `Ok(1)` when nothing has been saved yet
    fn load_highest_unlocked(&self) -> Result<u32, StoreError>;

    fn save_highest_unlocked(&mut self, highest: u32) -> Result<(), StoreError>;
}

/// Keeps the watermark in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    highest: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_highest(highest: u32) -> Self {
        Self {
            highest: Some(highest),
        }
    }
}

impl UnlockStore for MemoryStore {
    fn load_highest_unlocked(&self) -> Result<u32, StoreError> {
        Ok(self.highest.unwrap_or(1))
    }

    fn save_highest_unlocked(&mut self, highest: u32) -> Result<(), StoreError> {
        self.highest = Some(highest);
        Ok(())
    }
}

/// Watermark stored as a JSON integer in a file
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl UnlockStore for JsonFileStore {
    fn load_highest_unlocked(&self) -> Result<u32, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(json.trim())?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(1),
            Err(e) => Err(e.into()),
        }
    }

    fn save_highest_unlocked(&mut self, highest: u32) -> Result<(), StoreError> {
        let json = serde_json::to_string(&highest)?;
        std::fs::write(&self.path, json)?;
        log::debug!("Saved unlock watermark {} to {}", highest, self.path.display());
        Ok(())
    }
}

/// Watermark stored under a LocalStorage key
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "snakeHighestLevel";

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl UnlockStore for LocalStorageStore {
    fn load_highest_unlocked(&self) -> Result<u32, StoreError> {
        let storage = Self::storage()?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(value)) => Ok(serde_json::from_str(value.trim())?),
            Ok(None) => Ok(1),
            Err(e) => Err(StoreError::Backend(format!("{:?}", e))),
        }
    }

    fn save_highest_unlocked(&mut self, highest: u32) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        storage
            .set_item(Self::STORAGE_KEY, &highest.to_string())
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))?;
        log::debug!("Saved unlock watermark {}", highest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_defaults_to_first_level() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load_highest_unlocked().unwrap(), 1);
        store.save_highest_unlocked(12).unwrap();
        assert_eq!(store.load_highest_unlocked().unwrap(), 12);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_json_file_store() {
        let path = std::env::temp_dir().join(format!(
            "snake-levels-unlock-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load_highest_unlocked().unwrap(), 1);
        store.save_highest_unlocked(37).unwrap();
        assert_eq!(JsonFileStore::new(&path).load_highest_unlocked().unwrap(), 37);

        std::fs::write(&path, "thirty-seven").unwrap();
        assert!(matches!(
            store.load_highest_unlocked(),
            Err(StoreError::Parse(_))
        ));
        let _ = std::fs::remove_file(&path);
    }
}
