use crate::domain::model::FavoritesSet;
use crate::domain::ports::FavoritesStore;
use crate::utils::error::{BrowserError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

fn parse_payload(payload: &str, source: &str) -> FavoritesSet {
    match serde_json::from_str::<FavoritesSet>(payload) {
        Ok(favorites) => favorites,
        Err(e) => {
            tracing::warn!("⚠️ Ignoring malformed favorites in {}: {}", source, e);
            FavoritesSet::new()
        }
    }
}

/// Favorites stored as a JSON array in `<base_path>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(base_path: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: base_path.as_ref().join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesStore for JsonFileStore {
    fn load(&self) -> FavoritesSet {
        match fs::read_to_string(&self.path) {
            Ok(payload) => parse_payload(&payload, &self.path.display().to_string()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No favorites file at {}", self.path.display());
                FavoritesSet::new()
            }
            Err(e) => {
                tracing::warn!("⚠️ Could not read {}: {}", self.path.display(), e);
                FavoritesSet::new()
            }
        }
    }

    fn save(&self, favorites: &FavoritesSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_string_pretty(favorites)?;

        // 先寫暫存檔再改名，避免中途失敗留下半個檔案
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, payload)?;
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!("Saved {} favorites to {}", favorites.len(), self.path.display());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryRecord {
    payload: Option<String>,
    fail_writes: bool,
}

/// Shared in-memory record. Clones see the same payload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Arc<Mutex<MemoryRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: &str) -> Self {
        let store = Self::new();
        store.record().payload = Some(payload.to_string());
        store
    }

    pub fn payload(&self) -> Option<String> {
        self.record().payload.clone()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.record().fail_writes = fail;
    }

    fn record(&self) -> std::sync::MutexGuard<'_, MemoryRecord> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FavoritesStore for MemoryStore {
    fn load(&self) -> FavoritesSet {
        match self.payload() {
            Some(payload) => parse_payload(&payload, "memory store"),
            None => FavoritesSet::new(),
        }
    }

    fn save(&self, favorites: &FavoritesSet) -> Result<()> {
        let mut record = self.record();
        if record.fail_writes {
            return Err(BrowserError::IoError(std::io::Error::new(
                ErrorKind::PermissionDenied,
                "memory store is read-only",
            )));
        }
        record.payload = Some(serde_json::to_string(favorites)?);
        Ok(())
    }
}
