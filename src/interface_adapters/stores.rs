use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{FavoriteStore, StoreError, StoredGuestState};

type StateTable = HashMap<String, StoredGuestState>;

// In-memory favorite store, for embedding and for wiring tests.
#[derive(Clone, Default)]
pub struct InMemoryFavoriteStore {
    pub entries: Arc<Mutex<StateTable>>,
}

impl InMemoryFavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteStore for InMemoryFavoriteStore {
    async fn get_many(&self, keys: &[String]) -> Result<StateTable, StoreError> {
        let entries = self.entries.lock().await;
        Ok(pick(&entries, keys))
    }

    async fn set(&self, key: &str, value: StoredGuestState) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

// Favorite store persisted as one JSON object keyed by guest id. A missing file
// reads as an empty store. The mutex only serializes writers in this process;
// another process writing the same file can still race.
#[derive(Clone)]
pub struct JsonFileFavoriteStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileFavoriteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load(&self) -> Result<StateTable, String> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(StateTable::new()),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|err| format!("{}: {err}", self.path.display())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(StateTable::new()),
            Err(err) => Err(format!("{}: {err}", self.path.display())),
        }
    }

    async fn save(&self, table: &StateTable) -> Result<(), String> {
        let bytes = serde_json::to_vec_pretty(table).map_err(|err| err.to_string())?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| format!("{}: {err}", parent.display()))?;
        }

        // Write-then-rename so readers never observe a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|err| format!("{}: {err}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| format!("{}: {err}", self.path.display()))
    }
}

#[async_trait]
impl FavoriteStore for JsonFileFavoriteStore {
    async fn get_many(&self, keys: &[String]) -> Result<StateTable, StoreError> {
        let table = self.load().await.map_err(StoreError::Read)?;
        Ok(pick(&table, keys))
    }

    async fn set(&self, key: &str, value: StoredGuestState) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut table = self.load().await.map_err(StoreError::Write)?;
        table.insert(key.to_string(), value);
        self.save(&table).await.map_err(StoreError::Write)?;
        tracing::debug!(key, path = %self.path.display(), "favorite state written.");
        Ok(())
    }
}

fn pick(table: &StateTable, keys: &[String]) -> StateTable {
    keys.iter()
        .filter_map(|key| table.get(key).map(|state| (key.clone(), state.clone())))
        .collect()
}
