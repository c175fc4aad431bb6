use std::sync::RwLock;

use skywatch_types::Aircraft;

use crate::error::{StoreError, StoreResult};
use crate::traits::SnapshotBackend;

/// In-memory, `Vec`-based aircraft store.
///
/// Intended for tests and embedding. Records live behind a `RwLock` and are
/// cloned on every load and save, so it behaves exactly like the file
/// backends without touching disk.
pub struct InMemoryAircraftStore {
    records: RwLock<Vec<Aircraft>>,
}

impl InMemoryAircraftStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a store pre-populated with `records`, kept as given.
    pub fn with_records(records: Vec<Aircraft>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Number of records currently held, or `0` if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Returns `true` if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryAircraftStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotBackend for InMemoryAircraftStore {
    fn load(&self) -> StoreResult<Vec<Aircraft>> {
        let records = self.records.read().map_err(|_| StoreError::Poisoned)?;
        Ok(records.clone())
    }

    fn save(&self, records: &[Aircraft]) -> StoreResult<()> {
        let mut guard = self.records.write().map_err(|_| StoreError::Poisoned)?;
        *guard = records.to_vec();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

impl std::fmt::Debug for InMemoryAircraftStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAircraftStore")
            .field("record_count", &self.len())
            .finish()
    }
}
