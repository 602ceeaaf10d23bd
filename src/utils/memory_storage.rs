//! In-memory key-value store for testing and single-process use

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory [`KeyValueStore`]; clones share the same data
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> BillingResult<()> {
        self.entries
            .write()
            .map_err(|_| poisoned())?
            .clear();
        Ok(())
    }

    /// Number of keys held
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether no keys are held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> BillingError {
    BillingError::Storage("memory store lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> BillingResult<Option<String>> {
        Ok(self.entries.read().map_err(|_| poisoned())?.get(key).cloned())
    }

    fn write(&self, key: &str, value: String) -> BillingResult<()> {
        self.entries
            .write()
            .map_err(|_| poisoned())?
            .insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> BillingResult<()> {
        self.entries.write().map_err(|_| poisoned())?.remove(key);
        Ok(())
    }
}
