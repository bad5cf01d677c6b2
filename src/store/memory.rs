//! In-process list store.

use crate::store::{ListStore, StoreResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

type Lists = HashMap<String, Vec<Option<Vec<u8>>>>;

/// A [`ListStore`] kept in process memory.
///
/// Clones share the same lists, so several filters built from clones of one
/// store see each other's writes the way processes sharing a Redis server do.
#[derive(Debug, Clone, Default)]
pub struct MemoryListStore {
    lists: Arc<RwLock<Lists>>,
}

impl MemoryListStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a list exists at `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lists.read().contains_key(key)
    }

    /// Number of slots holding a value in the list at `key`.
    pub fn count_set(&self, key: &str) -> u64 {
        self.lists
            .read()
            .get(key)
            .map(|list| list.iter().filter(|slot| slot.is_some()).count() as u64)
            .unwrap_or(0)
    }
}

impl ListStore for MemoryListStore {
    fn len(&self, key: &str) -> StoreResult<u64> {
        Ok(self.lists.read().get(key).map(|list| list.len() as u64).unwrap_or(0))
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        self.lists.write().remove(key);
        Ok(())
    }

    fn push_unset(&self, key: &str, count: u64) -> StoreResult<()> {
        let mut lists = self.lists.write();
        let list = lists.entry(key.to_string()).or_default();
        list.resize(list.len() + count as usize, None);
        Ok(())
    }

    fn set(&self, key: &str, index: u64, value: &[u8]) -> StoreResult<()> {
        let mut lists = self.lists.write();
        let list = lists.get_mut(key).ok_or_else(|| format!("no such key: {}", key))?;
        let slot = list
            .get_mut(index as usize)
            .ok_or_else(|| format!("index out of range: {}", index))?;
        *slot = Some(value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str, index: u64) -> StoreResult<Option<Vec<u8>>> {
        Ok(self
            .lists
            .read()
            .get(key)
            .and_then(|list| list.get(index as usize))
            .cloned()
            .flatten())
    }
}
