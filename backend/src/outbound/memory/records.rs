//! Keyed record table shared by the in-memory repositories.

use std::collections::HashMap;
use std::hash::Hash;

use tokio::sync::RwLock;

/// Records keyed by id behind an async lock.
#[derive(Debug)]
pub(super) struct Records<K, V> {
    rows: RwLock<HashMap<K, V>>,
}

impl<K, V> Default for Records<K, V> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Records<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Snapshot of every record, unordered.
    pub(super) async fn all(&self) -> Vec<V> {
        self.rows.read().await.values().cloned().collect()
    }

    pub(super) async fn get(&self, key: &K) -> Option<V> {
        self.rows.read().await.get(key).cloned()
    }

    /// First record matching `predicate`.
    pub(super) async fn find(&self, predicate: impl Fn(&V) -> bool) -> Option<V> {
        self.rows.read().await.values().find(|v| predicate(v)).cloned()
    }

    /// Whether any record matches `predicate`.
    pub(super) async fn any(&self, predicate: impl Fn(&V) -> bool) -> bool {
        self.rows.read().await.values().any(predicate)
    }

    /// Insert or replace.
    pub(super) async fn put(&self, key: K, value: V) {
        self.rows.write().await.insert(key, value);
    }

    /// Insert only when `clashes` matches no stored record.
    ///
    /// Returns `false` (and stores nothing) on a clash. The check and the
    /// write happen under one lock.
    pub(super) async fn put_unique(&self, key: K, value: V, clashes: impl Fn(&V) -> bool) -> bool {
        let mut rows = self.rows.write().await;
        if rows.values().any(clashes) {
            return false;
        }
        rows.insert(key, value);
        true
    }

    /// Replace an existing record; absent keys are left absent.
    pub(super) async fn replace(&self, key: &K, value: V) {
        if let Some(slot) = self.rows.write().await.get_mut(key) {
            *slot = value;
        }
    }

    pub(super) async fn remove(&self, key: &K) -> bool {
        self.rows.write().await.remove(key).is_some()
    }

    /// Remove every record matching `predicate`, returning how many went.
    pub(super) async fn remove_where(&self, predicate: impl Fn(&V) -> bool) -> usize {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|_, v| !predicate(v));
        before - rows.len()
    }

    pub(super) async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}
