use crate::storage::LocalStorage;
use std::{
    collections::HashMap,
    sync::{
        Arc,
        Mutex,
    },
};

/// Clones share the same map, so a test can keep a handle and inspect what a
/// session wrote.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = items
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            items: Arc::new(Mutex::new(map)),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LocalStorage for InMemoryStorage {
    fn get_item(&self, key: &str) -> crate::Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> crate::Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> crate::Result<()> {
        self.lock().remove(key);
        Ok(())
    }

    fn keys(&self) -> crate::Result<Vec<String>> {
        Ok(self.lock().keys().cloned().collect())
    }
}
