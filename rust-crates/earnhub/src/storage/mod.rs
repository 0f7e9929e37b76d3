pub mod in_memory;
pub mod sled_storage;

pub use in_memory::InMemoryStorage;
pub use sled_storage::SledStorage;

/// String key/value store shaped like the browser's `localStorage`.
pub trait LocalStorage {
    /// retrieve the raw value stored under `key`
    fn get_item(&self, key: &str) -> crate::Result<Option<String>>;

    /// write or overwrite the value under `key`
    fn set_item(&mut self, key: &str, value: &str) -> crate::Result<()>;

    /// delete `key`; removing a missing key is not an error
    fn remove_item(&mut self, key: &str) -> crate::Result<()>;

    /// all keys currently stored, in no particular order
    fn keys(&self) -> crate::Result<Vec<String>>;

    fn contains_key(&self, key: &str) -> crate::Result<bool> {
        Ok(self.get_item(key)?.is_some())
    }
}
