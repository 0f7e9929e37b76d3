// Sled-backed local storage, one tree holding every key.
use crate::storage::LocalStorage;
use anyhow::Context;
use sled::{
    Config,
    Db,
    Tree,
};
use std::path::Path;

const LOCAL_STORAGE_TREE: &str = "local_storage";

#[derive(Clone)]
pub struct SledStorage {
    tree: Tree,
}

impl SledStorage {
    pub fn new(db: &Db) -> crate::Result<Self> {
        let tree = db
            .open_tree(LOCAL_STORAGE_TREE)
            .context("open local_storage tree")?;
        Ok(Self { tree })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let config = Config::default().path(path);
        let db = config.open().context("open sled database")?;
        Self::new(&db)
    }

    /// Drops every stored key.
    pub fn clear(&mut self) -> crate::Result<()> {
        self.tree.clear().context("clear local storage")?;
        self.tree.flush().context("flush local storage after clear")?;
        Ok(())
    }
}

impl LocalStorage for SledStorage {
    fn get_item(&self, key: &str) -> crate::Result<Option<String>> {
        let Some(value) = self
            .tree
            .get(key.as_bytes())
            .with_context(|| format!("read local storage key {key}"))?
        else {
            return Ok(None);
        };
        let text = String::from_utf8(value.to_vec())
            .with_context(|| format!("local storage value for {key} is not UTF-8"))?;
        Ok(Some(text))
    }

    fn set_item(&mut self, key: &str, value: &str) -> crate::Result<()> {
        self.tree
            .insert(key.as_bytes(), value.as_bytes())
            .with_context(|| format!("persist local storage key {key}"))?;
        self.tree.flush().context("flush local storage")?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> crate::Result<()> {
        self.tree
            .remove(key.as_bytes())
            .with_context(|| format!("remove local storage key {key}"))?;
        self.tree.flush().context("flush local storage")?;
        Ok(())
    }

    fn keys(&self) -> crate::Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in self.tree.iter() {
            let (key, _) = entry.context("iterate local storage entries")?;
            let key = std::str::from_utf8(key.as_ref())
                .context("local storage key is not valid UTF-8")?;
            keys.push(key.to_string());
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::SledStorage;
    use crate::storage::LocalStorage;
    use tempdir::TempDir;

    fn sled_db(temp_dir: &TempDir) -> sled::Db {
        sled::Config::default()
            .path(temp_dir.path())
            .open()
            .expect("open sled db")
    }

    #[test]
    fn sut__when_setting_items_then_values_are_readable() {
        // given
        let temp_dir = TempDir::new("sled_local_storage").unwrap();
        let db = sled_db(&temp_dir);
        let mut storage = SledStorage::new(&db).unwrap();

        // when
        storage.set_item("balance_ali", "20").unwrap();
        storage.set_item("balance_ali", "25.5").unwrap();

        // then
        assert_eq!(
            storage.get_item("balance_ali").unwrap().as_deref(),
            Some("25.5")
        );
        assert_eq!(storage.get_item("missing").unwrap(), None);
    }

    #[test]
    fn sut__when_reopening_then_items_survive() {
        // given
        let temp_dir = TempDir::new("sled_local_storage_reopen").unwrap();
        {
            let mut storage = SledStorage::open(temp_dir.path()).unwrap();
            storage.set_item("userProfile", r#"{"username":"ali"}"#).unwrap();
        }

        // when
        let storage = SledStorage::open(temp_dir.path()).unwrap();

        // then
        assert_eq!(
            storage.get_item("userProfile").unwrap().as_deref(),
            Some(r#"{"username":"ali"}"#)
        );
    }

    #[test]
    fn sut__when_removing_and_clearing_then_keys_disappear() {
        // given
        let temp_dir = TempDir::new("sled_local_storage_remove").unwrap();
        let db = sled_db(&temp_dir);
        let mut storage = SledStorage::new(&db).unwrap();
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();

        // when
        storage.remove_item("a").unwrap();
        let mut keys = storage.keys().unwrap();
        keys.sort();

        // then
        assert_eq!(keys, vec!["b".to_string()]);

        // when
        storage.clear().unwrap();

        // then
        assert!(storage.keys().unwrap().is_empty());
    }
}
