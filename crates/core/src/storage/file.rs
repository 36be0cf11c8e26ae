use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError, StorageResult};

/// File extension for stored values.
const VALUE_EXTENSION: &str = "json";

/// Directory-backed key-value store.
///
/// Each key maps to `<root>/<key>.json`. Writes go to a uniquely named
/// temporary sibling file that is renamed over the target, so a reader never sees a half
/// written value. The root directory is created on first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of this store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if the key is empty or contains
    /// anything other than ASCII alphanumerics, `-` and `_`.
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.root.join(format!("{key}.{VALUE_EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;

        // Uniquely named per write, so concurrent writers never share a temp file.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        tracing::debug!(key, path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("never-created"));
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_set_get_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state"));

        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));

        store.set("cart", "[{\"x\":1}]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[{\"x\":1}]"));
        let entries: Vec<_> = fs::read_dir(dir.path().join("state"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["cart.json"]);
    }

    #[test]
    fn test_concurrent_writers_leave_one_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let writers: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let value = format!("[{}]", i.to_string().repeat(4096));
                    for _ in 0..20 {
                        store.set("cart", &value).unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let value = store.get("cart").unwrap().unwrap();
        let digits = value.trim_start_matches('[').trim_end_matches(']');
        assert_eq!(digits.len(), 4096);
        let first = digits.chars().next().unwrap();
        assert!(digits.chars().all(|c| c == first));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_values_survive_a_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        FileStore::new(dir.path()).set("cart", "saved").unwrap();
        let reopened = FileStore::new(dir.path());
        assert_eq!(reopened.get("cart").unwrap().as_deref(), Some("saved"));
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.remove("cart").unwrap();
        store.set("cart", "[]").unwrap();
        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        for key in ["", "../cart", "a/b", "cart.json", "with space"] {
            assert!(
                matches!(store.set(key, "x"), Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }
}
