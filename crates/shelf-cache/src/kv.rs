//! Key-Value store wrapper with automatic serialization.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::CacheError;
use serde::{de::DeserializeOwned, Serialize};

const FILE_EXTENSION: &str = "json";

#[derive(Debug)]
enum Backend {
    Memory(Mutex<BTreeMap<String, Vec<u8>>>),
    Dir(PathBuf),
}

/// Type-safe key-value cache.
///
/// Values are stored as JSON, either in process memory or as one file per
/// key under a directory. Cloning a `Cache` shares the same storage.
#[derive(Debug, Clone)]
pub struct Cache {
    backend: Arc<Backend>,
}

impl Cache {
    /// Open a cache that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            backend: Arc::new(Backend::Memory(Mutex::new(BTreeMap::new()))),
        }
    }

    /// Open a cache rooted at a directory, creating it if needed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open_dir("~/.local/share/shelf")?;
    /// ```
    pub fn open_dir(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref();
        fs::create_dir_all(path).map_err(|source| CacheError::OpenError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            backend: Arc::new(Backend::Dir(path.to_path_buf())),
        })
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist and an error if the stored
    /// bytes are not a valid `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Cart> = cache.get("cart:default")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.set_raw(key, bytes)
    }

    /// Write raw bytes under a key, bypassing serialization.
    pub fn set_raw(&self, key: &str, bytes: Vec<u8>) -> Result<(), CacheError> {
        match self.backend.as_ref() {
            Backend::Memory(map) => {
                lock(map)?.insert(key.to_string(), bytes);
                Ok(())
            }
            Backend::Dir(root) => {
                let path = file_for(root, key)?;
                // Write then rename so a crash never leaves half a file
                let tmp = path.with_extension("tmp");
                fs::write(&tmp, bytes)?;
                fs::rename(&tmp, &path)?;
                Ok(())
            }
        }
    }

    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match self.backend.as_ref() {
            Backend::Memory(map) => Ok(lock(map)?.get(key).cloned()),
            Backend::Dir(root) => match fs::read(file_for(root, key)?) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
        }
    }
}

fn lock(
    map: &Mutex<BTreeMap<String, Vec<u8>>>,
) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>>, CacheError> {
    map.lock()
        .map_err(|_| CacheError::StoreError("cache lock poisoned".to_string()))
}

/// Map a key to its file. Keys may use `:` as a namespace separator.
fn file_for(root: &Path, key: &str) -> Result<PathBuf, CacheError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '-' | '_' | '.'))
        && !key.starts_with('.');
    if !valid {
        return Err(CacheError::InvalidKey(key.to_string()));
    }
    Ok(root.join(format!("{key}.{FILE_EXTENSION}")))
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// let key = shelf_cache::cache_key!("cart", "default");
/// assert_eq!(key, "cart:default");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(cache: &Cache) {
        assert_eq!(cache.get::<Vec<u32>>("numbers").unwrap(), None);

        cache.set("numbers", &vec![1u32, 2, 3]).unwrap();
        assert_eq!(cache.get::<Vec<u32>>("numbers").unwrap(), Some(vec![1, 2, 3]));

        cache.set("numbers", &vec![4u32]).unwrap();
        assert_eq!(cache.get::<Vec<u32>>("numbers").unwrap(), Some(vec![4]));
    }

    #[test]
    fn test_memory_backend() {
        exercise(&Cache::in_memory());
    }

    #[test]
    fn test_dir_backend() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&Cache::open_dir(dir.path()).unwrap());
    }

    #[test]
    fn test_dir_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        Cache::open_dir(dir.path()).unwrap().set("cart:default", &"kept").unwrap();

        let reopened = Cache::open_dir(dir.path()).unwrap();
        assert_eq!(reopened.get::<String>("cart:default").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = Cache::in_memory();
        let other = cache.clone();
        cache.set("k", &1u8).unwrap();
        assert_eq!(other.get::<u8>("k").unwrap(), Some(1));
    }

    #[test]
    fn test_corrupt_value_is_an_error() {
        let cache = Cache::in_memory();
        cache.set_raw("k", b"{not json".to_vec()).unwrap();
        assert!(matches!(
            cache.get::<Vec<u32>>("k"),
            Err(CacheError::SerializeError(_))
        ));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open_dir(dir.path()).unwrap();
        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(cache.set(key, &1u8), Err(CacheError::InvalidKey(_))));
        }
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("session", "cart", 7), "session:cart:7");
    }
}
