//! Session persistence on top of the key-value cache.

use crate::{Cache, CacheError};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Name of a session, e.g. a CLI profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the session ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new("default")
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Session data stored in the cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData<T> {
    pub id: SessionId,
    pub data: T,
    /// Incremented on every write.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Typed session storage under a key namespace.
///
/// # Example
///
/// ```rust,ignore
/// use shelf_cache::{Cache, Session, SessionId};
///
/// let sessions = Session::<Preferences>::new(Cache::in_memory(), "prefs");
/// let id = SessionId::default();
///
/// let mut prefs = sessions.load(&id);
/// prefs.dark_mode = true;
/// sessions.set(&id, &prefs)?;
/// ```
#[derive(Debug, Clone)]
pub struct Session<T> {
    cache: Cache,
    namespace: String,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Session<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    /// Create a session manager storing under `namespace:<id>` keys.
    pub fn new(cache: Cache, namespace: impl Into<String>) -> Self {
        Self {
            cache,
            namespace: namespace.into(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Get session data if it exists.
    ///
    /// Fails if the stored value cannot be read back.
    pub fn get(&self, id: &SessionId) -> Result<Option<T>, CacheError> {
        Ok(self.get_versioned(id)?.map(|s| s.data))
    }

    fn get_versioned(&self, id: &SessionId) -> Result<Option<SessionData<T>>, CacheError> {
        self.cache.get::<SessionData<T>>(&self.session_key(id))
    }

    /// Load session data, falling back to `T::default()`.
    ///
    /// A missing session is silently empty. A stored session that cannot be
    /// read back is logged and also treated as empty, so a damaged file never
    /// stops the caller.
    pub fn load(&self, id: &SessionId) -> T {
        match self.get(id) {
            Ok(Some(data)) => data,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(session = %id, error = %e, "Discarding unreadable session");
                T::default()
            }
        }
    }

    /// Set session data (unconditional write).
    pub fn set(&self, id: &SessionId, data: &T) -> Result<(), CacheError> {
        let previous = self.get_versioned(id).ok().flatten();
        let now = Utc::now();
        let session_data = SessionData {
            id: id.clone(),
            data: data.clone(),
            version: previous.as_ref().map_or(1, |s| s.version + 1),
            created_at: previous.map_or(now, |s| s.created_at),
            updated_at: now,
        };
        self.cache.set(&self.session_key(id), &session_data)
    }

    fn session_key(&self, id: &SessionId) -> String {
        crate::cache_key!(self.namespace.as_str(), id)
    }
}
