// appu-client/src/session.rs
// Persisted session - token and user kept in a small JSON key-value file

use crate::{ClientError, ClientResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use shared::client::StoredUser;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key holding the bearer token
pub const TOKEN_KEY: &str = "authToken";

/// Key holding `{"username": ...}`
pub const USER_KEY: &str = "dev_user";

const SESSION_FILE: &str = "session.json";

/// Key-value store backing the session, one JSON object on disk
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store inside `dir`, at `dir/session.json`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        if !self.path.exists() {
            return BTreeMap::new();
        }
        match fs::read_to_string(&self.path).map(|s| serde_json::from_str(&s)) {
            Ok(Ok(map)) => map,
            _ => {
                tracing::warn!(path = %self.path.display(), "Unreadable session file, ignoring");
                BTreeMap::new()
            }
        }
    }

    fn write_all(&self, map: &BTreeMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(map)?)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    pub fn set(&self, key: &str, value: impl Into<String>) -> ClientResult<()> {
        let mut map = self.read_all();
        map.insert(key.to_string(), value.into());
        self.write_all(&map)
    }

    pub fn remove(&self, key: &str) -> ClientResult<()> {
        let mut map = self.read_all();
        if map.remove(key).is_some() {
            self.write_all(&map)?;
        }
        Ok(())
    }

    /// Drop every key
    pub fn clear(&self) -> ClientResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Authenticated session context
///
/// Passed to whatever issues authenticated calls; there is no global token.
#[derive(Debug, Clone)]
pub struct Session {
    store: SessionStore,
    token: String,
    user: Option<StoredUser>,
}

impl Session {
    /// Persist a fresh session after login
    pub fn start(store: SessionStore, token: String, username: &str) -> ClientResult<Self> {
        let user = StoredUser {
            username: username.to_string(),
        };
        store.set(TOKEN_KEY, token.clone())?;
        store.set(USER_KEY, serde_json::to_string(&user)?)?;
        Ok(Self {
            store,
            token,
            user: Some(user),
        })
    }

    /// Load the stored session, if a token exists
    pub fn load(store: SessionStore) -> Option<Self> {
        let token = store.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        let user = store
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str::<StoredUser>(&raw).ok());
        Some(Self { store, token, user })
    }

    /// Load the stored session or fail with [`ClientError::NotLoggedIn`]
    pub fn require(store: SessionStore) -> ClientResult<Self> {
        Self::load(store).ok_or(ClientError::NotLoggedIn)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Unix timestamp the token expires at, when it is a JWT carrying `exp`
    pub fn expires_at(&self) -> Option<u64> {
        parse_jwt_exp(&self.token)
    }

    /// Expired by its own `exp` claim. Opaque tokens never expire locally.
    pub fn is_expired(&self) -> bool {
        match self.expires_at() {
            Some(exp) => {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_secs();
                now >= exp
            }
            None => false,
        }
    }

    /// Wipe all local session state
    pub fn clear(self) -> ClientResult<SessionStore> {
        self.store.clear()?;
        tracing::info!("Local session cleared");
        Ok(self.store)
    }
}

/// Read `exp` from a JWT payload without verifying it
fn parse_jwt_exp(token: &str) -> Option<u64> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload = URL_SAFE_NO_PAD.decode(parts[1].trim_end_matches('=')).ok()?;
    let payload: serde_json::Value = serde_json::from_slice(&payload).ok()?;
    payload.get("exp")?.as_u64()
}
