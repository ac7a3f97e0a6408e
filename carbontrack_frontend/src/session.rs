use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const SESSION_FILE: &str = "session.json";

/// Proof of authentication handed to every protected page and API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub token: String,
}

impl Session {
    /// Builds a session only when both halves are present and non-empty.
    pub fn from_parts(user_id: Option<String>, token: Option<String>) -> Option<Self> {
        match (user_id, token) {
            (Some(user_id), Some(token)) if !user_id.is_empty() && !token.is_empty() => {
                Some(Self { user_id, token })
            }
            _ => None,
        }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// On-disk shape, keyed the same way the web client keyed local storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "jwtToken", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl StoredSession {
    pub fn into_session(self) -> Option<Session> {
        Session::from_parts(self.user_id, self.token)
    }
}

impl From<&Session> for StoredSession {
    fn from(session: &Session) -> Self {
        Self {
            user_id: Some(session.user_id.clone()),
            token: Some(session.token.clone()),
        }
    }
}

pub trait SessionStore {
    fn load(&self) -> Result<Option<Session>>;
    fn save(&mut self, session: &Session) -> Result<()>;
    /// Removes both stored fields at once.
    fn clear(&mut self) -> Result<()>;
}

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let stored: StoredSession = serde_json::from_str(&raw)
            .with_context(|| format!("malformed session file {}", self.path.display()))?;
        Ok(stored.into_session())
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
            tighten_permissions(parent);
        }
        let body = serde_json::to_string_pretty(&StoredSession::from(session))?;
        fs::write(&self.path, body)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        tighten_permissions(&self.path);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("failed to remove {}", self.path.display())),
        }
    }
}

/// The token is a bearer credential: owner-only access on unix.
fn tighten_permissions(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let perms = if path.is_dir() {
            fs::Permissions::from_mode(0o700)
        } else {
            fs::Permissions::from_mode(0o600)
        };
        if let Err(err) = fs::set_permissions(path, perms) {
            log::warn!("failed to tighten permissions on {}: {err}", path.display());
        }
    }
    #[cfg(not(unix))]
    let _ = path;
}

/// Process-local store; clones share the same record.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    record: Arc<Mutex<StoredSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: StoredSession) -> Self {
        Self {
            record: Arc::new(Mutex::new(record)),
        }
    }

    pub fn snapshot(&self) -> StoredSession {
        self.record
            .lock()
            .map(|record| record.clone())
            .unwrap_or_default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.snapshot().into_session())
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        let mut record = self
            .record
            .lock()
            .map_err(|_| anyhow::anyhow!("session store poisoned"))?;
        *record = StoredSession::from(session);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let mut record = self
            .record
            .lock()
            .map_err(|_| anyhow::anyhow!("session store poisoned"))?;
        *record = StoredSession::default();
        Ok(())
    }
}
