use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use history_logging::{history_debug, history_info, history_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file has no parent directory: {0}")]
    NoParent(PathBuf),
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Locally persisted login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Synchronous, side-effect free check of the local session.
pub trait SessionValidator: Send + Sync {
    fn validate(&self, role: &str) -> bool;
}

#[async_trait::async_trait]
pub trait SessionTerminator: Send + Sync {
    async fn logout(&self) -> Result<(), SessionError>;
}

/// Session kept as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct LocalSessionStore {
    path: PathBuf,
}

impl LocalSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current session; a missing or malformed file counts as no session.
    pub fn load(&self) -> Option<SessionRecord> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                history_warn!("Failed to read session from {:?}: {}", self.path, err);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(err) => {
                history_warn!("Failed to parse session from {:?}: {}", self.path, err);
                None
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        self.load().and_then(|record| record.token)
    }

    /// Atomically replaces the session file with `record`.
    pub fn store(&self, record: &SessionRecord) -> Result<(), SessionError> {
        let dir = self
            .path
            .parent()
            .map(|parent| {
                if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                }
            })
            .ok_or_else(|| SessionError::NoParent(self.path.clone()))?;
        fs::create_dir_all(dir)?;

        let content = serde_json::to_string_pretty(record)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.path).map_err(|err| SessionError::Io(err.error))?;
        history_debug!("Stored {} session at {:?}", record.role, self.path);
        Ok(())
    }
}

impl SessionValidator for LocalSessionStore {
    fn validate(&self, role: &str) -> bool {
        self.load().is_some_and(|record| record.role == role)
    }
}

#[async_trait::async_trait]
impl SessionTerminator for LocalSessionStore {
    async fn logout(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                history_info!("Session at {:?} terminated", self.path);
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionError::Io(err)),
        }
    }
}
