//! Session file: the context store persisted between CLI invocations
//!
//! Global invariants enforced:
//! - One store per session file
//! - Writes are atomic (temp file + rename)
//! - A missing file is an empty session; a schema mismatch is an error

use crate::context::ContextStore;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Schema version for session files
pub const SESSION_SCHEMA_VERSION: u32 = 1;

/// On-disk session container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionFile {
    #[serde(rename = "schema_version")]
    pub schema_version: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub store: ContextStore,
}

impl SessionFile {
    pub fn new(store: ContextStore) -> Self {
        SessionFile {
            schema_version: SESSION_SCHEMA_VERSION,
            saved_at: None,
            store,
        }
    }

    /// Serialize session to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize session to JSON")
    }

    /// Deserialize session from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let session: SessionFile =
            serde_json::from_str(json).context("failed to deserialize session from JSON")?;

        if session.schema_version != SESSION_SCHEMA_VERSION {
            anyhow::bail!(
                "session schema version mismatch: expected {}, got {}",
                SESSION_SCHEMA_VERSION,
                session.schema_version
            );
        }

        Ok(session)
    }
}

/// Load the store from a session file, or an empty store if the file doesn't exist
pub fn load_or_new(path: &Path) -> Result<ContextStore> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no session file, starting empty");
        return Ok(ContextStore::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read session file: {}", path.display()))?;
    let session = SessionFile::from_json(&json)
        .with_context(|| format!("invalid session file: {}", path.display()))?;
    Ok(session.store)
}

/// Persist the store to a session file
pub fn save(path: &Path, store: &ContextStore) -> Result<()> {
    let mut session = SessionFile::new(store.clone());
    session.saved_at = Some(Utc::now());
    atomic_write(path, &session.to_json()?)?;
    tracing::debug!(path = %path.display(), "saved session");
    Ok(())
}

/// Delete a session file; returns false when there was nothing to delete
pub fn reset(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(path)
        .with_context(|| format!("failed to remove session file: {}", path.display()))?;
    Ok(true)
}

/// Write `contents` to a sibling `.tmp` file, then rename it over `path`
pub fn atomic_write(path: &Path, contents: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create session directory: {}", dir.display()))?;
    }
    let staged = path.with_extension("tmp");
    std::fs::write(&staged, contents)
        .with_context(|| format!("failed to write session file: {}", staged.display()))?;
    std::fs::rename(&staged, path)
        .with_context(|| format!("failed to replace session file: {}", path.display()))
}
