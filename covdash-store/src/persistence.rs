//! File persistence helpers.
//!
//! Handles loading and saving JSON datasets and configuration.

use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::StoreError;

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the default configuration directory.
///
/// - macOS: `~/Library/Application Support/covdash`
/// - Linux: `~/.config/covdash`
/// - Windows: `%APPDATA%\covdash`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|c| c.join("covdash"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default configuration file path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}

/// Returns the default dataset directory.
///
/// - Linux: `~/.local/share/covdash/data`
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("covdash").join("data"))
        .unwrap_or_else(|| PathBuf::from("data"))
}

// ============================================================================
// File Operations
// ============================================================================

/// Saves data to a pretty-printed JSON file.
///
/// Creates parent directories if they don't exist and writes atomically
/// (via temp file + rename).
pub async fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    debug!(path = %path.display(), "Saving JSON file");

    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }

    let json = serde_json::to_string_pretty(data)?;

    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, &json).await?;
    tokio::fs::rename(&temp_path, path).await?;

    debug!(path = %path.display(), bytes = json.len(), "JSON file saved");
    Ok(())
}

/// Loads data from a JSON file.
///
/// A missing file is reported as [`StoreError::NotFound`].
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    debug!(path = %path.display(), "Loading JSON file");

    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    let data = serde_json::from_str(&content)?;

    debug!(path = %path.display(), "JSON file loaded");
    Ok(data)
}

/// Loads an optional JSON file: `Ok(None)` when it does not exist.
pub async fn load_json_opt<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    match load_json(path).await {
        Ok(data) => Ok(Some(data)),
        Err(StoreError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Ensures a directory exists.
pub async fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "Creating directory");
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
