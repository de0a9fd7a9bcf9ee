//! Configuration management for trackctl.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::management::STORE_KEY;

/// Base URL of the music library API.
pub const SERVER_URL_VAR: &str = "TRACKCTL_SERVER_URL";

/// Overrides where the store snapshot is written.
pub const STORE_PATH_VAR: &str = "TRACKCTL_STORE_PATH";

/// Loads environment variables from `trackctl/.env` in the local data directory.
///
/// The file is optional; variables already present in the process
/// environment are never overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/trackctl/.env`
/// - macOS: `~/Library/Application Support/trackctl/.env`
/// - Windows: `%LOCALAPPDATA%/trackctl/.env`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file exists
/// but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the API base URL without a trailing slash.
///
/// # Errors
///
/// Fails when `TRACKCTL_SERVER_URL` is unset or blank.
pub fn server_url() -> Result<String, String> {
    env::var(SERVER_URL_VAR)
        .ok()
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| format!("{SERVER_URL_VAR} must be set"))
}

/// Returns the store snapshot path: `TRACKCTL_STORE_PATH` if set, otherwise
/// `trackctl/store/tracks-store.json` in the local data directory.
pub fn store_path() -> PathBuf {
    match env::var_os(STORE_PATH_VAR) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => data_dir()
            .join("store")
            .join(format!("{STORE_KEY}.json")),
    }
}

fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("trackctl");
    path
}
