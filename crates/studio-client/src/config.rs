//! Which server this client talks to.
//!
//! The last-used address is persisted to a small JSON file in the
//! per-user config directory and wins over the built-in default on the
//! next launch. Loading never fails; a missing or unreadable file just
//! means the default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{StudioError, StudioResult};

pub const DEFAULT_HOST: &str = "localhost:8080";

const APP_DIR: &str = "collab-studio";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Serialize, Deserialize)]
struct PersistedConfig {
    host: String,
}

/// Base address of the collaboration server, as `host` or `host:port`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
        }
    }
}

impl ServerConfig {
    /// Loads the persisted address, falling back to [`DEFAULT_HOST`].
    pub fn load() -> Self {
        match default_config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Self::default(),
        }
    }

    /// Loads from an explicit file. Any failure degrades to the default
    /// address; the worst case is typing the server in again.
    pub fn load_from(path: &Path) -> Self {
        let persisted = fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str::<PersistedConfig>(&raw).ok());
        match persisted {
            Some(p) if !p.host.is_empty() => Self { host: p.host },
            _ => {
                debug!(path = %path.display(), "no usable saved server address");
                Self::default()
            }
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Replaces the server address. The input is cleaned up first: an
    /// accidentally pasted `http://`/`https://` prefix and trailing
    /// slashes are stripped, and an empty result falls back to the
    /// default.
    pub fn set_host(&mut self, new_host: &str) {
        self.host = normalize_host(new_host);
        info!(host = %self.host, "server set");
    }

    /// Writes the current address to the per-user config file.
    pub fn persist(&self) -> StudioResult<()> {
        self.persist_to(&default_config_path()?)
    }

    pub fn persist_to(&self, path: &Path) -> StudioResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let raw = serde_json::to_string_pretty(&PersistedConfig {
            host: self.host.clone(),
        })?;
        fs::write(path, raw)?;
        Ok(())
    }

    pub fn http_url(&self) -> String {
        format!("http://{}", self.host)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.host)
    }
}

fn default_config_path() -> StudioResult<PathBuf> {
    let base = dirs::config_dir().ok_or(StudioError::NoConfigDir)?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

fn normalize_host(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .unwrap_or(trimmed);
    let clean = without_scheme.trim_end_matches('/');
    if clean.is_empty() {
        DEFAULT_HOST.to_owned()
    } else {
        clean.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pasted_urls_are_cleaned_up() {
        let mut config = ServerConfig::default();
        config.set_host("http://192.168.1.20:8080/");
        assert_eq!(config.host(), "192.168.1.20:8080");

        config.set_host("https://collab.example.com///");
        assert_eq!(config.host(), "collab.example.com");
    }

    #[test]
    fn empty_input_falls_back_to_the_default() {
        let mut config = ServerConfig::default();
        config.set_host("https:///");
        assert_eq!(config.host(), DEFAULT_HOST);

        config.set_host("   ");
        assert_eq!(config.host(), DEFAULT_HOST);
    }

    #[test]
    fn derived_urls_track_the_host() {
        let mut config = ServerConfig::default();
        config.set_host("10.0.0.2:9000");
        assert_eq!(config.http_url(), "http://10.0.0.2:9000");
        assert_eq!(config.ws_url(), "ws://10.0.0.2:9000");
    }

    #[test]
    fn persisted_address_wins_on_the_next_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = ServerConfig::default();
        config.set_host("192.168.1.20:8080");
        config.persist_to(&path).unwrap();

        assert_eq!(ServerConfig::load_from(&path), config);
    }

    #[test]
    fn missing_or_corrupt_file_loads_the_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert_eq!(ServerConfig::load_from(&missing).host(), DEFAULT_HOST);

        let corrupt = dir.path().join("bad.json");
        fs::write(&corrupt, "{not json").unwrap();
        assert_eq!(ServerConfig::load_from(&corrupt).host(), DEFAULT_HOST);
    }
}
