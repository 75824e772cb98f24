//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\tunegrab\config.toml
//! - macOS: ~/Library/Application Support/tunegrab/config.toml
//! - Linux: ~/.config/tunegrab/config.toml
//!
//! The file is hand-edited and only ever read; settings are loaded at
//! startup and CLI flags override them per invocation.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Network timeouts
    pub network: NetworkConfig,

    /// Download settings
    pub download: DownloadConfig,

    /// Tagging settings
    pub tagging: TaggingConfig,
}

/// API credentials
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Last.fm API key; the Last.fm provider is skipped without one
    pub lastfm_api_key: Option<String>,
}

/// Network timeouts, in whole seconds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Per-call timeout for provider searches and artwork downloads
    pub timeout_secs: u64,

    /// Hard limit for one yt-dlp invocation
    pub download_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            download_timeout_secs: 120,
        }
    }
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

/// Download settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Where MP3s land; `./downloads` when unset
    pub directory: Option<PathBuf>,

    /// MP3 bitrate in kbit/s
    pub bitrate: u32,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            directory: None,
            bitrate: 192,
        }
    }
}

impl DownloadConfig {
    /// The configured output directory, or the default beside the CWD
    pub fn directory(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("downloads"))
    }
}

/// Tagging settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaggingConfig {
    /// Skip the whole metadata/tagging pipeline after download
    pub skip: bool,
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tunegrab"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert!(config.credentials.lastfm_api_key.is_none());
        assert_eq!(config.network.timeout(), Duration::from_secs(10));
        assert_eq!(config.network.download_timeout(), Duration::from_secs(120));
        assert_eq!(config.download.directory(), PathBuf::from("downloads"));
        assert_eq!(config.download.bitrate, 192);
        assert!(!config.tagging.skip);
    }

    #[test]
    fn test_full_config_parses() {
        let toml = r#"
[credentials]
lastfm_api_key = "test-key-123"

[network]
timeout_secs = 5
download_timeout_secs = 300

[download]
directory = "/music"
bitrate = 320

[tagging]
skip = true
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(
            config.credentials.lastfm_api_key,
            Some("test-key-123".to_string())
        );
        assert_eq!(config.network.timeout(), Duration::from_secs(5));
        assert_eq!(config.network.download_timeout(), Duration::from_secs(300));
        assert_eq!(config.download.directory(), PathBuf::from("/music"));
        assert_eq!(config.download.bitrate, 320);
        assert!(config.tagging.skip);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        // Config with only some fields
        let toml = r#"
[credentials]
lastfm_api_key = "my-key"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        // Specified field is set
        assert_eq!(
            config.credentials.lastfm_api_key,
            Some("my-key".to_string())
        );

        // Other fields use defaults
        assert_eq!(config.network.timeout_secs, 10);
        assert_eq!(config.download.bitrate, 192);
        assert!(!config.tagging.skip);
    }

    #[test]
    fn test_unknown_keys_tolerated() {
        // A hand-edited file may carry sections from older versions
        let toml = r#"
[appearance]
theme = "dark"

[download]
bitrate = 256
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.download.bitrate, 256);
    }
}
