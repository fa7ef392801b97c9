//! Application settings and paths.
//!
//! Manages the XDG-compliant settings file holding run defaults.

use crate::error::{ConfigError, ConfigResult};
use crate::scanner::{MapJobConfig, DEFAULT_USER_AGENT};
use crate::types::{PortCatalog, PortList};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/webmap)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the configuration directory for the current user.
    pub fn discover() -> ConfigResult<Self> {
        let project =
            ProjectDirs::from("com", "webmap", "webmap").ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Default worker pool size.
    pub default_threads: usize,
    /// Default per-probe timeout in seconds.
    pub default_timeout_secs: u64,
    /// Default requests per second, 0 for unlimited.
    pub default_rate_limit: u32,
    /// User-Agent header sent with every probe.
    pub user_agent: String,
    /// Plain-HTTP ports probed outside fast mode.
    pub http_ports: PortList,
    /// TLS ports probed outside fast mode.
    pub https_ports: PortList,
}

impl Default for AppSettings {
    fn default() -> Self {
        let catalog = PortCatalog::full();
        Self {
            default_threads: MapJobConfig::DEFAULT_THREADS,
            default_timeout_secs: 6,
            default_rate_limit: 0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_ports: catalog.http,
            https_ports: catalog.https,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location.
    ///
    /// A missing file yields the built-in defaults.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::discover()?.settings_file();

        if !file.exists() {
            debug!(path = %file.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        settings.validate()?;

        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Save settings to a specific file, creating its directory.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Reject values no run can use.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_threads == 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_threads",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.default_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.http_ports.is_empty() && self.https_ports.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "http_ports",
                reason: "no ports configured for either scheme".to_string(),
            });
        }
        Ok(())
    }

    /// The configured port catalog.
    pub fn catalog(&self) -> PortCatalog {
        PortCatalog::new(self.http_ports.clone(), self.https_ports.clone())
    }
}
