// IAP Settings - Configuration
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Accessor configuration model.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{CONFIG_DIR_NAME, IAP_ROOT, NETWORK_TYPE_ROOT, UUID_SOURCE};

/// Which message bus the service directory lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BusKind {
    #[default]
    System,
    Session,
}

impl BusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Session => "session",
        }
    }
}

/// Where and how service properties are looked up over D-Bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceLookupConfig {
    /// Query the service directory at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Bus to connect to.
    #[serde(default)]
    pub bus: BusKind,

    /// Well-known name of the service directory.
    #[serde(default = "default_destination")]
    pub destination: String,

    /// Object path of the service directory.
    #[serde(default = "default_object_path")]
    pub path: String,

    /// Interface carrying the lookup method.
    #[serde(default = "default_interface")]
    pub interface: String,

    /// Lookup method, called with `(service_type, service_id, [property names])`.
    #[serde(default = "default_method")]
    pub method: String,

    /// Call timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ServiceLookupConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ServiceLookupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bus: BusKind::System,
            destination: default_destination(),
            path: default_object_path(),
            interface: default_interface(),
            method: default_method(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Accessor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Root directory of all IAP subtrees.
    #[serde(default = "default_iap_root")]
    pub iap_root: String,

    /// Root directory of the supported network types.
    #[serde(default = "default_network_type_root")]
    pub network_type_root: String,

    /// File yielding a fresh UUID on every read.
    #[serde(default = "default_uuid_source")]
    pub uuid_source: PathBuf,

    /// Number of colliding candidates tolerated before ID generation gives up.
    #[serde(default = "default_max_id_attempts")]
    pub max_id_attempts: u32,

    /// Backing file of the persistent store (binary only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_file: Option<PathBuf>,

    /// Service directory lookup.
    #[serde(default)]
    pub service_lookup: ServiceLookupConfig,
}

fn default_true() -> bool {
    true
}

fn default_destination() -> String {
    "com.nokia.icd2".to_string()
}

fn default_object_path() -> String {
    "/com/nokia/icd2".to_string()
}

fn default_interface() -> String {
    "com.nokia.icd2".to_string()
}

fn default_method() -> String {
    "get_service_properties".to_string()
}

fn default_timeout_ms() -> u64 {
    2000
}

fn default_iap_root() -> String {
    IAP_ROOT.to_string()
}

fn default_network_type_root() -> String {
    NETWORK_TYPE_ROOT.to_string()
}

fn default_uuid_source() -> PathBuf {
    PathBuf::from(UUID_SOURCE)
}

fn default_max_id_attempts() -> u32 {
    16
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            iap_root: default_iap_root(),
            network_type_root: default_network_type_root(),
            uuid_source: default_uuid_source(),
            max_id_attempts: default_max_id_attempts(),
            store_file: None,
            service_lookup: ServiceLookupConfig::default(),
        }
    }
}

impl SettingsConfig {
    /// Default location of the configuration file.
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join(CONFIG_DIR_NAME).join("settings.toml"))
    }

    /// Load the configuration from its default location, if present.
    pub fn load_default() -> Option<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            match Self::load_from_file(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Ignoring {:?}: {}", path, e);
                    None
                }
            }
        } else {
            None
        }
    }

    /// Load configuration from TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, super::Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| super::Error::ConfigReadFailed(format!("{}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to TOML file with restrictive permissions (0600).
    pub fn save_to_file(&self, path: &Path) -> Result<(), super::Error> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
        }
        Ok(())
    }

    /// Resolve the persistent store file, falling back to the XDG config dir.
    pub fn store_path(&self) -> PathBuf {
        self.store_file.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(CONFIG_DIR_NAME)
                .join("store.json")
        })
    }
}
