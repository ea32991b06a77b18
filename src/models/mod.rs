// IAP Settings - Models
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Shared Types
//!
//! Types shared by the store backends, the collaborators and the accessor:
//!
//! - **IapType**: Connection technology enumeration
//! - **ConfigValue**: Typed store values
//! - **SettingsConfig**: Paths, limits and service lookup settings
//! - **Error**: Shared error types

pub mod config;
pub mod error;
pub mod iap_type;
pub mod value;

pub use config::{BusKind, ServiceLookupConfig, SettingsConfig};
pub use error::{Error, Result, StoreError};
pub use iap_type::IapType;
pub use value::ConfigValue;

/// Root directory of all IAP subtrees.
pub const IAP_ROOT: &str = "/system/osso/connectivity/IAP";

/// Root directory listing the supported network types.
pub const NETWORK_TYPE_ROOT: &str = "/system/osso/connectivity/network_type";

/// Kernel file yielding a fresh random UUID on each read.
pub const UUID_SOURCE: &str = "/proc/sys/kernel/random/uuid";

/// Configuration directory name (under XDG_CONFIG_HOME).
pub const CONFIG_DIR_NAME: &str = "iap-settings";

/// Per-IAP keys.
pub mod keys {
    pub const NAME: &str = "name";
    pub const TYPE: &str = "type";
    pub const TEMPORARY: &str = "temporary";
    pub const SERVICE_TYPE: &str = "service_type";
    pub const SERVICE_ID: &str = "service_id";
    pub const WLAN_SSID: &str = "wlan_ssid";
    /// Global key directly under the IAP root.
    pub const AUTO_CONNECT: &str = "auto_connect";
    /// Message id of a network type's display name.
    pub const TYPE_NAME: &str = "name";
    /// Gettext domain of a network type's display name.
    pub const GETTEXT_CATALOG: &str = "gettext_catalog";
}
