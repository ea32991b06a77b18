// IAP Settings - Library
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # IAP Settings
//!
//! Settings accessor for Internet Access Points (IAPs), the stored network
//! connection profiles of a device:
//!
//! - **Settings**: Read, write and remove IAP settings, generate IAP IDs,
//!   resolve display names
//! - **Storage**: Hierarchical configuration store client and backends
//! - **Services**: Service-provider lookup over D-Bus
//! - **Catalogs**: Translation of display names through gettext
//!
//! ## Example
//!
//! ```no_run
//! use iap_settings::{IapSettings, MemoryStore, SettingsConfig};
//!
//! let settings = IapSettings::new(MemoryStore::new(), SettingsConfig::default());
//! let id = settings.create_iap_id()?;
//! settings.set_value(&id, "name", "Office")?;
//! assert_eq!(settings.name(&id), "Office");
//! # Ok::<(), iap_settings::Error>(())
//! ```

pub mod dbus_client;
pub mod i18n;
pub mod models;
pub mod paths;
pub mod settings;
pub mod ssid;
pub mod storage;

pub use dbus_client::{DbusServiceDirectory, NoServices, ServiceDirectory, ServiceProperties};
pub use i18n::{Catalog, GettextCatalog, StaticCatalog};
pub use models::{
    BusKind, ConfigValue, Error, IapType, Result, ServiceLookupConfig, SettingsConfig, StoreError,
};
pub use models::{IAP_ROOT, NETWORK_TYPE_ROOT};
pub use settings::{is_easywlan, IapSettings};
pub use storage::{ConfigStore, FileStore, MemoryStore, UnsetMode};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
