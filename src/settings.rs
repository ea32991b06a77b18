// IAP Settings - Accessor
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Accessor for IAP settings stored in the configuration store.
//!
//! Every IAP lives in its own directory below the IAP root, named by the
//! escaped IAP ID. Reads are lossy by contract: a missing key and a store
//! error both come back as `None` (the error is logged). Only ID generation
//! and writes report errors to the caller.

use std::fs;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::dbus_client::{DbusServiceDirectory, ServiceDirectory};
use crate::i18n::{Catalog, GettextCatalog};
use crate::models::{keys, ConfigValue, Error, IapType, Result, SettingsConfig, StoreError};
use crate::paths::{escape_key, join, unescape_key};
use crate::ssid::{mangle_ssid, ssid_bytes};
use crate::storage::{ConfigStore, UnsetMode};

/// Name prefix of the automatically created WLAN scanning IAP.
pub const EASY_WLAN_PREFIX: &str = "[Easy";

/// Mobile internet IDs embed an already escaped byte such as `@32@`.
static MOBILE_INTERNET_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@[0-9]{2}@").expect("mobile internet pattern is valid"));

/// Whether `name` is the name of the Easy WLAN IAP.
pub fn is_easywlan(name: &str) -> bool {
    name.starts_with(EASY_WLAN_PREFIX)
}

/// Whether `iap` uses the mobile internet ID form (contains `@DD@`).
fn is_mobile_internet(iap: &str) -> bool {
    MOBILE_INTERNET_ID.is_match(iap)
}

/// Accessor for IAP settings.
pub struct IapSettings<S> {
    store: S,
    config: SettingsConfig,
    services: Box<dyn ServiceDirectory>,
    catalog: Box<dyn Catalog>,
}

impl<S: ConfigStore> IapSettings<S> {
    /// Create an accessor using the D-Bus service directory and gettext.
    pub fn new(store: S, config: SettingsConfig) -> Self {
        let services = DbusServiceDirectory::new(config.service_lookup.clone());
        Self {
            store,
            config,
            services: Box::new(services),
            catalog: Box::new(GettextCatalog),
        }
    }

    /// Replace the service directory.
    pub fn with_service_directory(mut self, services: impl ServiceDirectory + 'static) -> Self {
        self.services = Box::new(services);
        self
    }

    /// Replace the message catalog.
    pub fn with_catalog(mut self, catalog: impl Catalog + 'static) -> Self {
        self.catalog = Box::new(catalog);
        self
    }

    /// The underlying store client.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The accessor configuration.
    pub fn config(&self) -> &SettingsConfig {
        &self.config
    }

    fn iap_dir(&self, iap: &str) -> String {
        join(&self.config.iap_root, &escape_key(iap))
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    /// Generate a new, unused IAP ID.
    ///
    /// The ID is a lowercase hyphenated UUID read from the configured UUID
    /// source. Its directory is reserved in the store so a concurrent
    /// generator cannot hand out the same ID; nothing is written below it.
    pub fn create_iap_id(&self) -> Result<String> {
        let attempts = self.config.max_id_attempts.max(1);

        // An unreachable store fails the call before any UUID is drawn.
        if let Err(StoreError::Unavailable) = self.store.dir_exists(&self.config.iap_root) {
            error!("Unable to get configuration store");
            return Err(Error::StoreUnavailable);
        }

        for _ in 0..attempts {
            let uuid = self.read_uuid()?;
            let dir = self.iap_dir(&uuid);

            match self.store.reserve_dir(&dir) {
                Ok(true) => {
                    debug!("Reserved IAP ID {}", uuid);
                    return Ok(uuid);
                }
                Ok(false) => debug!("IAP ID {} already in use, retrying", uuid),
                Err(StoreError::Unavailable) => {
                    error!("Unable to get configuration store");
                    return Err(Error::StoreUnavailable);
                }
                Err(e) => warn!("Could not reserve {}: {}", dir, e),
            }
        }

        error!("No free IAP ID after {} attempts", attempts);
        Err(Error::IdGenerationExhausted(attempts))
    }

    fn read_uuid(&self) -> Result<String> {
        let raw = fs::read_to_string(&self.config.uuid_source).map_err(|e| {
            error!("Unable to read file {:?}: {}", self.config.uuid_source, e);
            Error::UuidSource(e)
        })?;
        let uuid = Uuid::parse_str(raw.trim()).map_err(|e| {
            error!("Invalid UUID {:?}: {}", raw.trim(), e);
            Error::InvalidUuid(raw.trim().to_string())
        })?;
        Ok(uuid.hyphenated().to_string())
    }

    /// IDs of all IAPs in the store.
    pub fn list_iaps(&self) -> Vec<String> {
        match self.store.all_dirs(&self.config.iap_root) {
            Ok(dirs) => dirs
                .into_iter()
                .map(|dir| unescape_key(&dir).unwrap_or(dir))
                .collect(),
            Err(e) => {
                error!("Could not list IAPs: {}", e);
                Vec::new()
            }
        }
    }

    // ========================================================================
    // Global settings
    // ========================================================================

    /// The IAP to connect to automatically, if one is configured.
    pub fn auto_connect(&self) -> Option<String> {
        let key = join(&self.config.iap_root, keys::AUTO_CONNECT);
        match self.store.get(&key) {
            Ok(value) => value.and_then(ConfigValue::into_string),
            Err(e) => {
                debug!("Could not read {}: {}", key, e);
                None
            }
        }
    }

    /// Whether the network type `iap_type` is supported on this system.
    ///
    /// The type is escaped, so arbitrary input cannot address another
    /// directory.
    pub fn is_iaptype_supported(&self, iap_type: &str) -> bool {
        let dir = join(&self.config.network_type_root, &escape_key(iap_type));
        match self.store.dir_exists(&dir) {
            Ok(supported) => supported,
            Err(StoreError::Unavailable) => {
                error!("Unable to get configuration store");
                false
            }
            Err(e) => {
                error!("{}", e);
                false
            }
        }
    }

    // ========================================================================
    // Per-IAP values
    // ========================================================================

    /// Full key of `key` for `iap`.
    ///
    /// Mobile internet IDs are used unescaped when such a directory exists.
    fn value_key(&self, iap: &str, key: &str) -> String {
        if is_mobile_internet(iap) {
            let dir = join(&self.config.iap_root, iap);
            match self.store.dir_exists(&dir) {
                Ok(true) => return join(&dir, key),
                Ok(false) => {}
                Err(e) => debug!("Probe of {} failed: {}", dir, e),
            }
        }
        join(&self.iap_dir(iap), key)
    }

    /// Read `key` of `iap`.
    pub fn value(&self, iap: &str, key: &str) -> Option<ConfigValue> {
        if iap.is_empty() {
            error!("IAP ID is empty string");
            return None;
        }
        if key.is_empty() {
            error!("key not specified");
            return None;
        }

        let full_key = self.value_key(iap, key);
        match self.store.get(&full_key) {
            Ok(value) => value,
            Err(e) => {
                error!("could not read key {} for iap {}: '{}'", key, iap, e);
                None
            }
        }
    }

    /// Read a string value of `iap`.
    pub fn string_value(&self, iap: &str, key: &str) -> Option<String> {
        self.value(iap, key).and_then(ConfigValue::into_string)
    }

    /// Read a boolean value of `iap`.
    pub fn bool_value(&self, iap: &str, key: &str) -> Option<bool> {
        self.value(iap, key).and_then(|v| v.as_bool())
    }

    /// Store `value` under `key` of `iap`.
    pub fn set_value(&self, iap: &str, key: &str, value: impl Into<ConfigValue>) -> Result<()> {
        if iap.is_empty() {
            return Err(Error::MissingArgument("IAP ID"));
        }
        if key.is_empty() {
            return Err(Error::MissingArgument("key"));
        }

        let full_key = self.value_key(iap, key);
        self.store.set(&full_key, value.into())?;
        Ok(())
    }

    /// Connection type of `iap`.
    pub fn iap_type(&self, iap: &str) -> IapType {
        IapType::from(self.string_value(iap, keys::TYPE).as_deref())
    }

    /// Remove all settings of `iap`.
    ///
    /// Returns `true` whether or not the IAP existed; `false` only for an
    /// empty ID or an unreachable store.
    pub fn remove_iap(&self, iap: &str) -> bool {
        if iap.is_empty() {
            error!("IAP ID is empty string");
            return false;
        }

        let dir = self.iap_dir(iap);
        match self.store.recursive_unset(&dir, UnsetMode::IncludingSchemaNames) {
            Ok(()) => {}
            Err(StoreError::Unavailable) => {
                error!("Unable to get configuration store");
                return false;
            }
            Err(e) => warn!("Could not unset {}: {}", dir, e),
        }

        if let Err(e) = self.store.suggest_sync() {
            warn!("Could not sync store after removing {}: {}", iap, e);
        }

        info!("Removed IAP {}", iap);
        true
    }

    // ========================================================================
    // Display names
    // ========================================================================

    /// Human-readable name of `iap`.
    ///
    /// Tried in order, first hit wins:
    /// 1. the translated name published by the IAP's service provider
    /// 2. the stored `name`
    /// 3. the mangled SSID of a temporary IAP
    /// 4. the display name of the IAP's network type
    /// 5. the ID itself
    pub fn name(&self, iap: &str) -> String {
        if iap.is_empty() {
            return String::new();
        }

        if let Some(name) = self.service_name(iap) {
            return name;
        }

        if let Some(name) = self.string_value(iap, keys::NAME) {
            return name;
        }

        if self.bool_value(iap, keys::TEMPORARY) == Some(true) {
            if let Some(ssid) = self.wlan_ssid(iap) {
                return mangle_ssid(&ssid);
            }
        }

        if let Some(iap_type) = self.string_value(iap, keys::TYPE) {
            if let Some(name) = self.type_display_name(&iap_type) {
                return name;
            }
        }

        iap.to_string()
    }

    fn service_name(&self, iap: &str) -> Option<String> {
        let service_type = self.string_value(iap, keys::SERVICE_TYPE)?;
        let service_id = self.string_value(iap, keys::SERVICE_ID)?;

        let props = self.services.properties(&service_type, &service_id)?;
        let (domain, msgid) = props.catalog_entry()?;
        self.catalog.translate(domain, msgid)
    }

    /// Raw SSID bytes of a WLAN `iap`.
    pub fn wlan_ssid(&self, iap: &str) -> Option<Vec<u8>> {
        let value = self.value(iap, keys::WLAN_SSID)?;
        let ssid = ssid_bytes(&value);
        if ssid.is_none() {
            warn!("Unreadable {} value for iap {}: {}", keys::WLAN_SSID, iap, value.type_name());
        }
        ssid
    }

    /// Generic display name of a network type, such as "WLAN".
    pub fn type_display_name(&self, iap_type: &str) -> Option<String> {
        if iap_type.is_empty() {
            return None;
        }

        let dir = join(&self.config.network_type_root, &escape_key(iap_type));
        let read = |key: &str| {
            let full_key = join(&dir, key);
            match self.store.get(&full_key) {
                Ok(value) => value.and_then(ConfigValue::into_string),
                Err(e) => {
                    error!("could not read {}: '{}'", full_key, e);
                    None
                }
            }
        };

        let msgid = read(keys::TYPE_NAME)?;
        match read(keys::GETTEXT_CATALOG) {
            Some(domain) => self.catalog.translate(&domain, &msgid),
            None => Some(msgid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbus_client::{NoServices, ServiceProperties};
    use crate::i18n::StaticCatalog;
    use crate::storage::{FileStore, MemoryStore};
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::Path;

    const ROOT: &str = "/system/osso/connectivity/IAP";
    const TYPES: &str = "/system/osso/connectivity/network_type";

    /// Service directory answering from a fixed table.
    struct FakeServices(HashMap<(String, String), ServiceProperties>);

    impl ServiceDirectory for FakeServices {
        fn properties(&self, service_type: &str, service_id: &str) -> Option<ServiceProperties> {
            self.0
                .get(&(service_type.to_string(), service_id.to_string()))
                .cloned()
        }
    }

    fn catalog() -> StaticCatalog {
        StaticCatalog::new()
            .with("osso-connectivity-ui", "conn_wlan", "WLAN")
            .with("operator-services", "svc_hotspot", "Operator Hotspot")
    }

    fn settings() -> IapSettings<MemoryStore> {
        IapSettings::new(MemoryStore::new(), SettingsConfig::default())
            .with_service_directory(NoServices)
            .with_catalog(catalog())
    }

    fn settings_with_uuid(uuid: &str) -> (IapSettings<MemoryStore>, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  {}  ", uuid).unwrap();
        let config = SettingsConfig {
            uuid_source: file.path().to_path_buf(),
            max_id_attempts: 3,
            ..SettingsConfig::default()
        };
        let settings = IapSettings::new(MemoryStore::new(), config)
            .with_service_directory(NoServices)
            .with_catalog(catalog());
        (settings, file)
    }

    fn add_wlan_type(settings: &IapSettings<MemoryStore>) {
        let store = settings.store();
        store.set(&format!("{}/WLAN_INFRA/name", TYPES), "conn_wlan".into()).unwrap();
        store
            .set(&format!("{}/WLAN_INFRA/gettext_catalog", TYPES), "osso-connectivity-ui".into())
            .unwrap();
    }

    // ------------------------------------------------------------------------
    // Classifiers
    // ------------------------------------------------------------------------

    #[test]
    fn test_is_easywlan() {
        assert!(is_easywlan("[Easy WLAN]"));
        assert!(is_easywlan("[Easy"));
        assert!(!is_easywlan("Home"));
        assert!(!is_easywlan(""));
        assert!(!is_easywlan(" [Easy WLAN]"));
    }

    #[test]
    fn test_is_mobile_internet() {
        assert!(is_mobile_internet("foo@12@bar"));
        assert!(is_mobile_internet("a@@32@"));
        assert!(is_mobile_internet("@32@"));
        assert!(!is_mobile_internet("foo@1a@bar"));
        assert!(!is_mobile_internet("foo@123@bar"));
        assert!(!is_mobile_internet("plain"));
        assert!(!is_mobile_internet("@12"));
        assert!(!is_mobile_internet(""));
    }

    // ------------------------------------------------------------------------
    // Identifiers
    // ------------------------------------------------------------------------

    #[test]
    fn test_create_iap_id_returns_trimmed_lowercase_uuid() {
        let (settings, _file) = settings_with_uuid("0F8FAD5B-D9CB-469F-A165-70867728950E");
        let id = settings.create_iap_id().unwrap();
        assert_eq!(id, "0f8fad5b-d9cb-469f-a165-70867728950e");
        assert!(!settings.store().dir_exists(&format!("{}/{}", ROOT, id)).unwrap());
    }

    #[test]
    fn test_create_iap_id_skips_existing_ids() {
        let uuid = "0f8fad5b-d9cb-469f-a165-70867728950e";
        let (settings, _file) = settings_with_uuid(uuid);
        settings.set_value(uuid, keys::NAME, "Existing").unwrap();

        let err = settings.create_iap_id().unwrap_err();
        assert!(matches!(err, Error::IdGenerationExhausted(3)));
    }

    #[test]
    fn test_create_iap_id_never_hands_out_an_id_twice() {
        let (settings, _file) = settings_with_uuid("0f8fad5b-d9cb-469f-a165-70867728950e");
        assert!(settings.create_iap_id().is_ok());
        assert!(matches!(
            settings.create_iap_id().unwrap_err(),
            Error::IdGenerationExhausted(_)
        ));
    }

    #[test]
    fn test_create_iap_id_from_kernel_source() {
        if !Path::new(crate::models::UUID_SOURCE).exists() {
            return;
        }
        let settings = settings();
        let first = settings.create_iap_id().unwrap();
        let second = settings.create_iap_id().unwrap();
        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
        assert_eq!(first, first.to_lowercase());
    }

    #[test]
    fn test_create_iap_id_unreadable_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = SettingsConfig {
            uuid_source: dir.path().join("missing"),
            ..SettingsConfig::default()
        };
        let settings = IapSettings::new(MemoryStore::new(), config).with_service_directory(NoServices);
        assert!(matches!(settings.create_iap_id().unwrap_err(), Error::UuidSource(_)));
    }

    #[test]
    fn test_create_iap_id_invalid_uuid() {
        let (settings, _file) = settings_with_uuid("not-a-uuid");
        assert!(matches!(settings.create_iap_id().unwrap_err(), Error::InvalidUuid(_)));
    }

    #[test]
    fn test_create_iap_id_store_unavailable() {
        let (settings, _file) = settings_with_uuid("0f8fad5b-d9cb-469f-a165-70867728950e");
        settings.store().set_available(false);
        assert!(matches!(settings.create_iap_id().unwrap_err(), Error::StoreUnavailable));
    }

    #[test]
    fn test_create_iap_id_reports_store_before_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = SettingsConfig {
            uuid_source: dir.path().join("missing"),
            ..SettingsConfig::default()
        };
        let settings = IapSettings::new(MemoryStore::new(), config).with_service_directory(NoServices);
        settings.store().set_available(false);
        assert!(matches!(settings.create_iap_id().unwrap_err(), Error::StoreUnavailable));
    }

    #[test]
    fn test_create_iap_id_treats_store_errors_as_collisions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "0f8fad5b-d9cb-469f-a165-70867728950e").unwrap();
        let config = SettingsConfig {
            iap_root: "/bad root".into(),
            uuid_source: file.path().to_path_buf(),
            max_id_attempts: 2,
            ..SettingsConfig::default()
        };
        let settings = IapSettings::new(MemoryStore::new(), config).with_service_directory(NoServices);

        let err = settings.create_iap_id().unwrap_err();
        assert!(matches!(err, Error::IdGenerationExhausted(2)), "got {:?}", err);
    }

    #[test]
    fn test_list_iaps_unescapes_ids() {
        let settings = settings();
        settings.set_value("My Home", keys::NAME, "Home").unwrap();
        settings.set_value("office", keys::NAME, "Office").unwrap();
        let mut ids = settings.list_iaps();
        ids.sort();
        assert_eq!(ids, vec!["My Home".to_string(), "office".to_string()]);
    }

    // ------------------------------------------------------------------------
    // Global settings
    // ------------------------------------------------------------------------

    #[test]
    fn test_auto_connect() {
        let settings = settings();
        assert_eq!(settings.auto_connect(), None);

        settings.store().set(&format!("{}/auto_connect", ROOT), "home".into()).unwrap();
        assert_eq!(settings.auto_connect(), Some("home".to_string()));

        settings.store().set(&format!("{}/auto_connect", ROOT), "".into()).unwrap();
        assert_eq!(settings.auto_connect(), Some(String::new()));
    }

    #[test]
    fn test_auto_connect_error_reads_as_unset() {
        let settings = settings();
        settings.store().set(&format!("{}/auto_connect", ROOT), "home".into()).unwrap();
        settings.store().set_available(false);
        assert_eq!(settings.auto_connect(), None);
    }

    #[test]
    fn test_is_iaptype_supported() {
        let settings = settings();
        add_wlan_type(&settings);
        assert!(settings.is_iaptype_supported("WLAN_INFRA"));
        assert!(!settings.is_iaptype_supported("WIMAX"));
    }

    #[test]
    fn test_is_iaptype_supported_escapes_type() {
        let settings = settings();
        settings.store().set("/system/osso/connectivity/secret/x", ConfigValue::Int(1)).unwrap();
        assert!(!settings.is_iaptype_supported("../secret"));
        assert!(!settings.is_iaptype_supported("WLAN_INFRA/../../secret"));
    }

    #[test]
    fn test_is_iaptype_supported_fails_closed() {
        let settings = settings();
        add_wlan_type(&settings);
        settings.store().set_available(false);
        assert!(!settings.is_iaptype_supported("WLAN_INFRA"));
    }

    // ------------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------------

    #[test]
    fn test_value_requires_arguments() {
        let settings = settings();
        assert_eq!(settings.value("", keys::NAME), None);
        assert_eq!(settings.value("home", ""), None);
        assert!(matches!(
            settings.set_value("", keys::NAME, "x").unwrap_err(),
            Error::MissingArgument("IAP ID")
        ));
        assert!(matches!(
            settings.set_value("home", "", "x").unwrap_err(),
            Error::MissingArgument("key")
        ));
    }

    #[test]
    fn test_value_uses_escaped_path() {
        let settings = settings();
        settings.set_value("My Home", keys::NAME, "Home").unwrap();
        assert_eq!(
            settings.store().get(&format!("{}/My@32@Home/name", ROOT)).unwrap(),
            Some(ConfigValue::from("Home"))
        );
        assert_eq!(settings.string_value("My Home", keys::NAME), Some("Home".to_string()));
    }

    #[test]
    fn test_mobile_internet_id_reads_unescaped_path() {
        let settings = settings();
        settings
            .store()
            .set(&format!("{}/Internet@32@GPRS/name", ROOT), "Operator Internet".into())
            .unwrap();
        assert_eq!(
            settings.string_value("Internet@32@GPRS", keys::NAME),
            Some("Operator Internet".to_string())
        );
    }

    #[test]
    fn test_mobile_internet_id_falls_back_to_escaped_path() {
        let settings = settings();
        settings
            .store()
            .set(&format!("{}/Internet@64@32@64@GPRS/name", ROOT), "Escaped".into())
            .unwrap();
        assert_eq!(
            settings.string_value("Internet@32@GPRS", keys::NAME),
            Some("Escaped".to_string())
        );
    }

    #[test]
    fn test_value_store_error_reads_as_absent() {
        let settings = settings();
        settings.set_value("home", keys::NAME, "Home").unwrap();
        settings.store().set_available(false);
        assert_eq!(settings.value("home", keys::NAME), None);
    }

    #[test]
    fn test_typed_readers() {
        let settings = settings();
        settings.set_value("home", keys::TEMPORARY, true).unwrap();
        settings.set_value("home", keys::TYPE, "WLAN_ADHOC").unwrap();
        assert_eq!(settings.bool_value("home", keys::TEMPORARY), Some(true));
        assert_eq!(settings.string_value("home", keys::TEMPORARY), None);
        assert_eq!(settings.iap_type("home"), IapType::WlanAdhoc);
        assert_eq!(settings.iap_type("missing"), IapType::Invalid);
    }

    // ------------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------------

    #[test]
    fn test_remove_iap() {
        let settings = settings();
        settings.set_value("home", keys::NAME, "Home").unwrap();
        settings.set_value("home", keys::TYPE, "WLAN_INFRA").unwrap();
        settings.set_value("office", keys::NAME, "Office").unwrap();
        settings
            .store()
            .associate_schema(&format!("{}/home/type", ROOT), "/schemas/iap/type")
            .unwrap();

        assert!(settings.remove_iap("home"));
        assert!(!settings.store().dir_exists(&format!("{}/home", ROOT)).unwrap());
        assert_eq!(
            settings.store().schema_name(&format!("{}/home/type", ROOT)).unwrap(),
            None
        );
        assert_eq!(settings.string_value("office", keys::NAME), Some("Office".to_string()));
    }

    #[test]
    fn test_remove_iap_syncs_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let settings = IapSettings::new(FileStore::open(&path).unwrap(), SettingsConfig::default())
            .with_service_directory(NoServices);
        settings.set_value("home", keys::NAME, "Home").unwrap();
        settings.set_value("office", keys::NAME, "Office").unwrap();
        settings.store().flush().unwrap();

        assert!(settings.remove_iap("home"));

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(&format!("{}/home/name", ROOT)).unwrap(), None);
        assert_eq!(
            reopened.get(&format!("{}/office/name", ROOT)).unwrap(),
            Some(ConfigValue::from("Office"))
        );
    }

    #[test]
    fn test_remove_nonexistent_iap_succeeds() {
        let settings = settings();
        assert!(settings.remove_iap("nonexistent-id"));
    }

    #[test]
    fn test_remove_iap_rejects_empty_id() {
        let settings = settings();
        settings.set_value("home", keys::NAME, "Home").unwrap();
        assert!(!settings.remove_iap(""));
        assert!(settings.store().dir_exists(&format!("{}/home", ROOT)).unwrap());
    }

    #[test]
    fn test_remove_iap_store_unavailable() {
        let settings = settings();
        settings.store().set_available(false);
        assert!(!settings.remove_iap("home"));
    }

    // ------------------------------------------------------------------------
    // Display names
    // ------------------------------------------------------------------------

    #[test]
    fn test_name_falls_back_to_id() {
        let settings = settings();
        assert_eq!(settings.name("abc-123"), "abc-123");
        assert_eq!(settings.name(""), "");
    }

    #[test]
    fn test_name_from_type() {
        let settings = settings();
        add_wlan_type(&settings);
        settings.set_value("abc-123", keys::TYPE, "WLAN_INFRA").unwrap();
        assert_eq!(settings.name("abc-123"), "WLAN");
    }

    #[test]
    fn test_name_from_type_without_catalog_uses_message_id() {
        let settings = settings();
        settings
            .store()
            .set(&format!("{}/WIMAX/name", TYPES), "WiMAX".into())
            .unwrap();
        settings.set_value("abc-123", keys::TYPE, "WIMAX").unwrap();
        assert_eq!(settings.name("abc-123"), "WiMAX");
    }

    #[test]
    fn test_name_unknown_type_falls_back_to_id() {
        let settings = settings();
        settings.set_value("abc-123", keys::TYPE, "DUN_GSM_PS").unwrap();
        assert_eq!(settings.name("abc-123"), "abc-123");
    }

    #[test]
    fn test_stored_name_wins_over_type() {
        let settings = settings();
        add_wlan_type(&settings);
        settings.set_value("abc-123", keys::TYPE, "WLAN_INFRA").unwrap();
        settings.set_value("abc-123", keys::NAME, "Office").unwrap();
        assert_eq!(settings.name("abc-123"), "Office");
    }

    #[test]
    fn test_temporary_iap_uses_mangled_ssid() {
        let settings = settings();
        add_wlan_type(&settings);
        settings.set_value("tmp", keys::TYPE, "WLAN_INFRA").unwrap();
        settings.set_value("tmp", keys::TEMPORARY, true).unwrap();
        settings
            .set_value(
                "tmp",
                keys::WLAN_SSID,
                ConfigValue::List(vec![
                    ConfigValue::Int(b'C' as i32),
                    ConfigValue::Int(b'a' as i32),
                    ConfigValue::Int(b'f' as i32),
                    ConfigValue::Int(b'e' as i32),
                    ConfigValue::Int(0x07),
                ]),
            )
            .unwrap();
        assert_eq!(settings.name("tmp"), "Cafe?");
    }

    #[test]
    fn test_temporary_iap_without_ssid_uses_type() {
        let settings = settings();
        add_wlan_type(&settings);
        settings.set_value("tmp", keys::TYPE, "WLAN_INFRA").unwrap();
        settings.set_value("tmp", keys::TEMPORARY, true).unwrap();
        assert_eq!(settings.name("tmp"), "WLAN");
    }

    #[test]
    fn test_non_temporary_iap_ignores_ssid() {
        let settings = settings();
        settings.set_value("perm", keys::TEMPORARY, false).unwrap();
        settings.set_value("perm", keys::WLAN_SSID, "HomeNet").unwrap();
        assert_eq!(settings.name("perm"), "perm");
    }

    #[test]
    fn test_service_name_wins() {
        let services = FakeServices(HashMap::from([(
            ("OPERATOR".to_string(), "hotspot-1".to_string()),
            ServiceProperties {
                gettext_catalog: Some("operator-services".to_string()),
                name: Some("svc_hotspot".to_string()),
            },
        )]));
        let settings = settings().with_service_directory(services);
        settings.set_value("svc", keys::SERVICE_TYPE, "OPERATOR").unwrap();
        settings.set_value("svc", keys::SERVICE_ID, "hotspot-1").unwrap();
        settings.set_value("svc", keys::NAME, "Stored").unwrap();
        assert_eq!(settings.name("svc"), "Operator Hotspot");
    }

    #[test]
    fn test_incomplete_service_properties_fall_through() {
        let services = FakeServices(HashMap::from([(
            ("OPERATOR".to_string(), "hotspot-1".to_string()),
            ServiceProperties {
                gettext_catalog: None,
                name: Some("svc_hotspot".to_string()),
            },
        )]));
        let settings = settings().with_service_directory(services);
        settings.set_value("svc", keys::SERVICE_TYPE, "OPERATOR").unwrap();
        settings.set_value("svc", keys::SERVICE_ID, "hotspot-1").unwrap();
        settings.set_value("svc", keys::NAME, "Stored").unwrap();
        assert_eq!(settings.name("svc"), "Stored");
    }

    #[test]
    fn test_service_type_without_id_falls_through() {
        let settings = settings();
        settings.set_value("svc", keys::SERVICE_TYPE, "OPERATOR").unwrap();
        assert_eq!(settings.name("svc"), "svc");
    }

    #[test]
    fn test_name_with_unavailable_store_echoes_id() {
        let settings = settings();
        settings.set_value("home", keys::NAME, "Home").unwrap();
        settings.store().set_available(false);
        assert_eq!(settings.name("home"), "home");
    }
}
