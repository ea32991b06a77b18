//! Service-properties lookup over D-Bus.
//!
//! Service IAPs (`service_type` + `service_id`) are named by the service
//! provider that owns them, not by the IAP itself. The provider publishes
//! the message id of its name and the gettext domain to translate it with.

use std::collections::HashMap;

use tracing::{debug, warn};
use zbus::Connection;

use crate::models::{BusKind, Error, Result, ServiceLookupConfig};

/// Property holding the gettext domain of a service.
pub const PROP_GETTEXT_CATALOG: &str = "gettext_catalog";

/// Property holding the message id of a service's display name.
pub const PROP_NAME: &str = "name";

/// Localization data published for a service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceProperties {
    /// Gettext domain (text catalog) of the service provider.
    pub gettext_catalog: Option<String>,
    /// Message id of the display name.
    pub name: Option<String>,
}

impl ServiceProperties {
    /// Build from a property map, treating empty strings as absent.
    pub fn from_map(mut map: HashMap<String, String>) -> Self {
        let mut take = |key: &str| map.remove(key).filter(|v| !v.is_empty());
        Self {
            gettext_catalog: take(PROP_GETTEXT_CATALOG),
            name: take(PROP_NAME),
        }
    }

    /// Domain and message id, if both are known.
    pub fn catalog_entry(&self) -> Option<(&str, &str)> {
        Some((self.gettext_catalog.as_deref()?, self.name.as_deref()?))
    }
}

/// Looks up properties of a service provider.
pub trait ServiceDirectory: Send + Sync {
    /// Properties of the service `(service_type, service_id)`, or `None`
    /// when the lookup is not possible.
    fn properties(&self, service_type: &str, service_id: &str) -> Option<ServiceProperties>;
}

/// Directory that knows no services.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoServices;

impl ServiceDirectory for NoServices {
    fn properties(&self, _service_type: &str, _service_id: &str) -> Option<ServiceProperties> {
        None
    }
}

/// D-Bus client for the service directory.
///
/// Each lookup opens its own bus connection on a current-thread runtime and
/// drops both when done.
#[derive(Debug, Clone)]
pub struct DbusServiceDirectory {
    config: ServiceLookupConfig,
}

impl DbusServiceDirectory {
    /// Create a new directory client.
    pub fn new(config: ServiceLookupConfig) -> Self {
        Self { config }
    }

    /// Query the service directory, reporting failures.
    pub fn lookup(&self, service_type: &str, service_id: &str) -> Result<ServiceProperties> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        rt.block_on(async {
            match tokio::time::timeout(self.config.timeout(), self.call(service_type, service_id)).await {
                Ok(result) => result,
                Err(_) => Err(Error::Dbus(format!(
                    "{} timed out after {} ms",
                    self.config.method, self.config.timeout_ms
                ))),
            }
        })
    }

    async fn call(&self, service_type: &str, service_id: &str) -> Result<ServiceProperties> {
        let connection = match self.config.bus {
            BusKind::System => Connection::system().await?,
            BusKind::Session => Connection::session().await?,
        };
        debug!("Connected to {} D-Bus", self.config.bus.as_str());

        let requested = vec![PROP_GETTEXT_CATALOG, PROP_NAME];
        let reply = connection
            .call_method(
                Some(self.config.destination.as_str()),
                self.config.path.as_str(),
                Some(self.config.interface.as_str()),
                self.config.method.as_str(),
                &(service_type, service_id, requested),
            )
            .await?;

        let map: HashMap<String, String> = reply.body().deserialize()?;
        Ok(ServiceProperties::from_map(map))
    }
}

impl ServiceDirectory for DbusServiceDirectory {
    fn properties(&self, service_type: &str, service_id: &str) -> Option<ServiceProperties> {
        if !self.config.enabled {
            return None;
        }

        match self.lookup(service_type, service_id) {
            Ok(props) => Some(props),
            Err(e) => {
                warn!(
                    "Service properties lookup failed for {}/{}: {}",
                    service_type, service_id, e
                );
                None
            }
        }
    }
}
