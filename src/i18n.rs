// IAP Settings - Localization
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Message catalogs used to translate display names.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use gettextrs::{bind_textdomain_codeset, bindtextdomain, setlocale, LocaleCategory};
use tracing::{debug, warn};

/// Gettext domain of this crate's own messages.
pub const GETTEXT_DOMAIN: &str = "iap-settings";

/// Environment variable naming the directory with this crate's catalogs.
pub const LOCALE_DIR_ENV: &str = "IAP_SETTINGS_LOCALEDIR";

/// System catalog directories, searched in order.
const SYSTEM_LOCALE_DIRS: &[&str] = &["/usr/share/locale", "/usr/local/share/locale"];

/// Translates message ids within a text domain.
pub trait Catalog: Send + Sync {
    /// Translation of `msgid` in `domain`, or `None` if no string can be
    /// produced.
    fn translate(&self, domain: &str, msgid: &str) -> Option<String>;
}

/// Catalog backed by the system gettext catalogs.
///
/// Like `dgettext`, an unknown domain or message id yields the message id
/// itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct GettextCatalog;

impl Catalog for GettextCatalog {
    fn translate(&self, domain: &str, msgid: &str) -> Option<String> {
        if domain.is_empty() || msgid.is_empty() {
            return None;
        }
        Some(gettextrs::dgettext(domain, msgid))
    }
}

/// Catalog with fixed translations, falling back to the message id.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: HashMap<(String, String), String>,
}

impl StaticCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation.
    pub fn with(mut self, domain: &str, msgid: &str, text: &str) -> Self {
        self.entries
            .insert((domain.to_string(), msgid.to_string()), text.to_string());
        self
    }
}

impl Catalog for StaticCatalog {
    fn translate(&self, domain: &str, msgid: &str) -> Option<String> {
        if domain.is_empty() || msgid.is_empty() {
            return None;
        }
        Some(
            self.entries
                .get(&(domain.to_string(), msgid.to_string()))
                .cloned()
                .unwrap_or_else(|| msgid.to_string()),
        )
    }
}

/// First existing catalog directory, preferring `preferred`.
fn find_locale_dir(preferred: Option<PathBuf>) -> Option<PathBuf> {
    preferred
        .into_iter()
        .chain(SYSTEM_LOCALE_DIRS.iter().map(PathBuf::from))
        .find(|dir| dir.is_dir())
}

/// Take the locale from the environment and bind [`GETTEXT_DOMAIN`].
///
/// Display names are always translated through [`Catalog`] with an explicit
/// domain, so the process-wide default domain is left alone. Returns the
/// directory the domain was bound to.
pub fn setup_i18n() -> Option<PathBuf> {
    setlocale(LocaleCategory::LcAll, "");

    let dir = find_locale_dir(env::var_os(LOCALE_DIR_ENV).map(PathBuf::from))?;
    if let Err(e) = bindtextdomain(GETTEXT_DOMAIN, dir.clone()) {
        warn!("Failed to bind {} to {:?}: {}", GETTEXT_DOMAIN, dir, e);
        return None;
    }
    if let Err(e) = bind_textdomain_codeset(GETTEXT_DOMAIN, "UTF-8") {
        warn!("Failed to set codeset of {}: {}", GETTEXT_DOMAIN, e);
    }

    debug!("Bound {} to {:?}", GETTEXT_DOMAIN, dir);
    Some(dir)
}
