// IAP Settings - Connection Type
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Connection technology of an IAP and its stored string form.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Connection technology of an Internet Access Point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IapType {
    /// CDMA packet-switched dial-up.
    DunCdmaPsd,
    /// GSM packet-switched (GPRS/UMTS) data.
    DunGsmPs,
    /// CDMA circuit-switched dial-up.
    DunCdmaCsd,
    /// CDMA Quick Net Connect.
    DunCdmaQnc,
    /// GSM circuit-switched dial-up.
    DunGsmCs,
    /// WLAN infrastructure mode.
    WlanInfra,
    /// WiMAX.
    Wimax,
    /// WLAN ad-hoc mode.
    WlanAdhoc,
    /// No type given (empty or absent value).
    #[default]
    Invalid,
    /// A non-empty type string that is not recognized.
    Unknown,
}

/// Stored literal for every named type.
const TYPE_NAMES: [(IapType, &str); 8] = [
    (IapType::DunCdmaPsd, "DUN_CDMA_PSD"),
    (IapType::DunGsmPs, "DUN_GSM_PS"),
    (IapType::DunCdmaCsd, "DUN_CDMA_CSD"),
    (IapType::DunCdmaQnc, "DUN_CDMA_QNC"),
    (IapType::DunGsmCs, "DUN_GSM_CS"),
    (IapType::WlanInfra, "WLAN_INFRA"),
    (IapType::Wimax, "WIMAX"),
    (IapType::WlanAdhoc, "WLAN_ADHOC"),
];

static BY_NAME: Lazy<HashMap<&'static str, IapType>> =
    Lazy::new(|| TYPE_NAMES.iter().map(|&(ty, name)| (name, ty)).collect());

static BY_TYPE: Lazy<HashMap<IapType, &'static str>> =
    Lazy::new(|| TYPE_NAMES.iter().copied().collect());

impl IapType {
    /// All named connection types (sentinels excluded).
    pub const ALL: [IapType; 8] = [
        IapType::DunCdmaPsd,
        IapType::DunGsmPs,
        IapType::DunCdmaCsd,
        IapType::DunCdmaQnc,
        IapType::DunGsmCs,
        IapType::WlanInfra,
        IapType::Wimax,
        IapType::WlanAdhoc,
    ];

    /// Get the stored string for this type.
    ///
    /// Returns `None` for [`IapType::Invalid`] and [`IapType::Unknown`].
    pub fn name(self) -> Option<&'static str> {
        BY_TYPE.get(&self).copied()
    }

    /// Map a stored type string to its enum value.
    ///
    /// The match is exact and case-sensitive: an empty string is
    /// [`IapType::Invalid`], anything unrecognized is [`IapType::Unknown`].
    pub fn from_name(name: &str) -> Self {
        if name.is_empty() {
            return Self::Invalid;
        }
        BY_NAME.get(name).copied().unwrap_or(Self::Unknown)
    }

    /// Whether this is one of the named connection types.
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Invalid | Self::Unknown)
    }

    /// Whether the type is a WLAN connection.
    pub fn is_wlan(self) -> bool {
        matches!(self, Self::WlanInfra | Self::WlanAdhoc)
    }

    /// Whether the type is a dial-up (cellular) connection.
    pub fn is_dun(self) -> bool {
        matches!(
            self,
            Self::DunCdmaPsd | Self::DunGsmPs | Self::DunCdmaCsd | Self::DunCdmaQnc | Self::DunGsmCs
        )
    }
}

impl From<Option<&str>> for IapType {
    fn from(name: Option<&str>) -> Self {
        name.map(Self::from_name).unwrap_or(Self::Invalid)
    }
}

impl FromStr for IapType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for IapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name(), self) {
            (Some(name), _) => f.write_str(name),
            (None, Self::Invalid) => f.write_str("INVALID"),
            (None, _) => f.write_str("UNKNOWN"),
        }
    }
}
