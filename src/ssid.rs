// IAP Settings - SSID Helpers
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Decoding and display of stored WLAN SSIDs.

use crate::models::ConfigValue;

/// Extract raw SSID bytes from a stored value.
///
/// SSIDs are stored either as a string or as a list of byte-valued ints.
/// Anything else, or a list entry outside `0..=255`, yields `None`.
pub fn ssid_bytes(value: &ConfigValue) -> Option<Vec<u8>> {
    match value {
        ConfigValue::String(s) => Some(s.as_bytes().to_vec()),
        ConfigValue::List(items) => items
            .iter()
            .map(|item| item.as_int().and_then(|i| u8::try_from(i).ok()))
            .collect(),
        _ => None,
    }
}

/// Make raw SSID bytes safe to display.
///
/// Invalid UTF-8 is replaced, control characters become `?`, and trailing
/// NUL padding is dropped.
pub fn mangle_ssid(ssid: &[u8]) -> String {
    let end = ssid.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&ssid[..end])
        .chars()
        .map(|c| if c.is_control() { '?' } else { c })
        .collect()
}
