// IAP Settings - Error Types
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Shared error types for the IAP settings crate.

use thiserror::Error;

/// Result type alias for IAP settings operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by a configuration store backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store cannot be reached (no client handle).
    #[error("configuration store unavailable")]
    Unavailable,

    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create a new invalid key error.
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Main error type for IAP settings operations.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================
    // Store Errors
    // ========================================
    #[error("Unable to get configuration store")]
    StoreUnavailable,

    #[error("Configuration store error: {0}")]
    Store(StoreError),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("{0} not specified")]
    MissingArgument(&'static str),

    // ========================================
    // Identifier Errors
    // ========================================
    #[error("Unable to read UUID source: {0}")]
    UuidSource(#[source] std::io::Error),

    #[error("UUID source returned an invalid value: {0}")]
    InvalidUuid(String),

    #[error("No free IAP ID found after {0} attempts")]
    IdGenerationExhausted(u32),

    // ========================================
    // Configuration Errors
    // ========================================
    #[error("Failed to read configuration: {0}")]
    ConfigReadFailed(String),

    #[error("Failed to write configuration: {0}")]
    ConfigWriteFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseFailed(String),

    #[error("Store schema version mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: String, found: String },

    // ========================================
    // D-Bus Errors
    // ========================================
    #[error("D-Bus error: {0}")]
    Dbus(String),

    // ========================================
    // System Errors
    // ========================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error means the store could not be reached.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable | Self::Store(StoreError::Unavailable))
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable => Error::StoreUnavailable,
            other => Error::Store(other),
        }
    }
}

// Convert from zbus errors
impl From<zbus::Error> for Error {
    fn from(err: zbus::Error) -> Self {
        Error::Dbus(err.to_string())
    }
}

// Convert from toml parse errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}

// Convert from toml serialize errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigWriteFailed(err.to_string())
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}
