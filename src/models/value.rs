// IAP Settings - Configuration Values
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Typed values held by the configuration store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed value stored under a configuration key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ConfigValue {
    String(String),
    Int(i32),
    Float(f64),
    Bool(bool),
    List(Vec<ConfigValue>),
}

impl ConfigValue {
    /// Name of the value type, as used in log and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::List(_) => "list",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Consume the value, keeping it only if it is a string.
    pub fn into_string(self) -> Option<String> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a command-line literal into a value.
    ///
    /// `true`/`false` become booleans, integers become `Int`, decimals become
    /// `Float`; everything else is kept as a string.
    pub fn parse_literal(s: &str) -> Self {
        match s {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(i) = s.parse::<i32>() {
            return Self::Int(i);
        }
        if s.contains('.') {
            if let Ok(f) = s.parse::<f64>() {
                return Self::Float(f);
            }
        }
        Self::String(s.to_string())
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(b) => write!(f, "{}", b),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for ConfigValue {
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}
