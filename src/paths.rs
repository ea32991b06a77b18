// IAP Settings - Key Paths
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Key path construction, escaping and validation.
//!
//! Keys are absolute, slash-separated paths (`/system/osso/...`). Arbitrary
//! text such as an IAP name must be escaped before it can be used as a single
//! path segment: every byte that is not allowed in a key, plus `/`, `.` and
//! `@`, is written as `@<decimal byte value>@`. The scheme is compatible with
//! GConf, so IDs escaped by other tools resolve to the same directories.

use crate::models::{Error, Result};

/// Characters never allowed in a key segment.
const INVALID_CHARS: &str = " \t\r\n\"$&<>,+=#!()'|{}[]?~`;%\\";

fn needs_escape(byte: u8) -> bool {
    byte == b'/' || byte == b'.' || byte == b'@' || byte > 127 || INVALID_CHARS.as_bytes().contains(&byte)
}

/// Escape arbitrary text into a single valid key segment.
pub fn escape_key(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for &byte in text.as_bytes() {
        if needs_escape(byte) {
            escaped.push('@');
            escaped.push_str(&byte.to_string());
            escaped.push('@');
        } else {
            escaped.push(byte as char);
        }
    }
    escaped
}

/// Reverse [`escape_key`].
pub fn unescape_key(escaped: &str) -> Result<String> {
    let mut bytes = Vec::with_capacity(escaped.len());
    let mut rest = escaped;

    while let Some(start) = rest.find('@') {
        bytes.extend_from_slice(rest[..start].as_bytes());
        let after = &rest[start + 1..];
        let end = after
            .find('@')
            .ok_or_else(|| Error::InvalidKey(format!("unterminated escape in '{}'", escaped)))?;
        let code = &after[..end];
        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidKey(format!("bad escape '@{}@' in '{}'", code, escaped)));
        }
        let byte: u8 = code
            .parse()
            .map_err(|_| Error::InvalidKey(format!("escape '@{}@' out of range in '{}'", code, escaped)))?;
        bytes.push(byte);
        rest = &after[end + 1..];
    }
    bytes.extend_from_slice(rest.as_bytes());

    String::from_utf8(bytes).map_err(|_| Error::InvalidKey(format!("'{}' does not unescape to UTF-8", escaped)))
}

/// Join a directory and a relative segment with a single slash.
pub fn join(dir: &str, segment: &str) -> String {
    let dir = dir.trim_end_matches('/');
    let segment = segment.trim_start_matches('/');
    format!("{}/{}", dir, segment)
}

/// Check that `key` is a well-formed absolute key.
pub fn validate_key(key: &str) -> std::result::Result<(), String> {
    if !key.starts_with('/') {
        return Err("must begin with a slash".to_string());
    }
    if key == "/" {
        return Ok(());
    }
    if key.ends_with('/') {
        return Err("can't end with a slash".to_string());
    }

    for segment in key[1..].split('/') {
        if segment.is_empty() {
            return Err("can't contain two slashes in a row".to_string());
        }
        if segment.starts_with('.') {
            return Err("can't have a period after a slash".to_string());
        }
        if let Some(c) = segment.chars().find(|c| !c.is_ascii() || INVALID_CHARS.contains(*c)) {
            return Err(format!("invalid character {:?}", c));
        }
    }

    Ok(())
}

/// Whether `key` lies strictly below `dir`.
pub fn is_below(key: &str, dir: &str) -> bool {
    let dir = dir.trim_end_matches('/');
    key.len() > dir.len() + 1 && key.starts_with(dir) && key.as_bytes()[dir.len()] == b'/'
}
