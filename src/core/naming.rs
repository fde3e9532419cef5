// src/core/naming.rs

//! Naming rules for registered environments.
//!
//! An environment directory is named `<logical-key>-py<major>.<minor>`. Global
//! keys are normalized user names; local keys are the normalized basename of
//! the working directory followed by `-` and the sha256 of its full path.

use sha2::{Digest, Sha256};
use std::ffi::OsStr;
use std::path::Path;
use thiserror::Error;

use crate::constants::{HASH_LEN, VERSION_PREFIX, VERSION_SEPARATOR};
use crate::system::executor;

#[derive(Error, Debug)]
pub enum NamingError {
    #[error(
        "Invalid venv name '{0}'. Please use a name that contains only letters, digits, '_' and '-'."
    )]
    InvalidName(String),
    #[error("Could not determine the Python version of '{executable}': {reason}")]
    VersionProbe { executable: String, reason: String },
}

/// Lowercases `raw`, joins whitespace-separated words with `_` and drops every
/// character outside `[a-z0-9_-]`. The result may be empty.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Like [`normalize`], but rejects names that normalize to nothing.
pub fn normalize_non_empty(raw: &str) -> Result<String, NamingError> {
    let name = normalize(raw);
    if name.is_empty() {
        return Err(NamingError::InvalidName(raw.to_string()));
    }
    Ok(name)
}

/// Hex-encoded sha256 of the raw bytes of `path`.
pub fn content_hash(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_os_str().as_encoded_bytes());
    hex::encode(hasher.finalize())
}

/// The logical key of the local environment bound to `cwd`.
pub fn local_key(cwd: &Path) -> Result<String, NamingError> {
    let base = cwd
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = normalize(&base);
    if base.is_empty() {
        return Err(NamingError::InvalidName(cwd.display().to_string()));
    }
    Ok(format!("{}-{}", base, content_hash(cwd)))
}

/// Joins a logical key and a `py<version>` suffix into a directory name.
pub fn versioned_name(key: &str, version: &str) -> String {
    format!("{}-{}", key, version)
}

/// Splits `name` on the last `-py` into `(key, "py<version>")`.
///
/// The tail only counts as a version when it reads `<digits>.<digits>[...]`;
/// otherwise `(name, "")` is returned, so keys that merely contain `-py`
/// (e.g. `my-python-tools`) stay whole. Splitting on the last separator
/// already makes the tail a suffix, so that digit-shape check is the guard.
pub fn split_version_suffix(name: &str) -> (&str, &str) {
    let Some(idx) = name.rfind(VERSION_SEPARATOR) else {
        return (name, "");
    };
    let (Some(base), Some(version)) = (name.get(..idx), name.get(idx + 1..)) else {
        return (name, "");
    };
    let tail = version.strip_prefix(VERSION_PREFIX).unwrap_or_default();
    if !is_version_number(tail) {
        return (name, "");
    }
    (base, version)
}

pub fn is_version_number(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    parts.len() >= 2
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

/// Removes the trailing `-<sha256>` of a local key, for display.
///
/// Names too short to carry a hash, or whose tail is not hex, are returned as is.
pub fn strip_content_hash(name: &str) -> &str {
    let Some(split) = name.len().checked_sub(HASH_LEN + 1) else {
        return name;
    };
    if split == 0 {
        return name;
    }
    match (name.get(..split), name.get(split..)) {
        (Some(head), Some(tail))
            if tail.starts_with('-') && tail.bytes().skip(1).all(|b| b.is_ascii_hexdigit()) =>
        {
            head
        }
        _ => name,
    }
}

/// Drops the patch component of a `major.minor.patch` version string.
fn minor_version(version: &str) -> String {
    let parts: Vec<&str> = version.split('.').collect();
    match parts.as_slice() {
        [major, minor, _patch] => format!("{}.{}", major, minor),
        _ => version.to_string(),
    }
}

/// Parses the output of `python -V` (`Python 3.11.4`) into `py3.11`.
pub fn parse_version_output(executable: &str, output: &str) -> Result<String, NamingError> {
    let probe_error = |reason: String| NamingError::VersionProbe {
        executable: executable.to_string(),
        reason,
    };
    let fields: Vec<&str> = output.split_whitespace().collect();
    match fields.as_slice() {
        ["Python", number] => Ok(format!("{}{}", VERSION_PREFIX, minor_version(number))),
        [_, _] => Err(probe_error("executable is not a Python binary".to_string())),
        _ => Err(probe_error(format!(
            "unexpected version output '{}'",
            output.trim()
        ))),
    }
}

/// Asks `executable` for its version and returns it as `py<major>.<minor>`.
pub fn python_version(executable: &OsStr) -> Result<String, NamingError> {
    let name = executable.to_string_lossy().into_owned();
    let output = executor::capture(executable, ["-V"]).map_err(|e| NamingError::VersionProbe {
        executable: name.clone(),
        reason: e.output().trim().to_string(),
    })?;
    let version = parse_version_output(&name, &output)?;
    log::debug!("'{}' reports version {}", name, version);
    Ok(version)
}
