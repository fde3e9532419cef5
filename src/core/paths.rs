// src/core/paths.rs

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{DATA_HOME_ENV, NOTARY_DIR, WINDOWS_DATA_HOME_ENV};

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not find the user's home directory.")]
    HomeDirNotFound,
    #[error("Could not create directory at '{path}': {source}")]
    DirCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not determine the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// Picks the data home: the explicit variable when set to an absolute path,
/// otherwise the platform's per-user data directory under `home`.
pub fn data_home_from(explicit: Option<OsString>, home: Option<PathBuf>) -> Result<PathBuf, PathError> {
    if let Some(dir) = explicit.filter(|d| !d.is_empty()) {
        let dir = PathBuf::from(dir);
        if dir.is_absolute() {
            return Ok(dir);
        }
        log::warn!("Ignoring relative data home '{}'", dir.display());
    }
    let home = home.ok_or(PathError::HomeDirNotFound)?;
    let suffix = if cfg!(target_os = "windows") {
        Path::new("AppData").join("Local")
    } else if cfg!(target_os = "macos") {
        PathBuf::from("Library")
    } else {
        Path::new(".local").join("share")
    };
    Ok(home.join(suffix))
}

/// Returns the user's data home (`$XDG_DATA_HOME`, `%LOCALAPPDATA%` or the
/// conventional fallback).
pub fn get_data_home() -> Result<PathBuf, PathError> {
    let var = if cfg!(target_os = "windows") {
        WINDOWS_DATA_HOME_ENV
    } else {
        DATA_HOME_ENV
    };
    data_home_from(std::env::var_os(var), dirs::home_dir())
}

/// Returns `<data home>/venv-notary`. The directory is not created here.
pub fn get_notary_dir() -> Result<PathBuf, PathError> {
    get_data_home().map(|dir| dir.join(NOTARY_DIR))
}

/// Creates `path` and its parents if missing.
pub fn ensure_dir(path: &Path) -> Result<(), PathError> {
    fs::create_dir_all(path).map_err(|e| PathError::DirCreation {
        path: path.display().to_string(),
        source: e,
    })
}

/// The current working directory, with Windows verbatim prefixes removed.
pub fn current_dir() -> Result<PathBuf, PathError> {
    let cwd = std::env::current_dir().map_err(PathError::CurrentDir)?;
    Ok(dunce::simplified(&cwd).to_path_buf())
}

/// Expands `~` and environment variables in a user-supplied interpreter and,
/// when it names a path rather than a bare command, makes it absolute so it
/// survives a change of working directory.
pub fn resolve_executable(raw: &str) -> Result<OsString, PathError> {
    let expanded = shellexpand::full(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|e| {
            log::warn!("Could not expand '{}': {}. Using it verbatim.", raw, e);
            raw.to_string()
        });
    let path = Path::new(&expanded);
    if path.components().count() <= 1 && !path.is_absolute() {
        // A bare command name, looked up on PATH by the OS.
        return Ok(OsString::from(expanded));
    }
    let absolute = std::path::absolute(path).map_err(PathError::CurrentDir)?;
    Ok(absolute.into_os_string())
}
