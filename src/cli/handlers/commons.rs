// src/cli/handlers/commons.rs

use anyhow::{Result, anyhow};
use dialoguer::{Confirm, theme::ColorfulTheme};
use std::ffi::OsString;

use crate::{
    constants::VERSION_PREFIX,
    core::{naming, paths},
    models::{Location, NotaryConfig},
};

/// What a `[name] [--local]` pair points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Global(String),
    Local,
}

impl Target {
    /// Enforces that exactly one of a positional name and `--local` is given.
    pub fn from_args(name: Option<String>, local: bool, command: &str) -> Result<Self> {
        match (name, local) {
            (Some(_), true) => Err(anyhow!(t!("error.name_and_local"), command = command)),
            (Some(name), false) => Ok(Target::Global(name)),
            (None, true) => Ok(Target::Local),
            (None, false) => Err(anyhow!(t!("error.name_or_local_required"), command = command)),
        }
    }

    pub fn location(&self) -> Location {
        match self {
            Target::Global(_) => Location::Global,
            Target::Local => Location::Local,
        }
    }
}

/// The interpreter to create with: `--python`, then the config, then `python`.
/// Paths are expanded and made absolute.
pub fn interpreter(python: Option<&str>, config: &NotaryConfig) -> Result<OsString> {
    Ok(paths::resolve_executable(config.python_or_default(python))?)
}

/// Turns a `--python` value into the `py<major>.<minor>` suffix used on disk.
///
/// A value already in that shape (`py3.11`) is taken as is; anything else is
/// treated as an interpreter and asked for its version.
pub fn version_filter(python: Option<&str>) -> Result<Option<String>> {
    let Some(raw) = python else {
        return Ok(None);
    };
    if let Some(number) = raw.strip_prefix(VERSION_PREFIX)
        && naming::is_version_number(number)
    {
        return Ok(Some(raw.to_string()));
    }
    let executable = paths::resolve_executable(raw)?;
    Ok(Some(naming::python_version(&executable)?))
}

/// Asks a yes/no question, defaulting to no. `assume_yes` skips the prompt.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    if !confirmed {
        println!("\n{}", t!("common.info.operation_cancelled"));
    }
    Ok(confirmed)
}
