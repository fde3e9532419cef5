// src/models.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::constants::{GLOBAL_DIR, LOCAL_DIR};

/// Where an environment is registered.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Named environment, addressed by its normalized name.
    Global,
    /// Environment bound to a working directory, addressed by name and path hash.
    Local,
}

impl Location {
    /// The registry subdirectory holding environments of this kind.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Global => GLOBAL_DIR,
            Self::Local => LOCAL_DIR,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// User configuration stored in `config.toml` inside the registry directory.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NotaryConfig {
    /// Interpreter used to create environments when `--python` is not given.
    pub python: Option<String>,
    /// Preferred shell for `activate` (`bash`, `zsh`, `fish`, `powershell`, `cmd`).
    pub shell: Option<String>,
}

/// One registered environment, as reported by `vn list --json`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VenvSummary {
    /// Display name (hash stripped for local environments).
    pub name: String,
    pub location: Location,
    /// Interpreter version without the `py` prefix, e.g. `3.11`.
    pub version: String,
    pub path: PathBuf,
    pub active: bool,
}
