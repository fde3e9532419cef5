// src/core/venv.rs

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{ACTIVE_ENV_VAR, DEFAULT_PYTHON, VENV_ACTIVATE, VENV_EXEC_DIR, VENV_PYTHON};
use crate::core::naming::{self, NamingError};
use crate::system::executor;
use crate::system::shell::{Shell, ShellError};

/// Errors raised by operations on a single environment directory.
#[derive(Error, Debug)]
pub enum VenvError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory or file already exists at '{0}'.")]
    AlreadyExists(PathBuf),
    #[error("Failed to create environment at '{path}': {output}")]
    Creation { path: PathBuf, output: String },
    #[error("'{0}' is not a python environment!")]
    NotAVenv(PathBuf),
    #[error("Environment '{0}' is active. Deactivate it before deleting it.")]
    ActiveEnvironment(PathBuf),
    #[error("Environment '{0}' is already active.")]
    AlreadyActive(PathBuf),
    #[error("Environment '{venv}' has no activation script '{script}' for this shell.")]
    MissingActivationScript { venv: PathBuf, script: String },
    #[error(transparent)]
    Naming(#[from] NamingError),
    #[error(transparent)]
    Shell(#[from] ShellError),
}

/// A handle on one concrete environment directory.
///
/// The handle itself holds no state about the directory; every query goes to
/// the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venv {
    pub path: PathBuf,
    /// Prompt shown by the activated shell, passed to `venv --prompt`.
    pub prompt: Option<String>,
    /// Interpreter bound to this handle; `python` on `PATH` when unset.
    pub python: Option<OsString>,
}

impl Venv {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            prompt: None,
            python: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_python(mut self, python: Option<OsString>) -> Self {
        self.python = python;
        self
    }

    /// Directory holding the interpreter and activation scripts.
    pub fn exec_dir(&self) -> PathBuf {
        self.path.join(VENV_EXEC_DIR)
    }

    fn interpreter(&self) -> &OsStr {
        self.python
            .as_deref()
            .unwrap_or_else(|| OsStr::new(DEFAULT_PYTHON))
    }

    /// True when the path is a directory with an activation script and an
    /// interpreter binary, both regular files.
    pub fn exists(&self) -> bool {
        self.path.is_dir()
            && is_regular_file(&self.exec_dir().join(VENV_ACTIVATE))
            && is_regular_file(&self.exec_dir().join(VENV_PYTHON))
    }

    /// Compares this handle's path with the activated-environment marker.
    pub fn is_active(&self) -> bool {
        self.is_active_with(std::env::var_os(ACTIVE_ENV_VAR).as_deref())
    }

    pub fn is_active_with(&self, active: Option<&OsStr>) -> bool {
        active.is_some_and(|a| !a.is_empty() && Path::new(a) == self.path)
    }

    /// The bound interpreter's version as `py<major>.<minor>`.
    pub fn python_version(&self) -> Result<String, VenvError> {
        Ok(naming::python_version(self.interpreter())?)
    }

    /// Builds the environment with `<python> -m venv`.
    ///
    /// Fails when anything already exists at the path. If the tool fails, any
    /// partially written directory is removed before the error is returned.
    pub fn create(&self) -> Result<(), VenvError> {
        match fs::symlink_metadata(&self.path) {
            Ok(_) => return Err(VenvError::AlreadyExists(self.path.clone())),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let mut args: Vec<OsString> = vec!["-m".into(), "venv".into()];
        if let Some(prompt) = &self.prompt {
            args.push("--prompt".into());
            args.push(prompt.into());
        }
        args.push(self.path.clone().into_os_string());

        if let Err(e) = executor::capture(self.interpreter(), &args) {
            if self.path.exists()
                && let Err(cleanup) = fs::remove_dir_all(&self.path)
            {
                log::warn!(
                    "Could not remove partial environment '{}': {}",
                    self.path.display(),
                    cleanup
                );
            }
            return Err(VenvError::Creation {
                path: self.path.clone(),
                output: e.output().trim().to_string(),
            });
        }
        log::info!("Created environment at {}", self.path.display());
        Ok(())
    }

    /// Removes the environment directory tree.
    pub fn delete(&self) -> Result<(), VenvError> {
        self.delete_with(std::env::var_os(ACTIVE_ENV_VAR).as_deref())
    }

    /// [`Venv::delete`] against an explicit activation marker.
    pub fn delete_with(&self, active: Option<&OsStr>) -> Result<(), VenvError> {
        if self.is_active_with(active) {
            return Err(VenvError::ActiveEnvironment(self.path.clone()));
        }
        if !self.exists() {
            return Err(VenvError::NotAVenv(self.path.clone()));
        }
        fs::remove_dir_all(&self.path)?;
        log::info!("Deleted environment at {}", self.path.display());
        Ok(())
    }

    /// Sources the environment in a new interactive `shell`. Blocks until the
    /// shell exits.
    pub fn activate(&self, shell: &Shell) -> Result<(), VenvError> {
        self.activate_with(shell, std::env::var_os(ACTIVE_ENV_VAR).as_deref())
    }

    /// [`Venv::activate`] against an explicit activation marker.
    pub fn activate_with(&self, shell: &Shell, active: Option<&OsStr>) -> Result<(), VenvError> {
        if !self.exists() {
            return Err(VenvError::NotAVenv(self.path.clone()));
        }
        if self.is_active_with(active) {
            return Err(VenvError::AlreadyActive(self.path.clone()));
        }
        let script_name = shell.kind.activation_script();
        let script = self.exec_dir().join(script_name);
        if !is_regular_file(&script) {
            return Err(VenvError::MissingActivationScript {
                venv: self.path.clone(),
                script: script_name.to_string(),
            });
        }
        log::debug!("Activating {} with {}", self.path.display(), shell.name());
        shell.source(&script)?;
        Ok(())
    }
}

fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file())
}
