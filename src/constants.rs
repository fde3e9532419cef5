// src/constants.rs

/// The name of the registry directory inside the user's data home.
pub const NOTARY_DIR: &str = "venv-notary";

/// The subdirectory holding named (global) environments.
pub const GLOBAL_DIR: &str = "global";

/// The subdirectory holding directory-scoped (local) environments.
pub const LOCAL_DIR: &str = "local";

/// The name of the configuration file (inside the registry directory).
pub const CONFIG_FILENAME: &str = "config.toml";

/// Prefix of the interpreter version encoded in an environment directory name.
pub const VERSION_PREFIX: &str = "py";

/// Separator between the logical key and the version, e.g. `myenv-py3.11`.
pub const VERSION_SEPARATOR: &str = "-py";

/// Length of a hex-encoded sha256 digest.
pub const HASH_LEN: usize = 64;

/// Number of hash characters kept when displaying a local environment.
pub const DISPLAY_HASH_LEN: usize = 4;

/// Interpreter used when neither `--python` nor the config names one.
pub const DEFAULT_PYTHON: &str = "python";

/// Set by activation scripts to the path of the active environment.
pub const ACTIVE_ENV_VAR: &str = "VIRTUAL_ENV";

/// Explicit data home on unix-like systems.
pub const DATA_HOME_ENV: &str = "XDG_DATA_HOME";

/// Explicit data home on Windows.
pub const WINDOWS_DATA_HOME_ENV: &str = "LOCALAPPDATA";

/// Directory holding the interpreter and activation scripts of an environment.
#[cfg(windows)]
pub const VENV_EXEC_DIR: &str = "Scripts";
/// Directory holding the interpreter and activation scripts of an environment.
#[cfg(not(windows))]
pub const VENV_EXEC_DIR: &str = "bin";

/// File name of the interpreter inside [`VENV_EXEC_DIR`].
#[cfg(windows)]
pub const VENV_PYTHON: &str = "python.exe";
/// File name of the interpreter inside [`VENV_EXEC_DIR`].
#[cfg(not(windows))]
pub const VENV_PYTHON: &str = "python";

/// The POSIX activation script, used for the validity check.
pub const VENV_ACTIVATE: &str = "activate";
