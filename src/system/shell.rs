// src/system/shell.rs

use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Filesystem Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Shell '{0}' is not supported. Use one of: bash, zsh, fish, powershell, cmd.")]
    Unsupported(String),
    #[error("Could not launch shell '{shell}': {source}")]
    Launch {
        shell: String,
        #[source]
        source: std::io::Error,
    },
}

/// The shells `activate` knows how to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Cmd,
}

impl ShellKind {
    /// Maps an executable name (`bash`, `pwsh.exe`, ...) to a shell kind.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_suffix(".exe").unwrap_or(name).to_lowercase();
        match name.as_str() {
            "bash" => Some(Self::Bash),
            "zsh" => Some(Self::Zsh),
            "fish" => Some(Self::Fish),
            "pwsh" | "powershell" => Some(Self::PowerShell),
            "cmd" => Some(Self::Cmd),
            _ => None,
        }
    }

    /// The activation script a venv provides for this shell.
    pub fn activation_script(self) -> &'static str {
        match self {
            Self::Bash | Self::Zsh => "activate",
            Self::Fish => "activate.fish",
            Self::PowerShell => "Activate.ps1",
            Self::Cmd => "activate.bat",
        }
    }

    fn executables(self) -> &'static [&'static str] {
        match self {
            Self::Bash => &["bash", "bash.exe"],
            Self::Zsh => &["zsh"],
            Self::Fish => &["fish"],
            Self::PowerShell => &["pwsh", "powershell", "powershell.exe", "pwsh.exe"],
            Self::Cmd => &["cmd.exe"],
        }
    }
}

/// A concrete shell to spawn: its kind and the executable that runs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    pub kind: ShellKind,
    pub executable: PathBuf,
}

impl Shell {
    /// Picks the shell to activate environments in.
    ///
    /// Order: the configured name, the parent process, `$SHELL`, the first
    /// supported shell on `PATH`, then the platform default.
    pub fn detect(preferred: Option<&str>) -> Result<Self, ShellError> {
        if let Some(name) = preferred {
            let kind =
                ShellKind::from_name(name).ok_or_else(|| ShellError::Unsupported(name.to_string()))?;
            return Ok(Self::from_kind(kind));
        }

        if let Some(shell) = parent_process_shell() {
            log::debug!("Detected parent shell: {:?}", shell);
            return Ok(shell);
        }

        if let Some(path) = env::var_os("SHELL").map(PathBuf::from)
            && let Some(kind) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(ShellKind::from_name)
        {
            log::debug!("Using $SHELL: {}", path.display());
            return Ok(Self {
                kind,
                executable: path,
            });
        }

        for kind in [
            ShellKind::Bash,
            ShellKind::Zsh,
            ShellKind::Fish,
            ShellKind::PowerShell,
        ] {
            if let Some(exe) = kind.executables().iter().find(|e| is_executable_in_path(e)) {
                return Ok(Self {
                    kind,
                    executable: PathBuf::from(exe),
                });
            }
        }

        Ok(Self::from_kind(default_shell_kind()))
    }

    fn from_kind(kind: ShellKind) -> Self {
        let exe = kind
            .executables()
            .iter()
            .find(|e| is_executable_in_path(e))
            .or_else(|| kind.executables().first())
            .copied()
            .unwrap_or("sh");
        Self {
            kind,
            executable: PathBuf::from(exe),
        }
    }

    /// A display name for messages.
    pub fn name(&self) -> &'static str {
        match self.kind {
            ShellKind::Bash => "Bash",
            ShellKind::Zsh => "Zsh",
            ShellKind::Fish => "Fish",
            ShellKind::PowerShell => "PowerShell",
            ShellKind::Cmd => "Cmd",
        }
    }

    /// Builds the command that sources `script` and leaves an interactive
    /// shell running. Bash reads its startup commands from `rc_file`.
    pub fn build_command(&self, script: &Path, rc_file: Option<&Path>) -> Command {
        let mut cmd = Command::new(&self.executable);
        match self.kind {
            ShellKind::Bash => {
                if let Some(rc) = rc_file {
                    cmd.arg("--rcfile").arg(rc);
                }
                cmd.arg("-i");
            }
            ShellKind::Zsh => {
                cmd.arg("-c").arg(format!(
                    "source {}; exec {} -i",
                    posix_quote(&script.to_string_lossy()),
                    posix_quote(&self.executable.to_string_lossy())
                ));
            }
            ShellKind::Fish => {
                cmd.arg("--interactive").arg("--init-command").arg(format!(
                    "source {}",
                    posix_quote(&script.to_string_lossy())
                ));
            }
            ShellKind::PowerShell => {
                cmd.arg("-NoExit").arg("-Command").arg(format!(
                    ". '{}'",
                    script.to_string_lossy().replace('\'', "''")
                ));
            }
            ShellKind::Cmd => {
                cmd.arg("/K").arg(script);
            }
        }
        cmd
    }

    /// Sources `script` in a new interactive shell and blocks until the user
    /// exits it.
    pub fn source(&self, script: &Path) -> Result<(), ShellError> {
        // Bash sources the script from a temporary rc file that also loads ~/.bashrc.
        let rc_file = match self.kind {
            ShellKind::Bash => Some(write_bash_rc(script)?),
            _ => None,
        };

        let mut cmd = self.build_command(script, rc_file.as_ref().map(|f| f.path()));
        log::debug!("Launching {:?}", cmd);
        let status = cmd.status().map_err(|e| ShellError::Launch {
            shell: self.executable.display().to_string(),
            source: e,
        })?;
        if !status.success() {
            log::warn!("Interactive shell exited with code: {:?}", status.code());
        }
        Ok(())
    }
}

fn write_bash_rc(script: &Path) -> Result<NamedTempFile, ShellError> {
    let mut rc = NamedTempFile::with_prefix("vn-bashrc-")?;
    writeln!(rc, "[ -f ~/.bashrc ] && . ~/.bashrc")?;
    writeln!(rc, ". {}", posix_quote(&script.to_string_lossy()))?;
    rc.flush()?;
    Ok(rc)
}

/// Wraps `value` in single quotes for POSIX shells.
fn posix_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

#[cfg(target_os = "linux")]
fn parent_process_shell() -> Option<Shell> {
    let ppid = std::os::unix::process::parent_id();
    let exe = std::fs::read_link(format!("/proc/{}/exe", ppid)).ok()?;
    let kind = ShellKind::from_name(exe.file_name()?.to_str()?)?;
    Some(Shell {
        kind,
        executable: exe,
    })
}

#[cfg(not(target_os = "linux"))]
fn parent_process_shell() -> Option<Shell> {
    None
}

fn is_executable_in_path(executable_name: &str) -> bool {
    if let Some(path_var) = env::var_os("PATH") {
        for path in env::split_paths(&path_var) {
            if path.join(executable_name).is_file() {
                return true;
            }
        }
    }
    false
}

fn default_shell_kind() -> ShellKind {
    if cfg!(target_os = "windows") {
        ShellKind::Cmd
    } else {
        ShellKind::Bash
    }
}
