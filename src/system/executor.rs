// src/system/executor.rs

use std::ffi::OsStr;
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    #[error("Command '{command}' exited with a non-zero error code: {output}")]
    NonZeroExitStatus { command: String, output: String },
}

impl ExecutionError {
    /// The text to show the user: the captured output when there is any,
    /// the OS error otherwise.
    pub fn output(&self) -> String {
        match self {
            Self::CommandFailed(_, e) => e.to_string(),
            Self::NonZeroExitStatus { output, .. } => output.clone(),
        }
    }
}

/// Runs a program to completion and returns its stdout followed by its stderr.
///
/// The child gets no stdin. Output is captured rather than streamed so
/// failures can carry it verbatim. This call blocks with no timeout.
pub fn capture<I, S>(program: &OsStr, args: I) -> Result<String, ExecutionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<_> = args.into_iter().map(|a| a.as_ref().to_os_string()).collect();
    let command_line = describe(program, &args);
    log::debug!("Running: {}", command_line);

    let output = StdCommand::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| ExecutionError::CommandFailed(command_line.clone(), e))?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        log::debug!(
            "'{}' exited with {:?}: {}",
            command_line,
            output.status.code(),
            combined.trim()
        );
        return Err(ExecutionError::NonZeroExitStatus {
            command: command_line,
            output: combined,
        });
    }
    Ok(combined)
}

fn describe(program: &OsStr, args: &[std::ffi::OsString]) -> String {
    let mut line = program.to_string_lossy().into_owned();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}
