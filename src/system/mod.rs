//! # System Interaction Layer
//!
//! Abstractions over the operating system that the registry relies on.
//!
//! ## Modules
//!
//! - **`executor`**: runs short-lived external programs (interpreter probes,
//!   `python -m venv`) and captures their combined output.
//! - **`shell`**: detects the user's shell and spawns the interactive
//!   sub-shell that sources an environment's activation script.

pub mod executor;
pub mod shell;
