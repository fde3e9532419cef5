// src/core/mod.rs

pub mod config;
pub mod list_display;
pub mod naming;
pub mod notary;
pub mod paths;
pub mod sorting;
pub mod venv;
pub mod workdir;
