// src/cli/handlers/mod.rs

pub mod activate;
pub mod clean;
pub mod commons;
pub mod create;
pub mod delete;
pub mod list;
