// src/bin/vn.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use venv_notary::{
    cli::{Cli, dispatcher},
    core::{
        config,
        notary::{Notary, NotaryError},
    },
    t,
};

/// Sets up logging, opens the registry, dispatches, and prints any error.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {}", "Error".red().bold(), e);
        if let Some(NotaryError::NotRegistered { .. }) = e.downcast_ref::<NotaryError>() {
            eprintln!("{}", t!("error.hint.create").dimmed());
        }
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let mut notary = Notary::new()?;
    let config = config::load_config(notary.root())?;
    log::debug!("Loaded config: {:?}", config);

    dispatcher::dispatch(cli.args, &mut notary, &config)
}
