use anyhow::Result;
use clap::Parser;
use std::env;

use crate::{
    cli::handlers::commons,
    constants::{ACTIVE_ENV_VAR, VERSION_PREFIX},
    core::{list_display, notary::Notary},
    models::{Location, NotaryConfig},
};

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Lists registered environments.")]
struct ListArgs {
    /// Only global environments.
    #[arg(long, short, conflicts_with = "local")]
    global: bool,

    /// Only local environments.
    #[arg(long, short)]
    local: bool,

    /// Only environments of this version (an interpreter or `py3.11`).
    #[arg(long, short)]
    python: Option<String>,

    /// Print a JSON array instead of the table.
    #[arg(long)]
    json: bool,
}

pub fn handle(args: Vec<String>, notary: &mut Notary, _config: &NotaryConfig) -> Result<()> {
    let list_args = ListArgs::try_parse_from(&args)?;
    let version = commons::version_filter(list_args.python.as_deref())?;

    let locations: Vec<Location> = match (list_args.global, list_args.local) {
        (true, _) => vec![Location::Global],
        (_, true) => vec![Location::Local],
        _ => vec![Location::Global, Location::Local],
    };

    let active = env::var_os(ACTIVE_ENV_VAR);
    let mut summaries = Vec::new();
    for location in &locations {
        summaries.extend(list_display::summarize(
            &notary.list(*location),
            *location,
            active.as_deref(),
        ));
    }
    if let Some(version) = &version {
        let number = version.strip_prefix(VERSION_PREFIX).unwrap_or(version);
        summaries.retain(|s| s.version == number);
    }

    if list_args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    let sections: Vec<String> = locations
        .iter()
        .map(|location| list_display::render(&summaries, *location))
        .collect();
    print!("{}", sections.join("\n"));
    Ok(())
}
