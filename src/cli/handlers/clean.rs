use anyhow::{Result, anyhow};
use clap::Parser;
use colored::*;

use crate::{
    cli::handlers::commons,
    core::notary::Notary,
    models::{Location, NotaryConfig},
};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Deletes every local and/or global environment, optionally filtered."
)]
struct CleanArgs {
    /// Delete local environments.
    #[arg(long, short)]
    local: bool,

    /// Delete global environments.
    #[arg(long, short)]
    global: bool,

    /// Only environments of this version (an interpreter or `py3.11`).
    #[arg(long, short)]
    python: Option<String>,

    /// Only environments whose name contains this text.
    #[arg(long, short)]
    name: Option<String>,

    /// Do not ask for confirmation.
    #[arg(long, short)]
    yes: bool,
}

pub fn handle(args: Vec<String>, notary: &mut Notary, _config: &NotaryConfig) -> Result<()> {
    let clean_args = CleanArgs::try_parse_from(&args)?;
    if !clean_args.local && !clean_args.global {
        return Err(anyhow!(t!("clean.error.location_required")));
    }
    let version = commons::version_filter(clean_args.python.as_deref())?;

    let mut locations = Vec::new();
    if clean_args.global {
        locations.push(Location::Global);
    }
    if clean_args.local {
        locations.push(Location::Local);
    }
    let scope = locations
        .iter()
        .map(Location::to_string)
        .collect::<Vec<_>>()
        .join(" + ");

    let prompt = format!(t!("clean.prompt.are_you_sure"), scope = scope);
    if !commons::confirm(&prompt, clean_args.yes)? {
        return Ok(());
    }

    let mut deleted = 0;
    let mut failed = 0;
    for location in locations {
        let report = notary.clean(location, version.as_deref(), clean_args.name.as_deref());
        for path in &report.skipped_active {
            println!(
                "  - {}",
                format!(t!("clean.warning.skipped_active"), path = path.display()).yellow()
            );
        }
        for (path, reason) in &report.failed {
            eprintln!(
                "  - {}",
                format!(t!("clean.warning.failed"), path = path.display(), reason = reason).red()
            );
        }
        deleted += report.deleted.len();
        failed += report.failed.len();
    }

    println!(
        "{} {}",
        t!("common.success"),
        format_args!(t!("clean.success"), count = deleted)
    );
    if failed > 0 {
        return Err(anyhow!(t!("clean.error.failures"), count = failed));
    }
    Ok(())
}
