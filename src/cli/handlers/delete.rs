use anyhow::Result;
use clap::Parser;
use colored::*;

use crate::{
    cli::handlers::commons::{self, Target},
    core::{list_display, notary::{Notary, key_of}},
    models::NotaryConfig,
};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Deletes a named environment, or the one bound to the current directory."
)]
struct DeleteArgs {
    /// Name of the global environment.
    name: Option<String>,

    /// Delete the environment of the current directory instead.
    #[arg(long, short)]
    local: bool,

    /// Picks one version when several are registered (an interpreter or `py3.11`).
    #[arg(long, short)]
    python: Option<String>,
}

pub fn handle(args: Vec<String>, notary: &mut Notary, _config: &NotaryConfig) -> Result<()> {
    let delete_args = DeleteArgs::try_parse_from(&args)?;
    let target = Target::from_args(delete_args.name, delete_args.local, "delete")?;
    let version = commons::version_filter(delete_args.python.as_deref())?;

    let venv = match &target {
        Target::Global(name) => notary.delete_global(name, version.as_deref())?,
        Target::Local => notary.delete_local(version.as_deref())?,
    };

    let label = key_of(&venv.path)
        .map(|(key, version)| {
            format!("{} ({})", list_display::display_name(&key, target.location()), version)
        })
        .unwrap_or_else(|| venv.path.display().to_string());
    println!(
        "{} {}",
        t!("common.success"),
        format_args!(t!("delete.success"), name = label.cyan())
    );
    Ok(())
}
