use anyhow::Result;
use clap::Parser;
use colored::*;

use crate::{
    cli::handlers::commons::{self, Target},
    core::notary::{Notary, NotaryError, key_of},
    models::NotaryConfig,
    system::shell::Shell,
};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Activates an environment in a new shell, creating it first if needed."
)]
struct ActivateArgs {
    /// Name of the global environment.
    name: Option<String>,

    /// Activate the environment of the current directory instead.
    #[arg(long, short)]
    local: bool,

    /// Picks one version when several are registered, and builds a missing
    /// environment with this interpreter.
    #[arg(long, short)]
    python: Option<String>,

    /// Create a missing environment without asking.
    #[arg(long, short)]
    yes: bool,
}

pub fn handle(args: Vec<String>, notary: &mut Notary, config: &NotaryConfig) -> Result<()> {
    let activate_args = ActivateArgs::try_parse_from(&args)?;
    let target = Target::from_args(activate_args.name, activate_args.local, "activate")?;
    let version = commons::version_filter(activate_args.python.as_deref())?;
    let shell = Shell::detect(config.shell.as_deref())?;

    let resolved = match &target {
        Target::Global(name) => notary.resolve_global(name, version.as_deref()),
        Target::Local => notary.resolve_local(version.as_deref()),
    };

    let venv = match resolved {
        Ok(venv) => venv,
        Err(NotaryError::NotRegistered { name, .. }) => {
            let prompt = format!(t!("activate.prompt.create"), name = name);
            if !commons::confirm(&prompt, activate_args.yes)? {
                return Ok(());
            }
            let python = commons::interpreter(activate_args.python.as_deref(), config)?;
            let venv = match &target {
                Target::Global(name) => notary.create_global(name, Some(python))?,
                Target::Local => notary.create_local(Some(python))?,
            };
            println!(
                "{} {}",
                t!("common.success"),
                format_args!(
                    t!("create.success"),
                    name = venv.prompt.as_deref().unwrap_or_default().cyan(),
                    path = venv.path.display()
                )
            );
            venv
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "{}",
        format!(
            t!("activate.info.entering"),
            path = venv.path.display(),
            shell = shell.name()
        )
        .dimmed()
    );
    let pinned = key_of(&venv.path).map(|(_, version)| version);
    match &target {
        Target::Global(name) => notary.activate_global(name, pinned.as_deref(), &shell)?,
        Target::Local => notary.activate_local(pinned.as_deref(), &shell)?,
    }
    Ok(())
}
