use anyhow::Result;
use clap::Parser;
use colored::*;

use crate::{
    cli::handlers::commons::{self, Target},
    core::notary::Notary,
    models::NotaryConfig,
};

#[derive(Parser, Debug, Default)]
#[command(
    no_binary_name = true,
    about = "Creates a named environment, or one bound to the current directory."
)]
struct CreateArgs {
    /// Name of the global environment.
    name: Option<String>,

    /// Create the environment of the current directory instead.
    #[arg(long, short)]
    local: bool,

    /// Interpreter to build the environment with.
    #[arg(long, short)]
    python: Option<String>,
}

pub fn handle(args: Vec<String>, notary: &mut Notary, config: &NotaryConfig) -> Result<()> {
    let create_args = CreateArgs::try_parse_from(&args)?;
    let target = Target::from_args(create_args.name, create_args.local, "create")?;
    let python = commons::interpreter(create_args.python.as_deref(), config)?;

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
    Ok(())
}
