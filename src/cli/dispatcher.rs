use anyhow::{Result, anyhow};

use crate::{cli::handlers, core::notary::Notary, models::NotaryConfig};

/// Defines a command, its aliases, and the handler that parses the remaining args.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>, &mut Notary, &NotaryConfig) -> Result<()>,
}

/// The single source of truth for all commands.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "activate",
        aliases: &["act"],
        handler: handlers::activate::handle,
    },
    CommandDefinition {
        name: "clean",
        aliases: &[],
        handler: handlers::clean::handle,
    },
    CommandDefinition {
        name: "create",
        aliases: &["new"],
        handler: handlers::create::handle,
    },
    CommandDefinition {
        name: "delete",
        aliases: &["rm"],
        handler: handlers::delete::handle,
    },
    CommandDefinition {
        name: "list",
        aliases: &["ls"],
        handler: handlers::list::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Routes `vn <command> [args...]` to its handler. With no command, lists
/// every environment.
pub fn dispatch(all_args: Vec<String>, notary: &mut Notary, config: &NotaryConfig) -> Result<()> {
    log::debug!("Dispatching args: {:?}", all_args);

    let mut args = all_args.into_iter();
    let Some(action) = args.next() else {
        return handlers::list::handle(Vec::new(), notary, config);
    };

    let command = find_command(&action)
        .ok_or_else(|| anyhow!(t!("error.unknown_command"), command = action))?;
    (command.handler)(args.collect(), notary, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_command_by_name_and_alias() {
        assert_eq!(find_command("delete").map(|c| c.name), Some("delete"));
        assert_eq!(find_command("rm").map(|c| c.name), Some("delete"));
        assert_eq!(find_command("act").map(|c| c.name), Some("activate"));
        assert_eq!(find_command("ls").map(|c| c.name), Some("list"));
        assert!(find_command("tree").is_none());
    }

    #[test]
    fn test_aliases_are_unique() {
        let mut seen = Vec::new();
        for cmd in COMMAND_REGISTRY {
            for key in std::iter::once(&cmd.name).chain(cmd.aliases) {
                assert!(!seen.contains(key), "duplicate command key '{}'", key);
                seen.push(*key);
            }
        }
    }
}
