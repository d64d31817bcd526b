pub mod config;
pub mod goal;
pub mod summary;
pub mod system;
pub mod transaction;

use crate::cli::registry::{CommandEntry, CommandRegistry};

const ROOT_COMMAND_ORDER: &[&str] = &[
    "add", "edit", "delete", "history", "summary", "goal", "config", "intro", "help", "version",
    "exit",
];

fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(transaction::definitions());
    commands.extend(summary::definitions());
    commands.extend(goal::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn build_registry() -> CommandRegistry {
    CommandRegistry::with_order(all_entries(), ROOT_COMMAND_ORDER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_is_registered_in_menu_order() {
        let registry = build_registry();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ROOT_COMMAND_ORDER);
    }

    #[test]
    fn exit_answers_to_quit() {
        let registry = build_registry();
        assert_eq!(registry.resolve("quit").map(|entry| entry.name), Some("exit"));
        assert_eq!(registry.resolve("rm").map(|entry| entry.name), Some("delete"));
    }
}
