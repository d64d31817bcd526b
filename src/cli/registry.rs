//! Command table for the shell.
//!
//! Entries are kept in menu order and can be reached by their name or by any
//! alias. Sub-actions such as `goal add` use the same alias matching through
//! [`ActionAlias`].

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            description,
            usage,
            handler,
        }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    fn answers_to(&self, word: &str) -> bool {
        self.name.eq_ignore_ascii_case(word)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(word))
    }
}

/// A sub-action word and the alternative spellings it accepts.
pub struct ActionAlias {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl ActionAlias {
    pub const fn new(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { name, aliases }
    }
}

/// Maps `word` onto the canonical action name from `table`.
pub fn canonical_action(table: &[ActionAlias], word: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|action| {
            action.name.eq_ignore_ascii_case(word)
                || action.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(word))
        })
        .map(|action| action.name)
}

pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    /// Builds the table, placing entries named in `order` first, in that order.
    /// A later entry with an already registered name is dropped.
    pub fn with_order(entries: Vec<CommandEntry>, order: &[&str]) -> Self {
        let mut unique: Vec<CommandEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if !unique.iter().any(|known| known.name == entry.name) {
                unique.push(entry);
            }
        }
        unique.sort_by_key(|entry| {
            order
                .iter()
                .position(|name| entry.name.eq_ignore_ascii_case(name))
                .unwrap_or(order.len())
        });
        Self { entries: unique }
    }

    /// Finds a command by name or alias, ignoring case.
    pub fn resolve(&self, word: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.answers_to(word))
    }

    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Canonical names, used for completion and suggestions.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn handler(&self, word: &str) -> Option<CommandHandler> {
        self.resolve(word).map(|entry| entry.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut ShellContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn entries_follow_the_given_order_and_resolve_aliases() {
        let registry = CommandRegistry::with_order(
            vec![
                CommandEntry::new("exit", "", "", noop).with_aliases(&["quit"]),
                CommandEntry::new("extra", "", "", noop),
                CommandEntry::new("add", "", "", noop),
                CommandEntry::new("add", "duplicate", "", noop),
            ],
            &["add", "exit"],
        );
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["add", "exit", "extra"]);
        assert_eq!(registry.resolve("QUIT").map(|entry| entry.name), Some("exit"));
        assert_eq!(registry.resolve("add").map(|entry| entry.description), Some(""));
        assert!(registry.resolve("nope").is_none());
    }

    #[test]
    fn sub_actions_map_to_canonical_names() {
        const ACTIONS: &[ActionAlias] = &[
            ActionAlias::new("remove", &["delete", "rm"]),
            ActionAlias::new("list", &["ls"]),
        ];
        assert_eq!(canonical_action(ACTIONS, "RM"), Some("remove"));
        assert_eq!(canonical_action(ACTIONS, "list"), Some("list"));
        assert_eq!(canonical_action(ACTIONS, "drop"), None);
    }
}
