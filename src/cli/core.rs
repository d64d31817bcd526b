//! Command dispatch, error reporting and shell-wide helpers.

use std::io;

use strsim::levenshtein;
use thiserror::Error;

use crate::errors::{CliError, LedgerError};

use super::io as cli_io;
use super::output;
use super::registry::CommandEntry;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(err) => CommandError::Ledger(err),
            other => CommandError::Message(other.to_string()),
        }
    }
}

impl CommandError {
    pub(crate) fn usage(entry_usage: &str) -> Self {
        CommandError::InvalidArguments(format!("usage: {}", entry_usage))
    }
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        super::shell::handle_line(self, line)
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.resolve(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_ascii_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn prompt(&self) -> String {
        format!("pockets [{}]> ", self.format_amount(self.store.ledger().balance()))
    }

    /// Script runs never block on a prompt and answer yes.
    pub(crate) fn confirm(&self, question: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, question, false)?)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit Brainy Pockets?", true)?)
    }

    /// Handlers that need a prompt call this first; script runs must pass arguments.
    pub(crate) fn require_interactive(&self, usage: &str) -> CommandResult {
        if self.is_interactive() {
            Ok(())
        } else {
            Err(CommandError::usage(usage))
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Ledger(err) => {
                tracing::debug!(error = %err, "command rejected by ledger");
                output::error(err);
                Ok(())
            }
            CommandError::Io(err) => Err(CliError::Io(err)),
            other => {
                output::error(other);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    base: &std::path::Path,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_base_dir(CliMode::Script, base.to_path_buf())?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn script_runs_the_reference_scenario() {
        let temp = TempDir::new().unwrap();
        let app = process_script(
            temp.path(),
            &[
                "add income 1000 source=Banco",
                "add expense 300 category=Comida source=Efectivo",
            ],
        )
        .unwrap();
        assert_eq!(app.store.ledger().balance(), dec(700));
        assert_eq!(app.store.ledger().total_expenses(), dec(300));

        let temp = TempDir::new().unwrap();
        let app = process_script(
            temp.path(),
            &[
                "add income 1000 source=Banco",
                "add expense 300 category=Comida source=Efectivo",
                "edit 1 expense 500 category=Salida",
                "delete 0",
            ],
        )
        .unwrap();
        let ledger = app.store.ledger();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.balance(), dec(-500));
        assert_eq!(ledger.total_expenses(), dec(500));
        assert_eq!(ledger.transactions()[0].category.as_deref(), Some("Salida"));
        assert_eq!(ledger.transactions()[0].source, "Efectivo");
    }

    #[test]
    fn rejected_commands_leave_state_untouched() {
        let temp = TempDir::new().unwrap();
        let app = process_script(
            temp.path(),
            &[
                "add expense 0 category=Comida source=Efectivo",
                "add expense 10 source=Efectivo",
                "add income -5 source=Banco",
                "delete 3",
                "edit 0 amount=12",
            ],
        )
        .unwrap();
        assert!(app.store.ledger().is_empty());
        assert!(app.running);
    }

    #[test]
    fn exit_stops_processing() {
        let temp = TempDir::new().unwrap();
        let app = process_script(
            temp.path(),
            &["add income 10 source=Banco", "exit", "add income 20 source=Banco"],
        )
        .unwrap();
        assert_eq!(app.store.ledger().len(), 1);
        assert!(!app.running);
    }

    #[test]
    fn config_changes_apply_to_the_live_store() {
        let temp = TempDir::new().unwrap();
        let app = process_script(
            temp.path(),
            &[
                "config set category_policy optional",
                "add expense 10 source=Efectivo",
            ],
        )
        .unwrap();
        assert_eq!(app.store.ledger().len(), 1);

        let reloaded = ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf())
            .unwrap();
        assert_eq!(
            reloaded.config.category_policy,
            crate::ledger::CategoryPolicy::Optional
        );
    }

    #[test]
    fn goal_commands_track_progress() {
        let temp = TempDir::new().unwrap();
        let app = process_script(
            temp.path(),
            &[
                "goal add Vacaciones 1.000,50 🏖️",
                "goal progress 1 250",
                "goal edit 1 target=2000",
            ],
        )
        .unwrap();
        let goal = &app.store.goals().goals()[0];
        assert_eq!(goal.name, "Vacaciones");
        assert_eq!(goal.target_amount, dec(2000));
        assert_eq!(goal.current_amount, dec(250));

        let temp = TempDir::new().unwrap();
        let app = process_script(
            temp.path(),
            &["goal add Auto 500 🚗", "goal remove 1"],
        )
        .unwrap();
        assert!(app.store.goals().is_empty());
    }

    #[test]
    fn unknown_commands_do_not_stop_the_shell() {
        let temp = TempDir::new().unwrap();
        let app = process_script(temp.path(), &["sumary", "histroy"]).unwrap();
        assert!(app.running);
        assert!(app.store.ledger().is_empty());
    }

    #[test]
    fn exit_prompt_failures_surface_as_prompt_errors() {
        let temp = TempDir::new().unwrap();
        let app = ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf()).unwrap();
        assert!(app.confirm_exit().unwrap());

        let failure = dialoguer::Error::IO(io::Error::new(
            io::ErrorKind::NotConnected,
            "not a terminal",
        ));
        let err: Result<bool, CliError> = Err(failure).map_err(CliError::from);
        assert!(matches!(err, Err(CliError::Prompt(_))));
    }

    #[test]
    fn command_aliases_reach_the_same_handlers() {
        let temp = TempDir::new().unwrap();
        let app = process_script(
            temp.path(),
            &[
                "add income 1000 source=Banco",
                "rm 0",
                "goal new Auto 500 🚗",
                "goal save 1 100",
                "quit",
                "add income 5 source=Banco",
            ],
        )
        .unwrap();
        assert!(app.store.ledger().is_empty());
        assert_eq!(app.store.goals().goals()[0].current_amount, dec(100));
        assert!(!app.running);
    }
}
