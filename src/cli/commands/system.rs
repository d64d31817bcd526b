use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "intro",
            "Show the welcome screen again",
            "intro [reset]",
            cmd_intro,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit", "q"]),
    ]
}

/// Welcome screen shown on the first interactive start.
pub(crate) fn show_intro() {
    output::section("Brainy Pockets");
    output::info("Track what comes in and what goes out, and save toward your goals.");
    output::info("  add      record an income or an expense");
    output::info("  history  review, edit or delete what you recorded");
    output::info("  summary  see your balance at a glance");
    output::info("  goal     set savings goals and track progress");
    output::hint("Type `help` at any time to list every command.");
}

fn cmd_intro(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_ascii_lowercase()) {
        None => {
            show_intro();
            context.intro.mark_seen()?;
            Ok(())
        }
        Some(action) if action == "reset" => {
            context.intro.reset()?;
            output::success("The welcome screen will show on next start.");
            Ok(())
        }
        Some(_) => Err(CommandError::usage("intro [reset]")),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Brainy Pockets {}", meta.version));
    output::two_column(&[
        (
            "Build hash",
            format!("{} ({})", meta.git_hash, meta.git_status),
        ),
        ("Built at", meta.timestamp.to_string()),
        ("Target", meta.target.to_string()),
        ("Profile", meta.profile.to_string()),
        ("Rustc", meta.rustc.to_string()),
    ]);
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        match context.command(&name) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(args[0]),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
