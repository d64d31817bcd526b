use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const USAGE: &str =
    "config [show|set <locale|currency|category_policy|edit_timestamp> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show(context);
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::usage(USAGE));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            set(context, key, value.trim())
        }
        _ => Err(CommandError::usage(USAGE)),
    }
}

fn show(context: &ShellContext) -> CommandResult {
    let config = &context.config;
    output::section("Configuration");
    output::two_column(&[
        ("locale", config.locale.clone()),
        ("currency", config.currency.clone()),
        ("category_policy", config.category_policy.to_string()),
        ("edit_timestamp", config.edit_timestamp.to_string()),
        ("file", context.config_manager.path().display().to_string()),
    ]);
    Ok(())
}

fn set(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value).map_err(CommandError::InvalidArguments)?;

    context.config_manager.save(&updated)?;
    context.store.set_policy(updated.ledger_policy());
    context.config = updated;
    output::success(format!("{} set to {}.", key, value));
    Ok(())
}
