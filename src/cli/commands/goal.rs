use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::forms::GoalDraft;
use crate::cli::output;
use crate::cli::registry::{canonical_action, ActionAlias, CommandEntry};
use crate::currency::parse_amount_input;
use crate::ledger::Goal;

const USAGE: &str = "goal <add|edit|remove|progress|list> ...";
const ADD_USAGE: &str = "goal add <name> <target> <emoji>";
const EDIT_USAGE: &str = "goal edit <goal> [name=..] [target=..] [emoji=..]";
const REMOVE_USAGE: &str = "goal remove <goal>";
const PROGRESS_USAGE: &str = "goal progress <goal> <saved amount>";

const ACTIONS: &[ActionAlias] = &[
    ActionAlias::new("add", &["new"]),
    ActionAlias::new("edit", &[]),
    ActionAlias::new("remove", &["delete", "rm"]),
    ActionAlias::new("progress", &["save"]),
    ActionAlias::new("list", &["ls"]),
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "goal",
        "Manage savings goals",
        USAGE,
        cmd_goal,
    )]
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((sub, rest)) = args.split_first() else {
        return list(context);
    };
    match canonical_action(ACTIONS, sub) {
        Some("add") => add(context, rest),
        Some("edit") => edit(context, rest),
        Some("remove") => remove(context, rest),
        Some("progress") => progress(context, rest),
        Some("list") => list(context),
        _ => Err(CommandError::InvalidArguments(format!(
            "unknown goal action `{}`; usage: {}",
            sub, USAGE
        ))),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut draft = GoalDraft::default();
    let draft = if args.is_empty() {
        context.require_interactive(ADD_USAGE)?;
        match draft.prompt(&context.theme)? {
            Some(draft) => draft,
            None => return cancelled(),
        }
    } else {
        draft.apply_args(args)?;
        draft
    };

    let goal = context.store.add_goal(draft.to_input()?)?;
    output::success(format!(
        "Goal {} {} created, target {}",
        goal.emoji,
        goal.name,
        context.format_amount(goal.target_amount)
    ));
    Ok(())
}

fn edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (reference, rest) = args
        .split_first()
        .ok_or_else(|| CommandError::usage(EDIT_USAGE))?;
    let goal = resolve(context, reference)?;
    let id = goal.id;

    let mut draft = GoalDraft::from_goal(goal);
    let draft = if rest.is_empty() {
        context.require_interactive(EDIT_USAGE)?;
        match draft.prompt(&context.theme)? {
            Some(draft) => draft,
            None => return cancelled(),
        }
    } else {
        draft.apply_args(rest)?;
        draft
    };

    let goal = context.store.edit_goal(id, draft.to_input()?)?;
    output::success(format!("Goal {} {} updated", goal.emoji, goal.name));
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [reference] = args else {
        return Err(CommandError::usage(REMOVE_USAGE));
    };
    let goal = resolve(context, reference)?;
    let id = goal.id;
    let question = format!("Delete goal {} {}?", goal.emoji, goal.name);
    if !context.confirm(&question)? {
        return cancelled();
    }

    let removed = context.store.remove_goal(id)?;
    output::success(format!("Goal {} removed", removed.name));
    Ok(())
}

fn progress(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [reference, amount] = args else {
        return Err(CommandError::usage(PROGRESS_USAGE));
    };
    let id = resolve(context, reference)?.id;
    let amount = parse_amount_input(amount)?;

    let goal = context.store.set_goal_progress(id, amount)?;
    if goal.is_reached() {
        output::success(format!("{} {} reached!", goal.emoji, goal.name));
    } else {
        output::success(format!(
            "{} {}: {} to go",
            goal.emoji,
            goal.name,
            context.format_amount(goal.remaining())
        ));
    }
    Ok(())
}

fn list(context: &ShellContext) -> CommandResult {
    output::section("Goals");
    let goals = context.store.goals().goals();
    if goals.is_empty() {
        output::info("No goals yet. Try `goal add Vacaciones 500000 🏖️`.");
        return Ok(());
    }
    for (position, goal) in goals.iter().enumerate() {
        output::info(format!("  {:>2}. {}", position + 1, goal_line(context, goal)));
    }
    Ok(())
}

/// One-line card: emoji, name, progress bar and what is still missing.
pub(crate) fn goal_line(context: &ShellContext, goal: &Goal) -> String {
    format!(
        "{} {:<16} {} {} / {} (remaining {})",
        goal.emoji,
        goal.name,
        progress_bar(goal.progress()),
        context.format_amount(goal.current_amount),
        context.format_amount(goal.target_amount),
        context.format_amount(goal.remaining())
    )
}

fn progress_bar(progress: Decimal) -> String {
    const WIDTH: u32 = 10;
    let filled = (progress * Decimal::from(WIDTH))
        .floor()
        .to_u32()
        .unwrap_or(0)
        .min(WIDTH);
    format!(
        "[{}{}]",
        "#".repeat(filled as usize),
        "-".repeat((WIDTH - filled) as usize)
    )
}

fn resolve<'a>(context: &'a ShellContext, reference: &str) -> Result<&'a Goal, CommandError> {
    context.store.find_goal(reference).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "no goal matches `{}` (use the number shown by `goal list`)",
            reference
        ))
    })
}

fn cancelled() -> CommandResult {
    output::info("Cancelled, nothing changed.");
    Ok(())
}
