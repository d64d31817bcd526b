use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::forms::TransactionDraft;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::currency::{format_date, format_time};
use crate::errors::LedgerError;
use crate::ledger::Transaction;

const ADD_USAGE: &str = "add <income|expense> <amount> [category=..] [source=..] [note=..]";
const EDIT_USAGE: &str = "edit <index> [income|expense] [amount] [category=..] [source=..] [note=..]";
const DELETE_USAGE: &str = "delete <index>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or an expense", ADD_USAGE, cmd_add),
        CommandEntry::new("edit", "Change a recorded transaction", EDIT_USAGE, cmd_edit),
        CommandEntry::new("delete", "Remove a transaction", DELETE_USAGE, cmd_delete)
            .with_aliases(&["rm"]),
        CommandEntry::new(
            "history",
            "List transactions, most recent first",
            "history",
            cmd_history,
        )
        .with_aliases(&["ls"]),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut draft = TransactionDraft::new();
    let draft = if args.is_empty() {
        context.require_interactive(ADD_USAGE)?;
        match draft.prompt(&context.theme, context.config.category_policy)? {
            Some(draft) => draft,
            None => return cancelled(),
        }
    } else {
        draft.apply_args(args)?;
        draft
    };

    let txn = context.store.add_transaction(draft.to_input()?)?;
    output::success(format!("Saved {}", describe(context, &txn)));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (index_arg, rest) = args
        .split_first()
        .ok_or_else(|| CommandError::usage(EDIT_USAGE))?;
    let index = parse_index(index_arg)?;
    let current = context
        .store
        .ledger()
        .get(index)
        .ok_or(LedgerError::IndexOutOfRange {
            index,
            len: context.store.ledger().len(),
        })?;

    let mut draft = TransactionDraft::from_transaction(current);
    let draft = if rest.is_empty() {
        context.require_interactive(EDIT_USAGE)?;
        match draft.prompt(&context.theme, context.config.category_policy)? {
            Some(draft) => draft,
            None => return cancelled(),
        }
    } else {
        draft.apply_args(rest)?;
        draft
    };

    let txn = context.store.edit_transaction(index, draft.to_input()?)?;
    output::success(format!("Updated [{}] {}", index, describe(context, &txn)));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [index_arg] = args else {
        return Err(CommandError::usage(DELETE_USAGE));
    };
    let index = parse_index(index_arg)?;
    let Some(txn) = context.store.ledger().get(index) else {
        return Err(LedgerError::IndexOutOfRange {
            index,
            len: context.store.ledger().len(),
        }
        .into());
    };

    let question = format!("Delete [{}] {}?", index, describe(context, txn));
    if !context.confirm(&question)? {
        return cancelled();
    }

    let removed = context.store.remove_transaction(index)?;
    output::success(format!("Deleted {}", describe(context, &removed)));
    Ok(())
}

fn cmd_history(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.store.ledger();
    output::section("History");
    if ledger.is_empty() {
        output::info("No transactions yet. Try `add income 1000 source=Banco`.");
        return Ok(());
    }

    let locale = context.locale();
    for (index, txn) in ledger.history() {
        let amount = output::signed(context.format_amount(txn.signed_amount()), txn.is_income());
        let mut line = format!(
            "  [{:>2}] {} {}  {:<14} {:>14}  {}",
            index,
            format_date(&locale, txn.timestamp),
            format_time(&locale, txn.timestamp),
            txn.display_label(),
            amount,
            txn.source
        );
        if let Some(note) = &txn.note {
            line.push_str(&format!("  ({})", note));
        }
        output::info(line);
    }
    Ok(())
}

fn parse_index(text: &str) -> Result<usize, CommandError> {
    text.trim().parse::<usize>().map_err(|_| {
        CommandError::InvalidArguments(format!(
            "`{}` is not a transaction index (see `history`)",
            text
        ))
    })
}

fn describe(context: &ShellContext, txn: &Transaction) -> String {
    format!(
        "{} {} ({})",
        txn.display_label(),
        context.format_amount(txn.amount),
        txn.source
    )
}

fn cancelled() -> CommandResult {
    output::info("Cancelled, nothing changed.");
    Ok(())
}
