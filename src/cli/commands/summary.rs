use crate::cli::commands::goal::goal_line;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::SummaryService;

/// Goals shown on the summary card.
const RECENT_GOALS: usize = 3;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "summary",
        "Show balance, totals and recent goals",
        "summary",
        cmd_summary,
    )]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let ledger = context.store.ledger();
    let summary = SummaryService::summarize(ledger);
    let rendered = SummaryService::render(&summary, &context.locale(), &context.format_options());

    output::section("Summary");
    output::two_column(&[
        (
            "Balance",
            output::signed(rendered.balance, summary.balance.is_sign_positive()),
        ),
        ("Income", rendered.total_income),
        ("Expenses", rendered.total_expenses),
        ("Transactions", rendered.transaction_count.to_string()),
    ]);

    let goals = context.store.goals();
    if !goals.is_empty() {
        output::section("Goals");
        for goal in goals.recent(RECENT_GOALS) {
            output::info(format!("  {}", goal_line(context, goal)));
        }
        if goals.len() > RECENT_GOALS {
            output::hint(format!("{} more, see `goal list`", goals.len() - RECENT_GOALS));
        }
    }
    Ok(())
}
