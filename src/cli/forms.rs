//! Editable drafts behind the add, edit and goal commands.
//!
//! A draft holds raw user text. It can be filled from `key=value` arguments,
//! from interactive prompts, or both; nothing reaches the store until the
//! draft is converted and the caller confirms.

use dialoguer::{theme::ColorfulTheme, Input};
use rust_decimal::Decimal;

use crate::cli::core::CommandError;
use crate::cli::io as cli_io;
use crate::currency::parse_amount_input;
use crate::errors::LedgerError;
use crate::ledger::{
    CategoryPolicy, Goal, GoalInput, Transaction, TransactionInput, TransactionKind, GOAL_EMOJIS,
    SUGGESTED_EXPENSE_CATEGORIES, SUGGESTED_INCOME_CATEGORIES, SUGGESTED_SOURCES,
};

const OTHER_CHOICE: &str = "Other...";
const NO_CATEGORY_CHOICE: &str = "(none)";

/// Splits `key=value` arguments from positional ones, in order.
fn split_args<'a>(args: &[&'a str]) -> (Vec<&'a str>, Vec<(String, &'a str)>) {
    let mut positional = Vec::new();
    let mut named = Vec::new();
    for arg in args {
        match arg.split_once('=') {
            Some((key, value)) => named.push((key.trim().to_ascii_lowercase(), value)),
            None => positional.push(*arg),
        }
    }
    (positional, named)
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Renders an amount the way it is typed back in, using a decimal comma.
fn editable_amount(amount: Decimal) -> String {
    amount.normalize().to_string().replace('.', ",")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: Option<TransactionKind>,
    pub amount: String,
    pub category: Option<String>,
    pub source: Option<String>,
    pub note: Option<String>,
}

impl TransactionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates every field from an existing transaction.
    pub fn from_transaction(txn: &Transaction) -> Self {
        Self {
            kind: Some(txn.kind),
            amount: editable_amount(txn.amount),
            category: txn.category.clone(),
            source: Some(txn.source.clone()),
            note: txn.note.clone(),
        }
    }

    /// Overrides fields from `[kind] [amount] [key=value ...]` arguments.
    pub fn apply_args(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let (positional, named) = split_args(args);
        if positional.len() > 2 {
            return Err(CommandError::InvalidArguments(format!(
                "unexpected argument `{}`",
                positional[2]
            )));
        }
        if let Some(kind) = positional.first() {
            self.kind = Some(parse_kind(kind)?);
        }
        if let Some(amount) = positional.get(1) {
            self.amount = amount.to_string();
        }

        for (key, value) in named {
            match key.as_str() {
                "kind" | "type" => self.kind = Some(parse_kind(value)?),
                "amount" => self.amount = value.to_string(),
                "category" | "cat" => self.category = optional_text(value),
                "source" | "src" => self.source = optional_text(value),
                "note" => self.note = optional_text(value),
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown field `{}` (kind, amount, category, source, note)",
                        other
                    )))
                }
            }
        }
        Ok(())
    }

    /// Whether the confirm action should be offered for this draft.
    pub fn can_confirm(&self, policy: CategoryPolicy) -> bool {
        let Some(kind) = self.kind else {
            return false;
        };
        let amount_ok = parse_amount_input(&self.amount)
            .map(|amount| amount > Decimal::ZERO)
            .unwrap_or(false);
        let source_ok = self.source.as_deref().is_some_and(|s| !s.trim().is_empty());
        let category_ok = !policy.requires_category(kind)
            || self.category.as_deref().is_some_and(|c| !c.trim().is_empty());
        amount_ok && source_ok && category_ok
    }

    pub fn to_input(&self) -> Result<TransactionInput, LedgerError> {
        let kind = self.kind.ok_or(LedgerError::MissingRequiredField("kind"))?;
        if self.amount.trim().is_empty() {
            return Err(LedgerError::MissingRequiredField("amount"));
        }
        let amount = parse_amount_input(&self.amount)?;
        let mut input = TransactionInput::new(kind, amount, self.source.clone().unwrap_or_default());
        input.category = self.category.clone();
        input.note = self.note.clone();
        Ok(input)
    }

    /// Walks through every field, starting from the current values.
    ///
    /// Returns `None` when the user declines to save.
    pub fn prompt(
        mut self,
        theme: &ColorfulTheme,
        policy: CategoryPolicy,
    ) -> Result<Option<Self>, CommandError> {
        let kinds = vec![
            TransactionKind::Income.label().to_string(),
            TransactionKind::Expense.label().to_string(),
        ];
        let default_kind = usize::from(self.kind != Some(TransactionKind::Income));
        let kind = if cli_io::select(theme, "Type", &kinds, default_kind)? == 0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        self.kind = Some(kind);

        self.amount = Input::<String>::with_theme(theme)
            .with_prompt("Amount")
            .with_initial_text(self.amount.clone())
            .validate_with(|text: &String| -> Result<(), String> {
                match parse_amount_input(text) {
                    Ok(amount) if amount > Decimal::ZERO => Ok(()),
                    Ok(_) => Err("amount must be greater than zero".into()),
                    Err(err) => Err(err.to_string()),
                }
            })
            .interact_text()?;

        let suggestions = match kind {
            TransactionKind::Income => SUGGESTED_INCOME_CATEGORIES,
            TransactionKind::Expense => SUGGESTED_EXPENSE_CATEGORIES,
        };
        self.category = pick_or_type(
            theme,
            "Category",
            suggestions,
            self.category.as_deref(),
            !policy.requires_category(kind),
        )?;
        self.source = pick_or_type(theme, "Source", SUGGESTED_SOURCES, self.source.as_deref(), false)?;

        let note = cli_io::prompt_text(theme, "Note (optional)", self.note.as_deref(), true)?;
        self.note = optional_text(&note);

        if !self.can_confirm(policy) {
            return Err(CommandError::InvalidArguments(
                "the transaction is incomplete and was not saved".into(),
            ));
        }
        if cli_io::confirm_action(theme, "Save transaction?", true)? {
            Ok(Some(self))
        } else {
            Ok(None)
        }
    }
}

fn parse_kind(text: &str) -> Result<TransactionKind, CommandError> {
    text.parse::<TransactionKind>()
        .map_err(CommandError::InvalidArguments)
}

/// Offers the suggestions plus a free-text escape hatch.
fn pick_or_type(
    theme: &ColorfulTheme,
    prompt: &str,
    suggestions: &[&str],
    current: Option<&str>,
    allow_none: bool,
) -> Result<Option<String>, CommandError> {
    let mut items: Vec<String> = suggestions.iter().map(|s| s.to_string()).collect();
    if let Some(current) = current {
        if !items.iter().any(|item| item == current) {
            items.insert(0, current.to_string());
        }
    }
    items.push(OTHER_CHOICE.to_string());
    if allow_none {
        items.push(NO_CATEGORY_CHOICE.to_string());
    }

    let default = current
        .and_then(|current| items.iter().position(|item| item == current))
        .unwrap_or(0);
    let choice = &items[cli_io::select(theme, prompt, &items, default)?];
    match choice.as_str() {
        OTHER_CHOICE => {
            let typed = cli_io::prompt_text(theme, prompt, None, allow_none)?;
            Ok(optional_text(&typed))
        }
        NO_CATEGORY_CHOICE => Ok(None),
        value => Ok(Some(value.to_string())),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalDraft {
    pub name: String,
    pub target: String,
    pub emoji: String,
}

impl GoalDraft {
    pub fn from_goal(goal: &Goal) -> Self {
        Self {
            name: goal.name.clone(),
            target: editable_amount(goal.target_amount),
            emoji: goal.emoji.clone(),
        }
    }

    /// Overrides fields from `[name] [target] [emoji] [key=value ...]` arguments.
    pub fn apply_args(&mut self, args: &[&str]) -> Result<(), CommandError> {
        let (positional, named) = split_args(args);
        let mut positional = positional.into_iter();
        if let Some(name) = positional.next() {
            self.name = name.to_string();
        }
        if let Some(target) = positional.next() {
            self.target = target.to_string();
        }
        if let Some(emoji) = positional.next() {
            self.emoji = emoji.to_string();
        }
        if let Some(extra) = positional.next() {
            return Err(CommandError::InvalidArguments(format!(
                "unexpected argument `{}`",
                extra
            )));
        }

        for (key, value) in named {
            match key.as_str() {
                "name" => self.name = value.to_string(),
                "target" | "amount" => self.target = value.to_string(),
                "emoji" => self.emoji = value.to_string(),
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown field `{}` (name, target, emoji)",
                        other
                    )))
                }
            }
        }
        Ok(())
    }

    pub fn to_input(&self) -> Result<GoalInput, LedgerError> {
        if self.target.trim().is_empty() {
            return Err(LedgerError::MissingRequiredField("target"));
        }
        let target = parse_amount_input(&self.target)?;
        Ok(GoalInput::new(self.name.trim(), target, self.emoji.trim()))
    }

    pub fn prompt(mut self, theme: &ColorfulTheme) -> Result<Option<Self>, CommandError> {
        self.name = cli_io::prompt_text(theme, "Goal name", Some(&self.name), false)?;
        self.target = Input::<String>::with_theme(theme)
            .with_prompt("Target amount")
            .with_initial_text(self.target.clone())
            .validate_with(|text: &String| -> Result<(), String> {
                match parse_amount_input(text) {
                    Ok(amount) if amount > Decimal::ZERO => Ok(()),
                    Ok(_) => Err("target must be greater than zero".into()),
                    Err(err) => Err(err.to_string()),
                }
            })
            .interact_text()?;

        let emojis: Vec<String> = GOAL_EMOJIS.iter().map(|e| e.to_string()).collect();
        let default = emojis.iter().position(|e| *e == self.emoji).unwrap_or(0);
        self.emoji = emojis[cli_io::select(theme, "Emoji", &emojis, default)?].clone();

        if cli_io::confirm_action(theme, "Save goal?", true)? {
            Ok(Some(self))
        } else {
            Ok(None)
        }
    }
}
