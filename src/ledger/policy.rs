//! Validation and edit rules that earlier app builds disagreed on.
//!
//! Both knobs are explicit so the chosen behaviour is visible in config rather
//! than buried in a form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::transaction::TransactionKind;

/// When a transaction must carry a category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CategoryPolicy {
    /// Category is free-form and may be omitted for any kind.
    Optional,
    /// Expenses need a category; income may omit it.
    #[default]
    RequiredForExpense,
    /// Every transaction needs a category.
    Always,
}

impl CategoryPolicy {
    pub fn requires_category(self, kind: TransactionKind) -> bool {
        match self {
            CategoryPolicy::Optional => false,
            CategoryPolicy::RequiredForExpense => kind == TransactionKind::Expense,
            CategoryPolicy::Always => true,
        }
    }
}

/// What happens to a transaction's timestamp when it is edited.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EditTimestampPolicy {
    /// Keep the original creation time.
    #[default]
    Preserve,
    /// Re-date the transaction to the moment of the edit.
    Restamp,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LedgerPolicy {
    #[serde(default)]
    pub category: CategoryPolicy,
    #[serde(default)]
    pub edit_timestamp: EditTimestampPolicy,
}

impl LedgerPolicy {
    pub fn new(category: CategoryPolicy, edit_timestamp: EditTimestampPolicy) -> Self {
        Self {
            category,
            edit_timestamp,
        }
    }
}

impl fmt::Display for CategoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryPolicy::Optional => "optional",
            CategoryPolicy::RequiredForExpense => "required_for_expense",
            CategoryPolicy::Always => "always",
        };
        f.write_str(label)
    }
}

impl FromStr for CategoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "optional" => Ok(CategoryPolicy::Optional),
            "required_for_expense" | "expense" => Ok(CategoryPolicy::RequiredForExpense),
            "always" | "required" => Ok(CategoryPolicy::Always),
            other => Err(format!(
                "unknown category policy `{}` (optional, required_for_expense, always)",
                other
            )),
        }
    }
}

impl fmt::Display for EditTimestampPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EditTimestampPolicy::Preserve => "preserve",
            EditTimestampPolicy::Restamp => "restamp",
        };
        f.write_str(label)
    }
}

impl FromStr for EditTimestampPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" | "keep" => Ok(EditTimestampPolicy::Preserve),
            "restamp" | "now" => Ok(EditTimestampPolicy::Restamp),
            other => Err(format!(
                "unknown edit timestamp policy `{}` (preserve, restamp)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_requires_category_only_for_expenses() {
        let policy = LedgerPolicy::default();
        assert!(policy.category.requires_category(TransactionKind::Expense));
        assert!(!policy.category.requires_category(TransactionKind::Income));
        assert_eq!(policy.edit_timestamp, EditTimestampPolicy::Preserve);
    }

    #[test]
    fn policies_round_trip_through_labels() {
        for policy in [
            CategoryPolicy::Optional,
            CategoryPolicy::RequiredForExpense,
            CategoryPolicy::Always,
        ] {
            assert_eq!(policy.to_string().parse::<CategoryPolicy>(), Ok(policy));
        }
        assert_eq!(
            "restamp".parse::<EditTimestampPolicy>(),
            Ok(EditTimestampPolicy::Restamp)
        );
    }
}
