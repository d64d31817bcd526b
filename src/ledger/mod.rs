//! Transaction ledger, savings goals, and the policies that govern them.

pub mod goal;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod policy;
pub mod transaction;

pub use goal::{Goal, GoalBook, GoalInput, GOAL_EMOJIS};
pub use ledger::Ledger;
pub use policy::{CategoryPolicy, EditTimestampPolicy, LedgerPolicy};
pub use transaction::{
    Transaction, TransactionInput, TransactionKind, SUGGESTED_EXPENSE_CATEGORIES,
    SUGGESTED_INCOME_CATEGORIES, SUGGESTED_SOURCES,
};
