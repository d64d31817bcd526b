use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of a recorded movement of money.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Sign applied to the amount when folding into the balance.
    pub fn sign(self) -> Decimal {
        match self {
            TransactionKind::Income => Decimal::ONE,
            TransactionKind::Expense => Decimal::NEGATIVE_ONE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "ingreso" | "in" | "+" => Ok(TransactionKind::Income),
            "expense" | "gasto" | "out" | "-" => Ok(TransactionKind::Expense),
            other => Err(format!(
                "unknown transaction kind `{}` (expected income or expense)",
                other
            )),
        }
    }
}

/// Sources offered by the entry forms. Any non-empty text is accepted by the ledger.
pub const SUGGESTED_SOURCES: &[&str] = &["Efectivo", "Banco", "Billetera virtual"];

/// Expense categories offered by the entry forms.
pub const SUGGESTED_EXPENSE_CATEGORIES: &[&str] =
    &["Comida", "Supermercado", "Alquiler", "Salida", "Deporte", "Juntada", "Compra"];

/// Income categories offered by the entry forms.
pub const SUGGESTED_INCOME_CATEGORIES: &[&str] = &["Sueldo", "Regalo", "Bono"];

/// The user-editable fields of a transaction.
///
/// Used both when recording a new transaction and as the full replacement
/// payload of an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: Option<String>,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TransactionInput {
    pub fn new(kind: TransactionKind, amount: Decimal, source: impl Into<String>) -> Self {
        Self {
            kind,
            amount,
            category: None,
            source: source.into(),
            note: None,
        }
    }

    pub fn income(amount: Decimal, source: impl Into<String>) -> Self {
        Self::new(TransactionKind::Income, amount, source)
    }

    pub fn expense(amount: Decimal, category: impl Into<String>, source: impl Into<String>) -> Self {
        Self::new(TransactionKind::Expense, amount, source).with_category(category)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: Option<String>,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub(crate) fn from_input(input: TransactionInput, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: input.kind,
            amount: input.amount,
            category: input.category,
            source: input.source,
            note: input.note,
            timestamp,
        }
    }

    /// Replaces every editable field, keeping the identifier.
    pub(crate) fn apply(&mut self, input: TransactionInput, timestamp: DateTime<Utc>) {
        self.kind = input.kind;
        self.amount = input.amount;
        self.category = input.category;
        self.source = input.source;
        self.note = input.note;
        self.timestamp = timestamp;
    }

    pub fn signed_amount(&self) -> Decimal {
        self.amount * self.kind.sign()
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Snapshot of the editable fields, used to pre-populate edit forms.
    pub fn to_input(&self) -> TransactionInput {
        TransactionInput {
            kind: self.kind,
            amount: self.amount,
            category: self.category.clone(),
            source: self.source.clone(),
            note: self.note.clone(),
        }
    }

    pub fn display_label(&self) -> String {
        match &self.category {
            Some(category) => format!("{} · {}", self.kind, category),
            None => self.kind.to_string(),
        }
    }
}
