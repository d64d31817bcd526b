use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, LedgerResult};

use super::{
    policy::{EditTimestampPolicy, LedgerPolicy},
    transaction::{Transaction, TransactionInput, TransactionKind},
};

/// Ordered collection of transactions with derived aggregates.
///
/// Storage order is insertion order: new transactions are appended, so the
/// index of an existing transaction only changes when an earlier one is
/// removed. Every transaction also carries a stable `id`; prefer the `*_by_id`
/// operations when a reference has to outlive other mutations.
///
/// Balance and totals are never stored. They are folded from `transactions`
/// on every call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    #[serde(default)]
    policy: LedgerPolicy,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: LedgerPolicy) -> Self {
        Self {
            transactions: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> LedgerPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: LedgerPolicy) {
        self.policy = policy;
    }

    /// Records a new transaction stamped with the current time.
    pub fn add(&mut self, input: TransactionInput) -> LedgerResult<Transaction> {
        self.add_at(input, Utc::now())
    }

    /// Records a new transaction stamped with `now`.
    pub fn add_at(
        &mut self,
        input: TransactionInput,
        now: DateTime<Utc>,
    ) -> LedgerResult<Transaction> {
        let input = self.validate(input, None)?;
        let transaction = Transaction::from_input(input, now);
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Replaces the transaction at `index` with `input`.
    pub fn edit(&mut self, index: usize, input: TransactionInput) -> LedgerResult<Transaction> {
        self.edit_at(index, input, Utc::now())
    }

    /// Replaces the transaction at `index`; `now` is only used when the
    /// policy re-dates edits.
    pub fn edit_at(
        &mut self,
        index: usize,
        input: TransactionInput,
        now: DateTime<Utc>,
    ) -> LedgerResult<Transaction> {
        self.check_index(index)?;
        let input = self.validate(input, Some(index))?;
        let edit_timestamp = self.policy.edit_timestamp;
        let transaction = &mut self.transactions[index];
        let timestamp = match edit_timestamp {
            EditTimestampPolicy::Preserve => transaction.timestamp,
            EditTimestampPolicy::Restamp => now,
        };
        transaction.apply(input, timestamp);
        Ok(transaction.clone())
    }

    /// Removes and returns the transaction at `index`. Later transactions shift
    /// down by one position.
    pub fn remove(&mut self, index: usize) -> LedgerResult<Transaction> {
        self.check_index(index)?;
        Ok(self.transactions.remove(index))
    }

    pub fn edit_by_id(&mut self, id: Uuid, input: TransactionInput) -> LedgerResult<Transaction> {
        self.edit_by_id_at(id, input, Utc::now())
    }

    pub fn edit_by_id_at(
        &mut self,
        id: Uuid,
        input: TransactionInput,
        now: DateTime<Utc>,
    ) -> LedgerResult<Transaction> {
        let index = self
            .position(id)
            .ok_or(LedgerError::TransactionNotFound(id))?;
        self.edit_at(index, input, now)
    }

    pub fn remove_by_id(&mut self, id: Uuid) -> LedgerResult<Transaction> {
        let index = self
            .position(id)
            .ok_or(LedgerError::TransactionNotFound(id))?;
        self.remove(index)
    }

    /// Current position of the transaction identified by `id`.
    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.transactions.iter().position(|txn| txn.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Transaction> + '_ {
        self.transactions.iter()
    }

    /// Most-recent-first view paired with each transaction's canonical index.
    pub fn history(&self) -> impl Iterator<Item = (usize, &Transaction)> + '_ {
        self.transactions.iter().enumerate().rev()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Signed sum of every transaction: income adds, expenses subtract.
    pub fn balance(&self) -> Decimal {
        self.transactions
            .iter()
            .fold(Decimal::ZERO, |acc, txn| acc + txn.signed_amount())
    }

    pub fn total_expenses(&self) -> Decimal {
        self.transactions
            .iter()
            .filter(|txn| txn.is_expense())
            .fold(Decimal::ZERO, |acc, txn| acc + txn.amount)
    }

    pub fn total_income(&self) -> Decimal {
        self.transactions
            .iter()
            .filter(|txn| txn.is_income())
            .fold(Decimal::ZERO, |acc, txn| acc + txn.amount)
    }

    fn check_index(&self, index: usize) -> LedgerResult<()> {
        if index < self.transactions.len() {
            Ok(())
        } else {
            Err(LedgerError::IndexOutOfRange {
                index,
                len: self.transactions.len(),
            })
        }
    }

    /// Income and expense totals must stay representable; the balance lies
    /// between them, so it cannot overflow either.
    fn check_totals(&self, input: &TransactionInput, replacing: Option<usize>) -> LedgerResult<()> {
        let mut income = self.total_income();
        let mut expenses = self.total_expenses();
        if let Some(old) = replacing.and_then(|index| self.transactions.get(index)) {
            match old.kind {
                TransactionKind::Income => income -= old.amount,
                TransactionKind::Expense => expenses -= old.amount,
            }
        }
        let total = match input.kind {
            TransactionKind::Income => income,
            TransactionKind::Expense => expenses,
        };
        total.checked_add(input.amount).map(|_| ()).ok_or_else(|| {
            LedgerError::InvalidAmount(format!(
                "{} is too large: {} totals would overflow",
                input.amount,
                input.kind.label().to_lowercase()
            ))
        })
    }

    fn validate(
        &self,
        mut input: TransactionInput,
        replacing: Option<usize>,
    ) -> LedgerResult<TransactionInput> {
        if input.amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(format!(
                "amount must be greater than zero, got {}",
                input.amount
            )));
        }
        input.source = input.source.trim().to_string();
        if input.source.is_empty() {
            return Err(LedgerError::MissingRequiredField("source"));
        }
        input.category = normalize_optional(input.category);
        input.note = normalize_optional(input.note);
        if input.category.is_none() && self.policy.category.requires_category(input.kind) {
            return Err(LedgerError::MissingRequiredField("category"));
        }
        self.check_totals(&input, replacing)?;
        Ok(input)
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::policy::CategoryPolicy;
    use crate::ledger::transaction::TransactionKind;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, hour, 30, 0).unwrap()
    }

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .add_at(TransactionInput::income(Decimal::from(1000), "Banco"), at(9))
            .unwrap();
        ledger
            .add_at(
                TransactionInput::expense(Decimal::from(300), "Comida", "Efectivo"),
                at(10),
            )
            .unwrap();
        ledger
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let ledger = sample_ledger();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(0).unwrap().kind, TransactionKind::Income);
        assert_eq!(ledger.get(1).unwrap().kind, TransactionKind::Expense);
        assert_eq!(ledger.get(1).unwrap().timestamp, at(10));
    }

    #[test]
    fn add_trims_text_fields() {
        let mut ledger = Ledger::new();
        let txn = ledger
            .add(
                TransactionInput::expense(Decimal::from(5), "  Comida ", " Efectivo ")
                    .with_note("   "),
            )
            .unwrap();
        assert_eq!(txn.category.as_deref(), Some("Comida"));
        assert_eq!(txn.source, "Efectivo");
        assert!(txn.note.is_none());
    }

    #[test]
    fn add_rejects_blank_source() {
        let mut ledger = Ledger::new();
        let err = ledger
            .add(TransactionInput::income(Decimal::from(5), "  "))
            .expect_err("blank source must fail");
        assert!(matches!(err, LedgerError::MissingRequiredField("source")));
        assert!(ledger.is_empty());
    }

    #[test]
    fn expense_category_follows_policy() {
        let mut strict = Ledger::new();
        let err = strict
            .add(TransactionInput::new(
                TransactionKind::Expense,
                Decimal::from(5),
                "Efectivo",
            ))
            .expect_err("expense without category must fail");
        assert!(matches!(err, LedgerError::MissingRequiredField("category")));

        let mut relaxed = Ledger::with_policy(LedgerPolicy::new(
            CategoryPolicy::Optional,
            EditTimestampPolicy::Preserve,
        ));
        relaxed
            .add(TransactionInput::new(
                TransactionKind::Expense,
                Decimal::from(5),
                "Efectivo",
            ))
            .expect("optional policy accepts missing category");

        let mut always = Ledger::with_policy(LedgerPolicy::new(
            CategoryPolicy::Always,
            EditTimestampPolicy::Preserve,
        ));
        assert!(always
            .add(TransactionInput::income(Decimal::from(5), "Banco"))
            .is_err());
    }

    #[test]
    fn edit_preserves_timestamp_by_default() {
        let mut ledger = sample_ledger();
        let original = ledger.get(1).unwrap().clone();
        let edited = ledger
            .edit_at(
                1,
                TransactionInput::expense(Decimal::from(500), "Salida", "Efectivo"),
                at(18),
            )
            .unwrap();
        assert_eq!(edited.id, original.id);
        assert_eq!(edited.timestamp, original.timestamp);
        assert_eq!(edited.amount, Decimal::from(500));
    }

    #[test]
    fn edit_restamps_when_configured() {
        let mut ledger = sample_ledger();
        ledger.set_policy(LedgerPolicy::new(
            CategoryPolicy::RequiredForExpense,
            EditTimestampPolicy::Restamp,
        ));
        let edited = ledger
            .edit_at(
                0,
                TransactionInput::income(Decimal::from(1200), "Banco"),
                at(18),
            )
            .unwrap();
        assert_eq!(edited.timestamp, at(18));
    }

    #[test]
    fn invalid_edit_leaves_transaction_untouched() {
        let mut ledger = sample_ledger();
        let before = ledger.get(1).unwrap().clone();
        let err = ledger
            .edit(1, TransactionInput::expense(Decimal::ZERO, "Salida", "Efectivo"))
            .expect_err("zero amount must fail");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert_eq!(ledger.get(1), Some(&before));
    }

    #[test]
    fn id_operations_survive_index_shifts() {
        let mut ledger = sample_ledger();
        let expense_id = ledger.get(1).unwrap().id;
        ledger.remove(0).unwrap();
        assert_eq!(ledger.position(expense_id), Some(0));

        let edited = ledger
            .edit_by_id(
                expense_id,
                TransactionInput::expense(Decimal::from(120), "Deporte", "Banco"),
            )
            .unwrap();
        assert_eq!(edited.id, expense_id);

        let removed = ledger.remove_by_id(expense_id).unwrap();
        assert_eq!(removed.category.as_deref(), Some("Deporte"));
        assert!(matches!(
            ledger.remove_by_id(expense_id),
            Err(LedgerError::TransactionNotFound(id)) if id == expense_id
        ));
    }

    #[test]
    fn history_is_most_recent_first_with_canonical_indices() {
        let ledger = sample_ledger();
        let rows: Vec<(usize, TransactionKind)> =
            ledger.history().map(|(idx, txn)| (idx, txn.kind)).collect();
        assert_eq!(
            rows,
            vec![(1, TransactionKind::Expense), (0, TransactionKind::Income)]
        );
    }

    #[test]
    fn totals_that_would_overflow_are_rejected() {
        let mut ledger = Ledger::new();
        ledger
            .add(TransactionInput::income(Decimal::MAX, "Banco"))
            .unwrap();
        let err = ledger
            .add(TransactionInput::income(Decimal::MAX, "Banco"))
            .expect_err("second maximal income must overflow");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.balance(), Decimal::MAX);

        // Expenses are summed separately, so the balance can swing the other way.
        ledger
            .add(TransactionInput::expense(Decimal::MAX, "Alquiler", "Banco"))
            .unwrap();
        assert_eq!(ledger.balance(), Decimal::ZERO);
        assert!(ledger
            .add(TransactionInput::expense(Decimal::ONE, "Comida", "Banco"))
            .is_err());

        // Replacing the only income with another maximal one stays in range.
        let edited = ledger
            .edit(0, TransactionInput::income(Decimal::MAX, "Efectivo"))
            .unwrap();
        assert_eq!(edited.source, "Efectivo");
        assert_eq!(ledger.total_income(), Decimal::MAX);
    }

    #[test]
    fn totals_are_folded_from_transactions() {
        let ledger = sample_ledger();
        assert_eq!(ledger.balance(), Decimal::from(700));
        assert_eq!(ledger.total_expenses(), Decimal::from(300));
        assert_eq!(ledger.total_income(), Decimal::from(1000));
    }
}
