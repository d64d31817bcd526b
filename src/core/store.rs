//! Single owner of the session's ledger and goals.
//!
//! Front ends hold one `BudgetStore` and call its methods on explicit user
//! confirmation only; drafts that are cancelled never reach it.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::{LedgerError, LedgerResult};
use crate::ledger::{Goal, GoalBook, GoalInput, Ledger, LedgerPolicy, Transaction, TransactionInput};

use super::clock::{Clock, SystemClock};

pub struct BudgetStore<C: Clock = SystemClock> {
    ledger: Ledger,
    goals: GoalBook,
    clock: C,
}

impl BudgetStore<SystemClock> {
    pub fn new(policy: LedgerPolicy) -> Self {
        Self::with_clock(policy, SystemClock)
    }
}

impl<C: Clock> BudgetStore<C> {
    pub fn with_clock(policy: LedgerPolicy, clock: C) -> Self {
        Self {
            ledger: Ledger::with_policy(policy),
            goals: GoalBook::new(),
            clock,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn goals(&self) -> &GoalBook {
        &self.goals
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn set_policy(&mut self, policy: LedgerPolicy) {
        tracing::info!(
            category = %policy.category,
            edit_timestamp = %policy.edit_timestamp,
            "ledger policy updated"
        );
        self.ledger.set_policy(policy);
    }

    pub fn add_transaction(&mut self, input: TransactionInput) -> LedgerResult<Transaction> {
        let now = self.clock.now();
        let result = self.ledger.add_at(input, now);
        match &result {
            Ok(txn) => tracing::info!(
                id = %txn.id,
                kind = %txn.kind,
                amount = %txn.amount,
                "transaction recorded"
            ),
            Err(err) => log_rejection("add transaction", err),
        }
        result
    }

    pub fn edit_transaction(
        &mut self,
        index: usize,
        input: TransactionInput,
    ) -> LedgerResult<Transaction> {
        let now = self.clock.now();
        let result = self.ledger.edit_at(index, input, now);
        match &result {
            Ok(txn) => tracing::info!(index, id = %txn.id, "transaction edited"),
            Err(err) => log_rejection("edit transaction", err),
        }
        result
    }

    pub fn edit_transaction_by_id(
        &mut self,
        id: Uuid,
        input: TransactionInput,
    ) -> LedgerResult<Transaction> {
        let now = self.clock.now();
        let result = self.ledger.edit_by_id_at(id, input, now);
        match &result {
            Ok(_) => tracing::info!(%id, "transaction edited"),
            Err(err) => log_rejection("edit transaction", err),
        }
        result
    }

    pub fn remove_transaction(&mut self, index: usize) -> LedgerResult<Transaction> {
        let result = self.ledger.remove(index);
        match &result {
            Ok(txn) => tracing::info!(index, id = %txn.id, "transaction removed"),
            Err(err) => log_rejection("remove transaction", err),
        }
        result
    }

    pub fn remove_transaction_by_id(&mut self, id: Uuid) -> LedgerResult<Transaction> {
        let result = self.ledger.remove_by_id(id);
        match &result {
            Ok(_) => tracing::info!(%id, "transaction removed"),
            Err(err) => log_rejection("remove transaction", err),
        }
        result
    }

    pub fn add_goal(&mut self, input: GoalInput) -> LedgerResult<Goal> {
        let result = self.goals.add(input);
        match &result {
            Ok(goal) => tracing::info!(id = %goal.id, name = %goal.name, "goal created"),
            Err(err) => log_rejection("add goal", err),
        }
        result
    }

    pub fn edit_goal(&mut self, id: Uuid, input: GoalInput) -> LedgerResult<Goal> {
        let result = self.goals.edit(id, input);
        match &result {
            Ok(_) => tracing::info!(%id, "goal edited"),
            Err(err) => log_rejection("edit goal", err),
        }
        result
    }

    pub fn remove_goal(&mut self, id: Uuid) -> LedgerResult<Goal> {
        let result = self.goals.remove(id);
        match &result {
            Ok(_) => tracing::info!(%id, "goal removed"),
            Err(err) => log_rejection("remove goal", err),
        }
        result
    }

    pub fn set_goal_progress(&mut self, id: Uuid, amount: Decimal) -> LedgerResult<Goal> {
        let result = self.goals.set_current_amount(id, amount);
        match &result {
            Ok(goal) => tracing::info!(%id, current = %goal.current_amount, "goal progress updated"),
            Err(err) => log_rejection("update goal progress", err),
        }
        result
    }

    /// Resolves a goal from a full id, an id prefix, or a 1-based list position.
    pub fn find_goal(&self, reference: &str) -> Option<&Goal> {
        let reference = reference.trim();
        if let Ok(position) = reference.parse::<usize>() {
            if position >= 1 {
                if let Some(goal) = self.goals.goals().get(position - 1) {
                    return Some(goal);
                }
            }
        }
        if reference.len() < 4 {
            return None;
        }
        let needle = reference.to_ascii_lowercase().replace('-', "");
        let mut matches = self
            .goals
            .goals()
            .iter()
            .filter(|goal| goal.id.simple().to_string().starts_with(&needle));
        let first = matches.next()?;
        if matches.next().is_some() {
            None
        } else {
            Some(first)
        }
    }
}

fn log_rejection(action: &str, err: &LedgerError) {
    tracing::warn!(action, error = %err, "operation rejected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::ledger::{CategoryPolicy, EditTimestampPolicy};
    use chrono::{Duration, TimeZone, Utc};

    fn store() -> BudgetStore<FixedClock> {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap());
        BudgetStore::with_clock(LedgerPolicy::default(), clock)
    }

    #[test]
    fn transactions_are_stamped_by_the_clock() {
        let mut store = store();
        let first = store
            .add_transaction(TransactionInput::income(Decimal::from(100), "Banco"))
            .unwrap();
        store.clock().advance(Duration::minutes(5));
        let second = store
            .add_transaction(TransactionInput::expense(Decimal::from(40), "Comida", "Efectivo"))
            .unwrap();
        assert_eq!(second.timestamp - first.timestamp, Duration::minutes(5));
        assert_eq!(store.ledger().balance(), Decimal::from(60));
    }

    #[test]
    fn restamp_policy_uses_clock_time_on_edit() {
        let mut store = store();
        store.set_policy(LedgerPolicy::new(
            CategoryPolicy::RequiredForExpense,
            EditTimestampPolicy::Restamp,
        ));
        let created = store
            .add_transaction(TransactionInput::income(Decimal::from(100), "Banco"))
            .unwrap();
        store.clock().advance(Duration::hours(2));
        let edited = store
            .edit_transaction_by_id(created.id, TransactionInput::income(Decimal::from(90), "Banco"))
            .unwrap();
        assert_eq!(edited.timestamp, created.timestamp + Duration::hours(2));
    }

    #[test]
    fn goals_are_independent_from_ledger() {
        let mut store = store();
        let goal = store
            .add_goal(GoalInput::new("Auto", Decimal::from(5000), "🚗"))
            .unwrap();
        store
            .add_transaction(TransactionInput::income(Decimal::from(1000), "Banco"))
            .unwrap();
        assert_eq!(store.goals().get(goal.id).unwrap().current_amount, Decimal::ZERO);
    }

    #[test]
    fn find_goal_by_position_or_prefix() {
        let mut store = store();
        let auto = store
            .add_goal(GoalInput::new("Auto", Decimal::from(5000), "🚗"))
            .unwrap();
        let casa = store
            .add_goal(GoalInput::new("Casa", Decimal::from(9000), "🏠"))
            .unwrap();
        assert_eq!(store.find_goal("2").map(|goal| goal.id), Some(casa.id));
        let prefix = &auto.id.simple().to_string()[..8];
        assert_eq!(store.find_goal(prefix).map(|goal| goal.id), Some(auto.id));
        assert!(store.find_goal("9").is_none());
    }
}
