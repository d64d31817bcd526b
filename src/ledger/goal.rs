use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, LedgerResult};

/// Emojis offered by the goal form.
pub const GOAL_EMOJIS: &[&str] = &[
    "🏖️", "🚗", "🎁", "👟", "👗", "🏠", "📚", "💻", "🛒", "🍽️", "🎸", "🧸", "🐖",
];

/// Savings target tracked by hand. Never linked to ledger transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub emoji: String,
}

impl Goal {
    /// Share of the target already saved, clamped to `[0, 1]`.
    pub fn progress(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        // A quotient too large to represent is far past the target anyway.
        self.current_amount
            .checked_div(self.target_amount)
            .unwrap_or(Decimal::ONE)
            .min(Decimal::ONE)
            .max(Decimal::ZERO)
    }

    /// Amount still missing to reach the target.
    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalInput {
    pub name: String,
    pub target_amount: Decimal,
    pub emoji: String,
}

impl GoalInput {
    pub fn new(name: impl Into<String>, target_amount: Decimal, emoji: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_amount,
            emoji: emoji.into(),
        }
    }
}

/// Goals in creation order, addressed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalBook {
    goals: Vec<Goal>,
}

impl GoalBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, input: GoalInput) -> LedgerResult<Goal> {
        let input = validate(input)?;
        let goal = Goal {
            id: Uuid::new_v4(),
            name: input.name,
            target_amount: input.target_amount,
            current_amount: Decimal::ZERO,
            emoji: input.emoji,
        };
        self.goals.push(goal.clone());
        Ok(goal)
    }

    /// Replaces name, target and emoji. Saved progress is kept.
    pub fn edit(&mut self, id: Uuid, input: GoalInput) -> LedgerResult<Goal> {
        let input = validate(input)?;
        let goal = self.goal_mut(id)?;
        goal.name = input.name;
        goal.target_amount = input.target_amount;
        goal.emoji = input.emoji;
        Ok(goal.clone())
    }

    pub fn remove(&mut self, id: Uuid) -> LedgerResult<Goal> {
        let index = self
            .goals
            .iter()
            .position(|goal| goal.id == id)
            .ok_or(LedgerError::GoalNotFound(id))?;
        Ok(self.goals.remove(index))
    }

    pub fn set_current_amount(&mut self, id: Uuid, amount: Decimal) -> LedgerResult<Goal> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(format!(
                "saved amount cannot be negative, got {}",
                amount
            )));
        }
        let goal = self.goal_mut(id)?;
        goal.current_amount = amount;
        Ok(goal.clone())
    }

    pub fn get(&self, id: Uuid) -> Option<&Goal> {
        self.goals.iter().find(|goal| goal.id == id)
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// The latest `count` goals, newest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &Goal> + '_ {
        self.goals.iter().rev().take(count)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    fn goal_mut(&mut self, id: Uuid) -> LedgerResult<&mut Goal> {
        self.goals
            .iter_mut()
            .find(|goal| goal.id == id)
            .ok_or(LedgerError::GoalNotFound(id))
    }
}

fn validate(mut input: GoalInput) -> LedgerResult<GoalInput> {
    input.name = input.name.trim().to_string();
    input.emoji = input.emoji.trim().to_string();
    if input.name.is_empty() {
        return Err(LedgerError::MissingRequiredField("name"));
    }
    if input.target_amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(format!(
            "goal target must be greater than zero, got {}",
            input.target_amount
        )));
    }
    if input.emoji.is_empty() {
        return Err(LedgerError::MissingRequiredField("emoji"));
    }
    Ok(input)
}
