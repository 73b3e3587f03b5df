//! Savings goal model
//!
//! Tracks progress toward a named savings target. The current amount is kept
//! inside `[0, target_amount]` by clamping contributions and withdrawals.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    /// Unique identifier
    pub id: GoalId,

    /// Goal name, e.g. "Emergency fund"
    pub name: String,

    /// Target amount (always positive)
    pub target_amount: Money,

    /// Amount saved so far, in [0, target_amount]
    pub current_amount: Money,

    /// Optional deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,

    /// When the goal was created
    pub created_at: DateTime<Utc>,

    /// When the goal was last modified
    pub updated_at: DateTime<Utc>,
}

impl SavingsGoal {
    /// Create a new savings goal starting at zero
    pub fn new(name: impl Into<String>, target_amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: GoalId::new(),
            name: name.into(),
            target_amount,
            current_amount: Money::zero(),
            target_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set a deadline
    pub fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    /// Validate the goal
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.name.trim().is_empty() {
            return Err(GoalValidationError::EmptyName);
        }
        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget(self.target_amount));
        }
        if self.current_amount.is_negative() || self.current_amount > self.target_amount {
            return Err(GoalValidationError::CurrentOutOfRange {
                current: self.current_amount,
                target: self.target_amount,
            });
        }
        Ok(())
    }

    /// Add to the goal, clamping at the target. Returns the amount actually
    /// applied.
    pub fn contribute(&mut self, amount: Money) -> Money {
        let headroom = self.target_amount - self.current_amount;
        let applied = if amount > headroom { headroom } else { amount };
        self.current_amount += applied;
        self.updated_at = Utc::now();
        applied
    }

    /// Take from the goal, clamping at zero. Returns the amount actually
    /// removed.
    pub fn withdraw(&mut self, amount: Money) -> Money {
        let applied = if amount > self.current_amount {
            self.current_amount
        } else {
            amount
        };
        self.current_amount -= applied;
        self.updated_at = Utc::now();
        applied
    }

    /// Progress toward the target as a percentage (0-100)
    pub fn progress_percent(&self) -> u8 {
        if self.target_amount.is_zero() {
            return 0;
        }
        let pct = (self.current_amount.cents() * 100) / self.target_amount.cents();
        pct.clamp(0, 100) as u8
    }

    /// Whether the goal has been fully funded
    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Whether the deadline has passed without the goal being reached
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.target_date {
            Some(deadline) => !self.is_reached() && today > deadline,
            None => false,
        }
    }

    /// Amount still needed to reach the target
    pub fn remaining(&self) -> Money {
        self.target_amount - self.current_amount
    }
}

impl fmt::Display for SavingsGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} / {} ({}%)",
            self.name,
            self.current_amount,
            self.target_amount,
            self.progress_percent()
        )
    }
}

/// Validation errors for savings goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyName,
    NonPositiveTarget(Money),
    CurrentOutOfRange { current: Money, target: Money },
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Goal name cannot be empty"),
            Self::NonPositiveTarget(target) => {
                write!(f, "Goal target must be positive, got {}", target)
            }
            Self::CurrentOutOfRange { current, target } => write!(
                f,
                "Current amount {} must be between 0 and the target {}",
                current, target
            ),
        }
    }
}

impl std::error::Error for GoalValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal() -> SavingsGoal {
        SavingsGoal::new("Emergency fund", Money::from_cents(100_000))
    }

    #[test]
    fn test_new_goal() {
        let g = goal();
        assert_eq!(g.current_amount, Money::zero());
        assert_eq!(g.progress_percent(), 0);
        assert!(!g.is_reached());
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_contribute_and_progress() {
        let mut g = goal();
        let applied = g.contribute(Money::from_cents(25_000));
        assert_eq!(applied.cents(), 25_000);
        assert_eq!(g.progress_percent(), 25);
        assert_eq!(g.remaining().cents(), 75_000);
    }

    #[test]
    fn test_contribute_clamps_at_target() {
        let mut g = goal();
        g.contribute(Money::from_cents(90_000));
        let applied = g.contribute(Money::from_cents(50_000));
        assert_eq!(applied.cents(), 10_000);
        assert_eq!(g.current_amount, g.target_amount);
        assert!(g.is_reached());
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_withdraw_clamps_at_zero() {
        let mut g = goal();
        g.contribute(Money::from_cents(10_000));
        let removed = g.withdraw(Money::from_cents(50_000));
        assert_eq!(removed.cents(), 10_000);
        assert!(g.current_amount.is_zero());
    }

    #[test]
    fn test_overdue() {
        let deadline = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let g = goal().with_target_date(deadline);

        let before = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let after = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert!(!g.is_overdue(before));
        assert!(g.is_overdue(after));

        let mut reached = g.clone();
        reached.contribute(Money::from_cents(100_000));
        assert!(!reached.is_overdue(after));
    }

    #[test]
    fn test_validation_errors() {
        let mut g = goal();
        g.name = "".into();
        assert_eq!(g.validate(), Err(GoalValidationError::EmptyName));

        let mut g = goal();
        g.target_amount = Money::zero();
        assert!(matches!(
            g.validate(),
            Err(GoalValidationError::NonPositiveTarget(_))
        ));

        let mut g = goal();
        g.current_amount = Money::from_cents(200_000);
        assert!(matches!(
            g.validate(),
            Err(GoalValidationError::CurrentOutOfRange { .. })
        ));
    }

    #[test]
    fn test_display() {
        let mut g = goal();
        g.contribute(Money::from_cents(50_000));
        assert_eq!(
            format!("{}", g),
            "Emergency fund: 500.00 / 1000.00 (50%)"
        );
    }
}
