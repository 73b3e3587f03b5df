//! Expense model
//!
//! A single recorded expense. Amounts are strictly positive magnitudes; the
//! direction is always "money spent".

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier (client-generated, stable across stores)
    pub id: ExpenseId,

    /// Expense category
    pub category: Category,

    /// Date the expense occurred
    pub date: NaiveDate,

    /// Free-text description
    pub description: String,

    /// Amount spent (always positive)
    pub amount: Money,

    /// Content hash used for duplicate detection during CSV import
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_id: Option<String>,

    /// When the expense was created
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        category: Category,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            category,
            date,
            description: description.into(),
            amount,
            import_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }
        Ok(())
    }

    /// Check whether this expense falls in the given calendar month
    pub fn in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }

    /// Touch the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Generate a content hash for duplicate detection
    pub fn generate_import_id(date: NaiveDate, amount: Money, description: &str) -> String {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        date.hash(&mut hasher);
        amount.cents().hash(&mut hasher);
        description.hash(&mut hasher);
        format!("imp-{:016x}", hasher.finish())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount,
            self.category
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    EmptyDescription,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive, got {}", amount)
            }
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_expense() -> Expense {
        Expense::new(
            Category::Groceries,
            NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            "Weekly shop",
            Money::from_cents(4250),
        )
    }

    #[test]
    fn test_new_expense() {
        let e = sample_expense();
        assert_eq!(e.category, Category::Groceries);
        assert_eq!(e.amount.cents(), 4250);
        assert!(e.import_id.is_none());
        assert!(e.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_amount() {
        let mut e = sample_expense();
        e.amount = Money::zero();
        assert_eq!(
            e.validate(),
            Err(ExpenseValidationError::NonPositiveAmount(Money::zero()))
        );
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let mut e = sample_expense();
        e.amount = Money::from_cents(-100);
        assert!(matches!(
            e.validate(),
            Err(ExpenseValidationError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_description() {
        let mut e = sample_expense();
        e.description = "   ".to_string();
        assert_eq!(e.validate(), Err(ExpenseValidationError::EmptyDescription));
    }

    #[test]
    fn test_in_month() {
        let e = sample_expense();
        assert!(e.in_month(2025, 3));
        assert!(!e.in_month(2025, 4));
        assert!(!e.in_month(2024, 3));
    }

    #[test]
    fn test_import_id_deterministic() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let a = Expense::generate_import_id(date, Money::from_cents(4250), "Weekly shop");
        let b = Expense::generate_import_id(date, Money::from_cents(4250), "Weekly shop");
        let c = Expense::generate_import_id(date, Money::from_cents(4251), "Weekly shop");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("imp-"));
    }

    #[test]
    fn test_serialization() {
        let e = sample_expense();
        let json = serde_json::to_string(&e).unwrap();
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(e.id, back.id);
        assert_eq!(e.amount, back.amount);
        assert_eq!(e.category, back.category);
    }
}
