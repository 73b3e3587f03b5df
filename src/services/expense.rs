//! Expense service
//!
//! Business logic over the store seam: validation, event logging, and lookup
//! by full or prefixed id.

use chrono::NaiveDate;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::events::{EntityKind, EventEntry, EventKind, EventLogger};
use crate::models::{Category, Expense, ExpenseId, Money};
use crate::store::Store;

/// Input for creating an expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub category: Category,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
}

/// Input for editing an expense; None fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub amount: Option<Money>,
}

/// Service for expense CRUD
pub struct ExpenseService<'a> {
    store: &'a dyn Store,
    events: &'a EventLogger,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(store: &'a dyn Store, events: &'a EventLogger) -> Self {
        Self { store, events }
    }

    /// Create and persist an expense
    pub fn create(&self, input: CreateExpenseInput) -> SpendwiseResult<Expense> {
        let expense = Expense::new(input.category, input.date, input.description, input.amount);
        expense
            .validate()
            .map_err(|e| SpendwiseError::Validation(e.to_string()))?;

        self.store.insert_expense(&expense)?;
        self.events.log(
            &EventEntry::new(EventKind::Created, EntityKind::Expense, self.store.user_id())
                .with_entity_id(expense.id.as_uuid().to_string())
                .with_detail(expense.description.clone()),
        )?;

        Ok(expense)
    }

    /// Apply edits to an existing expense
    pub fn update(&self, id: ExpenseId, input: UpdateExpenseInput) -> SpendwiseResult<Expense> {
        let mut expense = self
            .store
            .get_expense(id)?
            .ok_or_else(|| SpendwiseError::expense_not_found(id.to_string()))?;

        if let Some(category) = input.category {
            expense.category = category;
        }
        if let Some(date) = input.date {
            expense.date = date;
        }
        if let Some(description) = input.description {
            expense.description = description;
        }
        if let Some(amount) = input.amount {
            expense.amount = amount;
        }
        expense.touch();

        expense
            .validate()
            .map_err(|e| SpendwiseError::Validation(e.to_string()))?;

        self.store.update_expense(&expense)?;
        self.events.log(
            &EventEntry::new(EventKind::Updated, EntityKind::Expense, self.store.user_id())
                .with_entity_id(expense.id.as_uuid().to_string())
                .with_detail(expense.description.clone()),
        )?;

        Ok(expense)
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> SpendwiseResult<()> {
        if !self.store.delete_expense(id)? {
            return Err(SpendwiseError::expense_not_found(id.to_string()));
        }
        self.events.log(
            &EventEntry::new(EventKind::Deleted, EntityKind::Expense, self.store.user_id())
                .with_entity_id(id.as_uuid().to_string()),
        )?;
        Ok(())
    }

    /// List all expenses, optionally filtered by category
    pub fn list(&self, category: Option<Category>) -> SpendwiseResult<Vec<Expense>> {
        let expenses = self.store.list_expenses()?;
        Ok(match category {
            Some(cat) => expenses.into_iter().filter(|e| e.category == cat).collect(),
            None => expenses,
        })
    }

    /// Resolve an expense from a full UUID or the short `exp-xxxxxxxx` form
    pub fn resolve(&self, identifier: &str) -> SpendwiseResult<Expense> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            if let Some(expense) = self.store.get_expense(id)? {
                return Ok(expense);
            }
        }

        // Fall back to matching the short display prefix
        let needle = identifier.strip_prefix("exp-").unwrap_or(identifier);
        let matches: Vec<_> = self
            .store
            .list_expenses()?
            .into_iter()
            .filter(|e| e.id.as_uuid().to_string().starts_with(needle))
            .collect();

        match matches.len() {
            1 => Ok(matches.into_iter().next().ok_or_else(|| {
                SpendwiseError::expense_not_found(identifier.to_string())
            })?),
            0 => Err(SpendwiseError::expense_not_found(identifier.to_string())),
            _ => Err(SpendwiseError::Validation(format!(
                "Ambiguous expense id '{}': matches {} expenses",
                identifier,
                matches.len()
            ))),
        }
    }
}
