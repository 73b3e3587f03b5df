//! Monthly spending summaries and budget threshold checks

use std::collections::BTreeMap;

use crate::error::SpendwiseResult;
use crate::models::{Category, Money, ProfileSettings};
use crate::store::Store;

/// Aggregated view of a single month's spending
#[derive(Debug, Clone)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub total: Money,
    pub expense_count: usize,
    /// Per-category totals, descending by amount
    pub by_category: Vec<(Category, Money)>,
    pub threshold: Option<Money>,
    pub currency: String,
}

impl MonthSummary {
    /// True when a threshold is set and the month's total exceeds it
    pub fn over_threshold(&self) -> bool {
        match self.threshold {
            Some(limit) => self.total > limit,
            None => false,
        }
    }

    /// Remaining budget for the month, if a threshold is set
    pub fn remaining(&self) -> Option<Money> {
        self.threshold.map(|limit| limit - self.total)
    }
}

/// Service producing monthly summaries
pub struct SummaryService<'a> {
    store: &'a dyn Store,
}

impl<'a> SummaryService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    /// Build the summary for a given month
    pub fn month_summary(&self, year: i32, month: u32) -> SpendwiseResult<MonthSummary> {
        let expenses = self.store.expenses_for_month(year, month)?;
        let profile = self.store.profile()?;

        let total: Money = expenses.iter().map(|e| e.amount).sum();
        let mut per_category: BTreeMap<Category, Money> = BTreeMap::new();
        for expense in &expenses {
            let entry = per_category.entry(expense.category).or_insert_with(Money::zero);
            *entry = *entry + expense.amount;
        }

        let mut by_category: Vec<(Category, Money)> = per_category.into_iter().collect();
        by_category.sort_by(|a, b| b.1.cents().cmp(&a.1.cents()));

        Ok(MonthSummary {
            year,
            month,
            total,
            expense_count: expenses.len(),
            by_category,
            threshold: profile.budget_threshold,
            currency: profile.currency,
        })
    }

    /// Current profile settings, for callers that need the threshold alone
    pub fn profile(&self) -> SpendwiseResult<ProfileSettings> {
        self.store.profile()
    }
}
