//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json, with a month index
//! for summary queries.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::Datelike;

use crate::error::SpendwiseError;
use crate::models::{Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence with a month index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    /// Index: (year, month) -> expense ids
    by_month: RwLock<HashMap<(i32, u32), Vec<ExpenseId>>>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_month: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and build the month index
    pub fn load(&self) -> Result<(), SpendwiseError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_month = self
            .by_month
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_month.clear();

        for expense in file_data.expenses {
            let id = expense.id;
            let key = (expense.date.year(), expense.date.month());
            by_month.entry(key).or_default().push(id);
            data.insert(id, expense);
        }

        Ok(())
    }

    /// Save expenses to disk, newest first
    pub fn save(&self) -> Result<(), SpendwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        let file_data = ExpenseData { expenses };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, SpendwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all expenses, newest first
    pub fn get_all(&self) -> Result<Vec<Expense>, SpendwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(expenses)
    }

    /// Get expenses for a calendar month, newest first
    pub fn get_by_month(&self, year: i32, month: u32) -> Result<Vec<Expense>, SpendwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_month = self
            .by_month
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut expenses: Vec<_> = by_month
            .get(&(year, month))
            .map(|ids| ids.iter().filter_map(|id| data.get(id).cloned()).collect())
            .unwrap_or_default();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    /// Number of stored expenses
    pub fn count(&self) -> Result<usize, SpendwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }

    /// Insert or update an expense, keeping the month index consistent
    pub fn upsert(&self, expense: Expense) -> Result<(), SpendwiseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_month = self
            .by_month
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let id = expense.id;
        if let Some(old) = data.get(&id) {
            let old_key = (old.date.year(), old.date.month());
            if let Some(ids) = by_month.get_mut(&old_key) {
                ids.retain(|i| *i != id);
            }
        }

        let key = (expense.date.year(), expense.date.month());
        by_month.entry(key).or_default().push(id);
        data.insert(id, expense);
        Ok(())
    }

    /// Delete an expense, returning whether it existed
    pub fn delete(&self, id: ExpenseId) -> Result<bool, SpendwiseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_month = self
            .by_month
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.remove(&id) {
            Some(expense) => {
                let key = (expense.date.year(), expense.date.month());
                if let Some(ids) = by_month.get_mut(&key) {
                    ids.retain(|i| *i != id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove all expenses (used when archiving guest data)
    pub fn clear(&self) -> Result<(), SpendwiseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_month = self
            .by_month
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_month.clear();
        Ok(())
    }
}
