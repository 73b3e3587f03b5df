//! Local (guest-mode) implementation of the store seam
//!
//! Wraps the JSON repositories; every mutation persists the affected file
//! immediately so a killed process never loses an acknowledged write.

use crate::error::SpendwiseResult;
use crate::models::{
    Expense, ExpenseId, GoalId, ProfileSettings, SavingsGoal, UserAchievement, GUEST_USER_ID,
};
use crate::storage::Storage;

use super::Store;

/// Guest-mode store backed by local JSON files
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// Wrap an already-loaded storage coordinator
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Access the underlying storage (used by reconciliation)
    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}

impl Store for LocalStore {
    fn user_id(&self) -> String {
        GUEST_USER_ID.to_string()
    }

    fn list_expenses(&self) -> SpendwiseResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    fn expenses_for_month(&self, year: i32, month: u32) -> SpendwiseResult<Vec<Expense>> {
        self.storage.expenses.get_by_month(year, month)
    }

    fn get_expense(&self, id: ExpenseId) -> SpendwiseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    fn insert_expense(&self, expense: &Expense) -> SpendwiseResult<()> {
        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()
    }

    fn update_expense(&self, expense: &Expense) -> SpendwiseResult<()> {
        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()
    }

    fn delete_expense(&self, id: ExpenseId) -> SpendwiseResult<bool> {
        let existed = self.storage.expenses.delete(id)?;
        if existed {
            self.storage.expenses.save()?;
        }
        Ok(existed)
    }

    fn expense_count(&self) -> SpendwiseResult<usize> {
        self.storage.expenses.count()
    }

    fn list_goals(&self) -> SpendwiseResult<Vec<SavingsGoal>> {
        self.storage.goals.get_all()
    }

    fn get_goal(&self, id: GoalId) -> SpendwiseResult<Option<SavingsGoal>> {
        self.storage.goals.get(id)
    }

    fn insert_goal(&self, goal: &SavingsGoal) -> SpendwiseResult<()> {
        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()
    }

    fn update_goal(&self, goal: &SavingsGoal) -> SpendwiseResult<()> {
        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()
    }

    fn delete_goal(&self, id: GoalId) -> SpendwiseResult<bool> {
        let existed = self.storage.goals.delete(id)?;
        if existed {
            self.storage.goals.save()?;
        }
        Ok(existed)
    }

    fn profile(&self) -> SpendwiseResult<ProfileSettings> {
        self.storage.profile.get()
    }

    fn update_profile(&self, profile: &ProfileSettings) -> SpendwiseResult<()> {
        self.storage.profile.set(profile.clone())?;
        self.storage.profile.save()
    }

    fn achievements(&self) -> SpendwiseResult<Vec<UserAchievement>> {
        self.storage.achievements.get_all()
    }

    fn unlock_achievement(&self, unlock: &UserAchievement) -> SpendwiseResult<bool> {
        let inserted = self.storage.achievements.insert(unlock.clone())?;
        if inserted {
            self.storage.achievements.save()?;
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendwisePaths;
    use crate::models::{AchievementKey, Category, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store() -> (TempDir, LocalStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendwisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, LocalStore::new(storage))
    }

    #[test]
    fn test_guest_user_id() {
        let (_tmp, store) = store();
        assert_eq!(store.user_id(), "guest");
    }

    #[test]
    fn test_expense_crud_persists() {
        let (_tmp, store) = store();
        let expense = Expense::new(
            Category::Travel,
            NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            "Train ticket",
            Money::from_cents(8900),
        );
        let id = expense.id;

        store.insert_expense(&expense).unwrap();
        assert_eq!(store.expense_count().unwrap(), 1);
        assert!(store.get_expense(id).unwrap().is_some());

        assert!(store.delete_expense(id).unwrap());
        assert!(!store.delete_expense(id).unwrap());
    }

    #[test]
    fn test_month_filter() {
        let (_tmp, store) = store();
        let march = Expense::new(
            Category::Dining,
            NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            "Lunch",
            Money::from_cents(1200),
        );
        let april = Expense::new(
            Category::Dining,
            NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
            "Lunch",
            Money::from_cents(1300),
        );
        store.insert_expense(&march).unwrap();
        store.insert_expense(&april).unwrap();

        let found = store.expenses_for_month(2025, 3).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, march.id);
    }

    #[test]
    fn test_achievement_unlock_once() {
        let (_tmp, store) = store();
        let unlock = UserAchievement::new("guest", AchievementKey::FirstExpense);
        assert!(store.unlock_achievement(&unlock).unwrap());
        assert!(!store.unlock_achievement(&unlock).unwrap());
        assert_eq!(store.achievements().unwrap().len(), 1);
    }

    #[test]
    fn test_profile_roundtrip() {
        let (_tmp, store) = store();
        let mut profile = store.profile().unwrap();
        profile.budget_threshold = Some(Money::from_cents(60_000));
        store.update_profile(&profile).unwrap();
        assert_eq!(store.profile().unwrap(), profile);
    }
}
