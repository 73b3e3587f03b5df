//! Dual persistence seam
//!
//! Every feature talks to a [`Store`]: guest mode is backed by local JSON
//! files, authenticated mode by the hosted backend. The CLI picks the
//! implementation at startup based on the persisted session.

mod local;
mod remote;

pub use local::LocalStore;
pub use remote::RemoteStore;

use crate::error::SpendwiseResult;
use crate::models::{
    Expense, ExpenseId, GoalId, ProfileSettings, SavingsGoal, UserAchievement,
};

/// Uniform persistence interface over the local and remote backends
pub trait Store {
    /// The owning user id ("guest" for the local store)
    fn user_id(&self) -> String;

    // ── Expenses ───────────────────────────────────────────────────────────

    /// All expenses, newest first
    fn list_expenses(&self) -> SpendwiseResult<Vec<Expense>>;

    /// Expenses within one calendar month, newest first
    fn expenses_for_month(&self, year: i32, month: u32) -> SpendwiseResult<Vec<Expense>> {
        let mut expenses: Vec<_> = self
            .list_expenses()?
            .into_iter()
            .filter(|e| e.in_month(year, month))
            .collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    fn get_expense(&self, id: ExpenseId) -> SpendwiseResult<Option<Expense>>;

    fn insert_expense(&self, expense: &Expense) -> SpendwiseResult<()>;

    fn update_expense(&self, expense: &Expense) -> SpendwiseResult<()>;

    /// Delete an expense, returning whether it existed
    fn delete_expense(&self, id: ExpenseId) -> SpendwiseResult<bool>;

    /// Number of stored expenses
    fn expense_count(&self) -> SpendwiseResult<usize> {
        Ok(self.list_expenses()?.len())
    }

    // ── Savings goals ──────────────────────────────────────────────────────

    fn list_goals(&self) -> SpendwiseResult<Vec<SavingsGoal>>;

    fn get_goal(&self, id: GoalId) -> SpendwiseResult<Option<SavingsGoal>> {
        Ok(self.list_goals()?.into_iter().find(|g| g.id == id))
    }

    fn insert_goal(&self, goal: &SavingsGoal) -> SpendwiseResult<()>;

    fn update_goal(&self, goal: &SavingsGoal) -> SpendwiseResult<()>;

    /// Delete a goal, returning whether it existed
    fn delete_goal(&self, id: GoalId) -> SpendwiseResult<bool>;

    // ── Profile ────────────────────────────────────────────────────────────

    fn profile(&self) -> SpendwiseResult<ProfileSettings>;

    fn update_profile(&self, profile: &ProfileSettings) -> SpendwiseResult<()>;

    // ── Achievements ───────────────────────────────────────────────────────

    fn achievements(&self) -> SpendwiseResult<Vec<UserAchievement>>;

    /// Record an unlock. Returns true when the row was newly written.
    fn unlock_achievement(&self, unlock: &UserAchievement) -> SpendwiseResult<bool>;
}
