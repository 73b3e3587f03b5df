//! Remote (authenticated) implementation of the store seam
//!
//! Thin delegation to the REST client; the backend applies its own row-level
//! ownership checks, so every call simply scopes by the session's user.

use crate::error::SpendwiseResult;
use crate::models::{
    Expense, ExpenseId, GoalId, ProfileSettings, SavingsGoal, UserAchievement,
};
use crate::remote::RemoteClient;

use super::Store;

/// Authenticated store backed by the hosted backend
pub struct RemoteStore {
    client: RemoteClient,
}

impl RemoteStore {
    /// Wrap an authenticated REST client
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    /// Access the underlying client (used by reconciliation)
    pub fn client(&self) -> &RemoteClient {
        &self.client
    }
}

impl Store for RemoteStore {
    fn user_id(&self) -> String {
        self.client.user_id().to_string()
    }

    fn list_expenses(&self) -> SpendwiseResult<Vec<Expense>> {
        let mut expenses = self.client.list_expenses()?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(expenses)
    }

    fn get_expense(&self, id: ExpenseId) -> SpendwiseResult<Option<Expense>> {
        Ok(self.list_expenses()?.into_iter().find(|e| e.id == id))
    }

    fn insert_expense(&self, expense: &Expense) -> SpendwiseResult<()> {
        self.client.insert_expense(expense)
    }

    fn update_expense(&self, expense: &Expense) -> SpendwiseResult<()> {
        self.client.update_expense(expense)
    }

    fn delete_expense(&self, id: ExpenseId) -> SpendwiseResult<bool> {
        self.client.delete_expense(id)
    }

    fn list_goals(&self) -> SpendwiseResult<Vec<SavingsGoal>> {
        let mut goals = self.client.list_goals()?;
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(goals)
    }

    fn insert_goal(&self, goal: &SavingsGoal) -> SpendwiseResult<()> {
        self.client.insert_goal(goal)
    }

    fn update_goal(&self, goal: &SavingsGoal) -> SpendwiseResult<()> {
        self.client.update_goal(goal)
    }

    fn delete_goal(&self, id: GoalId) -> SpendwiseResult<bool> {
        self.client.delete_goal(id)
    }

    fn profile(&self) -> SpendwiseResult<ProfileSettings> {
        self.client.fetch_profile()
    }

    fn update_profile(&self, profile: &ProfileSettings) -> SpendwiseResult<()> {
        self.client.upsert_profile(profile)
    }

    fn achievements(&self) -> SpendwiseResult<Vec<UserAchievement>> {
        self.client.list_achievements()
    }

    fn unlock_achievement(&self, unlock: &UserAchievement) -> SpendwiseResult<bool> {
        self.client.insert_achievement(unlock)
    }
}
