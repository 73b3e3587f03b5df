//! Achievement rules engine
//!
//! Unlocks are idempotent: a rule may fire any number of times but the badge
//! is stored once and the unlock event is logged only on the first trigger.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::SpendwiseResult;
use crate::events::{EntityKind, EventEntry, EventKind, EventLogger};
use crate::models::{catalog_entry, Achievement, AchievementKey, UserAchievement};
use crate::store::Store;

/// Consecutive login days required for the streak badge
pub const STREAK_TARGET: u32 = 7;

/// Expense count thresholds for the counting badges
const FIRST_EXPENSE_COUNT: usize = 1;
const TEN_EXPENSES_COUNT: usize = 10;

/// Service evaluating achievement rules against the active store
pub struct AchievementService<'a> {
    store: &'a dyn Store,
    events: &'a EventLogger,
}

impl<'a> AchievementService<'a> {
    pub fn new(store: &'a dyn Store, events: &'a EventLogger) -> Self {
        Self { store, events }
    }

    /// Update the login streak for today and unlock the streak badge when due.
    ///
    /// Same-day repeat logins leave the streak untouched. A login the day
    /// after the last one extends the streak; any longer gap resets it to 1.
    pub fn record_login(&self, today: NaiveDate) -> SpendwiseResult<Vec<&'static Achievement>> {
        let mut profile = self.store.profile()?;

        match profile.last_login {
            Some(last) if last == today => return Ok(Vec::new()),
            Some(last) if last + Duration::days(1) == today => {
                profile.current_streak += 1;
            }
            _ => {
                profile.current_streak = 1;
            }
        }
        profile.last_login = Some(today);
        self.store.update_profile(&profile)?;

        let mut unlocked = Vec::new();
        if profile.current_streak >= STREAK_TARGET {
            if let Some(badge) = self.unlock(AchievementKey::Streak7)? {
                unlocked.push(badge);
            }
        }
        Ok(unlocked)
    }

    /// Evaluate the expense-count badges after an expense is recorded
    pub fn on_expense_recorded(&self) -> SpendwiseResult<Vec<&'static Achievement>> {
        let count = self.store.expense_count()?;
        let mut unlocked = Vec::new();

        if count >= FIRST_EXPENSE_COUNT {
            if let Some(badge) = self.unlock(AchievementKey::FirstExpense)? {
                unlocked.push(badge);
            }
        }
        if count >= TEN_EXPENSES_COUNT {
            if let Some(badge) = self.unlock(AchievementKey::TenExpenses)? {
                unlocked.push(badge);
            }
        }
        Ok(unlocked)
    }

    /// Check the previous month against the budget threshold.
    ///
    /// Only completed months count, so this looks at the month before `today`.
    /// A month with no threshold set never qualifies; a month whose total is
    /// at or under the threshold unlocks the badge, including a zero-spend
    /// month.
    pub fn check_budget_keeper(
        &self,
        today: NaiveDate,
    ) -> SpendwiseResult<Vec<&'static Achievement>> {
        let (year, month) = previous_month(today.year(), today.month());
        self.check_budget_keeper_month(year, month, today)
    }

    /// Check a specific month against the budget threshold.
    ///
    /// Summarizing an old month can surface a qualifying month the daily
    /// check never looked at. The current and future months have not
    /// finished yet and never qualify.
    pub fn check_budget_keeper_month(
        &self,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> SpendwiseResult<Vec<&'static Achievement>> {
        if (year, month) >= (today.year(), today.month()) {
            return Ok(Vec::new());
        }

        let profile = self.store.profile()?;
        let threshold = match profile.budget_threshold {
            Some(t) => t,
            None => return Ok(Vec::new()),
        };

        let total = self
            .store
            .expenses_for_month(year, month)?
            .iter()
            .map(|e| e.amount)
            .sum::<crate::models::Money>();

        let mut unlocked = Vec::new();
        if total <= threshold {
            if let Some(badge) = self.unlock(AchievementKey::BudgetKeeper)? {
                unlocked.push(badge);
            }
        }
        Ok(unlocked)
    }

    /// Unlock the goal badge; called when a goal first reaches its target
    pub fn on_goal_reached(&self) -> SpendwiseResult<Vec<&'static Achievement>> {
        Ok(self.unlock(AchievementKey::GoalReached)?.into_iter().collect())
    }

    /// All achievements unlocked by the active user
    pub fn unlocked(&self) -> SpendwiseResult<Vec<UserAchievement>> {
        self.store.achievements()
    }

    /// Store the unlock if new, returning the catalog entry on first trigger
    fn unlock(&self, key: AchievementKey) -> SpendwiseResult<Option<&'static Achievement>> {
        let record = UserAchievement::new(self.store.user_id(), key);
        if !self.store.unlock_achievement(&record)? {
            return Ok(None);
        }

        self.events.log(
            &EventEntry::new(
                EventKind::AchievementUnlocked,
                EntityKind::Achievement,
                self.store.user_id(),
            )
            .with_detail(key.as_str().to_string()),
        )?;

        Ok(Some(catalog_entry(key)))
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}
