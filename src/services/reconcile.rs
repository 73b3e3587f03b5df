//! Guest-to-account reconciliation
//!
//! After a sign-in, any data recorded while signed out is merged into the
//! account's remote store. Expenses and goals keep their client-generated
//! UUIDs, so presence is decided by id. The remote profile wins field by
//! field, except that a threshold set only as guest is pushed up. Guest files
//! are archived locally before being reset, never silently discarded.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SpendwiseResult;
use crate::models::{
    Expense, ProfileSettings, SavingsGoal, UserAchievement,
};
use crate::storage::file_io;
use crate::store::{LocalStore, Store};

/// Counts of what a reconciliation moved
#[derive(Debug, Default, Clone)]
pub struct ReconcileReport {
    pub expenses_uploaded: usize,
    pub goals_uploaded: usize,
    pub achievements_merged: usize,
    /// True when the guest threshold was pushed to the account profile
    pub profile_pushed: bool,
}

impl ReconcileReport {
    /// True when nothing needed to move
    pub fn is_empty(&self) -> bool {
        self.expenses_uploaded == 0
            && self.goals_uploaded == 0
            && self.achievements_merged == 0
            && !self.profile_pushed
    }
}

/// Snapshot of the guest files written before they are reset
#[derive(Debug, Serialize, Deserialize)]
struct GuestArchive {
    archived_at: DateTime<Utc>,
    expenses: Vec<Expense>,
    goals: Vec<SavingsGoal>,
    profile: ProfileSettings,
    achievements: Vec<UserAchievement>,
}

/// Service merging guest data into an account store
pub struct ReconcileService<'a> {
    local: &'a LocalStore,
    remote: &'a dyn Store,
}

impl<'a> ReconcileService<'a> {
    pub fn new(local: &'a LocalStore, remote: &'a dyn Store) -> Self {
        Self { local, remote }
    }

    /// Run the full reconciliation: upload, merge, archive, reset
    pub fn reconcile(&self) -> SpendwiseResult<ReconcileReport> {
        let mut report = ReconcileReport::default();

        let guest_expenses = self.local.list_expenses()?;
        let guest_goals = self.local.list_goals()?;
        let guest_profile = self.local.profile()?;
        let guest_achievements = self.local.achievements()?;

        // Upload expenses the account does not already have
        let remote_expense_ids: HashSet<_> = self
            .remote
            .list_expenses()?
            .iter()
            .map(|e| e.id)
            .collect();
        for expense in &guest_expenses {
            if !remote_expense_ids.contains(&expense.id) {
                self.remote.insert_expense(expense)?;
                report.expenses_uploaded += 1;
            }
        }

        let remote_goal_ids: HashSet<_> =
            self.remote.list_goals()?.iter().map(|g| g.id).collect();
        for goal in &guest_goals {
            if !remote_goal_ids.contains(&goal.id) {
                self.remote.insert_goal(goal)?;
                report.goals_uploaded += 1;
            }
        }

        // Remote profile wins; a guest-only threshold is filled in and pushed
        let remote_profile = self.remote.profile()?;
        let (merged, push_needed) =
            ProfileSettings::merge_remote_over_guest(&remote_profile, &guest_profile);
        if push_needed {
            self.remote.update_profile(&merged)?;
            report.profile_pushed = true;
        }

        // Achievements merge by key; already-unlocked badges are skipped
        for achievement in &guest_achievements {
            let record = UserAchievement {
                user_id: self.remote.user_id(),
                key: achievement.key,
                unlocked_at: achievement.unlocked_at,
            };
            if self.remote.unlock_achievement(&record)? {
                report.achievements_merged += 1;
            }
        }

        self.archive_guest_data(guest_expenses, guest_goals, guest_profile, guest_achievements)?;
        self.reset_guest_data()?;

        info!(
            expenses = report.expenses_uploaded,
            goals = report.goals_uploaded,
            achievements = report.achievements_merged,
            profile_pushed = report.profile_pushed,
            "reconciled guest data into account"
        );

        Ok(report)
    }

    fn archive_guest_data(
        &self,
        expenses: Vec<Expense>,
        goals: Vec<SavingsGoal>,
        profile: ProfileSettings,
        achievements: Vec<UserAchievement>,
    ) -> SpendwiseResult<()> {
        let archive = GuestArchive {
            archived_at: Utc::now(),
            expenses,
            goals,
            profile,
            achievements,
        };
        file_io::write_json_atomic(
            &self.local.storage().paths().guest_archive_file(),
            &archive,
        )
    }

    fn reset_guest_data(&self) -> SpendwiseResult<()> {
        let storage = self.local.storage();
        storage.expenses.clear()?;
        storage.goals.clear()?;
        storage.profile.clear()?;
        storage.achievements.clear()?;
        storage.save_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SpendwisePaths;
    use crate::models::{AchievementKey, Category, Money};
    use crate::storage::Storage;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store_at(dir: &std::path::Path) -> LocalStore {
        let paths = SpendwisePaths::with_base_dir(dir.to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        LocalStore::new(storage)
    }

    fn expense(cents: i64, description: &str) -> Expense {
        Expense::new(
            Category::Groceries,
            NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            description,
            Money::from_cents(cents),
        )
    }

    #[test]
    fn test_uploads_only_missing_rows() {
        let guest_dir = TempDir::new().unwrap();
        let account_dir = TempDir::new().unwrap();
        let guest = store_at(guest_dir.path());
        let account = store_at(account_dir.path());

        let shared = expense(1000, "shared");
        guest.insert_expense(&shared).unwrap();
        account.insert_expense(&shared).unwrap();
        guest.insert_expense(&expense(2000, "guest only")).unwrap();

        let report = ReconcileService::new(&guest, &account).reconcile().unwrap();
        assert_eq!(report.expenses_uploaded, 1);
        assert_eq!(account.list_expenses().unwrap().len(), 2);
    }

    #[test]
    fn test_guest_threshold_pushed_when_account_has_none() {
        let guest_dir = TempDir::new().unwrap();
        let account_dir = TempDir::new().unwrap();
        let guest = store_at(guest_dir.path());
        let account = store_at(account_dir.path());

        let mut profile = guest.profile().unwrap();
        profile.budget_threshold = Some(Money::from_cents(75_000));
        guest.update_profile(&profile).unwrap();

        let report = ReconcileService::new(&guest, &account).reconcile().unwrap();
        assert!(report.profile_pushed);
        assert_eq!(
            account.profile().unwrap().budget_threshold,
            Some(Money::from_cents(75_000))
        );
    }

    #[test]
    fn test_account_threshold_wins() {
        let guest_dir = TempDir::new().unwrap();
        let account_dir = TempDir::new().unwrap();
        let guest = store_at(guest_dir.path());
        let account = store_at(account_dir.path());

        let mut guest_profile = guest.profile().unwrap();
        guest_profile.budget_threshold = Some(Money::from_cents(10_000));
        guest.update_profile(&guest_profile).unwrap();

        let mut account_profile = account.profile().unwrap();
        account_profile.budget_threshold = Some(Money::from_cents(99_000));
        account.update_profile(&account_profile).unwrap();

        let report = ReconcileService::new(&guest, &account).reconcile().unwrap();
        assert!(!report.profile_pushed);
        assert_eq!(
            account.profile().unwrap().budget_threshold,
            Some(Money::from_cents(99_000))
        );
    }

    #[test]
    fn test_achievements_merge_skips_duplicates() {
        let guest_dir = TempDir::new().unwrap();
        let account_dir = TempDir::new().unwrap();
        let guest = store_at(guest_dir.path());
        let account = store_at(account_dir.path());

        let guest_badge = UserAchievement::new("guest", AchievementKey::FirstExpense);
        guest.unlock_achievement(&guest_badge).unwrap();
        let also_guest = UserAchievement::new("guest", AchievementKey::Streak7);
        guest.unlock_achievement(&also_guest).unwrap();

        let already = UserAchievement::new("guest", AchievementKey::FirstExpense);
        account.unlock_achievement(&already).unwrap();

        let report = ReconcileService::new(&guest, &account).reconcile().unwrap();
        assert_eq!(report.achievements_merged, 1);
        assert_eq!(account.achievements().unwrap().len(), 2);
    }

    #[test]
    fn test_guest_data_archived_and_reset() {
        let guest_dir = TempDir::new().unwrap();
        let account_dir = TempDir::new().unwrap();
        let guest = store_at(guest_dir.path());
        let account = store_at(account_dir.path());

        guest.insert_expense(&expense(5000, "pre-login")).unwrap();

        ReconcileService::new(&guest, &account).reconcile().unwrap();

        assert!(guest.list_expenses().unwrap().is_empty());
        let archive_path = guest.storage().paths().guest_archive_file();
        assert!(archive_path.exists());
        let raw = std::fs::read_to_string(&archive_path).unwrap();
        let archive: GuestArchive = serde_json::from_str(&raw).unwrap();
        assert_eq!(archive.expenses.len(), 1);
        assert_eq!(archive.expenses[0].description, "pre-login");
    }
}
