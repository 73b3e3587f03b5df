//! Achievement catalog and unlock records
//!
//! The badge catalog is fixed at compile time; unlock rows are stored per
//! user in whichever store is active.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Keys identifying each badge in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementKey {
    FirstExpense,
    TenExpenses,
    Streak7,
    BudgetKeeper,
    GoalReached,
}

impl AchievementKey {
    /// Stable string form used in storage and the remote table
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementKey::FirstExpense => "first-expense",
            AchievementKey::TenExpenses => "ten-expenses",
            AchievementKey::Streak7 => "streak-7",
            AchievementKey::BudgetKeeper => "budget-keeper",
            AchievementKey::GoalReached => "goal-reached",
        }
    }
}

impl fmt::Display for AchievementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AchievementKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-expense" => Ok(AchievementKey::FirstExpense),
            "ten-expenses" => Ok(AchievementKey::TenExpenses),
            "streak-7" => Ok(AchievementKey::Streak7),
            "budget-keeper" => Ok(AchievementKey::BudgetKeeper),
            "goal-reached" => Ok(AchievementKey::GoalReached),
            _ => Err(format!("Unknown achievement key: '{}'", s)),
        }
    }
}

/// A badge definition in the catalog
#[derive(Debug, Clone, Copy)]
pub struct Achievement {
    pub key: AchievementKey,
    pub name: &'static str,
    pub description: &'static str,
}

/// The full badge catalog
pub const CATALOG: [Achievement; 5] = [
    Achievement {
        key: AchievementKey::FirstExpense,
        name: "Getting Started",
        description: "Record your first expense",
    },
    Achievement {
        key: AchievementKey::TenExpenses,
        name: "Habit Forming",
        description: "Record ten expenses",
    },
    Achievement {
        key: AchievementKey::Streak7,
        name: "Week Warrior",
        description: "Log in seven days in a row",
    },
    Achievement {
        key: AchievementKey::BudgetKeeper,
        name: "Budget Keeper",
        description: "Finish a month at or under your budget threshold",
    },
    Achievement {
        key: AchievementKey::GoalReached,
        name: "Goal Getter",
        description: "Fully fund a savings goal",
    },
];

/// Look up a catalog entry by key
pub fn catalog_entry(key: AchievementKey) -> &'static Achievement {
    CATALOG
        .iter()
        .find(|a| a.key == key)
        .unwrap_or(&CATALOG[0]) // catalog covers every key variant
}

/// An unlocked badge for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAchievement {
    /// Owning user id (or the guest sentinel)
    pub user_id: String,

    /// Which badge was unlocked
    pub key: AchievementKey,

    /// When the badge was unlocked
    pub unlocked_at: DateTime<Utc>,
}

impl UserAchievement {
    pub fn new(user_id: impl Into<String>, key: AchievementKey) -> Self {
        Self {
            user_id: user_id.into(),
            key,
            unlocked_at: Utc::now(),
        }
    }
}
