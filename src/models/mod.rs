//! Core data models for spendwise
//!
//! Plain data types shared by the local and remote stores: expenses,
//! categories, savings goals, profile settings, and the achievement catalog.

pub mod achievement;
pub mod category;
pub mod expense;
pub mod goal;
pub mod ids;
pub mod money;
pub mod profile;

pub use achievement::{catalog_entry, Achievement, AchievementKey, UserAchievement, CATALOG};
pub use category::Category;
pub use expense::{Expense, ExpenseValidationError};
pub use goal::{GoalValidationError, SavingsGoal};
pub use ids::{ExpenseId, GoalId};
pub use money::{Money, MoneyParseError};
pub use profile::{ProfileSettings, GUEST_USER_ID};
