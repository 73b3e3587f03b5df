//! Service layer for Spendwise
//!
//! The service layer provides business logic on top of the store seam,
//! handling validation, achievement rules, and cross-entity operations.

pub mod achievements;
pub mod expense;
pub mod goal;
pub mod import;
pub mod reconcile;
pub mod summary;

pub use achievements::AchievementService;
pub use expense::{CreateExpenseInput, ExpenseService, UpdateExpenseInput};
pub use goal::{ContributionOutcome, GoalService};
pub use import::{ColumnMapping, ImportPreviewEntry, ImportResult, ImportService, ImportStatus};
pub use reconcile::{ReconcileReport, ReconcileService};
pub use summary::{MonthSummary, SummaryService};
