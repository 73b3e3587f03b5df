//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the clap
//! argument parsing with the service layer.

pub mod achievements;
pub mod ai;
pub mod auth;
pub mod budget;
pub mod config;
pub mod expense;
pub mod export;
pub mod goal;
pub mod import;
pub mod summary;

pub use achievements::handle_achievements_command;
pub use ai::{handle_categorize_command, handle_tip_command};
pub use auth::{handle_auth_command, AuthCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use import::handle_import_command;
pub use summary::handle_summary_command;

use crate::config::paths::SpendwisePaths;
use crate::config::settings::Settings;
use crate::events::EventLogger;
use crate::store::Store;

/// Everything a command handler needs: the active store (guest or account),
/// the event log, settings, and filesystem paths.
pub struct AppContext {
    pub store: Box<dyn Store>,
    pub events: EventLogger,
    pub settings: Settings,
    pub paths: SpendwisePaths,
}

impl AppContext {
    /// Currency code from the active profile
    pub fn currency(&self) -> crate::error::SpendwiseResult<String> {
        Ok(self.store.profile()?.currency)
    }
}
