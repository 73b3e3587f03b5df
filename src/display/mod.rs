//! Display formatting for terminal output
//!
//! Formats data models for terminal display as tables and detail views.

pub mod achievement;
pub mod expense;
pub mod goal;
pub mod summary;

pub use achievement::{format_achievement_list, format_unlock_banner};
pub use expense::{format_expense_details, format_expense_list};
pub use goal::format_goal_list;
pub use summary::format_month_summary;
