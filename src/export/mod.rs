//! Data export

pub mod csv;

pub use csv::{export_expenses_csv, export_goals_csv};
