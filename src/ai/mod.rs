//! AI-assisted categorization and budgeting advice

pub mod advisor;
pub mod generator;

pub use advisor::{financial_tip, suggest_category, FinancialTip, TipContext};
pub use generator::{ChatClient, TextGenerator};
