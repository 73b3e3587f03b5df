//! Budget threshold CLI commands

use chrono::{Datelike, Local};
use clap::Subcommand;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::Money;
use crate::services::SummaryService;

use super::AppContext;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly budget threshold
    Set {
        /// Threshold amount (e.g., "1500")
        amount: String,
    },

    /// Remove the budget threshold
    Clear,

    /// Show this month's spending against the threshold
    Status,
}

/// Handle a budget command
pub fn handle_budget_command(ctx: &AppContext, cmd: BudgetCommands) -> SpendwiseResult<()> {
    match cmd {
        BudgetCommands::Set { amount } => {
            let amount = Money::parse(&amount)
                .map_err(|e| SpendwiseError::Validation(format!("Invalid amount: {}", e)))?;

            let mut profile = ctx.store.profile()?;
            profile.budget_threshold = Some(amount);
            profile
                .validate()
                .map_err(|e| SpendwiseError::Validation(e.to_string()))?;
            ctx.store.update_profile(&profile)?;

            println!(
                "Monthly budget set to {}",
                amount.format_with_code(&profile.currency)
            );
        }

        BudgetCommands::Clear => {
            let mut profile = ctx.store.profile()?;
            if profile.budget_threshold.take().is_none() {
                println!("No budget threshold was set.");
            } else {
                ctx.store.update_profile(&profile)?;
                println!("Budget threshold cleared.");
            }
        }

        BudgetCommands::Status => {
            let today = Local::now().date_naive();
            let summary =
                SummaryService::new(ctx.store.as_ref()).month_summary(today.year(), today.month())?;

            match summary.threshold {
                None => println!(
                    "No budget threshold set. Use 'spendwise budget set <amount>' to add one."
                ),
                Some(threshold) => {
                    println!(
                        "Spent {} of {} this month.",
                        summary.total.format_with_code(&summary.currency),
                        threshold.format_with_code(&summary.currency)
                    );
                    if let Some(remaining) = summary.remaining() {
                        if summary.over_threshold() {
                            println!(
                                "Over budget by {}.",
                                (-remaining).format_with_code(&summary.currency)
                            );
                        } else {
                            println!(
                                "{} remaining.",
                                remaining.format_with_code(&summary.currency)
                            );
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
