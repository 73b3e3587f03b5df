//! Savings goal CLI commands

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::display::{format_unlock_banner, goal::format_goal_list};
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::Money;
use crate::services::{AchievementService, GoalService};

use super::AppContext;

/// Savings goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Create a new savings goal
    Add {
        /// Goal name
        name: String,
        /// Target amount (e.g., "500.00")
        target: String,
        /// Optional target date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List savings goals with progress
    List,

    /// Add funds to a goal
    Contribute {
        /// Goal name or id
        goal: String,
        /// Amount to add
        amount: String,
    },

    /// Take funds out of a goal
    Withdraw {
        /// Goal name or id
        goal: String,
        /// Amount to remove
        amount: String,
    },

    /// Delete a goal
    Delete {
        /// Goal name or id
        goal: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(ctx: &AppContext, cmd: GoalCommands) -> SpendwiseResult<()> {
    let service = GoalService::new(ctx.store.as_ref(), &ctx.events);
    let currency = ctx.currency()?;

    match cmd {
        GoalCommands::Add { name, target, date } => {
            let target = parse_amount(&target)?;
            let target_date = match date {
                Some(d) => Some(parse_date(&d)?),
                None => None,
            };
            let goal = service.create(name, target, target_date)?;
            println!(
                "Created goal '{}' with target {} [{}]",
                goal.name,
                goal.target_amount.format_with_code(&currency),
                goal.id
            );
        }

        GoalCommands::List => {
            let goals = service.list()?;
            println!(
                "{}",
                format_goal_list(&goals, &currency, Local::now().date_naive())
            );
        }

        GoalCommands::Contribute { goal, amount } => {
            let goal = service.resolve(&goal)?;
            let outcome = service.contribute(goal.id, parse_amount(&amount)?)?;

            println!(
                "Added {} to '{}' ({} of {})",
                outcome.applied.format_with_code(&currency),
                outcome.goal.name,
                outcome.goal.current_amount.format_with_code(&currency),
                outcome.goal.target_amount.format_with_code(&currency)
            );
            if outcome.applied < parse_amount(&amount)? {
                println!("Contribution was capped at the goal target.");
            }

            if outcome.newly_reached {
                println!("Goal '{}' is fully funded!", outcome.goal.name);
                let achievements = AchievementService::new(ctx.store.as_ref(), &ctx.events);
                for badge in achievements.on_goal_reached()? {
                    println!("{}", format_unlock_banner(badge));
                }
            }
        }

        GoalCommands::Withdraw { goal, amount } => {
            let goal = service.resolve(&goal)?;
            let (updated, removed) = service.withdraw(goal.id, parse_amount(&amount)?)?;
            println!(
                "Withdrew {} from '{}' ({} remaining)",
                removed.format_with_code(&currency),
                updated.name,
                updated.current_amount.format_with_code(&currency)
            );
        }

        GoalCommands::Delete { goal } => {
            let goal = service.resolve(&goal)?;
            service.delete(goal.id)?;
            println!("Deleted goal '{}'", goal.name);
        }
    }

    Ok(())
}

fn parse_amount(s: &str) -> SpendwiseResult<Money> {
    Money::parse(s).map_err(|e| SpendwiseError::Validation(format!("Invalid amount: {}", e)))
}

fn parse_date(s: &str) -> SpendwiseResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| SpendwiseError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s)))
}
