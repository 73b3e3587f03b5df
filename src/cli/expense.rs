//! Expense CLI commands

use chrono::{Datelike, Local, NaiveDate};
use clap::Subcommand;

use crate::display::{format_expense_details, format_expense_list, format_unlock_banner};
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Category, Money};
use crate::services::{
    AchievementService, CreateExpenseInput, ExpenseService, SummaryService, UpdateExpenseInput,
};

use super::AppContext;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        description: String,
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category name (defaults to "other")
        #[arg(short, long)]
        category: Option<String>,
        /// Date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expenses
    List {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Edit an existing expense
    Edit {
        /// Expense id (full UUID or short form shown in listings)
        id: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense id
        id: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(ctx: &AppContext, cmd: ExpenseCommands) -> SpendwiseResult<()> {
    let service = ExpenseService::new(ctx.store.as_ref(), &ctx.events);
    let currency = ctx.currency()?;

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let category = parse_category(category.as_deref())?;
            let date = parse_date_or_today(date.as_deref())?;

            let expense = service.create(CreateExpenseInput {
                category,
                date,
                description,
                amount,
            })?;

            println!(
                "Recorded {} ({}) on {} [{}]",
                expense.amount.format_with_code(&currency),
                expense.category.name(),
                expense.date,
                expense.id
            );

            let achievements = AchievementService::new(ctx.store.as_ref(), &ctx.events);
            for badge in achievements.on_expense_recorded()? {
                println!("{}", format_unlock_banner(badge));
            }

            // Warn right away if this pushed the month over its threshold
            let summary = SummaryService::new(ctx.store.as_ref())
                .month_summary(expense.date.year(), expense.date.month())?;
            if summary.over_threshold() {
                if let Some(remaining) = summary.remaining() {
                    println!(
                        "Warning: over budget for {:04}-{:02} by {}",
                        summary.year,
                        summary.month,
                        (-remaining).format_with_code(&currency)
                    );
                }
            }
        }

        ExpenseCommands::List { category } => {
            let filter = match category {
                Some(name) => Some(parse_category(Some(&name))?),
                None => None,
            };
            let expenses = service.list(filter)?;
            println!("{}", format_expense_list(&expenses, &currency));
        }

        ExpenseCommands::Edit {
            id,
            description,
            amount,
            category,
            date,
        } => {
            let expense = service.resolve(&id)?;
            let updated = service.update(
                expense.id,
                UpdateExpenseInput {
                    category: match category {
                        Some(name) => Some(parse_category(Some(&name))?),
                        None => None,
                    },
                    date: match date {
                        Some(d) => Some(parse_date(&d)?),
                        None => None,
                    },
                    description,
                    amount: match amount {
                        Some(a) => Some(parse_amount(&a)?),
                        None => None,
                    },
                },
            )?;
            println!("Updated expense:\n{}", format_expense_details(&updated, &currency));
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.resolve(&id)?;
            service.delete(expense.id)?;
            println!("Deleted expense '{}' ({})", expense.description, expense.id);
        }
    }

    Ok(())
}

fn parse_amount(s: &str) -> SpendwiseResult<Money> {
    Money::parse(s).map_err(|e| SpendwiseError::Validation(format!("Invalid amount: {}", e)))
}

fn parse_category(s: Option<&str>) -> SpendwiseResult<Category> {
    match s {
        None => Ok(Category::Other),
        Some(name) => Category::parse_lenient(name).ok_or_else(|| {
            SpendwiseError::Validation(format!(
                "Unknown category '{}'. Valid categories: {}",
                name,
                Category::ALL
                    .iter()
                    .map(|c| c.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        }),
    }
}

fn parse_date(s: &str) -> SpendwiseResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| SpendwiseError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s)))
}

fn parse_date_or_today(s: Option<&str>) -> SpendwiseResult<NaiveDate> {
    match s {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_default_and_alias() {
        assert_eq!(parse_category(None).unwrap(), Category::Other);
        assert_eq!(parse_category(Some("food")).unwrap(), Category::Groceries);
        assert!(parse_category(Some("xyzzy")).is_err());
    }

    #[test]
    fn test_parse_date_format() {
        assert_eq!(
            parse_date("2025-03-09").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
        );
        assert!(parse_date("03/09/2025").is_err());
    }
}
