//! Monthly summary display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::services::MonthSummary;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Format a monthly summary with per-category breakdown and budget status
pub fn format_month_summary(summary: &MonthSummary) -> String {
    let mut output = format!(
        "Summary for {:04}-{:02}\n\n",
        summary.year, summary.month
    );

    if summary.expense_count == 0 {
        output.push_str("No expenses this month.\n");
    } else {
        let rows: Vec<CategoryRow> = summary
            .by_category
            .iter()
            .map(|(category, amount)| CategoryRow {
                category: category.name(),
                total: amount.format_with_code(&summary.currency),
                share: if summary.total.is_zero() {
                    "0%".to_string()
                } else {
                    format!("{}%", amount.cents() * 100 / summary.total.cents())
                },
            })
            .collect();
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push('\n');
        output.push_str(&format!(
            "\nTotal: {} across {} expenses\n",
            summary.total.format_with_code(&summary.currency),
            summary.expense_count
        ));
    }

    match (summary.threshold, summary.remaining()) {
        (Some(threshold), Some(remaining)) if summary.over_threshold() => {
            output.push_str(&format!(
                "\nWARNING: over budget by {} (threshold {})\n",
                (-remaining).format_with_code(&summary.currency),
                threshold.format_with_code(&summary.currency)
            ));
        }
        (Some(threshold), Some(remaining)) => {
            output.push_str(&format!(
                "\nBudget: {} remaining of {}\n",
                remaining.format_with_code(&summary.currency),
                threshold.format_with_code(&summary.currency)
            ));
        }
        _ => {}
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};

    fn summary(total_cents: i64, threshold: Option<i64>) -> MonthSummary {
        MonthSummary {
            year: 2025,
            month: 4,
            total: Money::from_cents(total_cents),
            expense_count: if total_cents == 0 { 0 } else { 2 },
            by_category: if total_cents == 0 {
                vec![]
            } else {
                vec![(Category::Groceries, Money::from_cents(total_cents))]
            },
            threshold: threshold.map(Money::from_cents),
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn test_over_budget_warning() {
        let text = format_month_summary(&summary(120_000, Some(100_000)));
        assert!(text.contains("WARNING: over budget by 200.00 USD"));
    }

    #[test]
    fn test_under_budget_remaining() {
        let text = format_month_summary(&summary(80_000, Some(100_000)));
        assert!(text.contains("Budget: 200.00 USD remaining"));
    }

    #[test]
    fn test_empty_month() {
        let text = format_month_summary(&summary(0, None));
        assert!(text.contains("No expenses this month."));
        assert!(!text.contains("Budget:"));
    }
}
