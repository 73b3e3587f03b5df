//! Savings goal display formatting

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::SavingsGoal;

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Target Date")]
    target_date: String,
}

/// Format a list of goals as a table
pub fn format_goal_list(goals: &[SavingsGoal], currency: &str, today: NaiveDate) -> String {
    if goals.is_empty() {
        return "No savings goals yet.".to_string();
    }

    let rows: Vec<GoalRow> = goals
        .iter()
        .map(|g| GoalRow {
            id: g.id.to_string(),
            name: g.name.clone(),
            saved: g.current_amount.format_with_code(currency),
            target: g.target_amount.format_with_code(currency),
            progress: format!("{} {}%", progress_bar(g.progress_percent()), g.progress_percent()),
            target_date: match g.target_date {
                Some(date) if g.is_overdue(today) => format!("{} (overdue)", date),
                Some(date) => date.to_string(),
                None => String::new(),
            },
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render a ten-segment progress bar
fn progress_bar(percent: u8) -> String {
    let filled = (percent as usize).min(100) / 10;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(10 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0), "[----------]");
        assert_eq!(progress_bar(55), "[#####-----]");
        assert_eq!(progress_bar(100), "[##########]");
    }

    #[test]
    fn test_overdue_marker() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let goal = SavingsGoal::new("Bike", Money::from_cents(50_000))
            .with_target_date(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());

        let table = format_goal_list(&[goal], "USD", today);
        assert!(table.contains("(overdue)"));
    }

    #[test]
    fn test_empty_list_message() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(format_goal_list(&[], "USD", today), "No savings goals yet.");
    }
}
