//! Expense display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Expense;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a list of expenses as a table
pub fn format_expense_list(expenses: &[Expense], currency: &str) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.".to_string();
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|e| ExpenseRow {
            id: e.id.to_string(),
            date: e.date.to_string(),
            category: e.category.name(),
            description: e.description.clone(),
            amount: e.amount.format_with_code(currency),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format a single expense in detail view
pub fn format_expense_details(expense: &Expense, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("ID:          {}\n", expense.id.as_uuid()));
    output.push_str(&format!("Date:        {}\n", expense.date));
    output.push_str(&format!("Category:    {}\n", expense.category.name()));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_code(currency)
    ));
    if expense.import_id.is_some() {
        output.push_str("Source:      CSV import\n");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use chrono::NaiveDate;

    fn expense() -> Expense {
        Expense::new(
            Category::Transport,
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            "Bus pass",
            Money::from_cents(4500),
        )
    }

    #[test]
    fn test_empty_list_message() {
        assert_eq!(format_expense_list(&[], "USD"), "No expenses recorded.");
    }

    #[test]
    fn test_list_contains_fields() {
        let table = format_expense_list(&[expense()], "USD");
        assert!(table.contains("Transport"));
        assert!(table.contains("Bus pass"));
        assert!(table.contains("45.00 USD"));
    }

    #[test]
    fn test_details_mark_imported() {
        let mut e = expense();
        assert!(!format_expense_details(&e, "USD").contains("CSV import"));
        e.import_id = Some("imp-0000000000000001".into());
        assert!(format_expense_details(&e, "USD").contains("CSV import"));
    }
}
