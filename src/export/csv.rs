//! CSV export functionality
//!
//! Exports expenses and savings goals to CSV for use in spreadsheets or for
//! re-import elsewhere. Quoting and escaping are delegated to the `csv`
//! writer, so descriptions with commas or quotes round-trip cleanly.

use std::io::Write;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::store::Store;

fn export_error(err: impl ToString) -> SpendwiseError {
    SpendwiseError::Export(err.to_string())
}

/// Export all expenses to CSV, newest first
pub fn export_expenses_csv<W: Write + ?Sized>(
    store: &dyn Store,
    writer: &mut W,
) -> SpendwiseResult<()> {
    let mut out = csv::Writer::from_writer(&mut *writer);
    out.write_record(["ID", "Date", "Category", "Description", "Amount"])
        .map_err(export_error)?;

    for expense in store.list_expenses()? {
        out.write_record([
            expense.id.as_uuid().to_string(),
            expense.date.to_string(),
            expense.category.name().to_string(),
            expense.description.clone(),
            expense.amount.to_string(),
        ])
        .map_err(export_error)?;
    }

    out.flush().map_err(export_error)?;
    Ok(())
}

/// Export all savings goals to CSV
pub fn export_goals_csv<W: Write + ?Sized>(
    store: &dyn Store,
    writer: &mut W,
) -> SpendwiseResult<()> {
    let mut out = csv::Writer::from_writer(&mut *writer);
    out.write_record([
        "ID",
        "Name",
        "Target Amount",
        "Current Amount",
        "Progress",
        "Target Date",
    ])
    .map_err(export_error)?;

    for goal in store.list_goals()? {
        out.write_record([
            goal.id.as_uuid().to_string(),
            goal.name.clone(),
            goal.target_amount.to_string(),
            goal.current_amount.to_string(),
            format!("{}%", goal.progress_percent()),
            goal.target_date.map(|d| d.to_string()).unwrap_or_default(),
        ])
        .map_err(export_error)?;
    }

    out.flush().map_err(export_error)?;
    Ok(())
}
