//! Monthly summary CLI command

use chrono::{Datelike, Local};

use crate::display::{format_month_summary, format_unlock_banner};
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::services::{AchievementService, SummaryService};

use super::AppContext;

/// Handle `spendwise summary [--month YYYY-MM]`
pub fn handle_summary_command(ctx: &AppContext, month: Option<&str>) -> SpendwiseResult<()> {
    let today = Local::now().date_naive();
    let (year, month) = match month {
        Some(s) => parse_month(s)?,
        None => (today.year(), today.month()),
    };

    let summary = SummaryService::new(ctx.store.as_ref()).month_summary(year, month)?;
    print!("{}", format_month_summary(&summary));

    // Viewing a completed month can reveal one that stayed under budget
    let achievements = AchievementService::new(ctx.store.as_ref(), &ctx.events);
    for badge in achievements.check_budget_keeper_month(year, month, today)? {
        println!("{}", format_unlock_banner(badge));
    }
    Ok(())
}

fn parse_month(s: &str) -> SpendwiseResult<(i32, u32)> {
    let invalid =
        || SpendwiseError::Validation(format!("Invalid month '{}', expected YYYY-MM", s));

    let (year, month) = s.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-03").unwrap(), (2025, 3));
        assert_eq!(parse_month("2024-12").unwrap(), (2024, 12));
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("March 2025").is_err());
    }
}
