//! Achievement display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Achievement, UserAchievement, CATALOG};

#[derive(Tabled)]
struct AchievementRow {
    #[tabled(rename = "Badge")]
    badge: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format the full catalog with unlock status per badge
pub fn format_achievement_list(unlocked: &[UserAchievement]) -> String {
    let rows: Vec<AchievementRow> = CATALOG
        .iter()
        .map(|achievement| AchievementRow {
            badge: achievement.name,
            description: achievement.description,
            status: match unlocked.iter().find(|u| u.key == achievement.key) {
                Some(u) => format!("Unlocked {}", u.unlocked_at.format("%Y-%m-%d")),
                None => "Locked".to_string(),
            },
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// One-line banner printed when a badge is first unlocked
pub fn format_unlock_banner(achievement: &Achievement) -> String {
    format!(
        "Achievement unlocked: {} ({})",
        achievement.name, achievement.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AchievementKey;

    #[test]
    fn test_list_shows_locked_and_unlocked() {
        let unlocked = vec![UserAchievement::new(
            "guest",
            AchievementKey::FirstExpense,
        )];
        let table = format_achievement_list(&unlocked);
        assert!(table.contains("Getting Started"));
        assert!(table.contains("Unlocked"));
        assert!(table.contains("Locked"));
        // All five catalog entries are listed
        assert!(table.contains("Week Warrior"));
        assert!(table.contains("Goal Getter"));
    }

    #[test]
    fn test_unlock_banner() {
        let banner = format_unlock_banner(&CATALOG[0]);
        assert!(banner.starts_with("Achievement unlocked: Getting Started"));
    }
}
