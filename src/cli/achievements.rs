//! Achievements CLI command

use crate::display::format_achievement_list;
use crate::error::SpendwiseResult;
use crate::services::AchievementService;

use super::AppContext;

/// Handle `spendwise achievements`
pub fn handle_achievements_command(ctx: &AppContext) -> SpendwiseResult<()> {
    let service = AchievementService::new(ctx.store.as_ref(), &ctx.events);
    let unlocked = service.unlocked()?;
    println!("{}", format_achievement_list(&unlocked));

    let streak = ctx.store.profile()?.current_streak;
    if streak > 1 {
        println!("\nCurrent login streak: {} days", streak);
    }
    Ok(())
}
