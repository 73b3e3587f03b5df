//! AI-assisted CLI commands

use chrono::{Datelike, Local};

use crate::ai::{financial_tip, suggest_category, ChatClient, TipContext};
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::services::SummaryService;

use super::AppContext;

/// Handle `spendwise categorize <description>`
pub fn handle_categorize_command(ctx: &AppContext, description: &str) -> SpendwiseResult<()> {
    let client = chat_client(ctx)?;
    let category = suggest_category(&client, description)?;
    println!("{}", category.name());
    Ok(())
}

/// Handle `spendwise tip`
pub fn handle_tip_command(ctx: &AppContext) -> SpendwiseResult<()> {
    let client = chat_client(ctx)?;

    let today = Local::now().date_naive();
    let summary =
        SummaryService::new(ctx.store.as_ref()).month_summary(today.year(), today.month())?;

    let tip = financial_tip(
        &client,
        &TipContext {
            monthly_total: summary.total,
            budget_threshold: summary.threshold,
            currency: summary.currency.clone(),
            by_category: summary.by_category.clone(),
        },
    )?;

    println!("Tip: {}", tip.tip);
    println!("Why: {}", tip.reasoning);
    Ok(())
}

fn chat_client(ctx: &AppContext) -> SpendwiseResult<ChatClient> {
    let url = ctx.settings.ai_url().ok_or_else(|| {
        SpendwiseError::Config(
            "No AI endpoint configured. Set SPENDWISE_AI_URL or run 'spendwise config set-ai'."
                .into(),
        )
    })?;
    let api_key = ctx.settings.ai_api_key().ok_or_else(|| {
        SpendwiseError::Config("Set SPENDWISE_AI_API_KEY to use AI commands.".into())
    })?;
    Ok(ChatClient::new(url, api_key, ctx.settings.ai_model.clone()))
}
