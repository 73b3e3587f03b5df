//! AI-backed advice flows
//!
//! Two flows sit on top of [`TextGenerator`]: mapping a free-text expense
//! description to one of the fixed categories, and producing a budgeting tip
//! with its reasoning from a spending snapshot. Model output is never trusted
//! blindly: the category reply must parse to a known category and the tip
//! reply must be valid JSON, otherwise the call fails rather than guessing.

use serde::Deserialize;

use crate::ai::TextGenerator;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Category, Money};

/// Spending snapshot handed to the tip flow
#[derive(Debug, Clone)]
pub struct TipContext {
    pub monthly_total: Money,
    pub budget_threshold: Option<Money>,
    pub currency: String,
    /// Per-category totals for the month, descending
    pub by_category: Vec<(Category, Money)>,
}

/// A budgeting tip and the reasoning behind it
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FinancialTip {
    pub tip: String,
    pub reasoning: String,
}

/// Ask the model to pick a category for a free-text description.
///
/// The reply is parsed leniently (quotes, punctuation, and common aliases are
/// tolerated) but an unrecognizable reply is an error, never a silent guess.
pub fn suggest_category(
    generator: &dyn TextGenerator,
    description: &str,
) -> SpendwiseResult<Category> {
    let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
    let prompt = format!(
        "Classify the following expense description into exactly one of these \
         categories: {}.\n\nDescription: {}\n\n\
         Reply with only the category name, nothing else.",
        names.join(", "),
        description
    );

    let reply = generator.generate(&prompt)?;
    Category::parse_lenient(&reply).ok_or_else(|| {
        SpendwiseError::Ai(format!(
            "Model reply '{}' is not a recognizable category",
            reply.trim()
        ))
    })
}

/// Ask the model for a budgeting tip grounded in this month's numbers.
pub fn financial_tip(
    generator: &dyn TextGenerator,
    context: &TipContext,
) -> SpendwiseResult<FinancialTip> {
    let breakdown = context
        .by_category
        .iter()
        .map(|(cat, amount)| format!("{}: {}", cat.name(), amount.format_with_code(&context.currency)))
        .collect::<Vec<_>>()
        .join(", ");
    let threshold = match context.budget_threshold {
        Some(t) => t.format_with_code(&context.currency),
        None => "not set".to_string(),
    };

    let prompt = format!(
        "You are a personal finance assistant. This month's spending is {} \
         with a budget of {}. Breakdown by category: {}.\n\n\
         Give one concrete, actionable budgeting tip. Respond with a JSON \
         object with exactly two string fields, \"tip\" and \"reasoning\", \
         and no other text.",
        context.monthly_total.format_with_code(&context.currency),
        threshold,
        if breakdown.is_empty() { "none".to_string() } else { breakdown }
    );

    let reply = generator.generate(&prompt)?;
    let body = strip_code_fences(&reply);
    serde_json::from_str(body).map_err(|e| {
        SpendwiseError::Ai(format!("Model did not return valid tip JSON: {}", e))
    })
}

/// Strip a Markdown code fence the model may have wrapped around its JSON
fn strip_code_fences(s: &str) -> &str {
    let trimmed = s.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the fence line
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start_matches(['\r', '\n']);
    rest.strip_suffix("```").map(str::trim).unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedGenerator {
        reply: String,
    }

    impl TextGenerator for CannedGenerator {
        fn generate(&self, _prompt: &str) -> SpendwiseResult<String> {
            Ok(self.reply.clone())
        }
    }

    fn canned(reply: &str) -> CannedGenerator {
        CannedGenerator {
            reply: reply.to_string(),
        }
    }

    fn context() -> TipContext {
        TipContext {
            monthly_total: Money::from_cents(123_450),
            budget_threshold: Some(Money::from_cents(150_000)),
            currency: "USD".to_string(),
            by_category: vec![(Category::Dining, Money::from_cents(60_000))],
        }
    }

    #[test]
    fn test_suggest_category_exact_reply() {
        let generator = canned("Groceries");
        assert_eq!(
            suggest_category(&generator, "weekly shop at the supermarket").unwrap(),
            Category::Groceries
        );
    }

    #[test]
    fn test_suggest_category_tolerates_decoration() {
        let generator = canned("  \"dining\".  ");
        assert_eq!(
            suggest_category(&generator, "pizza night").unwrap(),
            Category::Dining
        );
    }

    #[test]
    fn test_suggest_category_alias() {
        let generator = canned("food");
        assert_eq!(
            suggest_category(&generator, "corner store").unwrap(),
            Category::Groceries
        );
    }

    #[test]
    fn test_suggest_category_rejects_garbage() {
        let generator = canned("I think this could be many things!");
        let err = suggest_category(&generator, "???").unwrap_err();
        assert!(matches!(err, SpendwiseError::Ai(_)));
    }

    #[test]
    fn test_financial_tip_plain_json() {
        let generator = canned(r#"{"tip":"Cook at home twice a week","reasoning":"Dining is your top category"}"#);
        let tip = financial_tip(&generator, &context()).unwrap();
        assert_eq!(tip.tip, "Cook at home twice a week");
        assert_eq!(tip.reasoning, "Dining is your top category");
    }

    #[test]
    fn test_financial_tip_strips_code_fence() {
        let generator = canned(
            "```json\n{\"tip\":\"Set a dining cap\",\"reasoning\":\"Half your spend is dining\"}\n```",
        );
        let tip = financial_tip(&generator, &context()).unwrap();
        assert_eq!(tip.tip, "Set a dining cap");
    }

    #[test]
    fn test_financial_tip_rejects_non_json() {
        let generator = canned("Here is my advice: spend less money.");
        let err = financial_tip(&generator, &context()).unwrap_err();
        assert!(matches!(err, SpendwiseError::Ai(_)));
    }

    #[test]
    fn test_strip_code_fences_passthrough() {
        assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
    }
}
