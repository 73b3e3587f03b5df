//! Remote store REST client
//!
//! CRUD against the hosted relational backend's REST surface (PostgREST
//! conventions): table endpoints under `/rest/v1`, filters as query
//! parameters, `Prefer` headers controlling upsert and return behavior.
//! Rows are keyed by client-generated UUIDs so replays dedupe naturally.

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{
    AchievementKey, Category, Expense, ExpenseId, GoalId, Money, ProfileSettings, SavingsGoal,
    UserAchievement,
};

use super::session::Session;

/// Client for the hosted data tables
pub struct RemoteClient {
    http: Client,
    base_url: String,
    api_key: String,
    session: Session,
}

// ── Row DTOs ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct ExpenseRow {
    id: uuid::Uuid,
    user_id: String,
    category: String,
    expense_date: chrono::NaiveDate,
    description: String,
    amount_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    import_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GoalRow {
    id: uuid::Uuid,
    user_id: String,
    name: String,
    target_cents: i64,
    current_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_date: Option<chrono::NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProfileRow {
    id: String,
    #[serde(default)]
    budget_threshold_cents: Option<i64>,
    currency: String,
    #[serde(default)]
    last_login: Option<chrono::NaiveDate>,
    #[serde(default)]
    current_streak: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct AchievementRow {
    user_id: String,
    achievement_key: String,
    unlocked_at: DateTime<Utc>,
}

impl ExpenseRow {
    fn from_model(expense: &Expense, user_id: &str) -> Self {
        Self {
            id: *expense.id.as_uuid(),
            user_id: user_id.to_string(),
            category: expense.category.name().to_lowercase(),
            expense_date: expense.date,
            description: expense.description.clone(),
            amount_cents: expense.amount.cents(),
            import_id: expense.import_id.clone(),
            created_at: expense.created_at,
            updated_at: expense.updated_at,
        }
    }

    fn into_model(self) -> SpendwiseResult<Expense> {
        let category = Category::parse_strict(&self.category).ok_or_else(|| {
            SpendwiseError::Validation(format!("Unknown category in remote row: {}", self.category))
        })?;
        Ok(Expense {
            id: ExpenseId::from_uuid(self.id),
            category,
            date: self.expense_date,
            description: self.description,
            amount: Money::from_cents(self.amount_cents),
            import_id: self.import_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl GoalRow {
    fn from_model(goal: &SavingsGoal, user_id: &str) -> Self {
        Self {
            id: *goal.id.as_uuid(),
            user_id: user_id.to_string(),
            name: goal.name.clone(),
            target_cents: goal.target_amount.cents(),
            current_cents: goal.current_amount.cents(),
            target_date: goal.target_date,
            created_at: goal.created_at,
            updated_at: goal.updated_at,
        }
    }

    fn into_model(self) -> SavingsGoal {
        SavingsGoal {
            id: GoalId::from_uuid(self.id),
            name: self.name,
            target_amount: Money::from_cents(self.target_cents),
            current_amount: Money::from_cents(self.current_cents),
            target_date: self.target_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl ProfileRow {
    fn from_model(profile: &ProfileSettings, user_id: &str) -> Self {
        Self {
            id: user_id.to_string(),
            budget_threshold_cents: profile.budget_threshold.map(|m| m.cents()),
            currency: profile.currency.clone(),
            last_login: profile.last_login,
            current_streak: profile.current_streak,
        }
    }

    fn into_model(self) -> ProfileSettings {
        ProfileSettings {
            budget_threshold: self.budget_threshold_cents.map(Money::from_cents),
            currency: self.currency,
            last_login: self.last_login,
            current_streak: self.current_streak,
        }
    }
}

impl RemoteClient {
    /// Create a new remote client for an authenticated session
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        session: Session,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            session,
        }
    }

    /// The authenticated user's id
    pub fn user_id(&self) -> &str {
        &self.session.user_id
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.session.access_token)
    }

    fn user_filter(&self) -> (String, String) {
        ("user_id".to_string(), format!("eq.{}", self.session.user_id))
    }

    /// Map non-success responses to an API error with the server's message
    fn check_status(response: Response) -> SpendwiseResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .unwrap_or_else(|_| status.canonical_reason().unwrap_or("request failed").into());

        Err(SpendwiseError::Api {
            status: status.as_u16(),
            message,
        })
    }

    // ── Expenses ───────────────────────────────────────────────────────────

    /// Fetch all of the user's expenses
    pub fn list_expenses(&self) -> SpendwiseResult<Vec<Expense>> {
        let response = self
            .authed(self.http.get(self.table_url("expenses")))
            .query(&[self.user_filter(), ("select".into(), "*".into())])
            .send()?;
        let rows: Vec<ExpenseRow> = Self::check_status(response)?.json()?;
        debug!(count = rows.len(), "fetched remote expenses");
        rows.into_iter().map(ExpenseRow::into_model).collect()
    }

    /// Insert an expense row (replays with the same id are deduplicated)
    pub fn insert_expense(&self, expense: &Expense) -> SpendwiseResult<()> {
        let row = ExpenseRow::from_model(expense, &self.session.user_id);
        let response = self
            .authed(self.http.post(self.table_url("expenses")))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&row)
            .send()?;
        Self::check_status(response)?;
        Ok(())
    }

    /// Update an expense row in place
    pub fn update_expense(&self, expense: &Expense) -> SpendwiseResult<()> {
        let row = ExpenseRow::from_model(expense, &self.session.user_id);
        let response = self
            .authed(self.http.patch(self.table_url("expenses")))
            .query(&[
                ("id".to_string(), format!("eq.{}", expense.id.as_uuid())),
                self.user_filter(),
            ])
            .json(&row)
            .send()?;
        Self::check_status(response)?;
        Ok(())
    }

    /// Delete an expense row, returning whether it existed
    pub fn delete_expense(&self, id: ExpenseId) -> SpendwiseResult<bool> {
        let response = self
            .authed(self.http.delete(self.table_url("expenses")))
            .query(&[
                ("id".to_string(), format!("eq.{}", id.as_uuid())),
                self.user_filter(),
            ])
            .header("Prefer", "return=representation")
            .send()?;
        let rows: Vec<serde_json::Value> = Self::check_status(response)?.json()?;
        Ok(!rows.is_empty())
    }

    // ── Savings goals ──────────────────────────────────────────────────────

    /// Fetch all of the user's savings goals
    pub fn list_goals(&self) -> SpendwiseResult<Vec<SavingsGoal>> {
        let response = self
            .authed(self.http.get(self.table_url("savings_goals")))
            .query(&[self.user_filter(), ("select".into(), "*".into())])
            .send()?;
        let rows: Vec<GoalRow> = Self::check_status(response)?.json()?;
        Ok(rows.into_iter().map(GoalRow::into_model).collect())
    }

    /// Insert a goal row (replays with the same id are deduplicated)
    pub fn insert_goal(&self, goal: &SavingsGoal) -> SpendwiseResult<()> {
        let row = GoalRow::from_model(goal, &self.session.user_id);
        let response = self
            .authed(self.http.post(self.table_url("savings_goals")))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&row)
            .send()?;
        Self::check_status(response)?;
        Ok(())
    }

    /// Update a goal row in place
    pub fn update_goal(&self, goal: &SavingsGoal) -> SpendwiseResult<()> {
        let row = GoalRow::from_model(goal, &self.session.user_id);
        let response = self
            .authed(self.http.patch(self.table_url("savings_goals")))
            .query(&[
                ("id".to_string(), format!("eq.{}", goal.id.as_uuid())),
                self.user_filter(),
            ])
            .json(&row)
            .send()?;
        Self::check_status(response)?;
        Ok(())
    }

    /// Delete a goal row, returning whether it existed
    pub fn delete_goal(&self, id: GoalId) -> SpendwiseResult<bool> {
        let response = self
            .authed(self.http.delete(self.table_url("savings_goals")))
            .query(&[
                ("id".to_string(), format!("eq.{}", id.as_uuid())),
                self.user_filter(),
            ])
            .header("Prefer", "return=representation")
            .send()?;
        let rows: Vec<serde_json::Value> = Self::check_status(response)?.json()?;
        Ok(!rows.is_empty())
    }

    // ── Profile ────────────────────────────────────────────────────────────

    /// Fetch the user's profile settings; defaults when no row exists yet
    pub fn fetch_profile(&self) -> SpendwiseResult<ProfileSettings> {
        let response = self
            .authed(self.http.get(self.table_url("profiles")))
            .query(&[
                ("id".to_string(), format!("eq.{}", self.session.user_id)),
                ("select".into(), "*".into()),
            ])
            .send()?;
        let mut rows: Vec<ProfileRow> = Self::check_status(response)?.json()?;
        Ok(rows
            .pop()
            .map(ProfileRow::into_model)
            .unwrap_or_default())
    }

    /// Create or replace the user's profile row
    pub fn upsert_profile(&self, profile: &ProfileSettings) -> SpendwiseResult<()> {
        let row = ProfileRow::from_model(profile, &self.session.user_id);
        let response = self
            .authed(self.http.post(self.table_url("profiles")))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&row)
            .send()?;
        Self::check_status(response)?;
        Ok(())
    }

    // ── Achievements ───────────────────────────────────────────────────────

    /// Fetch the user's unlocked achievements (unknown keys are skipped)
    pub fn list_achievements(&self) -> SpendwiseResult<Vec<UserAchievement>> {
        let response = self
            .authed(self.http.get(self.table_url("user_achievements")))
            .query(&[self.user_filter(), ("select".into(), "*".into())])
            .send()?;
        let rows: Vec<AchievementRow> = Self::check_status(response)?.json()?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let key: AchievementKey = row.achievement_key.parse().ok()?;
                Some(UserAchievement {
                    user_id: row.user_id,
                    key,
                    unlocked_at: row.unlocked_at,
                })
            })
            .collect())
    }

    /// Insert an unlock row; existing rows are left untouched. Returns true
    /// when a new row was written.
    pub fn insert_achievement(&self, unlock: &UserAchievement) -> SpendwiseResult<bool> {
        let row = AchievementRow {
            user_id: self.session.user_id.clone(),
            achievement_key: unlock.key.as_str().to_string(),
            unlocked_at: unlock.unlocked_at,
        };
        let response = self
            .authed(self.http.post(self.table_url("user_achievements")))
            .header("Prefer", "resolution=ignore-duplicates,return=representation")
            .json(&row)
            .send()?;
        let rows: Vec<serde_json::Value> = Self::check_status(response)?.json()?;
        Ok(!rows.is_empty())
    }
}
