//! Savings goal service

use chrono::NaiveDate;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::events::{EntityKind, EventEntry, EventKind, EventLogger};
use crate::models::{GoalId, Money, SavingsGoal};
use crate::store::Store;

/// Result of a contribution, carrying whether the goal just hit its target
#[derive(Debug)]
pub struct ContributionOutcome {
    pub goal: SavingsGoal,
    /// Amount actually applied after clamping at the target
    pub applied: Money,
    /// True only on the transition to fully funded
    pub newly_reached: bool,
}

/// Service for savings goal management
pub struct GoalService<'a> {
    store: &'a dyn Store,
    events: &'a EventLogger,
}

impl<'a> GoalService<'a> {
    pub fn new(store: &'a dyn Store, events: &'a EventLogger) -> Self {
        Self { store, events }
    }

    /// Create a new savings goal
    pub fn create(
        &self,
        name: String,
        target: Money,
        target_date: Option<NaiveDate>,
    ) -> SpendwiseResult<SavingsGoal> {
        if self.find_by_name(&name)?.is_some() {
            return Err(SpendwiseError::Duplicate {
                entity_type: "Goal",
                identifier: name,
            });
        }

        let mut goal = SavingsGoal::new(name, target);
        if let Some(date) = target_date {
            goal = goal.with_target_date(date);
        }
        goal.validate()
            .map_err(|e| SpendwiseError::Validation(e.to_string()))?;

        self.store.insert_goal(&goal)?;
        self.events.log(
            &EventEntry::new(EventKind::Created, EntityKind::Goal, self.store.user_id())
                .with_entity_id(goal.id.as_uuid().to_string())
                .with_detail(goal.name.clone()),
        )?;

        Ok(goal)
    }

    /// Add funds to a goal, clamping at the target
    pub fn contribute(&self, id: GoalId, amount: Money) -> SpendwiseResult<ContributionOutcome> {
        if !amount.is_positive() {
            return Err(SpendwiseError::Validation(
                "Contribution amount must be positive".into(),
            ));
        }

        let mut goal = self
            .store
            .get_goal(id)?
            .ok_or_else(|| SpendwiseError::goal_not_found(id.to_string()))?;

        let was_reached = goal.is_reached();
        let applied = goal.contribute(amount);
        self.store.update_goal(&goal)?;

        self.events.log(
            &EventEntry::new(EventKind::Updated, EntityKind::Goal, self.store.user_id())
                .with_entity_id(goal.id.as_uuid().to_string())
                .with_detail(format!("contributed {}", applied)),
        )?;

        Ok(ContributionOutcome {
            newly_reached: !was_reached && goal.is_reached(),
            applied,
            goal,
        })
    }

    /// Take funds out of a goal, clamping at zero
    pub fn withdraw(&self, id: GoalId, amount: Money) -> SpendwiseResult<(SavingsGoal, Money)> {
        if !amount.is_positive() {
            return Err(SpendwiseError::Validation(
                "Withdrawal amount must be positive".into(),
            ));
        }

        let mut goal = self
            .store
            .get_goal(id)?
            .ok_or_else(|| SpendwiseError::goal_not_found(id.to_string()))?;

        let removed = goal.withdraw(amount);
        self.store.update_goal(&goal)?;

        self.events.log(
            &EventEntry::new(EventKind::Updated, EntityKind::Goal, self.store.user_id())
                .with_entity_id(goal.id.as_uuid().to_string())
                .with_detail(format!("withdrew {}", removed)),
        )?;

        Ok((goal, removed))
    }

    /// Delete a goal
    pub fn delete(&self, id: GoalId) -> SpendwiseResult<()> {
        if !self.store.delete_goal(id)? {
            return Err(SpendwiseError::goal_not_found(id.to_string()));
        }
        self.events.log(
            &EventEntry::new(EventKind::Deleted, EntityKind::Goal, self.store.user_id())
                .with_entity_id(id.as_uuid().to_string()),
        )?;
        Ok(())
    }

    /// List all goals
    pub fn list(&self) -> SpendwiseResult<Vec<SavingsGoal>> {
        self.store.list_goals()
    }

    /// Case-insensitive name lookup
    pub fn find_by_name(&self, name: &str) -> SpendwiseResult<Option<SavingsGoal>> {
        let lower = name.to_lowercase();
        Ok(self
            .store
            .list_goals()?
            .into_iter()
            .find(|g| g.name.to_lowercase() == lower))
    }

    /// Resolve a goal from an id, a short `goal-` prefix, or a name
    pub fn resolve(&self, identifier: &str) -> SpendwiseResult<SavingsGoal> {
        if let Ok(id) = identifier.parse::<GoalId>() {
            if let Some(goal) = self.store.get_goal(id)? {
                return Ok(goal);
            }
        }

        let needle = identifier.strip_prefix("goal-").unwrap_or(identifier);
        let prefix_matches: Vec<_> = self
            .store
            .list_goals()?
            .into_iter()
            .filter(|g| g.id.as_uuid().to_string().starts_with(needle))
            .collect();
        if prefix_matches.len() == 1 {
            if let Some(goal) = prefix_matches.into_iter().next() {
                return Ok(goal);
            }
        }

        self.find_by_name(identifier)?
            .ok_or_else(|| SpendwiseError::goal_not_found(identifier.to_string()))
    }
}
