//! Savings goal repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendwiseError;
use crate::models::{GoalId, SavingsGoal};

use super::file_io::{read_json, write_json_atomic};

/// Serializable goal file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GoalData {
    goals: Vec<SavingsGoal>,
}

/// Repository for savings goal persistence
pub struct GoalRepository {
    path: PathBuf,
    data: RwLock<HashMap<GoalId, SavingsGoal>>,
}

impl GoalRepository {
    /// Create a new goal repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load goals from disk
    pub fn load(&self) -> Result<(), SpendwiseError> {
        let file_data: GoalData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for goal in file_data.goals {
            data.insert(goal.id, goal);
        }

        Ok(())
    }

    /// Save goals to disk, ordered by creation time
    pub fn save(&self) -> Result<(), SpendwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut goals: Vec<_> = data.values().cloned().collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        write_json_atomic(&self.path, &GoalData { goals })
    }

    /// Get a goal by ID
    pub fn get(&self, id: GoalId) -> Result<Option<SavingsGoal>, SpendwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.get(&id).cloned())
    }

    /// Get a goal by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<SavingsGoal>, SpendwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data
            .values()
            .find(|g| g.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// Get all goals ordered by creation time
    pub fn get_all(&self) -> Result<Vec<SavingsGoal>, SpendwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut goals: Vec<_> = data.values().cloned().collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(goals)
    }

    /// Insert or update a goal
    pub fn upsert(&self, goal: SavingsGoal) -> Result<(), SpendwiseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.insert(goal.id, goal);
        Ok(())
    }

    /// Delete a goal, returning whether it existed
    pub fn delete(&self, id: GoalId) -> Result<bool, SpendwiseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(data.remove(&id).is_some())
    }

    /// Remove all goals (used when archiving guest data)
    pub fn clear(&self) -> Result<(), SpendwiseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn repo() -> (TempDir, GoalRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = GoalRepository::new(temp_dir.path().join("goals.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_upsert_and_get_by_name() {
        let (_tmp, repo) = repo();
        let goal = SavingsGoal::new("Vacation", Money::from_cents(50_000));
        repo.upsert(goal.clone()).unwrap();

        let found = repo.get_by_name("vacation").unwrap().unwrap();
        assert_eq!(found.id, goal.id);
        assert!(repo.get_by_name("missing").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("goals.json");

        let repo = GoalRepository::new(path.clone());
        repo.load().unwrap();
        repo.upsert(SavingsGoal::new("Car", Money::from_cents(1_000_000)))
            .unwrap();
        repo.save().unwrap();

        let repo2 = GoalRepository::new(path);
        repo2.load().unwrap();
        assert_eq!(repo2.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_delete() {
        let (_tmp, repo) = repo();
        let goal = SavingsGoal::new("Bike", Money::from_cents(30_000));
        let id = goal.id;
        repo.upsert(goal).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
    }
}
