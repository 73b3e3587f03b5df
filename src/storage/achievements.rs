//! Achievement unlock repository for JSON storage

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendwiseError;
use crate::models::{AchievementKey, UserAchievement};

use super::file_io::{read_json, write_json_atomic};

/// Serializable achievement file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AchievementData {
    unlocked: Vec<UserAchievement>,
}

/// Repository for achievement unlock rows
pub struct AchievementRepository {
    path: PathBuf,
    data: RwLock<Vec<UserAchievement>>,
}

impl AchievementRepository {
    /// Create a new achievement repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load unlock rows from disk
    pub fn load(&self) -> Result<(), SpendwiseError> {
        let file_data: AchievementData = read_json(&self.path)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data.unlocked;
        Ok(())
    }

    /// Save unlock rows to disk
    pub fn save(&self) -> Result<(), SpendwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        write_json_atomic(
            &self.path,
            &AchievementData {
                unlocked: data.clone(),
            },
        )
    }

    /// All unlock rows
    pub fn get_all(&self) -> Result<Vec<UserAchievement>, SpendwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.clone())
    }

    /// Whether a badge is already unlocked
    pub fn is_unlocked(&self, key: AchievementKey) -> Result<bool, SpendwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.iter().any(|a| a.key == key))
    }

    /// Insert an unlock row if not already present. Returns true when newly
    /// inserted.
    pub fn insert(&self, unlock: UserAchievement) -> Result<bool, SpendwiseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        if data.iter().any(|a| a.key == unlock.key) {
            return Ok(false);
        }
        data.push(unlock);
        Ok(true)
    }

    /// Remove all unlock rows (used when archiving guest data)
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
    use tempfile::TempDir;

    #[test]
    fn test_insert_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let repo = AchievementRepository::new(temp_dir.path().join("achievements.json"));
        repo.load().unwrap();

        let unlock = UserAchievement::new("guest", AchievementKey::FirstExpense);
        assert!(repo.insert(unlock.clone()).unwrap());
        assert!(!repo.insert(unlock).unwrap());
        assert!(repo.is_unlocked(AchievementKey::FirstExpense).unwrap());
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("achievements.json");

        let repo = AchievementRepository::new(path.clone());
        repo.load().unwrap();
        repo.insert(UserAchievement::new("guest", AchievementKey::Streak7))
            .unwrap();
        repo.save().unwrap();

        let repo2 = AchievementRepository::new(path);
        repo2.load().unwrap();
        assert!(repo2.is_unlocked(AchievementKey::Streak7).unwrap());
        assert!(!repo2.is_unlocked(AchievementKey::GoalReached).unwrap());
    }
}
