//! Local storage layer for guest mode
//!
//! JSON file storage with atomic writes. Every repository holds its file's
//! contents in memory behind an RwLock and persists explicitly via `save`.

pub mod achievements;
pub mod expenses;
pub mod file_io;
pub mod goals;
pub mod profile;

pub use achievements::AchievementRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use goals::GoalRepository;
pub use profile::ProfileRepository;

use crate::config::paths::SpendwisePaths;
use crate::error::SpendwiseError;

/// Main guest-mode storage coordinator
pub struct Storage {
    paths: SpendwisePaths,
    pub expenses: ExpenseRepository,
    pub goals: GoalRepository,
    pub profile: ProfileRepository,
    pub achievements: AchievementRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: SpendwisePaths) -> Result<Self, SpendwiseError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            goals: GoalRepository::new(paths.goals_file()),
            profile: ProfileRepository::new(paths.profile_file()),
            achievements: AchievementRepository::new(paths.achievements_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &SpendwisePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), SpendwiseError> {
        self.expenses.load()?;
        self.goals.load()?;
        self.profile.load()?;
        self.achievements.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SpendwiseError> {
        self.expenses.save()?;
        self.goals.save()?;
        self.profile.save()?;
        self.achievements.save()?;
        Ok(())
    }

    /// Whether any guest data exists on disk
    pub fn has_guest_data(&self) -> bool {
        self.paths.expenses_file().exists()
            || self.paths.goals_file().exists()
            || self.paths.achievements_file().exists()
    }
}
