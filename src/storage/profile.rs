//! Profile settings repository for JSON storage
//!
//! A single-record store: the guest user's profile settings (budget
//! threshold, currency, login streak).

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendwiseError;
use crate::models::ProfileSettings;

use super::file_io::{read_json, write_json_atomic};

/// Repository for the guest profile
pub struct ProfileRepository {
    path: PathBuf,
    data: RwLock<ProfileSettings>,
}

impl ProfileRepository {
    /// Create a new profile repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(ProfileSettings::default()),
        }
    }

    /// Load the profile from disk (defaults if the file is missing)
    pub fn load(&self) -> Result<(), SpendwiseError> {
        let profile: ProfileSettings = read_json(&self.path)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = profile;
        Ok(())
    }

    /// Save the profile to disk
    pub fn save(&self) -> Result<(), SpendwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        write_json_atomic(&self.path, &*data)
    }

    /// Get a copy of the current profile
    pub fn get(&self) -> Result<ProfileSettings, SpendwiseError> {
        let data = self
            .data
            .read()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.clone())
    }

    /// Replace the profile
    pub fn set(&self, profile: ProfileSettings) -> Result<(), SpendwiseError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| SpendwiseError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = profile;
        Ok(())
    }

    /// Reset to defaults (used when archiving guest data)
    pub fn clear(&self) -> Result<(), SpendwiseError> {
        self.set(ProfileSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_default_profile_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ProfileRepository::new(temp_dir.path().join("profile.json"));
        repo.load().unwrap();

        assert_eq!(repo.get().unwrap(), ProfileSettings::default());
    }

    #[test]
    fn test_set_save_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profile.json");

        let repo = ProfileRepository::new(path.clone());
        repo.load().unwrap();

        let profile = ProfileSettings {
            budget_threshold: Some(Money::from_cents(75_000)),
            currency: "EUR".into(),
            ..Default::default()
        };
        repo.set(profile.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = ProfileRepository::new(path);
        repo2.load().unwrap();
        assert_eq!(repo2.get().unwrap(), profile);
    }
}
