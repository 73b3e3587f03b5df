//! Persisted auth session
//!
//! The session returned by the hosted auth endpoints is stored as JSON next
//! to the config file. Its presence (and freshness) is what switches the app
//! from guest mode to the remote store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths::SpendwisePaths;
use crate::error::{SpendwiseError, SpendwiseResult};

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token sent with every REST request
    pub access_token: String,

    /// Token used to mint a new access token (not yet exercised automatically)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// When the access token expires
    pub expires_at: DateTime<Utc>,

    /// Authenticated user id
    pub user_id: String,

    /// Email the user signed in with
    pub email: String,
}

impl Session {
    /// Whether the access token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Load the session from disk; None when absent
    pub fn load(paths: &SpendwisePaths) -> SpendwiseResult<Option<Session>> {
        let path = paths.session_file();
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| SpendwiseError::Io(format!("Failed to read session file: {}", e)))?;
        let session: Session = serde_json::from_str(&contents)
            .map_err(|e| SpendwiseError::Auth(format!("Failed to parse session file: {}", e)))?;
        Ok(Some(session))
    }

    /// Save the session to disk
    pub fn save(&self, paths: &SpendwisePaths) -> SpendwiseResult<()> {
        paths.ensure_directories()?;
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.session_file(), contents)
            .map_err(|e| SpendwiseError::Io(format!("Failed to write session file: {}", e)))?;
        Ok(())
    }

    /// Remove the persisted session, if any
    pub fn remove(paths: &SpendwisePaths) -> SpendwiseResult<()> {
        let path = paths.session_file();
        if path.exists() {
            std::fs::remove_file(&path)
                .map_err(|e| SpendwiseError::Io(format!("Failed to remove session file: {}", e)))?;
        }
        Ok(())
    }
}
