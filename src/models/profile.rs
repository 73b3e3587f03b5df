//! Profile settings model
//!
//! Per-user settings: monthly budget threshold, currency code, and the login
//! streak counters used by the achievement rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// The sentinel user id for unauthenticated (guest) data
pub const GUEST_USER_ID: &str = "guest";

/// Per-user profile settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSettings {
    /// Monthly spending ceiling; None means no budget configured
    #[serde(default)]
    pub budget_threshold: Option<Money>,

    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Date of the most recent recorded login
    #[serde(default)]
    pub last_login: Option<NaiveDate>,

    /// Consecutive-day login streak
    #[serde(default)]
    pub current_streak: u32,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            budget_threshold: None,
            currency: default_currency(),
            last_login: None,
            current_streak: 0,
        }
    }
}

impl ProfileSettings {
    /// Validate the profile settings
    pub fn validate(&self) -> Result<(), String> {
        if let Some(threshold) = self.budget_threshold {
            if !threshold.is_positive() {
                return Err(format!(
                    "Budget threshold must be positive, got {}",
                    threshold
                ));
            }
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(format!(
                "Currency must be a 3-letter ISO code, got '{}'",
                self.currency
            ));
        }
        Ok(())
    }

    /// Merge remote settings over guest settings during reconciliation
    ///
    /// Remote values win per field when set; a missing remote budget threshold
    /// is filled from the guest value. Returns true when the merged result
    /// differs from the remote input (i.e. a push-back is needed).
    pub fn merge_remote_over_guest(remote: &ProfileSettings, guest: &ProfileSettings) -> (Self, bool) {
        let mut merged = remote.clone();
        let mut changed = false;

        if merged.budget_threshold.is_none() && guest.budget_threshold.is_some() {
            merged.budget_threshold = guest.budget_threshold;
            changed = true;
        }

        (merged, changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = ProfileSettings::default();
        assert_eq!(p.currency, "USD");
        assert!(p.budget_threshold.is_none());
        assert_eq!(p.current_streak, 0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_currency() {
        let mut p = ProfileSettings::default();
        p.currency = "usd".into();
        assert!(p.validate().is_err());
        p.currency = "EURO".into();
        assert!(p.validate().is_err());
        p.currency = "EUR".into();
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_threshold() {
        let mut p = ProfileSettings::default();
        p.budget_threshold = Some(Money::zero());
        assert!(p.validate().is_err());
        p.budget_threshold = Some(Money::from_cents(50_000));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_merge_fills_missing_remote_threshold() {
        let guest = ProfileSettings {
            budget_threshold: Some(Money::from_cents(30_000)),
            ..Default::default()
        };
        let remote = ProfileSettings::default();

        let (merged, changed) = ProfileSettings::merge_remote_over_guest(&remote, &guest);
        assert!(changed);
        assert_eq!(merged.budget_threshold, Some(Money::from_cents(30_000)));
    }

    #[test]
    fn test_merge_keeps_remote_threshold() {
        let guest = ProfileSettings {
            budget_threshold: Some(Money::from_cents(30_000)),
            ..Default::default()
        };
        let remote = ProfileSettings {
            budget_threshold: Some(Money::from_cents(80_000)),
            ..Default::default()
        };

        let (merged, changed) = ProfileSettings::merge_remote_over_guest(&remote, &guest);
        assert!(!changed);
        assert_eq!(merged.budget_threshold, Some(Money::from_cents(80_000)));
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let p: ProfileSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(p, ProfileSettings::default());
    }
}
