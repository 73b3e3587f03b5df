//! Event entry data structures
//!
//! The event log records entity CRUD, session lifecycle, and achievement
//! notifications as line-delimited JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of recorded events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Created,
    Updated,
    Deleted,
    SignedUp,
    SignedIn,
    SignedOut,
    AchievementUnlocked,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Created => write!(f, "CREATE"),
            EventKind::Updated => write!(f, "UPDATE"),
            EventKind::Deleted => write!(f, "DELETE"),
            EventKind::SignedUp => write!(f, "SIGNUP"),
            EventKind::SignedIn => write!(f, "SIGNIN"),
            EventKind::SignedOut => write!(f, "SIGNOUT"),
            EventKind::AchievementUnlocked => write!(f, "UNLOCK"),
        }
    }
}

/// Types of entities events can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Expense,
    Goal,
    Profile,
    Achievement,
    Session,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Expense => write!(f, "Expense"),
            EntityKind::Goal => write!(f, "Goal"),
            EntityKind::Profile => write!(f, "Profile"),
            EntityKind::Achievement => write!(f, "Achievement"),
            EntityKind::Session => write!(f, "Session"),
        }
    }
}

/// A single event log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEntry {
    /// When the event occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// What happened
    pub kind: EventKind,

    /// What it happened to
    pub entity: EntityKind,

    /// Acting user id (or the guest sentinel)
    pub user_id: String,

    /// ID of the affected entity, where applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,

    /// Human-readable detail (expense description, badge name, email)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl EventEntry {
    /// Create an event entry stamped with the current time
    pub fn new(kind: EventKind, entity: EntityKind, user_id: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            entity,
            user_id: user_id.into(),
            entity_id: None,
            detail: None,
        }
    }

    /// Attach an entity id
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Attach a human-readable detail
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for EventEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.kind,
            self.entity
        )?;
        if let Some(detail) = &self.detail {
            write!(f, " - {}", detail)?;
        }
        Ok(())
    }
}
